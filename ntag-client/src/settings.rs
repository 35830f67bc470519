//! Reader configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reader settings
///
/// # Fields
/// - `debug_enabled`: log commands and raw device frames at debug level
/// - `timeout`: hint recorded with the device before a read sequence
/// - `command_settle`: pause after each command before the next is sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    pub debug_enabled: bool,
    pub timeout: Duration,
    pub command_settle: Duration,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            debug_enabled: true,
            timeout: Duration::from_secs(20),
            command_settle: Duration::from_millis(100),
        }
    }
}

impl ReaderSettings {
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            ..Self::default()
        }
    }
}
