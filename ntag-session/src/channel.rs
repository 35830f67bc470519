//! Command channel over a device link
//!
//! The tag reader talks to the tag through a [`CommandChannel`]: one command
//! out, one interpreted payload back. [`InterpretingChannel`] provides it on
//! top of a raw [`DeviceLink`] by running each frame through a
//! [`ResponseInterpreter`].

use crate::response::ResponseInterpreter;
use async_trait::async_trait;
use ntag_core::{NtagError, NtagResult};
use ntag_transport::DeviceLink;
use std::time::Duration;

/// Command/payload capability consumed by the tag reader
#[async_trait]
pub trait CommandChannel: Send {
    /// Send an NFC command and return the interpreted payload as hex
    ///
    /// An empty string means the command succeeded without data.
    ///
    /// # Errors
    /// Transport failures, or the status kinds of response interpretation.
    async fn send(&mut self, command: String, last_command: bool) -> NtagResult<String>;

    /// Record a timeout hint for the next read sequence
    async fn set_timeout(&mut self, _timeout: Option<Duration>) -> NtagResult<()> {
        Ok(())
    }
}

/// [`CommandChannel`] over a raw device link
///
/// After every successfully interpreted command the channel pauses for the
/// settle delay before returning, giving the device time before the next
/// command. A zero delay disables the pause.
#[derive(Debug)]
pub struct InterpretingChannel<L> {
    link: L,
    interpreter: ResponseInterpreter,
    settle: Duration,
    debug_enabled: bool,
}

impl<L: DeviceLink> InterpretingChannel<L> {
    /// Create a channel with the default interpreter and no settle delay
    pub fn new(link: L) -> Self {
        Self {
            link,
            interpreter: ResponseInterpreter::new(),
            settle: Duration::ZERO,
            debug_enabled: false,
        }
    }

    /// Set the pause after each command
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Use a custom response interpreter
    pub fn with_interpreter(mut self, interpreter: ResponseInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Log commands and raw frames at debug level
    pub fn with_debug(mut self, debug_enabled: bool) -> Self {
        self.debug_enabled = debug_enabled;
        self
    }

    /// Get the underlying link
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Consume the channel, returning the link
    pub fn into_link(self) -> L {
        self.link
    }
}

#[async_trait]
impl<L: DeviceLink> CommandChannel for InterpretingChannel<L> {
    async fn send(&mut self, command: String, last_command: bool) -> NtagResult<String> {
        if self.debug_enabled {
            log::debug!("Send NFC command {} (last: {})", command, last_command);
        }

        let frame = self.link.send_nfc_command(command, last_command).await?;
        if self.debug_enabled {
            log::debug!("Device response {}", frame.as_deref().unwrap_or("<none>"));
        }

        let payload = self
            .interpreter
            .interpret_hex(frame.as_deref())
            .inspect_err(|e: &NtagError| {
                if self.debug_enabled {
                    log::debug!("Response rejected: {}", e);
                }
            })?;

        if !self.settle.is_zero() {
            tokio::time::sleep(self.settle).await;
        }
        Ok(payload)
    }

    async fn set_timeout(&mut self, timeout: Option<Duration>) -> NtagResult<()> {
        self.link.set_timeout(timeout).await
    }
}
