//! Device link trait for card-reader accessories

use async_trait::async_trait;
use ntag_core::NtagResult;
use std::time::Duration;

/// Raw command capability of a connected card-reader accessory
///
/// # Wire Format
/// Commands are even-length hex strings: a one-byte NFC opcode followed by
/// its parameters. Responses are the raw device frame as hex: a 4-byte
/// status/header prefix optionally followed by a BER-TLV payload region.
///
/// # Last Command
/// `last_command` tells the device that the tag session ends with this
/// command. Devices typically beep and release the tag.
#[async_trait]
pub trait DeviceLink: Send {
    /// Send an NFC command to the tag through the device
    ///
    /// # Returns
    /// The raw response frame, or `None` if the device produced no response.
    ///
    /// # Errors
    /// Returns `NtagError::Transport` for driver-level failures.
    async fn send_nfc_command(
        &mut self,
        command: String,
        last_command: bool,
    ) -> NtagResult<Option<String>>;

    /// Record the timeout the driver should apply to the next read sequence
    ///
    /// `None` means no timeout. The default implementation ignores the hint.
    async fn set_timeout(&mut self, _timeout: Option<Duration>) -> NtagResult<()> {
        Ok(())
    }
}

#[async_trait]
impl<L: DeviceLink + ?Sized> DeviceLink for Box<L> {
    async fn send_nfc_command(
        &mut self,
        command: String,
        last_command: bool,
    ) -> NtagResult<Option<String>> {
        (**self).send_nfc_command(command, last_command).await
    }

    async fn set_timeout(&mut self, timeout: Option<Duration>) -> NtagResult<()> {
        (**self).set_timeout(timeout).await
    }
}
