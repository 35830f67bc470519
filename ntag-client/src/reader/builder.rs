//! Reader builder
//!
//! ```rust,no_run
//! use ntag_client::reader::ReaderBuilder;
//! use std::time::Duration;
//!
//! # fn build(link: impl ntag_transport::DeviceLink, decoder: impl ntag_client::ndef::NdefDecoder) {
//! let reader = ReaderBuilder::new()
//!     .debug(false)
//!     .command_settle(Duration::from_millis(50))
//!     .build(link, decoder);
//! # }
//! ```

use crate::ndef::NdefDecoder;
use crate::reader::nfc_reader::NfcReader;
use crate::settings::ReaderSettings;
use ntag_session::{InterpretingChannel, ResponseInterpreter};
use ntag_tlv::ber::BerTlvDecoder;
use ntag_transport::DeviceLink;
use std::time::Duration;

/// Builder for an [`NfcReader`] over a device link
#[derive(Debug, Clone, Default)]
pub struct ReaderBuilder {
    settings: ReaderSettings,
    payload_tag: Option<String>,
    strict_tlv: bool,
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all settings
    pub fn settings(mut self, settings: ReaderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn debug(mut self, debug_enabled: bool) -> Self {
        self.settings.debug_enabled = debug_enabled;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    pub fn command_settle(mut self, settle: Duration) -> Self {
        self.settings.command_settle = settle;
        self
    }

    /// Look for the payload under another BER-TLV tag (hex)
    pub fn payload_tag(mut self, tag: &str) -> Self {
        self.payload_tag = Some(tag.to_string());
        self
    }

    /// Decode response frames with [`BerTlvDecoder::strict`]
    pub fn strict_tlv(mut self, strict: bool) -> Self {
        self.strict_tlv = strict;
        self
    }

    /// Build the reader
    pub fn build<L: DeviceLink, D: NdefDecoder>(
        self,
        link: L,
        decoder: D,
    ) -> NfcReader<InterpretingChannel<L>, D> {
        let interpreter = match &self.payload_tag {
            Some(tag) => ResponseInterpreter::with_payload_tag(tag),
            None => ResponseInterpreter::new(),
        };
        let tlv_decoder = if self.strict_tlv {
            BerTlvDecoder::strict()
        } else {
            BerTlvDecoder::new()
        };

        let channel = InterpretingChannel::new(link)
            .with_interpreter(interpreter.with_decoder(tlv_decoder))
            .with_settle(self.settings.command_settle)
            .with_debug(self.settings.debug_enabled);
        NfcReader::new(channel, decoder, self.settings)
    }
}
