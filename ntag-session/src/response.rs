//! Device response interpretation
//!
//! A response frame is a hex string: an 8-character (4-byte) status/header
//! prefix, optionally followed by a BER-TLV payload region.
//!
//! # Rules
//!
//! | frame                 | result                                         |
//! |-----------------------|------------------------------------------------|
//! | no response           | `Unknown`                                      |
//! | longer than 8 chars   | value of the payload tag, else `NoContent`     |
//! | exactly 8 chars       | empty payload if it starts with `0000`, else `StatusCode(first 4 chars)` |
//! | shorter than 8 chars  | `InvalidResponse`                              |

use ntag_core::{hex_to_bytes, bytes_to_hex, NtagError, NtagResult};
use ntag_tlv::ber::BerTlvDecoder;

/// Tag carrying the payload of an extended device response
pub const EXTENDED_RESPONSE_TAG: &str = "DF7A";

/// Length of the status/header prefix in hex characters
pub const STATUS_PREFIX_LENGTH: usize = 8;

/// Length of the device status word in hex characters
const STATUS_WORD_LENGTH: usize = 4;

/// Status word prefix of a successful response without data
const SUCCESS_STATUS: &str = "0000";

/// Outcome of a successfully interpreted response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// Payload bytes found under the payload tag
    Payload(Vec<u8>),
    /// The operation succeeded without data
    Empty,
}

impl Interpretation {
    /// Payload bytes, empty for [`Interpretation::Empty`]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Interpretation::Payload(bytes) => bytes,
            Interpretation::Empty => Vec::new(),
        }
    }
}

/// Classifies raw device frames
#[derive(Debug, Clone)]
pub struct ResponseInterpreter {
    payload_tag: String,
    decoder: BerTlvDecoder,
}

impl Default for ResponseInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseInterpreter {
    /// Create an interpreter looking for [`EXTENDED_RESPONSE_TAG`]
    pub fn new() -> Self {
        Self::with_payload_tag(EXTENDED_RESPONSE_TAG)
    }

    /// Create an interpreter looking for another payload tag (hex, any case)
    pub fn with_payload_tag(tag: &str) -> Self {
        Self {
            payload_tag: tag.to_uppercase(),
            decoder: BerTlvDecoder::new(),
        }
    }

    /// Use a different BER-TLV decoder, e.g. [`BerTlvDecoder::strict`]
    pub fn with_decoder(mut self, decoder: BerTlvDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// Get the payload tag key
    pub fn payload_tag(&self) -> &str {
        &self.payload_tag
    }

    /// Interpret a response frame
    ///
    /// # Arguments
    /// * `response` - Raw frame, `None` if the device produced no response
    ///
    /// # Errors
    /// `Unknown`, `NoContent`, `StatusCode` or `InvalidResponse`, per the
    /// rules in the module docs. A payload region that is not valid hex is
    /// `InvalidResponse`.
    pub fn interpret(&self, response: Option<&str>) -> NtagResult<Interpretation> {
        let response = response.ok_or(NtagError::Unknown)?;

        if response.len() > STATUS_PREFIX_LENGTH {
            let region = response
                .get(STATUS_PREFIX_LENGTH..)
                .ok_or(NtagError::InvalidResponse)?;
            let bytes = hex_to_bytes(region).map_err(|_| NtagError::InvalidResponse)?;
            let tlvs = self.decoder.decode_without_header(&bytes);
            let payload = tlvs
                .get(&self.payload_tag)
                .and_then(|node| node.value_bytes())
                .ok_or(NtagError::NoContent)?;
            Ok(Interpretation::Payload(payload.to_vec()))
        } else if response.len() == STATUS_PREFIX_LENGTH {
            if response.starts_with(SUCCESS_STATUS) {
                Ok(Interpretation::Empty)
            } else {
                let status = response
                    .get(..STATUS_WORD_LENGTH)
                    .ok_or(NtagError::InvalidResponse)?;
                Err(NtagError::StatusCode(status.to_string()))
            }
        } else {
            Err(NtagError::InvalidResponse)
        }
    }

    /// Interpret a response frame, returning the payload as lowercase hex
    ///
    /// An empty success yields an empty string.
    pub fn interpret_hex(&self, response: Option<&str>) -> NtagResult<String> {
        self.interpret(response)
            .map(|interpretation| bytes_to_hex(&interpretation.into_bytes()))
    }
}
