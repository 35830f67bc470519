//! Simple TLV decoder for the tag's NDEF container
//!
//! Tag user memory holds a stream of TLV blocks with single-byte tags:
//!
//! ```text
//! [Tag] [Length] [Value]          length < 0xFF
//! [Tag] 0xFF [Len Hi] [Len Lo] [Value]
//! ```
//!
//! The stream ends at the terminator tag `0xFE` or at the end of the buffer.
//! Order is preserved: NDEF TLV containers are order-sensitive.

/// Terminator TLV tag
pub const TERMINATOR_TAG: u8 = 0xFE;

/// Length byte announcing a two-byte big-endian length
pub const EXTENDED_LENGTH_MARKER: u8 = 0xFF;

/// NDEF message TLV tag
pub const NDEF_MESSAGE_TAG: u8 = 0x03;

/// A TLV block read from tag memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTlvRecord {
    pub tag: u8,
    pub value: Vec<u8>,
}

impl SimpleTlvRecord {
    pub fn new(tag: u8, value: Vec<u8>) -> Self {
        Self { tag, value }
    }

    /// Check if this block holds an NDEF message
    pub fn is_ndef_message(&self) -> bool {
        self.tag == NDEF_MESSAGE_TAG
    }
}

/// Decoder for the simple TLV stream
///
/// Truncated trailing data is not an error: a tag without length, or an
/// extended length missing a byte, ends the stream, and a value cut short
/// by the end of the buffer is kept with the bytes available.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTlvDecoder;

impl SimpleTlvDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode all TLV blocks in scan order
    pub fn decode(&self, data: &[u8]) -> Vec<SimpleTlvRecord> {
        let mut records = Vec::new();
        let mut index = 0;

        while index < data.len() {
            let tag = data[index];
            index += 1;
            if tag == TERMINATOR_TAG {
                break;
            }

            let Some(&length_byte) = data.get(index) else {
                break;
            };
            index += 1;

            let length = if length_byte == EXTENDED_LENGTH_MARKER {
                let Some(extended) = data.get(index..index + 2) else {
                    break;
                };
                index += 2;
                usize::from(u16::from_be_bytes([extended[0], extended[1]]))
            } else {
                usize::from(length_byte)
            };

            let end = (index + length).min(data.len());
            records.push(SimpleTlvRecord::new(tag, data[index..end].to_vec()));
            index = end;
        }

        records
    }
}
