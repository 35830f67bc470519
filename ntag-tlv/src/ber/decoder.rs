//! BER-TLV frame decoder
//!
//! # Usage Example
//!
//! ```rust
//! use ntag_tlv::ber::BerTlvDecoder;
//!
//! let frame = [0x00, 0x04, 0x5A, 0x02, 0xDE, 0xAD];
//! let tlvs = BerTlvDecoder::new().decode(&frame);
//! assert_eq!(tlvs["5A"].value_hex().as_deref(), Some("dead"));
//! ```

use crate::ber::types::{is_constructed_tag, tag_key, TlvMap, TlvNode};

/// Maximum number of bytes collected for a single tag
pub const MAX_TAG_BYTES: usize = 50;

/// Size of the outer length header skipped by [`BerTlvDecoder::decode`]
pub const FRAME_HEADER_LENGTH: usize = 2;

const MORE_TAG_BYTES_FIRST: u8 = 0x1F;
const MORE_TAG_BYTES_NEXT: u8 = 0x80;
const LONG_LENGTH_FLAG: u8 = 0x80;
const SHORT_LENGTH_MASK: u8 = 0x7F;

/// Sentinel compared against tag bytes: the ASCII characters `"00"`
///
/// Only as many bytes as the tag holds are compared, so the one-byte tag
/// `0x30` (`'0'`) matches too.
const SKIPPED_TAG: &[u8] = b"00";

/// Byte cursor over a header-stripped frame
///
/// Reads never fail; callers check [`FrameCursor::has_remaining`] and treat
/// exhaustion as the end of the frame.
struct FrameCursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> FrameCursor<'a> {
    fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, position: 0 }
    }

    fn has_remaining(&self) -> bool {
        self.position < self.buffer.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.buffer.get(self.position)?;
        self.position += 1;
        Some(byte)
    }

    /// Take up to `count` bytes, advancing the position by the full `count`
    ///
    /// The position may run past the end of the buffer, which ends the scan.
    fn take_clamped(&mut self, count: usize) -> &'a [u8] {
        let buffer = self.buffer;
        let start = self.position.min(buffer.len());
        let end = start.saturating_add(count).min(buffer.len());
        self.skip(count);
        &buffer[start..end]
    }

    fn skip(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }
}

/// BER-TLV decoder for device response frames
///
/// Decoding never fails. A truncated frame yields the nodes that could be
/// read, and a primitive value cut short keeps its declared length with the
/// bytes that were available. Callers needing strictness check node
/// completeness themselves.
///
/// # Modes
/// - [`BerTlvDecoder::new`]: reference-compatible (see the module docs)
/// - [`BerTlvDecoder::strict`]: full-width lengths, constructed content skipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BerTlvDecoder {
    strict: bool,
}

impl BerTlvDecoder {
    /// Create a reference-compatible decoder
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Create a decoder with corrected length and constructed handling
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Check if this decoder runs in strict mode
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Decode a frame whose first two bytes are an outer length header
    ///
    /// The header is skipped without validation. Buffers shorter than the
    /// header decode to an empty map.
    pub fn decode(&self, framed: &[u8]) -> TlvMap {
        let mut tlvs = TlvMap::new();
        if framed.len() < FRAME_HEADER_LENGTH {
            return tlvs;
        }

        let mut cursor = FrameCursor::new(&framed[FRAME_HEADER_LENGTH..]);
        while cursor.has_remaining() {
            let tag = Self::read_tag(&mut cursor);
            if !cursor.has_remaining() {
                break;
            }
            let length = self.read_length(&mut cursor);

            if self.is_skipped_tag(&tag) {
                continue;
            }

            let node = if tag.first().copied().is_some_and(is_constructed_tag) {
                if self.strict {
                    cursor.skip(length);
                }
                TlvNode::constructed(tag, length)
            } else {
                let value = cursor.take_clamped(length).to_vec();
                TlvNode::primitive(tag, length, value)
            };

            tlvs.insert(tag_key(node.tag()), node);
        }

        tlvs
    }

    /// Decode a frame that carries no outer length header
    ///
    /// A header holding the buffer's own length (big-endian 16-bit) is
    /// prepended and the result handed to [`BerTlvDecoder::decode`].
    pub fn decode_without_header(&self, data: &[u8]) -> TlvMap {
        let header = u16::try_from(data.len()).unwrap_or(u16::MAX).to_be_bytes();
        let mut framed = Vec::with_capacity(data.len() + FRAME_HEADER_LENGTH);
        framed.extend_from_slice(&header);
        framed.extend_from_slice(data);
        self.decode(&framed)
    }

    /// Check the tag against the `"00"` sentinel
    ///
    /// A matching tag is not stored and its value is not skipped, so the
    /// value bytes are scanned as the next tag. Strict mode has no sentinel.
    fn is_skipped_tag(&self, tag: &[u8]) -> bool {
        !self.strict && tag.len() <= SKIPPED_TAG.len() && tag == &SKIPPED_TAG[..tag.len()]
    }

    /// Read tag bytes
    ///
    /// Called only with at least one byte remaining.
    fn read_tag(cursor: &mut FrameCursor<'_>) -> Vec<u8> {
        let mut tag = Vec::with_capacity(2);
        let Some(first) = cursor.read_byte() else {
            return tag;
        };
        tag.push(first);

        let mut more = first & MORE_TAG_BYTES_FIRST == MORE_TAG_BYTES_FIRST;
        while more && tag.len() < MAX_TAG_BYTES {
            let Some(byte) = cursor.read_byte() else {
                break;
            };
            tag.push(byte);
            more = byte & MORE_TAG_BYTES_NEXT == MORE_TAG_BYTES_NEXT;
        }
        tag
    }

    /// Read a short- or long-form length
    ///
    /// Length bytes missing at the end of the frame are ignored.
    fn read_length(&self, cursor: &mut FrameCursor<'_>) -> usize {
        let Some(first) = cursor.read_byte() else {
            return 0;
        };
        if first & LONG_LENGTH_FLAG == 0 {
            return usize::from(first & SHORT_LENGTH_MASK);
        }

        let count = first & SHORT_LENGTH_MASK;
        let mut length = 0usize;
        for _ in 0..count {
            let Some(byte) = cursor.read_byte() else {
                break;
            };
            length = if self.strict {
                length.saturating_mul(256).saturating_add(usize::from(byte))
            } else {
                ((length & 0xFF) << 8) + usize::from(byte)
            };
        }
        length
    }
}
