//! BER-TLV decoder for device response frames
//!
//! Device responses carry their payload as BER-TLV. Each value is encoded
//! as a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! ## Tag Encoding
//!
//! ```text
//! Bits: 8 7 6 5 4 3 2 1
//!       C C P T T T T T
//! ```
//! - P = Primitive (0) or Constructed (1)
//! - TTTTT = 11111 indicates that more tag bytes follow; each following
//!   byte with bit 8 set announces yet another byte
//!
//! ## Length Encoding
//!
//! - **Short form** (1 byte): bit 8 = 0, bits 7-1 = length
//! - **Long form**: bit 8 = 1, bits 7-1 = number of following length bytes,
//!   which hold the big-endian length
//!
//! # Decoding Result
//!
//! Frames are decoded into a flat [`TlvMap`] keyed by the uppercase hex tag.
//! A later occurrence of the same tag replaces an earlier one. Constructed
//! values are not parsed recursively.
//!
//! # Compatibility
//!
//! The default decoder reproduces the behavior readers of these devices
//! have always had:
//! 1. constructed nodes do not skip their declared content, so the content
//!    is scanned as sibling TLVs;
//! 2. multi-byte lengths keep only the low byte of the running value before
//!    each shift, truncating lengths that need more than two bytes;
//! 3. a tag matching the prefix of ASCII `"00"` (`0x30`, or `0x30 0x30`) is
//!    dropped after its length, without skipping its value.
//!
//! [`BerTlvDecoder::strict`] corrects all three.

pub mod decoder;
pub mod types;

pub use decoder::{BerTlvDecoder, MAX_TAG_BYTES};
pub use types::{TlvMap, TlvNode, TlvValue};
