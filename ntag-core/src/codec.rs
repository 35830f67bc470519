//! Hexadecimal codec
//!
//! Hex ASCII strings are the wire representation at every boundary of the
//! reader: commands go out as hex, frames and payloads come back as hex.

use crate::error::{NtagError, NtagResult};

/// Encode bytes as lowercase hex, two digits per byte, no separators
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string into bytes
///
/// Accepts either letter case.
///
/// # Error Handling
/// Returns `MalformedHex` if the length is odd or any character is not a
/// hex digit.
pub fn hex_to_bytes(hex_str: &str) -> NtagResult<Vec<u8>> {
    hex::decode(hex_str).map_err(|e| NtagError::MalformedHex(format!("{}: {:?}", e, hex_str)))
}
