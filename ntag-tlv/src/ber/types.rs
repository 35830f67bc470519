//! BER-TLV node types

use std::collections::HashMap;

/// Constructed flag (bit 6 of the first tag byte)
pub const CONSTRUCTED_FLAG: u8 = 0x20;

/// Decoded frame: uppercase hex tag to node
pub type TlvMap = HashMap<String, TlvNode>;

/// Value of a BER-TLV node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlvValue {
    /// Raw bytes of a primitive value
    Primitive(Vec<u8>),
    /// Marker for a constructed value; its contents are not parsed
    Constructed,
}

/// A single decoded BER-TLV node
///
/// # Tag Identity
/// Tags are byte sequences, not numbers. The uppercase hex string of the tag
/// bytes is used as the lookup key since it is injective over byte
/// sequences (`"1F01"` and `"01"` never collide).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvNode {
    tag: Vec<u8>,
    length: usize,
    value: TlvValue,
}

impl TlvNode {
    /// Create a primitive node
    pub fn primitive(tag: Vec<u8>, length: usize, value: Vec<u8>) -> Self {
        Self {
            tag,
            length,
            value: TlvValue::Primitive(value),
        }
    }

    /// Create a constructed node
    pub fn constructed(tag: Vec<u8>, length: usize) -> Self {
        Self {
            tag,
            length,
            value: TlvValue::Constructed,
        }
    }

    /// Get tag bytes
    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    /// Get tag as uppercase hex, the key used in [`TlvMap`]
    pub fn tag_hex(&self) -> String {
        tag_key(&self.tag)
    }

    /// Get declared content length
    ///
    /// For a primitive value cut short by the end of the frame this is
    /// larger than the number of value bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Check if the node is constructed
    pub fn is_constructed(&self) -> bool {
        matches!(self.value, TlvValue::Constructed)
    }

    /// Get the node value
    pub fn value(&self) -> &TlvValue {
        &self.value
    }

    /// Get primitive value bytes, `None` for constructed nodes
    pub fn value_bytes(&self) -> Option<&[u8]> {
        match &self.value {
            TlvValue::Primitive(bytes) => Some(bytes),
            TlvValue::Constructed => None,
        }
    }

    /// Get primitive value as lowercase hex, `None` for constructed nodes
    pub fn value_hex(&self) -> Option<String> {
        self.value_bytes().map(ntag_core::bytes_to_hex)
    }
}

/// Build the map key for tag bytes
pub fn tag_key(tag: &[u8]) -> String {
    ntag_core::bytes_to_hex(tag).to_uppercase()
}

/// Check whether the first tag byte marks a constructed value
pub fn is_constructed_tag(first_byte: u8) -> bool {
    first_byte & CONSTRUCTED_FLAG == CONSTRUCTED_FLAG
}
