//! TLV processing module for NTAG reading
//!
//! This crate provides the two tag-length-value decoders used by the reader:
//!
//! - [`ber`]: BER-TLV decoding of device response frames
//! - [`simple`]: the single-byte-tag TLV stream stored in tag user memory
//!   (the NDEF container)
//!
//! Both decoders are pure and tolerate truncated input, returning what they
//! could decode instead of failing.

pub mod ber;
pub mod simple;

pub use ntag_core::{NtagError, NtagResult};
pub use ber::{BerTlvDecoder, TlvMap, TlvNode, TlvValue};
pub use simple::{SimpleTlvDecoder, SimpleTlvRecord, TERMINATOR_TAG};
