//! ntag - Rust implementation of NTAG NDEF reading through card-reader accessories
//!
//! This library reads NDEF records off an NFC tag held to a card-reader
//! accessory. The accessory driver supplies a [`transport::DeviceLink`];
//! the host supplies an NDEF decoder; this library does the protocol work in
//! between.
//!
//! # Architecture
//!
//! - `ntag-core`: error taxonomy and hex codec
//! - `ntag-tlv`: BER-TLV frame decoding and simple TLV container decoding
//! - `ntag-transport`: device link capability
//! - `ntag-session`: response interpretation and command channel
//! - `ntag-client`: chunked tag memory reader, settings and reader builder
//!
//! # Usage
//!
//! ```no_run
//! use ntag::client::ReaderBuilder;
//! ```

// Re-export core types
pub use ntag_core::{bytes_to_hex, hex_to_bytes, NtagError, NtagResult};

// Re-export decoders
pub mod tlv {
    pub use ntag_tlv::*;
}

// Re-export transport capability
pub mod transport {
    pub use ntag_transport::*;
}

// Re-export session layer
pub mod session {
    pub use ntag_session::*;
}

// Re-export client API
pub mod client {
    pub use ntag_client::*;
}
