//! NTAG client implementation
//!
//! This crate reads NDEF records off an NTAG through a card-reader
//! accessory:
//!
//! - [`reader::TagMemoryReader`]: resolves tag capacity, streams user memory
//!   through bounded fast-read commands and extracts NDEF records
//! - [`reader::NfcReader`]: reader entry point configured by
//!   [`ReaderSettings`], built with [`reader::ReaderBuilder`]
//! - [`ndef`]: the NDEF decoding capability supplied by the host
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use ntag_client::reader::ReaderBuilder;
//!
//! # async fn run(link: impl ntag_transport::DeviceLink, decoder: impl ntag_client::ndef::NdefDecoder<Record = MyRecord>) -> ntag_core::NtagResult<()> {
//! let mut reader = ReaderBuilder::new()
//!     .timeout(std::time::Duration::from_secs(20))
//!     .build(link, decoder);
//! let text = reader.read_text().await?;
//! # Ok(())
//! # }
//! # struct MyRecord;
//! # impl ntag_client::ndef::NdefRecord for MyRecord { fn payload(&self) -> &[u8] { &[] } }
//! ```

pub mod ndef;
pub mod reader;
pub mod settings;

pub use ntag_core::{NtagError, NtagResult};
pub use ndef::{NdefDecoder, NdefRecord};
pub use reader::{
    ChunkRange, NfcReader, NtagCommand, ReaderBuilder, TagMemoryLayout, TagMemoryReader,
};
pub use settings::ReaderSettings;
