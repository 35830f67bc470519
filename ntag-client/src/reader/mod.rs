//! Tag memory reading

pub mod builder;
pub mod command;
pub mod layout;
pub mod nfc_reader;
pub mod tag_memory;

pub use builder::ReaderBuilder;
pub use command::NtagCommand;
pub use layout::{ChunkRange, TagMemoryLayout};
pub use nfc_reader::NfcReader;
pub use tag_memory::TagMemoryReader;
