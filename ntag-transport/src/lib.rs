//! Transport layer module for NTAG reading
//!
//! This crate defines the capability a card-reader accessory driver provides
//! to the protocol layer: send an NFC command as hex, get the raw device
//! frame back. Discovery, connection and SDK setup stay with the driver.

pub mod link;

pub use ntag_core::{NtagError, NtagResult};
pub use link::DeviceLink;
