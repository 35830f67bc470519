//! Core types and utilities for NTAG reading
//!
//! This crate provides the error taxonomy and the hex codec used at every
//! boundary of the NTAG protocol stack.

pub mod error;
pub mod codec;

pub use error::{NtagError, NtagResult};
pub use codec::{bytes_to_hex, hex_to_bytes};
