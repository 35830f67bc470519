//! Session layer module for NTAG reading
//!
//! This crate turns raw device frames into payloads:
//!
//! - [`response`]: classification of a frame into payload, empty success or
//!   status error
//! - [`channel`]: the [`CommandChannel`] capability the tag reader consumes,
//!   and [`InterpretingChannel`], which provides it over a
//!   [`DeviceLink`](ntag_transport::DeviceLink)

pub mod channel;
pub mod response;

pub use ntag_core::{NtagError, NtagResult};
pub use channel::{CommandChannel, InterpretingChannel};
pub use response::{
    Interpretation, ResponseInterpreter, EXTENDED_RESPONSE_TAG, STATUS_PREFIX_LENGTH,
};
