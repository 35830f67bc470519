use thiserror::Error;

/// Main error type for NTAG operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NtagError {
    #[error("Malformed hex: {0}")]
    MalformedHex(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("No content in device response")]
    NoContent,

    #[error("Unknown device failure")]
    Unknown,

    #[error("Invalid device response")]
    InvalidResponse,

    #[error("Device status code: {0}")]
    StatusCode(String),

    #[error("NDEF decoding error: {0}")]
    Decode(String),
}

impl NtagError {
    /// Whether this error is one of the kinds reported by response interpretation
    ///
    /// `NoContent`, `Unknown`, `InvalidResponse` and `StatusCode` are the
    /// vocabulary surfaced out of the protocol layer; callers map them to
    /// user-facing outcomes.
    pub fn is_device_status(&self) -> bool {
        matches!(
            self,
            NtagError::NoContent
                | NtagError::Unknown
                | NtagError::InvalidResponse
                | NtagError::StatusCode(_)
        )
    }
}

/// Result type alias for NTAG operations
pub type NtagResult<T> = Result<T, NtagError>;
