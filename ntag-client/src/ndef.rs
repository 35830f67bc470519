//! NDEF decoding capability
//!
//! Turning an NDEF message into typed records is left to the host: the
//! reader hands the value of each TLV block found in user memory to an
//! [`NdefDecoder`] and flattens what it returns.

use ntag_core::NtagResult;

/// A decoded NDEF record
pub trait NdefRecord {
    /// Raw record payload
    fn payload(&self) -> &[u8];

    /// Text of a well-known text record, `None` for other record types
    fn text(&self) -> Option<&str> {
        None
    }
}

/// Decodes the bytes of one TLV block into NDEF records
///
/// Implemented for closures and functions of the shape
/// `Fn(&[u8]) -> NtagResult<Vec<R>>`.
pub trait NdefDecoder: Send + Sync {
    type Record: Send;

    /// Decode zero or more records
    ///
    /// # Errors
    /// Returns `NtagError::Decode` when the bytes are not a valid message.
    fn decode(&self, payload: &[u8]) -> NtagResult<Vec<Self::Record>>;
}

impl<F, R> NdefDecoder for F
where
    F: Fn(&[u8]) -> NtagResult<Vec<R>> + Send + Sync,
    R: Send,
{
    type Record = R;

    fn decode(&self, payload: &[u8]) -> NtagResult<Vec<R>> {
        self(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntag_core::NtagError;

    fn reject_empty(payload: &[u8]) -> NtagResult<Vec<usize>> {
        if payload.is_empty() {
            return Err(NtagError::Decode("empty message".to_string()));
        }
        Ok(vec![payload.len()])
    }

    fn decode_with<D: NdefDecoder>(decoder: &D, payload: &[u8]) -> NtagResult<Vec<D::Record>> {
        decoder.decode(payload)
    }

    #[test]
    fn test_function_as_decoder() {
        assert_eq!(decode_with(&reject_empty, &[0xD1, 0x01]).unwrap(), vec![2]);
        assert!(matches!(
            decode_with(&reject_empty, &[]),
            Err(NtagError::Decode(_))
        ));
    }

    #[test]
    fn test_closure_as_decoder() {
        let prefix = 0xD1u8;
        let decoder = move |payload: &[u8]| -> NtagResult<Vec<bool>> {
            Ok(payload.iter().map(|b| *b == prefix).collect())
        };
        assert_eq!(decode_with(&decoder, &[0xD1, 0x00]).unwrap(), vec![true, false]);
    }
}
