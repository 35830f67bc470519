//! NFC reader entry point
//!
//! [`NfcReader`] runs a full tag read with [`ReaderSettings`] applied:
//! the timeout hint is recorded with the device, the version probed,
//! capacity resolved and the NDEF records read.

use crate::ndef::{NdefDecoder, NdefRecord};
use crate::reader::tag_memory::TagMemoryReader;
use crate::settings::ReaderSettings;
use ntag_core::{bytes_to_hex, NtagError, NtagResult};
use ntag_session::CommandChannel;

/// Reads NDEF content off the tag presented to the reader
#[derive(Debug)]
pub struct NfcReader<C, D> {
    reader: TagMemoryReader<C, D>,
    settings: ReaderSettings,
}

impl<C: CommandChannel, D: NdefDecoder> NfcReader<C, D> {
    pub fn new(channel: C, decoder: D, settings: ReaderSettings) -> Self {
        let reader = TagMemoryReader::new(channel, decoder).with_timeout_hint(settings.timeout);
        Self { reader, settings }
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Get the underlying tag memory reader
    pub fn tag_reader(&mut self) -> &mut TagMemoryReader<C, D> {
        &mut self.reader
    }

    /// Read all NDEF records on the tag
    pub async fn records(&mut self) -> NtagResult<Vec<D::Record>> {
        self.log("Read NTAG card");
        let records = self.reader.read_ndef_records().await?;
        if let Some(layout) = self.reader.layout() {
            self.log(&format!("card size : {}", layout.capacity_bytes()));
        }
        Ok(records)
    }

    /// Read the text of the tag's first NDEF record
    ///
    /// # Errors
    /// `NoContent` if the tag holds no record, `InvalidResponse` if the
    /// first record is not a text record, or any failure of the read.
    pub async fn read_text(&mut self) -> NtagResult<String>
    where
        D::Record: NdefRecord,
    {
        let records = self.records().await?;
        let record = records.first().ok_or(NtagError::NoContent)?;
        match record.text() {
            Some(text) => {
                self.log(&format!("TEXT RECORD: {}", text));
                Ok(text.to_string())
            }
            None => {
                self.log(&format!("RECORD BYTES : {}", bytes_to_hex(record.payload())));
                Err(NtagError::InvalidResponse)
            }
        }
    }

    fn log(&self, message: &str) {
        if self.settings.debug_enabled {
            log::debug!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::tag_memory::tests::{block_zero, RecordingChannel};
    use std::time::Duration;
    use tokio_test::assert_ok;

    #[derive(Debug, PartialEq)]
    enum TestRecord {
        Text(String),
        Uri(Vec<u8>),
    }

    impl NdefRecord for TestRecord {
        fn payload(&self) -> &[u8] {
            match self {
                TestRecord::Text(text) => text.as_bytes(),
                TestRecord::Uri(bytes) => bytes,
            }
        }

        fn text(&self) -> Option<&str> {
            match self {
                TestRecord::Text(text) => Some(text),
                TestRecord::Uri(_) => None,
            }
        }
    }

    /// 'T' followed by UTF-8 is text, 'U' followed by bytes is a URI
    fn decode_test_records(payload: &[u8]) -> NtagResult<Vec<TestRecord>> {
        match payload.split_first() {
            Some((b'T', rest)) => String::from_utf8(rest.to_vec())
                .map(|text| vec![TestRecord::Text(text)])
                .map_err(|e| NtagError::Decode(e.to_string())),
            Some((b'U', rest)) => Ok(vec![TestRecord::Uri(rest.to_vec())]),
            _ => Ok(Vec::new()),
        }
    }

    type TestDecoder = fn(&[u8]) -> NtagResult<Vec<TestRecord>>;

    fn reader_with_memory(memory: &str) -> NfcReader<RecordingChannel, TestDecoder> {
        let channel = RecordingChannel::with_responses(vec![
            Ok(String::new()),
            Ok(block_zero(40)),
            Ok(memory.to_string()),
        ]);
        NfcReader::new(
            channel,
            decode_test_records as TestDecoder,
            ReaderSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_read_text() {
        // 03 03 'T' 'h' 'i'
        let mut reader = reader_with_memory("0303546869fe");
        let text = assert_ok!(reader.read_text().await);
        assert_eq!(text, "hi");
        assert_eq!(
            reader.tag_reader().channel().timeouts,
            vec![Some(Duration::from_secs(20))]
        );
    }

    #[tokio::test]
    async fn test_first_record_not_text() {
        let mut reader = reader_with_memory("030355aabb0303546869fe");
        assert_eq!(reader.read_text().await, Err(NtagError::InvalidResponse));
    }

    #[tokio::test]
    async fn test_no_records() {
        let mut reader = reader_with_memory("0300fe");
        assert_eq!(reader.read_text().await, Err(NtagError::NoContent));
    }

    #[tokio::test]
    async fn test_records_in_order() {
        let mut reader = reader_with_memory("030355aabb0303546869fe");
        let records = assert_ok!(reader.records().await);
        assert_eq!(
            records,
            vec![
                TestRecord::Uri(vec![0xAA, 0xBB]),
                TestRecord::Text("hi".to_string()),
            ]
        );
    }
}
