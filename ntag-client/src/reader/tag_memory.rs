//! Chunked tag memory reader
//!
//! # Read Sequence
//!
//! ```text
//! INIT -> RESOLVING_CAPACITY -> EMPTY
//!                            -> READING(4) -> READING(255) -> ... -> DONE
//! ```
//!
//! 1. **Capacity**: READ of block 0; byte 14 of the 16-byte answer is the
//!    user memory size. Resolved once per reader and cached.
//! 2. **Memory**: FAST_READ commands over [`CHUNK_SIZE`] block ranges from
//!    block 4 to the last user block, the final one flagged as the last
//!    command of the session.
//! 3. **Records**: the assembled memory is split into TLV blocks and each
//!    block value is handed to the NDEF decoder.
//!
//! Commands are strictly sequential: each chunk completes before the next
//! range is computed. No command is retried here; a failure at any step
//! aborts the whole read and no partial memory is returned.

use crate::ndef::NdefDecoder;
use crate::reader::command::NtagCommand;
use crate::reader::layout::{ChunkRange, TagMemoryLayout, CHUNK_SIZE};
use bytes::{Bytes, BytesMut};
use ntag_core::{hex_to_bytes, NtagResult};
use ntag_session::CommandChannel;
use ntag_tlv::simple::SimpleTlvDecoder;
use std::time::Duration;

/// Reads NDEF records from a tag's user memory
///
/// The reader owns its channel, so `&mut self` on every operation keeps
/// chunk reads of one reader from interleaving.
#[derive(Debug)]
pub struct TagMemoryReader<C, D> {
    channel: C,
    decoder: D,
    user_block_count: Option<u8>,
    timeout_hint: Option<Duration>,
}

impl<C: CommandChannel, D: NdefDecoder> TagMemoryReader<C, D> {
    /// Create a reader over a command channel and an NDEF decoder
    pub fn new(channel: C, decoder: D) -> Self {
        Self {
            channel,
            decoder,
            user_block_count: None,
            timeout_hint: None,
        }
    }

    /// Record this timeout with the channel before each record read
    pub fn with_timeout_hint(mut self, timeout: Duration) -> Self {
        self.timeout_hint = Some(timeout);
        self
    }

    /// Get the channel
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Consume the reader, returning the channel
    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Get the memory layout, if capacity has been resolved
    pub fn layout(&self) -> Option<TagMemoryLayout> {
        self.user_block_count.map(TagMemoryLayout::new)
    }

    /// Send GET_VERSION
    ///
    /// The version payload is not used; the command checks that a tag
    /// answers.
    pub async fn probe_version(&mut self) -> NtagResult<()> {
        self.send(NtagCommand::GetVersion, false).await?;
        Ok(())
    }

    /// Get user memory size in bytes
    ///
    /// Reads block 0 on first use only.
    pub async fn capacity_blocks(&mut self) -> NtagResult<u32> {
        Ok(self.resolve_layout().await?.capacity_bytes())
    }

    /// Read the whole user memory
    ///
    /// Returns an empty buffer when the tag reports no user memory.
    pub async fn read_all_user_memory(&mut self) -> NtagResult<Bytes> {
        let layout = self.resolve_layout().await?;
        let chunks = layout.chunks();
        if chunks.is_empty() {
            log::debug!("Tag reports no user memory");
            return Ok(Bytes::new());
        }

        let mut memory = BytesMut::with_capacity(layout.capacity_bytes() as usize);
        for chunk in chunks {
            let data = self.fast_read(chunk).await?;
            memory.extend_from_slice(&data);
        }
        Ok(memory.freeze())
    }

    /// Read all NDEF records stored on the tag
    ///
    /// Records keep TLV scan order, then the decoder's order within each
    /// TLV block.
    ///
    /// # Errors
    /// Any transport, interpretation or decoding failure aborts the read.
    pub async fn read_ndef_records(&mut self) -> NtagResult<Vec<D::Record>> {
        if let Some(timeout) = self.timeout_hint {
            self.channel.set_timeout(Some(timeout)).await?;
        }

        self.probe_version().await?;
        let memory = self.read_all_user_memory().await?;

        let mut records = Vec::new();
        for tlv in SimpleTlvDecoder::new().decode(&memory) {
            records.extend(self.decoder.decode(&tlv.value)?);
        }
        Ok(records)
    }

    /// Resolve the memory layout, reading block 0 only when not cached
    async fn resolve_layout(&mut self) -> NtagResult<TagMemoryLayout> {
        if let Some(count) = self.user_block_count {
            return Ok(TagMemoryLayout::new(count));
        }

        let response = self.read_block(0).await?;
        let layout = TagMemoryLayout::from_block_zero(&response);
        self.user_block_count = Some(layout.user_block_count());
        log::info!("Card size: {} bytes", layout.capacity_bytes());
        Ok(layout)
    }

    async fn read_block(&mut self, block: u16) -> NtagResult<Vec<u8>> {
        let payload = self.send(NtagCommand::Read { block }, false).await?;
        hex_to_bytes(&payload)
    }

    async fn fast_read(&mut self, chunk: ChunkRange) -> NtagResult<Vec<u8>> {
        log::debug!(
            "Fast read blocks {}..={} (last: {}, chunk size {})",
            chunk.start_block,
            chunk.end_block,
            chunk.is_last,
            CHUNK_SIZE
        );
        let command = NtagCommand::FastRead {
            start: chunk.start_block,
            end: chunk.end_block,
        };
        let payload = self.send(command, chunk.is_last).await?;
        hex_to_bytes(&payload)
    }

    async fn send(&mut self, command: NtagCommand, last_command: bool) -> NtagResult<String> {
        self.channel.send(command.to_hex(), last_command).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;
    use ntag_core::{bytes_to_hex, NtagError};
    use std::collections::VecDeque;

    /// Channel replaying queued payloads and recording every command
    #[derive(Debug, Default)]
    pub(crate) struct RecordingChannel {
        pub(crate) responses: VecDeque<NtagResult<String>>,
        pub(crate) sent: Vec<(String, bool)>,
        pub(crate) timeouts: Vec<Option<Duration>>,
    }

    impl RecordingChannel {
        pub(crate) fn with_responses(responses: Vec<NtagResult<String>>) -> Self {
            Self {
                responses: responses.into(),
                ..Self::default()
            }
        }

        pub(crate) fn commands(&self) -> Vec<&str> {
            self.sent.iter().map(|(command, _)| command.as_str()).collect()
        }
    }

    #[async_trait]
    impl CommandChannel for RecordingChannel {
        async fn send(&mut self, command: String, last_command: bool) -> NtagResult<String> {
            self.sent.push((command, last_command));
            self.responses
                .pop_front()
                .unwrap_or(Err(NtagError::Transport("no response queued".to_string())))
        }

        async fn set_timeout(&mut self, timeout: Option<Duration>) -> NtagResult<()> {
            self.timeouts.push(timeout);
            Ok(())
        }
    }

    mock! {
        pub Channel {}

        #[async_trait]
        impl CommandChannel for Channel {
            async fn send(&mut self, command: String, last_command: bool) -> NtagResult<String>;
            async fn set_timeout(&mut self, timeout: Option<Duration>) -> NtagResult<()>;
        }
    }

    pub(crate) fn block_zero(size: u8) -> String {
        bytes_to_hex(&[
            0x04, 0x5B, 0x1C, 0x9A, 0xE2, 0x3F, 0x6B, 0x80, 0xA5, 0x48, 0x00, 0x00, 0xE1, 0x10,
            size, 0x00,
        ])
    }

    /// One record per TLV block: the block bytes
    pub(crate) fn raw_records(payload: &[u8]) -> NtagResult<Vec<Vec<u8>>> {
        Ok(vec![payload.to_vec()])
    }

    #[tokio::test]
    async fn test_capacity_read_once() {
        let mut channel = MockChannel::new();
        channel
            .expect_send()
            .with(eq("3000".to_string()), eq(false))
            .times(1)
            .returning(|_, _| Ok(block_zero(0x12)));

        let mut reader = TagMemoryReader::new(channel, raw_records);
        assert_eq!(reader.capacity_blocks().await.unwrap(), 144);
        assert_eq!(reader.capacity_blocks().await.unwrap(), 144);
        assert_eq!(reader.layout(), Some(TagMemoryLayout::new(0x12)));
    }

    #[tokio::test]
    async fn test_capacity_short_response_is_zero() {
        let channel = RecordingChannel::with_responses(vec![Ok("0000".to_string())]);
        let mut reader = TagMemoryReader::new(channel, raw_records);

        assert_eq!(reader.capacity_blocks().await.unwrap(), 0);
        assert_eq!(reader.capacity_blocks().await.unwrap(), 0);
        assert_eq!(reader.channel().sent.len(), 1);
    }

    #[tokio::test]
    async fn test_single_chunk_read() {
        let chunk = "0303d00000fe".to_string();
        let channel = RecordingChannel::with_responses(vec![Ok(block_zero(40)), Ok(chunk)]);
        let mut reader = TagMemoryReader::new(channel, raw_records);

        let memory = reader.read_all_user_memory().await.unwrap();
        assert_eq!(memory, vec![0x03, 0x03, 0xD0, 0x00, 0x00, 0xFE]);
        assert_eq!(
            reader.channel().sent,
            vec![("3000".to_string(), false), ("3A0453".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn test_multi_chunk_read_in_order() {
        let first = vec![0x11u8; 1004];
        let second = vec![0x22u8; 4];
        let channel = RecordingChannel::with_responses(vec![
            Ok(block_zero(126)),
            Ok(bytes_to_hex(&first)),
            Ok(bytes_to_hex(&second)),
        ]);
        let mut reader = TagMemoryReader::new(channel, raw_records);

        let memory = reader.read_all_user_memory().await.unwrap();
        assert_eq!(memory.len(), first.len() + second.len());
        assert_eq!(&memory[..1004], &first[..]);
        assert_eq!(memory.slice(1004..), second);
        assert_eq!(
            reader.channel().sent,
            vec![
                ("3000".to_string(), false),
                ("3A04FE".to_string(), false),
                ("3AFFFF".to_string(), true),
            ]
        );
    }

    #[tokio::test]
    async fn test_capacity_not_reread_before_memory() {
        let channel = RecordingChannel::with_responses(vec![
            Ok(block_zero(40)),
            Ok("aabb".to_string()),
        ]);
        let mut reader = TagMemoryReader::new(channel, raw_records);

        reader.capacity_blocks().await.unwrap();
        reader.read_all_user_memory().await.unwrap();
        assert_eq!(reader.channel().commands(), vec!["3000", "3A0453"]);
    }

    #[tokio::test]
    async fn test_empty_tag_reads_nothing() {
        let channel = RecordingChannel::with_responses(vec![Ok(block_zero(0))]);
        let mut reader = TagMemoryReader::new(channel, raw_records);

        assert!(reader.read_all_user_memory().await.unwrap().is_empty());
        assert_eq!(reader.channel().commands(), vec!["3000"]);
    }

    #[tokio::test]
    async fn test_chunk_failure_aborts_read() {
        let channel = RecordingChannel::with_responses(vec![
            Ok(block_zero(126)),
            Ok("00".repeat(1004)),
            Err(NtagError::StatusCode("6A82".to_string())),
        ]);
        let mut reader = TagMemoryReader::new(channel, raw_records);

        assert_eq!(
            reader.read_all_user_memory().await,
            Err(NtagError::StatusCode("6A82".to_string()))
        );
    }

    #[tokio::test]
    async fn test_malformed_chunk_payload() {
        let channel = RecordingChannel::with_responses(vec![
            Ok(block_zero(40)),
            Ok("abc".to_string()),
        ]);
        let mut reader = TagMemoryReader::new(channel, raw_records);

        assert!(matches!(
            reader.read_all_user_memory().await,
            Err(NtagError::MalformedHex(_))
        ));
    }

    #[tokio::test]
    async fn test_read_ndef_records_flattened_in_order() {
        // lock control TLV, NDEF TLV, terminator
        let memory = "0103a00c340304d1010154fe0000";
        let channel = RecordingChannel::with_responses(vec![
            Ok(String::new()),
            Ok(block_zero(40)),
            Ok(memory.to_string()),
        ]);
        // every byte of a block becomes one record
        let mut reader = TagMemoryReader::new(channel, |payload: &[u8]| {
            Ok::<_, NtagError>(payload.to_vec())
        });

        let records = reader.read_ndef_records().await.unwrap();
        assert_eq!(records, vec![0xA0, 0x0C, 0x34, 0xD1, 0x01, 0x01, 0x54]);
        assert_eq!(reader.channel().commands(), vec!["60", "3000", "3A0453"]);
    }

    #[tokio::test]
    async fn test_timeout_hint_recorded_first() {
        let channel = RecordingChannel::with_responses(vec![
            Ok(String::new()),
            Ok(block_zero(0)),
        ]);
        let mut reader = TagMemoryReader::new(channel, raw_records)
            .with_timeout_hint(Duration::from_secs(20));

        assert!(reader.read_ndef_records().await.unwrap().is_empty());
        assert_eq!(reader.channel().timeouts, vec![Some(Duration::from_secs(20))]);
    }

    #[tokio::test]
    async fn test_version_failure_stops_sequence() {
        let channel = RecordingChannel::with_responses(vec![Err(NtagError::Unknown)]);
        let mut reader = TagMemoryReader::new(channel, raw_records);

        assert_eq!(reader.read_ndef_records().await, Err(NtagError::Unknown));
        assert_eq!(reader.channel().commands(), vec!["60"]);
        assert_eq!(reader.layout(), None);
    }

    #[tokio::test]
    async fn test_decoder_failure_aborts() {
        let channel = RecordingChannel::with_responses(vec![
            Ok(String::new()),
            Ok(block_zero(40)),
            Ok("0302d101fe".to_string()),
        ]);
        let mut reader = TagMemoryReader::new(channel, |_: &[u8]| {
            Err::<Vec<u8>, _>(NtagError::Decode("truncated record header".to_string()))
        });

        assert_eq!(
            reader.read_ndef_records().await,
            Err(NtagError::Decode("truncated record header".to_string()))
        );
    }
}
