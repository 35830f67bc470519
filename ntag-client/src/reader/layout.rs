//! Tag memory layout and read planning
//!
//! ```text
//! block 0..=3   header: UID, lock bytes, capability container
//! block 4..     user memory (NDEF TLV stream)
//! ```
//!
//! Byte 14 of the 16-byte read of block 0 is the capability container size
//! byte; user memory spans `size * 8` bytes, i.e. `size * 2` blocks.

/// Size of one addressable block in bytes
pub const BLOCK_SIZE: usize = 4;

/// First block of user memory
pub const FIRST_USER_BLOCK: u16 = 4;

/// Maximum command frame accepted by the device
pub const MAX_COMMAND_FRAME: u16 = 255;

/// Frame bytes taken by command overhead
pub const COMMAND_OVERHEAD: u16 = 4;

/// Blocks requested per fast-read command
pub const CHUNK_SIZE: u16 = MAX_COMMAND_FRAME - COMMAND_OVERHEAD;

/// Offset of the size byte in the block 0 read
pub const SIZE_BYTE_OFFSET: usize = 14;

/// User memory bytes per unit of the size byte
const BYTES_PER_SIZE_UNIT: u32 = 8;

/// Blocks per unit of the size byte
const BLOCKS_PER_SIZE_UNIT: u16 = 2;

/// One fast-read command of a read plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub start_block: u16,
    pub end_block: u16,
    /// Final command of the session
    pub is_last: bool,
}

/// Layout of a tag's user memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMemoryLayout {
    user_block_count: u8,
}

impl TagMemoryLayout {
    pub fn new(user_block_count: u8) -> Self {
        Self { user_block_count }
    }

    /// Build the layout from the read of block 0
    ///
    /// Responses of 15 bytes or fewer carry no size byte and give an empty
    /// layout.
    pub fn from_block_zero(response: &[u8]) -> Self {
        let user_block_count = if response.len() > SIZE_BYTE_OFFSET + 1 {
            response[SIZE_BYTE_OFFSET]
        } else {
            0
        };
        Self::new(user_block_count)
    }

    /// Get the size byte read from the tag
    pub fn user_block_count(&self) -> u8 {
        self.user_block_count
    }

    /// Get user memory size in bytes
    pub fn capacity_bytes(&self) -> u32 {
        u32::from(self.user_block_count) * BYTES_PER_SIZE_UNIT
    }

    /// Check if the tag has no user memory
    pub fn is_empty(&self) -> bool {
        self.user_block_count == 0
    }

    /// Get the last block of user memory, `None` when there is none
    pub fn last_user_block(&self) -> Option<u16> {
        if self.is_empty() {
            return None;
        }
        Some(u16::from(self.user_block_count) * BLOCKS_PER_SIZE_UNIT + FIRST_USER_BLOCK - 1)
    }

    /// Plan the fast-read commands covering user memory
    ///
    /// Ranges of [`CHUNK_SIZE`] blocks start at [`FIRST_USER_BLOCK`]; the
    /// final range ends at the last user block and is marked last.
    pub fn chunks(&self) -> Vec<ChunkRange> {
        let Some(last_block) = self.last_user_block() else {
            return Vec::new();
        };

        let mut chunks = Vec::new();
        let mut start_block = FIRST_USER_BLOCK;
        while start_block <= last_block {
            let is_last = start_block + CHUNK_SIZE > last_block;
            let end_block = if is_last {
                last_block
            } else {
                start_block + CHUNK_SIZE - 1
            };
            chunks.push(ChunkRange {
                start_block,
                end_block,
                is_last,
            });
            start_block += CHUNK_SIZE;
        }
        chunks
    }
}
