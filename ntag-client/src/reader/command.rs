//! NTAG commands sent through the card reader

/// GET_VERSION opcode
pub const GET_VERSION: u8 = 0x60;
/// READ opcode: 16 bytes starting at one block
pub const READ: u8 = 0x30;
/// FAST_READ opcode: an inclusive block range
pub const FAST_READ: u8 = 0x3A;

/// Command understood by the tag
///
/// Block numbers are kept as `u16` because the last user block of large
/// tags does not fit a byte. On the wire each address is a single byte;
/// addresses above `0xFF` keep their low byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NtagCommand {
    GetVersion,
    Read { block: u16 },
    FastRead { start: u16, end: u16 },
}

impl NtagCommand {
    pub fn opcode(&self) -> u8 {
        match self {
            NtagCommand::GetVersion => GET_VERSION,
            NtagCommand::Read { .. } => READ,
            NtagCommand::FastRead { .. } => FAST_READ,
        }
    }

    /// Render the command as uppercase hex: opcode, then block addresses
    pub fn to_hex(&self) -> String {
        let mut hex = format!("{:02X}", self.opcode());
        match *self {
            NtagCommand::GetVersion => {}
            NtagCommand::Read { block } => {
                hex.push_str(&format!("{:02X}", wire_address(block)));
            }
            NtagCommand::FastRead { start, end } => {
                hex.push_str(&format!("{:02X}", wire_address(start)));
                hex.push_str(&format!("{:02X}", wire_address(end)));
            }
        }
        hex
    }
}

fn wire_address(block: u16) -> u8 {
    let [high, low] = block.to_be_bytes();
    if high != 0 {
        log::warn!("Block {} does not fit a one-byte address, sending 0x{:02X}", block, low);
    }
    low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        assert_eq!(NtagCommand::GetVersion.to_hex(), "60");
    }

    #[test]
    fn test_read_block() {
        assert_eq!(NtagCommand::Read { block: 0 }.to_hex(), "3000");
        assert_eq!(NtagCommand::Read { block: 0x1A }.to_hex(), "301A");
    }

    #[test]
    fn test_fast_read_range() {
        assert_eq!(NtagCommand::FastRead { start: 4, end: 83 }.to_hex(), "3A0453");
        assert_eq!(NtagCommand::FastRead { start: 4, end: 254 }.to_hex(), "3A04FE");
    }

    #[test]
    fn test_wide_address_keeps_low_byte() {
        assert_eq!(NtagCommand::FastRead { start: 255, end: 263 }.to_hex(), "3AFF07");
    }
}
