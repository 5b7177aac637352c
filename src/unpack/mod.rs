//! RNC1 unpacking (decompression) implementation
//!
//! This module decodes RNC1 files produced by this crate or by the classic
//! ProPack tools. Both checksums are verified, and the leeway an in-place
//! unpacker would need is measured along the way; the packer relies on that
//! figure for its self-test.

mod decoder;
mod reader;
mod state;

pub use decoder::DecodeTable;
pub use reader::BitReader;
pub use state::UnpackState;

use crate::common::{RncError, RncHeader, HEADER_SIZE};
use crate::crc::crc16;
use crate::Result;
use log::debug;

/// Read the unpacked length from the header without decoding the body
pub fn unpacked_length(data: &[u8]) -> Result<u32> {
    RncHeader::parse(data).map(|header| header.unpacked_len)
}

/// Unpack an RNC1 file
pub fn unpack_bytes(data: &[u8]) -> Result<Vec<u8>> {
    unpack_with_leeway(data).map(|(output, _)| output)
}

/// Unpack an RNC1 file and report the leeway it requires
pub fn unpack_with_leeway(data: &[u8]) -> Result<(Vec<u8>, u32)> {
    let header = RncHeader::parse(data)?;

    let body_end = HEADER_SIZE + header.packed_len as usize;
    if body_end > data.len() {
        return Err(RncError::FileSizeMismatch);
    }
    let input = &data[..body_end];

    let packed_crc = crc16(&input[HEADER_SIZE..]);
    if packed_crc != header.packed_crc {
        return Err(RncError::PackedCrcMismatch {
            expected: header.packed_crc,
            actual: packed_crc,
        });
    }

    let mut reader = BitReader::new(input, HEADER_SIZE);
    reader.advance(2);
    let mut state = UnpackState::new(header.unpacked_len as usize, body_end);

    while state.needs_more() {
        unpack_chunk(&mut reader, &mut state)?;
    }

    let (output, leeway) = state.into_parts();

    let unpacked_crc = crc16(&output);
    if unpacked_crc != header.unpacked_crc {
        return Err(RncError::UnpackedCrcMismatch {
            expected: header.unpacked_crc,
            actual: unpacked_crc,
        });
    }

    debug!(
        "unpacked {} -> {} bytes, leeway {}",
        data.len(),
        output.len(),
        leeway
    );
    Ok((output, leeway))
}

/// Decode one block: three tables, the tuple count and the tuples
fn unpack_chunk(reader: &mut BitReader<'_>, state: &mut UnpackState) -> Result<()> {
    let raw_table = DecodeTable::read_from(reader);
    let dist_table = DecodeTable::read_from(reader);
    let len_table = DecodeTable::read_from(reader);

    let mut tuples = reader.read_bits(16);
    if tuples == 0 {
        return Err(RncError::HufDecodeError);
    }

    loop {
        let raw_len = raw_table.decode_value(reader)?;
        if raw_len > 0 {
            for _ in 0..raw_len {
                let byte = reader.read_byte().ok_or(RncError::FileSizeMismatch)?;
                state.push_literal(byte)?;
            }
            reader.resync();
        }

        tuples -= 1;
        if tuples == 0 {
            return Ok(());
        }

        let distance = dist_table.decode_value(reader)? as usize + 1;
        let length = len_table.decode_value(reader)? as usize + 2;
        state.copy_match(distance, length)?;
        state.update_leeway(reader.position());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::pack_bytes;

    #[test]
    fn test_unpacked_length() {
        let packed = pack_bytes(b"twelve bytes").unwrap();
        assert_eq!(unpacked_length(&packed).unwrap(), 12);
        assert!(matches!(
            unpacked_length(b"not an rnc file at all"),
            Err(RncError::NotRncFile)
        ));
    }

    #[test]
    fn test_round_trip() {
        let data = b"Hello, World! Hello, World! Hello, RNC!";
        let packed = pack_bytes(data).unwrap();
        assert_eq!(unpack_bytes(&packed).unwrap(), data);
    }

    #[test]
    fn test_truncated_body() {
        let packed = pack_bytes(b"some data that will be cut short").unwrap();
        assert!(matches!(
            unpack_bytes(&packed[..packed.len() - 1]),
            Err(RncError::FileSizeMismatch)
        ));
    }

    #[test]
    fn test_leeway_is_reported() {
        let data: Vec<u8> = b"0123456789".repeat(50);
        let packed = pack_bytes(&data).unwrap();
        let (output, leeway) = unpack_with_leeway(&packed).unwrap();
        assert_eq!(output, data);
        assert!(leeway <= 255);
    }
}
