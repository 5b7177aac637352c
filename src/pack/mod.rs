//! RNC1 packing (compression) implementation
//!
//! This module splits the input into blocks of at most 8192 new bytes, each
//! seen through a window that also holds up to 24575 bytes of preceding
//! data, and writes every block as Huffman-coded tuples. The result is
//! finalized with the 18-byte header.
//!
//! [`pack_verified`] additionally unpacks its own output, compares it with
//! the input and records the leeway the in-place unpacker needs.

mod block;
mod hash;
mod huffman;
mod pattern;
mod state;
mod writer;

pub use block::{encode_block, BlockTables};
pub use hash::{prefix_hash, ChainIter};
pub use huffman::{length_class, mirror, HuffmanCode, HuffmanTable, MAX_CODE_LENGTH};
pub use pattern::MatchResult;
pub use state::{PackState, Tuple};
pub use writer::BitWriter;

use crate::common::{
    has_signature, PackStats, RncError, RncHeader, BLOCK_MAX, HEADER_SIZE, MAX_LEEWAY,
    WINDOW_MAX,
};
use crate::crc::crc16;
use crate::unpack::unpack_with_leeway;
use crate::Result;
use log::debug;

/// Marker for "no position" in the hash chains
pub const NO_LINK: u16 = u16::MAX;

/// Maximum amount of context kept in front of a block
pub const CONTEXT_MAX: usize = WINDOW_MAX - BLOCK_MAX;

/// Offset of the leeway byte in the header
pub const LEEWAY_OFFSET: usize = 16;

/// A verified RNC1 file
#[derive(Debug, Clone)]
pub struct Packed {
    /// Complete file: header and packed body
    pub data: Vec<u8>,
    /// Statistics of the packing run
    pub stats: PackStats,
}

/// Pack `data` into an RNC1 file with the leeway byte left at zero
///
/// Use [`pack_verified`] for files that will be read by an in-place unpacker.
pub fn pack_bytes(data: &[u8]) -> Result<Vec<u8>> {
    assemble(data).map(|(packed, _)| packed)
}

/// Pack `data`, verify the output by unpacking it and fill in the leeway
pub fn pack_verified(data: &[u8]) -> Result<Packed> {
    if data.len() > 4 && has_signature(data) {
        return Err(RncError::AlreadyPacked);
    }

    let (mut packed, mut stats) = assemble(data)?;

    let (unpacked, leeway) =
        unpack_with_leeway(&packed).map_err(|e| RncError::SelfTest(Box::new(e)))?;
    if unpacked.len() != data.len() {
        return Err(RncError::LengthMismatch {
            expected: data.len(),
            actual: unpacked.len(),
        });
    }
    if unpacked != data {
        return Err(RncError::ContentMismatch);
    }
    if leeway > MAX_LEEWAY {
        return Err(RncError::LeewayTooLarge(leeway));
    }

    debug!(
        "self-test passed: {} -> {} bytes, leeway {}",
        data.len(),
        packed.len(),
        leeway
    );
    packed[LEEWAY_OFFSET] = leeway as u8;
    stats.leeway = leeway as u8;

    Ok(Packed {
        data: packed,
        stats,
    })
}

/// Run the block loop and finalize the header
fn assemble(data: &[u8]) -> Result<(Vec<u8>, PackStats)> {
    let unpacked_len = u32::try_from(data.len()).map_err(|_| RncError::InputTooLarge(data.len()))?;

    let mut state = PackState::new();
    let mut writer = BitWriter::new();
    let mut stats = PackStats {
        unpacked_len: data.len(),
        ..PackStats::default()
    };

    let mut offset = 0;
    while offset < data.len() {
        let block_len = (data.len() - offset).min(BLOCK_MAX);
        let context = offset.min(CONTEXT_MAX);

        state.load_window(&data[offset - context..offset + block_len], context);
        state.scan_block();
        encode_block(&state, &mut writer);

        for tuple in &state.tuples {
            stats.literal_count += tuple.raw_len;
            stats.longest_match = stats.longest_match.max(tuple.match_len);
        }
        stats.match_count += state.match_count();

        debug!(
            "block {}: offset {}, context {}, consumed {}, {} tuples",
            stats.chunks,
            offset,
            context,
            state.consumed(),
            state.tuples.len()
        );

        offset += state.consumed();
        stats.chunks += 1;
    }

    let chunks = u8::try_from(stats.chunks).map_err(|_| RncError::TooManyChunks(stats.chunks))?;

    let mut packed = writer.finish();
    let body_len = packed.len() - HEADER_SIZE;

    let header = RncHeader {
        unpacked_len,
        packed_len: body_len as u32,
        unpacked_crc: crc16(data),
        packed_crc: crc16(&packed[HEADER_SIZE..]),
        leeway: 0,
        chunks,
    };
    header.write_to(&mut packed);
    stats.packed_len = packed.len();

    Ok((packed, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let packed = pack_bytes(&[]).unwrap();
        let header = RncHeader::parse(&packed).unwrap();

        assert_eq!(header.unpacked_len, 0);
        assert_eq!(header.chunks, 0);
        assert_eq!(header.packed_len as usize, packed.len() - HEADER_SIZE);
        assert_eq!(header.unpacked_crc, 0);
    }

    #[test]
    fn test_block_count() {
        let data: Vec<u8> = (0..20000u32).map(|i| (i % 251) as u8).collect();
        let packed = pack_bytes(&data).unwrap();
        let header = RncHeader::parse(&packed).unwrap();
        assert_eq!(header.chunks, 3);
        assert_eq!(header.unpacked_len, 20000);
    }

    #[test]
    fn test_rejects_packed_input() {
        let packed = pack_bytes(b"some data").unwrap();
        assert!(matches!(
            pack_verified(&packed),
            Err(RncError::AlreadyPacked)
        ));
        // A bare signature is short enough to pack
        assert!(pack_verified(b"RNC\x01").is_ok());
    }

    #[test]
    fn test_verified_stats() {
        let data = b"abcabcabcabcabcabcabc";
        let packed = pack_verified(data).unwrap();

        assert_eq!(packed.stats.unpacked_len, data.len());
        assert_eq!(packed.stats.packed_len, packed.data.len());
        assert_eq!(packed.stats.chunks, 1);
        assert_eq!(packed.stats.match_count, 1);
        assert_eq!(packed.stats.literal_count, 3);
        assert_eq!(packed.stats.longest_match, 18);
        assert_eq!(packed.data[LEEWAY_OFFSET], packed.stats.leeway);
    }

    #[test]
    fn test_chunk_count_limit() {
        // 256 full blocks plus one byte need 257 chunks
        let data = vec![0u8; 256 * BLOCK_MAX + 1];
        assert!(matches!(
            pack_bytes(&data),
            Err(RncError::TooManyChunks(257))
        ));
    }
}
