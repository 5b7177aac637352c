//! Huffman table reading and value decoding
//!
//! Tables arrive as a 5-bit entry count followed by one 4-bit code length
//! per length-class symbol. Codes are rebuilt with the packer's rule
//! (canonical order, bit-mirrored counter) and matched LSB first.

use super::reader::BitReader;
use crate::common::{RncError, NUM_SYMBOLS};
use crate::pack::mirror;
use crate::Result;

/// One decodable code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DecodeEntry {
    code: u32,
    length: u32,
    symbol: u32,
}

/// Code table of one block field
#[derive(Debug, Clone, Default)]
pub struct DecodeTable {
    entries: Vec<DecodeEntry>,
}

impl DecodeTable {
    /// Read a table from the bit stream
    pub fn read_from(reader: &mut BitReader<'_>) -> Self {
        let count = reader.read_bits(5) as usize;
        let mut lengths = [0u32; NUM_SYMBOLS];
        for length in lengths.iter_mut().take(count) {
            *length = reader.read_bits(4);
        }
        Self::from_lengths(&lengths[..count])
    }

    /// Rebuild the codes from per-symbol code lengths
    pub fn from_lengths(lengths: &[u32]) -> Self {
        let max_length = lengths.iter().copied().max().unwrap_or(0);
        let mut entries = Vec::with_capacity(lengths.len());

        let mut counter = 0u32;
        for length in 1..=max_length {
            for (symbol, _) in lengths.iter().enumerate().filter(|&(_, &l)| l == length) {
                entries.push(DecodeEntry {
                    code: mirror(counter, length),
                    length,
                    symbol: symbol as u32,
                });
                counter += 1;
            }
            counter <<= 1;
        }

        Self { entries }
    }

    /// Number of symbols with a code
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no symbol has a code
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode one length-class coded value
    pub fn decode_value(&self, reader: &mut BitReader<'_>) -> Result<u32> {
        let entry = self
            .entries
            .iter()
            .find(|e| reader.peek((1u32 << e.length) - 1) == e.code)
            .ok_or(RncError::HufDecodeError)?;
        reader.advance(entry.length);

        let class = entry.symbol;
        if class < 2 {
            return Ok(class);
        }
        let top = 1u32 << (class - 1);
        Ok(top | reader.read_bits(class - 1))
    }
}
