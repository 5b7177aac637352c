//! Block encoder
//!
//! Turns the tuple list of one window into its wire form: three Huffman
//! tables (literal run lengths, distances minus one, match lengths minus
//! two), the tuple count, and the tuples themselves with their literal bytes
//! stored verbatim between bit cells.

use super::huffman::{length_class, HuffmanTable};
use super::state::{PackState, Tuple};
use super::writer::BitWriter;
use crate::common::NUM_SYMBOLS;
use log::trace;

/// The three code tables of a block
#[derive(Debug, Clone)]
pub struct BlockTables {
    /// Table for literal run lengths
    pub raw: HuffmanTable,
    /// Table for distances minus one
    pub distance: HuffmanTable,
    /// Table for match lengths minus two
    pub length: HuffmanTable,
}

impl BlockTables {
    /// Build the tables from a block's tuples (the last tuple has no back-reference)
    pub fn build(tuples: &[Tuple]) -> Self {
        let (last, pairs) = tuples
            .split_last()
            .map_or((None, tuples), |(last, pairs)| (Some(last), pairs));

        let raw = histogram(pairs.iter().chain(last).map(|t| t.raw_len));
        let distance = histogram(pairs.iter().map(|t| t.distance - 1));
        let length = histogram(pairs.iter().map(|t| t.match_len - 2));

        Self {
            raw: HuffmanTable::build(&raw),
            distance: HuffmanTable::build(&distance),
            length: HuffmanTable::build(&length),
        }
    }
}

fn histogram(values: impl Iterator<Item = usize>) -> [u32; NUM_SYMBOLS] {
    let mut freqs = [0u32; NUM_SYMBOLS];
    for value in values {
        freqs[length_class(value as u32) as usize] += 1;
    }
    freqs
}

/// Write the block held in `state` to `writer`
pub fn encode_block(state: &PackState, writer: &mut BitWriter) {
    let tuples = &state.tuples;
    let tables = BlockTables::build(tuples);

    trace!(
        "block tables: raw {} entries, distance {} entries, length {} entries",
        tables.raw.entry_count(),
        tables.distance.entry_count(),
        tables.length.entry_count()
    );

    tables.raw.write_to(writer);
    tables.distance.write_to(writer);
    tables.length.write_to(writer);

    writer.write_bits(tuples.len() as u32, 16);

    let mut cursor = state.block_start;
    let last = tuples.len() - 1;
    for (i, tuple) in tuples.iter().enumerate() {
        tables.raw.encode_value(writer, tuple.raw_len as u32);
        for &byte in &state.window[cursor..cursor + tuple.raw_len] {
            writer.write_byte(byte);
        }
        cursor += tuple.raw_len;

        if i == last {
            break;
        }
        tables
            .distance
            .encode_value(writer, (tuple.distance - 1) as u32);
        tables
            .length
            .encode_value(writer, (tuple.match_len - 2) as u32);
        cursor += tuple.match_len;
    }
}
