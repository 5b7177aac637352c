//! Huffman tables over the 32-symbol length-class alphabet
//!
//! Every value in an RNC1 block (literal run lengths, distances, match
//! lengths) is coded as its bit length (the "length class") followed by the
//! bits below its top bit. This module builds the per-block code tables,
//! writes them in the compact 4-bit-length form and encodes values.
//!
//! Code assignment is canonical, but each code is the bit-mirror of the
//! sequential counter so that the unpacker, which reads bits LSB first, sees
//! a prefix code.

use super::writer::BitWriter;
use crate::common::NUM_SYMBOLS;

/// Longest code length the 4-bit table field can describe
pub const MAX_CODE_LENGTH: u8 = 15;

/// Huffman code: (code bits, length in bits)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HuffmanCode {
    /// The code bits, already mirrored for LSB-first output
    pub code: u32,
    /// Number of bits in the code (0 when the symbol is absent)
    pub length: u8,
}

/// Pool node used while merging
#[derive(Debug, Clone, Copy)]
struct Node {
    frequency: u32,
    parent: Option<usize>,
    symbol: Option<usize>,
}

/// Per-block code table for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTable {
    codes: [HuffmanCode; NUM_SYMBOLS],
}

impl HuffmanTable {
    /// Build a table from length-class frequencies
    ///
    /// Merging always combines the first minimum and the first next-minimum
    /// among unparented nodes in pool order, so the result is deterministic
    pub fn build(frequencies: &[u32; NUM_SYMBOLS]) -> Self {
        let mut codes = [HuffmanCode::default(); NUM_SYMBOLS];

        let mut pool: Vec<Node> = frequencies
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f > 0)
            .map(|(symbol, &frequency)| Node {
                frequency,
                parent: None,
                symbol: Some(symbol),
            })
            .collect();
        let leaves = pool.len();

        match leaves {
            0 => return Self { codes },
            1 => {
                // A lone symbol still needs one bit on the wire
                if let Some(symbol) = pool[0].symbol {
                    codes[symbol] = HuffmanCode { code: 0, length: 1 };
                }
                return Self { codes };
            }
            _ => {}
        }

        for _ in 1..leaves {
            let mut min: Option<usize> = None;
            let mut next_min: Option<usize> = None;

            for (i, node) in pool.iter().enumerate() {
                if node.parent.is_some() {
                    continue;
                }
                match min {
                    Some(m) if pool[m].frequency <= node.frequency => match next_min {
                        Some(n) if pool[n].frequency <= node.frequency => {}
                        _ => next_min = Some(i),
                    },
                    _ => {
                        next_min = min;
                        min = Some(i);
                    }
                }
            }

            let (Some(a), Some(b)) = (min, next_min) else {
                break;
            };
            let parent = pool.len();
            pool.push(Node {
                frequency: pool[a].frequency + pool[b].frequency,
                parent: None,
                symbol: None,
            });
            pool[a].parent = Some(parent);
            pool[b].parent = Some(parent);
        }

        // Code length of each leaf is its depth below the root
        let mut max_length = 0u8;
        for leaf in 0..leaves {
            let mut depth = 0u8;
            let mut node = leaf;
            while let Some(parent) = pool[node].parent {
                depth += 1;
                node = parent;
            }
            if let Some(symbol) = pool[leaf].symbol {
                codes[symbol].length = depth;
            }
            max_length = max_length.max(depth);
        }
        debug_assert!(max_length <= MAX_CODE_LENGTH);

        let mut counter = 0u32;
        for length in 1..=max_length {
            for entry in codes.iter_mut().filter(|c| c.length == length) {
                entry.code = mirror(counter, length as u32);
                counter += 1;
            }
            counter <<= 1;
        }

        Self { codes }
    }

    /// Code for a length-class symbol
    pub fn code(&self, symbol: usize) -> HuffmanCode {
        self.codes[symbol]
    }

    /// All 32 codes, indexed by symbol
    pub fn codes(&self) -> &[HuffmanCode; NUM_SYMBOLS] {
        &self.codes
    }

    /// Number of table entries written: highest present symbol plus one
    pub fn entry_count(&self) -> usize {
        self.codes
            .iter()
            .rposition(|c| c.length > 0)
            .map_or(0, |i| i + 1)
    }

    /// Write the table as a 5-bit entry count and 4-bit code lengths
    pub fn write_to(&self, writer: &mut BitWriter) {
        let count = self.entry_count();
        writer.write_bits(count as u32, 5);
        for entry in &self.codes[..count] {
            writer.write_bits(entry.length as u32, 4);
        }
    }

    /// Encode `value` as its length-class code followed by the bits under
    /// its implied top bit
    pub fn encode_value(&self, writer: &mut BitWriter, value: u32) {
        let class = length_class(value);
        let entry = self.codes[class as usize];
        debug_assert!(entry.length > 0, "length class {class} missing from table");

        writer.write_bits(entry.code, entry.length as u32);
        if class >= 2 {
            writer.write_bits(value, class as u32 - 1);
        }
    }
}

/// Number of bits needed to represent `value` (0 for 0)
pub const fn length_class(value: u32) -> u8 {
    (u32::BITS - value.leading_zeros()) as u8
}

/// Reverse the low `n_bits` bits of `value`
pub const fn mirror(value: u32, n_bits: u32) -> u32 {
    if n_bits == 0 {
        return 0;
    }
    let mask = if n_bits >= 32 {
        u32::MAX
    } else {
        (1u32 << n_bits) - 1
    };
    (value & mask).reverse_bits() >> (32 - n_bits)
}
