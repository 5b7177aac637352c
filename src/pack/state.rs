//! Packing state management
//!
//! This module owns the per-block scratch space of the packer: the window
//! (context followed by new block data), the hash-chain index and the tuple
//! list. One `PackState` is reused for every block of a file and reset when
//! the next window is loaded.

use super::NO_LINK;
use crate::common::{HASH_SIZE, MAX_TUPLES, WINDOW_MAX};

/// One literal run followed by an optional back-reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tuple {
    /// Number of literal bytes copied verbatim
    pub raw_len: usize,
    /// Backward distance of the back-reference (unused on the last tuple)
    pub distance: usize,
    /// Length of the back-reference (unused on the last tuple)
    pub match_len: usize,
}

/// Packer scratch space for one block
#[derive(Debug)]
pub struct PackState {
    /// Context bytes followed by the new block bytes
    pub window: Vec<u8>,
    /// Number of valid bytes in `window`
    pub window_len: usize,
    /// Offset of the first new byte (length of the context)
    pub block_start: usize,
    /// Scan cursor within the window
    pub pos: usize,

    /// Oldest position per hash bucket
    pub hash_head: [u16; HASH_SIZE],
    /// Newest position per hash bucket
    pub hash_tail: [u16; HASH_SIZE],
    /// Next newer position with the same hash, per window position
    pub links: Vec<u16>,

    /// Tuples of the block; the last entry is the open (final) tuple
    pub tuples: Vec<Tuple>,
}

impl PackState {
    /// Create an empty state
    pub fn new() -> Self {
        Self {
            window: vec![0; WINDOW_MAX],
            window_len: 0,
            block_start: 0,
            pos: 0,
            hash_head: [NO_LINK; HASH_SIZE],
            hash_tail: [NO_LINK; HASH_SIZE],
            links: vec![NO_LINK; WINDOW_MAX],
            tuples: Vec::with_capacity(MAX_TUPLES),
        }
    }

    /// Load a new window and reset the index and tuple list
    ///
    /// `window` holds `context` bytes of already packed data followed by the
    /// bytes to pack in this block.
    pub fn load_window(&mut self, window: &[u8], context: usize) {
        debug_assert!(window.len() <= WINDOW_MAX);
        debug_assert!(context <= window.len());

        self.window[..window.len()].copy_from_slice(window);
        self.window_len = window.len();
        self.block_start = context;
        self.pos = 0;

        self.reset_hash();
        self.tuples.clear();
        self.tuples.push(Tuple::default());
    }

    /// Number of new bytes covered by the tuples produced so far
    pub fn consumed(&self) -> usize {
        self.pos - self.block_start
    }

    /// Number of back-references emitted in this block
    pub fn match_count(&self) -> usize {
        self.tuples.len() - 1
    }

    /// Bytes of the current block data
    pub fn block_data(&self) -> &[u8] {
        &self.window[self.block_start..self.window_len]
    }

    /// Extend the open tuple's literal run by `n` bytes
    pub fn emit_raw(&mut self, n: usize) {
        if let Some(last) = self.tuples.last_mut() {
            last.raw_len += n;
        }
        self.pos += n;
    }

    /// Close the open tuple with a back-reference at the cursor
    pub fn emit_pair(&mut self, source: usize, length: usize) {
        if let Some(last) = self.tuples.last_mut() {
            last.distance = self.pos - source;
            last.match_len = length;
        }
        self.tuples.push(Tuple::default());
        self.pos += length;
    }
}

impl Default for PackState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_window() {
        let mut state = PackState::new();
        state.load_window(b"contextDATA", 7);

        assert_eq!(state.window_len, 11);
        assert_eq!(state.block_start, 7);
        assert_eq!(state.block_data(), b"DATA");
        assert_eq!(state.tuples, vec![Tuple::default()]);
        assert!(state.hash_head.iter().all(|&h| h == NO_LINK));
    }

    #[test]
    fn test_emit() {
        let mut state = PackState::new();
        state.load_window(b"abcabcabc", 0);

        state.emit_raw(3);
        state.emit_pair(0, 6);

        assert_eq!(state.pos, 9);
        assert_eq!(state.consumed(), 9);
        assert_eq!(state.match_count(), 1);
        assert_eq!(
            state.tuples[0],
            Tuple {
                raw_len: 3,
                distance: 3,
                match_len: 6
            }
        );
        assert_eq!(state.tuples[1], Tuple::default());
    }
}
