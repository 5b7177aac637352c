//! Hash-chain index for the packer
//!
//! Every window position is filed under the hash of its 3-byte prefix.
//! Chains are kept oldest first: `hash_head` holds the oldest position of a
//! bucket, `links` points each position at the next newer one, and
//! `hash_tail` remembers the newest so appending stays constant time.

use super::{state::PackState, NO_LINK};
use crate::common::HASH_SIZE;

/// Hash of the 3-byte prefix `a b c`
pub const fn prefix_hash(a: u8, b: u8, c: u8) -> usize {
    (((a as usize) * 7 + b as usize) * 7 + c as usize) % HASH_SIZE
}

impl PackState {
    /// Hash of the prefix at `pos`; bytes past the window read as zero
    pub fn hash_at(&self, pos: usize) -> usize {
        let byte = |i: usize| {
            if i < self.window_len {
                self.window[i]
            } else {
                0
            }
        };
        prefix_hash(byte(pos), byte(pos + 1), byte(pos + 2))
    }

    /// Empty every chain
    pub fn reset_hash(&mut self) {
        self.hash_head.fill(NO_LINK);
        self.hash_tail.fill(NO_LINK);
    }

    /// Append `pos` to the chain of its prefix hash
    pub fn insert_position(&mut self, pos: usize) {
        let hash = self.hash_at(pos);
        let tail = self.hash_tail[hash];

        if tail == NO_LINK {
            self.hash_head[hash] = pos as u16;
        } else {
            self.links[tail as usize] = pos as u16;
        }
        self.hash_tail[hash] = pos as u16;
        self.links[pos] = NO_LINK;
    }

    /// Iterate the chain for `hash`, oldest position first
    pub fn chain(&self, hash: usize) -> ChainIter<'_> {
        ChainIter {
            links: &self.links,
            next: self.hash_head[hash],
        }
    }
}

/// Walks one hash chain from oldest to newest
#[derive(Debug)]
pub struct ChainIter<'a> {
    links: &'a [u16],
    next: u16,
}

impl Iterator for ChainIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next == NO_LINK {
            return None;
        }
        let pos = self.next as usize;
        self.next = self.links[pos];
        Some(pos)
    }
}
