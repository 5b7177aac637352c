//! Match finder for the RNC1 packer
//!
//! This module scans one window for back-references. Candidates come from
//! the hash chains, the longest match wins (the oldest on ties) and every
//! match is held back one position to see whether the next byte starts a
//! clearly longer one.

use super::state::PackState;
use crate::common::{MAX_TUPLES, MIN_MATCH_LENGTH};

/// Result of a chain search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Length of the found match (0 if no match)
    pub length: usize,
    /// Window position the match copies from
    pub source: usize,
}

impl MatchResult {
    /// Create a new match result
    pub fn new(length: usize, source: usize) -> Self {
        Self { length, source }
    }

    /// Create a "no match" result
    pub fn no_match() -> Self {
        Self {
            length: 0,
            source: 0,
        }
    }

    /// Check if this is long enough to encode as a back-reference
    pub fn is_match(&self) -> bool {
        self.length >= MIN_MATCH_LENGTH
    }
}

impl PackState {
    /// Find the longest match for the bytes at `pos` among earlier positions
    /// sharing its prefix hash
    pub fn find_longest_match(&self, pos: usize) -> MatchResult {
        let limit = self.window_len - pos;
        let mut best = MatchResult::no_match();

        for candidate in self.chain(self.hash_at(pos)) {
            let length = self.compare_sequences(pos, candidate, limit);
            if length > best.length {
                best = MatchResult::new(length, candidate);
                // Nothing later in the chain can be strictly longer
                if length == limit {
                    break;
                }
            }
        }

        best
    }

    /// Length of the common run starting at `pos` and `candidate`, at most `limit`
    fn compare_sequences(&self, pos: usize, candidate: usize, limit: usize) -> usize {
        self.window[pos..pos + limit]
            .iter()
            .zip(&self.window[candidate..])
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Produce the tuple list for the loaded window
    ///
    /// Context positions are indexed first so the block can refer back into
    /// already packed data. Scanning stops at the window end or when the
    /// tuple list is full.
    pub fn scan_block(&mut self) {
        self.pos = 0;
        while self.pos < self.block_start {
            self.insert_position(self.pos);
            self.pos += 1;
        }

        let mut deferred: Option<MatchResult> = None;

        while self.pos < self.window_len && self.tuples.len() < MAX_TUPLES {
            let remaining = self.window_len - self.pos;
            if remaining < MIN_MATCH_LENGTH {
                self.emit_raw(remaining);
                continue;
            }

            let best = self.find_longest_match(self.pos);
            self.insert_position(self.pos);
            let scanned = self.pos;

            match deferred {
                Some(pending) => {
                    // The pending match starts one byte back
                    self.pos -= 1;
                    if best.length >= pending.length + 2 {
                        self.emit_raw(1);
                        self.pos += 1;
                        deferred = Some(best);
                    } else {
                        self.emit_pair(pending.source, pending.length);
                        deferred = None;
                    }
                }
                None if best.is_match() => {
                    self.pos += 1;
                    deferred = Some(best);
                }
                None => self.emit_raw(1),
            }

            // Index the positions covered by a committed match
            for skipped in scanned + 1..self.pos {
                self.insert_position(skipped);
            }
        }

        if deferred.is_some() {
            self.pos -= 1;
            self.emit_raw(1);
        }
    }
}
