//! Unpacking state management
//!
//! Holds the output being rebuilt and tracks the leeway: how far the packed
//! data still to be read outruns the output still to be written, which is
//! the extra room an unpacker working in place needs.

use crate::common::RncError;
use crate::Result;

/// Upper bound on the output buffer reserved before decoding starts
const MAX_PREALLOC: usize = 1 << 24;

/// Output buffer and leeway tracking for one file
#[derive(Debug)]
pub struct UnpackState {
    output: Vec<u8>,
    expected_len: usize,
    body_end: usize,
    leeway: isize,
}

impl UnpackState {
    /// Create a state expecting `expected_len` output bytes from a packed
    /// body ending at `body_end`
    pub fn new(expected_len: usize, body_end: usize) -> Self {
        Self {
            output: Vec::with_capacity(expected_len.min(MAX_PREALLOC)),
            expected_len,
            body_end,
            leeway: 0,
        }
    }

    /// True while fewer than the expected bytes have been produced
    pub fn needs_more(&self) -> bool {
        self.output.len() < self.expected_len
    }

    /// Append one literal byte
    pub fn push_literal(&mut self, byte: u8) -> Result<()> {
        if !self.needs_more() {
            return Err(RncError::FileSizeMismatch);
        }
        self.output.push(byte);
        Ok(())
    }

    /// Copy `length` bytes from `distance` bytes back; the ranges may overlap
    pub fn copy_match(&mut self, distance: usize, length: usize) -> Result<()> {
        if distance == 0 || distance > self.output.len() {
            return Err(RncError::HufDecodeError);
        }
        if self.output.len() + length > self.expected_len {
            return Err(RncError::FileSizeMismatch);
        }

        let start = self.output.len() - distance;
        for i in 0..length {
            let byte = self.output[start + i];
            self.output.push(byte);
        }
        Ok(())
    }

    /// Record the leeway at packed position `input_pos`
    pub fn update_leeway(&mut self, input_pos: usize) {
        let input_left = self.body_end as isize - input_pos as isize;
        let output_left = (self.expected_len - self.output.len()) as isize;
        self.leeway = self.leeway.max(input_left - output_left);
    }

    /// Bytes produced so far
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Largest leeway seen
    pub fn leeway(&self) -> u32 {
        self.leeway.max(0) as u32
    }

    /// Finish and return the output and leeway
    pub fn into_parts(self) -> (Vec<u8>, u32) {
        let leeway = self.leeway();
        (self.output, leeway)
    }
}
