//! BitWriter - packed body output
//!
//! This module implements the bit stream used by the RNC1 body. Bits are
//! collected LSB first and stored in 16-bit little-endian cells, while literal
//! bytes are appended directly to the byte stream. A cell is reserved before
//! its bits are known, so literal runs land between consecutive cells.

use crate::common::HEADER_SIZE;

/// Buffer growth increment
pub const GROW_INCREMENT: usize = 4096;

/// Spare bytes kept at the end of the buffer at all times
const SLACK: usize = 16;

/// Bit-level writer producing the packed body after an 18-byte header gap
#[derive(Debug)]
pub struct BitWriter {
    buffer: Vec<u8>,
    /// Offset of the reserved cell receiving the next 16 bits
    cell_pos: usize,
    /// Offset of the next literal byte (or next cell to reserve)
    byte_pos: usize,
    bit_buf: u32,
    bit_count: u32,
}

impl BitWriter {
    /// Create a writer whose first cell directly follows the header
    pub fn new() -> Self {
        let mut writer = Self {
            buffer: vec![0; GROW_INCREMENT],
            cell_pos: HEADER_SIZE,
            byte_pos: HEADER_SIZE + 2,
            bit_buf: 0,
            bit_count: 0,
        };
        // The unpacker discards the first two bits of the stream
        writer.write_bits(0, 2);
        writer
    }

    /// Append the low `n_bits` bits of `value`, least significant first
    pub fn write_bits(&mut self, value: u32, n_bits: u32) {
        debug_assert!(n_bits <= 16);

        let value = value & ((1u32 << n_bits) - 1);
        self.bit_buf |= value << self.bit_count;
        self.bit_count += n_bits;

        if self.bit_count > 16 {
            self.buffer[self.cell_pos] = self.bit_buf as u8;
            self.buffer[self.cell_pos + 1] = (self.bit_buf >> 8) as u8;
            self.bit_buf >>= 16;
            self.bit_count -= 16;

            self.cell_pos = self.byte_pos;
            self.byte_pos += 2;
            self.ensure_space();
        }
    }

    /// Append one literal byte outside the bit stream
    pub fn write_byte(&mut self, value: u8) {
        self.buffer[self.byte_pos] = value;
        self.byte_pos += 1;
        self.ensure_space();
    }

    fn ensure_space(&mut self) {
        if self.byte_pos + SLACK > self.buffer.len() {
            let new_len = self.buffer.len() + GROW_INCREMENT;
            self.buffer.resize(new_len, 0);
        }
    }

    /// Number of bytes written so far, header gap included
    pub fn len(&self) -> usize {
        self.byte_pos
    }

    /// True when nothing beyond the header gap and the first cell exists
    pub fn is_empty(&self) -> bool {
        self.byte_pos <= HEADER_SIZE + 2
    }

    /// Pad the pending bits to a whole cell and return the buffer
    ///
    /// The first `HEADER_SIZE` bytes are left zeroed for the caller.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.write_bits(0, 17 - self.bit_count);
            // Release the cell reserved by the forced flush
            self.byte_pos -= 2;
        }
        self.buffer.truncate(self.byte_pos);
        self.buffer
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}
