//! BitReader - packed body input
//!
//! Mirror image of the packer's bit writer. The reader keeps a 32-bit window
//! over the current 16-bit cell and the one after it; literal bytes are read
//! starting at the position of that preloaded cell, after which the upper
//! 16 bits are reloaded from the new position.

/// Bit-level reader over a packed body
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Offset of the most recently loaded cell
    pos: usize,
    bit_buf: u32,
    bit_count: u32,
}

impl<'a> BitReader<'a> {
    /// Start reading at `start`
    pub fn new(data: &'a [u8], start: usize) -> Self {
        let mut reader = Self {
            data,
            pos: start,
            bit_buf: 0,
            bit_count: 16,
        };
        reader.bit_buf = reader.word_at(start);
        reader
    }

    /// Little-endian 16-bit word; bytes past the end read as zero
    fn word_at(&self, pos: usize) -> u32 {
        let byte = |i: usize| self.data.get(i).copied().unwrap_or(0) as u32;
        byte(pos) | (byte(pos + 1) << 8)
    }

    /// Look at the low bits selected by `mask` without consuming them
    pub fn peek(&self, mask: u32) -> u32 {
        self.bit_buf & mask
    }

    /// Drop `n_bits` bits, loading the next cell when fewer than 16 remain
    pub fn advance(&mut self, n_bits: u32) {
        self.bit_buf >>= n_bits;
        self.bit_count -= n_bits;
        if self.bit_count < 16 {
            self.pos += 2;
            self.bit_buf |= self.word_at(self.pos) << self.bit_count;
            self.bit_count += 16;
        }
    }

    /// Read `n_bits` bits, least significant first
    pub fn read_bits(&mut self, n_bits: u32) -> u32 {
        // Damaged tables can ask for up to 30 extra bits
        if n_bits > 16 {
            let low = self.read_bits(16);
            return low | (self.read_bits(n_bits - 16) << 16);
        }
        let value = self.peek((1u32 << n_bits) - 1);
        self.advance(n_bits);
        value
    }

    /// Read one literal byte from the byte stream
    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = self.data.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    /// Replace the preloaded cell with the cell at the current position
    ///
    /// Called after a literal run, which consumed the bytes the upper half of
    /// the bit buffer had been loaded from.
    pub fn resync(&mut self) {
        self.bit_count -= 16;
        self.bit_buf &= (1u32 << self.bit_count) - 1;
        self.bit_buf |= self.word_at(self.pos) << self.bit_count;
        self.bit_count += 16;
    }

    /// Current byte position
    pub fn position(&self) -> usize {
        self.pos
    }
}
