//! Common types and constants for the RNC1 format
//!
//! This module defines the core types, constants, and structures used by both
//! the packer and the unpacker: the error type, the fixed 18-byte header
//! record and the limits that shape every block.

use thiserror::Error;

/// Error type for RNC operations
#[derive(Debug, Error)]
pub enum RncError {
    /// Input does not start with the RNC1 signature
    #[error("File is not RNC-1 format")]
    NotRncFile,

    /// A Huffman code or back-reference in the packed stream could not be decoded
    #[error("Huffman decode error")]
    HufDecodeError,

    /// Decoded size differs from the size recorded in the header
    #[error("File size mismatch")]
    FileSizeMismatch,

    /// CRC of the packed body does not match the header
    #[error("Incorrect packed CRC: expected {expected:04X}, got {actual:04X}")]
    PackedCrcMismatch {
        /// CRC stored in the header
        expected: u16,
        /// CRC computed over the packed body
        actual: u16,
    },

    /// CRC of the unpacked data does not match the header
    #[error("Incorrect unpacked CRC: expected {expected:04X}, got {actual:04X}")]
    UnpackedCrcMismatch {
        /// CRC stored in the header
        expected: u16,
        /// CRC computed over the decoded data
        actual: u16,
    },

    /// Input already carries the RNC1 signature
    #[error("Input seems to be already RNC1 packed")]
    AlreadyPacked,

    /// The decompressor rejected freshly packed output
    #[error("Test unpack: {0}")]
    SelfTest(Box<RncError>),

    /// Test unpack produced a different number of bytes
    #[error("Test unpack: lengths do not match (expected {expected}, got {actual})")]
    LengthMismatch {
        /// Length of the original input
        expected: usize,
        /// Length produced by the decompressor
        actual: usize,
    },

    /// Test unpack produced different bytes
    #[error("Test unpack: files do not match")]
    ContentMismatch,

    /// Leeway does not fit the one-byte header field
    #[error("Unable to handle leeway {0} > 255")]
    LeewayTooLarge(u32),

    /// Chunk count does not fit the one-byte header field
    #[error("Too many chunks: {0} (header holds at most 255)")]
    TooManyChunks(usize),

    /// Input length does not fit the 32-bit header field
    #[error("Input too large: {0} bytes")]
    InputTooLarge(usize),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RncError {
    /// Legacy numeric error code reported by classic RNC unpackers
    ///
    /// Errors raised only by the packer or the I/O layer have no legacy code.
    pub fn code(&self) -> Option<i32> {
        match self {
            RncError::NotRncFile => Some(-1),
            RncError::HufDecodeError => Some(-2),
            RncError::FileSizeMismatch => Some(-3),
            RncError::PackedCrcMismatch { .. } => Some(-4),
            RncError::UnpackedCrcMismatch { .. } => Some(-5),
            RncError::SelfTest(inner) => inner.code(),
            _ => None,
        }
    }
}

/// Result type alias for RNC operations
pub type Result<T> = std::result::Result<T, RncError>;

// RNC1 format constants

/// File signature: "RNC\x01"
pub const RNC_SIGNATURE: u32 = 0x524E_4301;

/// Size of the fixed file header
pub const HEADER_SIZE: usize = 18;

/// Maximum number of new bytes packed per block
pub const BLOCK_MAX: usize = 8192;

/// Maximum window size (context plus new block data)
pub const WINDOW_MAX: usize = 32767;

/// Maximum number of tuples per block, including the final one
pub const MAX_TUPLES: usize = 4096;

/// Number of hash buckets (prime)
pub const HASH_SIZE: usize = 509;

/// Minimum back-reference length
pub const MIN_MATCH_LENGTH: usize = 3;

/// Number of length-class symbols in every Huffman table
pub const NUM_SYMBOLS: usize = 32;

/// Largest leeway the header byte can record
pub const MAX_LEEWAY: u32 = 255;

/// Fixed 18-byte RNC1 header
///
/// All multi-byte fields are big-endian on disk. The checksum fields are
/// 16 bits wide even though the checksum routine returns a wider integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RncHeader {
    /// Length of the original data
    pub unpacked_len: u32,
    /// Length of the packed body following the header
    pub packed_len: u32,
    /// CRC-16 of the original data
    pub unpacked_crc: u16,
    /// CRC-16 of the packed body
    pub packed_crc: u16,
    /// Extra scratch bytes an in-place unpacker needs
    pub leeway: u8,
    /// Number of blocks in the body
    pub chunks: u8,
}

impl RncHeader {
    /// Parse a header from the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(RncError::NotRncFile);
        }
        if read_u32_be(data, 0) != RNC_SIGNATURE {
            return Err(RncError::NotRncFile);
        }

        Ok(Self {
            unpacked_len: read_u32_be(data, 4),
            packed_len: read_u32_be(data, 8),
            unpacked_crc: u16::from_be_bytes([data[12], data[13]]),
            packed_crc: u16::from_be_bytes([data[14], data[15]]),
            leeway: data[16],
            chunks: data[17],
        })
    }

    /// Serialize the header
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&RNC_SIGNATURE.to_be_bytes());
        out[4..8].copy_from_slice(&self.unpacked_len.to_be_bytes());
        out[8..12].copy_from_slice(&self.packed_len.to_be_bytes());
        out[12..14].copy_from_slice(&self.unpacked_crc.to_be_bytes());
        out[14..16].copy_from_slice(&self.packed_crc.to_be_bytes());
        out[16] = self.leeway;
        out[17] = self.chunks;
        out
    }

    /// Overwrite the first 18 bytes of `buf` with this header
    pub fn write_to(&self, buf: &mut [u8]) {
        buf[..HEADER_SIZE].copy_from_slice(&self.to_bytes());
    }
}

/// Check whether `data` starts with the RNC1 signature
pub fn has_signature(data: &[u8]) -> bool {
    data.len() >= 4 && read_u32_be(data, 0) == RNC_SIGNATURE
}

fn read_u32_be(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Statistics gathered while packing one file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PackStats {
    /// Length of the original data
    pub unpacked_len: usize,
    /// Total length of the packed file including the header
    pub packed_len: usize,
    /// Number of blocks written
    pub chunks: usize,
    /// Leeway recorded in the header
    pub leeway: u8,
    /// Number of bytes stored as literals
    pub literal_count: usize,
    /// Number of back-references emitted
    pub match_count: usize,
    /// Longest back-reference emitted
    pub longest_match: usize,
}

impl PackStats {
    /// Packed size as a fraction of the original size
    pub fn ratio(&self) -> f64 {
        if self.unpacked_len == 0 {
            0.0
        } else {
            self.packed_len as f64 / self.unpacked_len as f64
        }
    }
}
