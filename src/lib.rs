//! RNC - Rust implementation of the Rob Northen Compression RNC1 format
//!
//! This crate packs and unpacks RNC1 ("ProPack" method 1) files, the format
//! used by a number of 1990s game titles for their data files. The format
//! combines LZ77-style back-references over a 32 KB window with per-block
//! Huffman tables, and guards both the packed body and the original data
//! with a CRC-16.
//!
//! # Features
//!
//! - Packing with hash-chain match finding and one-step lazy matching
//! - Unpacking with full header and checksum validation
//! - Self-verifying packer that measures the in-place unpacking leeway
//! - `rnc-cli` command line tool
//!
//! # Example
//!
//! ```no_run
//! use rnc::{pack_verified, unpack_bytes};
//!
//! let data = std::fs::read("level1.dat")?;
//! let packed = pack_verified(&data)?;
//! println!("{} -> {} bytes", packed.stats.unpacked_len, packed.stats.packed_len);
//!
//! let restored = unpack_bytes(&packed.data)?;
//! assert_eq!(restored, data);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod crc;
pub mod error;
pub mod pack;
pub mod unpack;

// Re-export commonly used types
pub use common::{
    has_signature, PackStats, Result, RncError, RncHeader, BLOCK_MAX, HASH_SIZE, HEADER_SIZE,
    MAX_TUPLES, RNC_SIGNATURE, WINDOW_MAX,
};
pub use crc::crc16;
pub use pack::{pack_bytes, pack_verified, Packed};
pub use unpack::{unpack_bytes, unpack_with_leeway, unpacked_length};
