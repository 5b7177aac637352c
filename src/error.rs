//! Error handling for RNC operations
//!
//! This module defines the error types used throughout the packer and
//! unpacker. It uses thiserror for ergonomic error handling; the unpacker
//! variants keep the legacy numeric codes available via [`RncError::code`].

pub use crate::common::Result;
pub use crate::common::RncError;
