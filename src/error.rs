//! Error handling for LZWd operations
//!
//! This module defines the error types used throughout the LZWd implementation.
//! It uses thiserror for ergonomic error handling and provides context-specific
//! error variants.

pub use crate::common::LzwdError;
pub use crate::common::Result;
