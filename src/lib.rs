//! LZWd - adaptive dictionary compressor with double lookahead
//!
//! This crate implements LZWd, a Lempel-Ziv-Welch variant. Like classic LZW it
//! replaces recurring byte patterns with dictionary codes, but instead of
//! extending the matched pattern by one symbol it joins the two longest
//! consecutive matches into a new entry. The lookahead window grows with the
//! longest pattern learned, so long runs are absorbed in few steps.
//!
//! # Features
//!
//! - Hash-chained pattern dictionary seeded with all 256 single bytes
//! - Dictionary sizes: 1K, 2K and 4K slots (10, 11 and 12-bit codes)
//! - Whole-dictionary reset when the code space is exhausted
//! - Independent blocks (64000 bytes by default)
//! - `.lzwd` stream container with 16-bit little-endian code words
//! - Streaming API via the `Write` trait
//! - Per-generation code book for checking that codes cover the input
//!
//! The crate is encode-only. Codes are emitted before the patterns they
//! depend on can be reconstructed, so no decoder is provided.
//!
//! # Example - Encoding a block
//!
//! ```
//! use lzwd::{encode_block, DictionarySize, Encoder, EncoderOptions};
//!
//! let codes = encode_block(b"ABABABAB", DictionarySize::Size4K)?;
//! assert_eq!(codes, vec![65, 66, 256, 258]);
//!
//! // Keep the code book to check the codes cover the block
//! let encoder = Encoder::new(EncoderOptions::default());
//! let (codes, book) = encoder.encode_with_codebook(b"TOBEORNOTTOBEORTOBEORNOT")?;
//! assert_eq!(book.resolve(&codes)?, b"TOBEORNOTTOBEORTOBEORNOT");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - Writing a stream
//!
//! ```no_run
//! use lzwd::{compress_bytes, compress_stream, EncoderOptions, LzwdWriter};
//! use std::fs::File;
//! use std::io::Write;
//!
//! // Compress data in-memory
//! let compressed = compress_bytes(b"Hello, World! Hello, World!", EncoderOptions::default())?;
//!
//! // Or stream a file
//! let input = File::open("data.bin")?;
//! let output = File::create("data.lzwd")?;
//! let stats = compress_stream(input, output, EncoderOptions::default())?;
//! println!("{} blocks, {:.2}% saved", stats.blocks, stats.space_savings());
//!
//! // Or push data through a writer
//! let mut writer = LzwdWriter::new(Vec::new(), EncoderOptions::default())?;
//! writer.write_all(&compressed)?;
//! let stream = writer.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod config;
pub mod encode;
pub mod error;
pub mod format;

// Re-export commonly used types
pub use common::{
    BlockStats, Code, CompressionStats, DictionarySize, LzwdError, Result, BLOCK_SIZE_DEFAULT,
    FIRST_PATTERN_CODE, MAX_BLOCK_SIZE,
};
pub use config::{EncoderOptions, TraceLevel};
pub use encode::{
    compress_stream, compress_stream_with, CodeBook, Dictionary, Encoder, LzwdWriter, Pattern,
};
pub use format::{inspect_stream, BlockHeader, BlockReader, StreamHeader, StreamSummary};

// Convenience functions

/// Encode one block with a fresh dictionary
///
/// # Arguments
/// * `data` - The block to encode, at least one byte
/// * `dict_size` - Dictionary size (1K, 2K, or 4K slots)
///
/// # Returns
/// The codes of the block, each below `dict_size.slots()`
pub fn encode_block(data: &[u8], dict_size: DictionarySize) -> Result<Vec<Code>> {
    encode::encode_block(data, dict_size)
}

/// Compress data into an in-memory `.lzwd` stream
///
/// # Arguments
/// * `data` - The data to compress, split into `options.block_size` blocks
/// * `options` - Dictionary size and block size
///
/// # Returns
/// A vector containing the stream header and one frame per block
pub fn compress_bytes(data: &[u8], options: EncoderOptions) -> Result<Vec<u8>> {
    encode::compress_bytes(data, options)
}
