//! LZWd encoding
//!
//! This module provides the pattern dictionary, the per-block double-lookahead
//! encoder and the streaming block driver that writes `.lzwd` streams.

mod codebook;
mod dictionary;
mod encoder;
mod hash;
mod pattern;
mod state;
mod writer;

pub use codebook::CodeBook;
pub use dictionary::Dictionary;
pub use encoder::Encoder;
pub use hash::slot_hash;
pub use pattern::{Pattern, Symbols};
pub use state::EncodeState;
pub use writer::{compress_stream, compress_stream_with, LzwdWriter};

use crate::common::{Code, DictionarySize, Result};
use crate::config::EncoderOptions;
use std::io::Write;

/// Encode a single block with a fresh dictionary of `dict_size`
pub fn encode_block(data: &[u8], dict_size: DictionarySize) -> Result<Vec<Code>> {
    Encoder::new(EncoderOptions::new(dict_size)).encode(data)
}

/// Convenience function to compress data in memory into a `.lzwd` stream
pub fn compress_bytes(data: &[u8], options: EncoderOptions) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    {
        let mut writer = LzwdWriter::new(&mut output, options)?;
        writer.write_all(data)?;
        writer.finish()?;
    }
    Ok(output)
}
