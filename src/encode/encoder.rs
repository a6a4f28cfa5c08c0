//! Block encoder
//!
//! The encoder turns one block of bytes into a sequence of dictionary codes.
//! Each call works on its own fresh dictionary, so blocks never depend on each
//! other.
//!
//! # Algorithm
//!
//! Starting with a lookahead of one symbol and codes from 256:
//! 1. Read the longest known pattern `Pj` at the cursor, shrinking from the
//!    lookahead length on every miss
//! 2. Read the longest known pattern `Pk` right after `Pj` the same way
//! 3. Learn `Pj ++ Pk` under the next code and widen the lookahead to its
//!    length if it is longer
//! 4. Emit the code of `Pj` and move the cursor to the start of `Pk`
//! 5. When the code space is used up, start over with a fresh dictionary
//! 6. When `Pk` ends the block, emit its code as well and stop

use super::codebook::CodeBook;
use super::state::EncodeState;
use crate::common::{BlockStats, Code, Result};
use crate::config::EncoderOptions;

/// LZWd block encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    options: EncoderOptions,
}

impl Encoder {
    /// Create an encoder with the given options
    pub fn new(options: EncoderOptions) -> Self {
        Self { options }
    }

    /// Options this encoder was built with
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encode one block into codes
    ///
    /// Fails with `EmptyBlock` for an empty slice.
    pub fn encode(&self, block: &[u8]) -> Result<Vec<Code>> {
        let mut codes = Vec::with_capacity(block.len() / 2 + 1);
        self.encode_into(block, &mut codes)?;
        Ok(codes)
    }

    /// Encode one block, appending its codes to `out`
    pub fn encode_into(&self, block: &[u8], out: &mut Vec<Code>) -> Result<BlockStats> {
        EncodeState::new(block, &self.options)?.run(out)
    }

    /// Encode one block and keep the code book of every generation
    pub fn encode_with_codebook(&self, block: &[u8]) -> Result<(Vec<Code>, CodeBook)> {
        let mut codebook = CodeBook::new(self.options.dict_size);
        let mut codes = Vec::with_capacity(block.len() / 2 + 1);
        EncodeState::new(block, &self.options)?
            .with_codebook(&mut codebook)
            .run(&mut codes)?;
        Ok((codes, codebook))
    }
}
