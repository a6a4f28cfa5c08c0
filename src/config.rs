//! Encoder configuration.

use crate::common::{DictionarySize, LzwdError, Result, BLOCK_SIZE_DEFAULT, MAX_BLOCK_SIZE};

/// How much the encoder reports through the `log` facade.
///
/// The encoder never reads process-wide flags; whoever builds the options
/// decides how chatty it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TraceLevel {
    /// No log output from the encoder.
    #[default]
    Off,
    /// One `debug` record per block and per overflow reset.
    Blocks,
    /// Additionally one `trace` record per lookahead iteration.
    Patterns,
}

/// Encoder and stream driver parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Dictionary slot count (also the code space).
    pub dict_size: DictionarySize,
    /// Block size used by the stream driver.
    pub block_size: usize,
    /// Logging verbosity of the encoder.
    pub trace: TraceLevel,
}

impl EncoderOptions {
    /// Reference configuration: 4096-slot dictionary, 64000-byte blocks.
    pub const DEFAULT: Self = Self {
        dict_size: DictionarySize::Size4K,
        block_size: BLOCK_SIZE_DEFAULT,
        trace: TraceLevel::Off,
    };

    /// Create options for the given dictionary size with default block size.
    pub fn new(dict_size: DictionarySize) -> Self {
        Self {
            dict_size,
            ..Self::DEFAULT
        }
    }

    /// Set the dictionary size.
    pub fn with_dict_size(mut self, dict_size: DictionarySize) -> Self {
        self.dict_size = dict_size;
        self
    }

    /// Set the block size.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the trace level.
    pub fn with_trace(mut self, trace: TraceLevel) -> Self {
        self.trace = trace;
        self
    }

    /// Check that the block size is usable.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(LzwdError::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
