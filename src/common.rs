//! Common types and constants for the LZWd compressor
//!
//! This module defines the core types, constants, and structures shared by the
//! dictionary, the block encoder and the `.lzwd` stream driver.

use thiserror::Error;

/// A dictionary code.
///
/// Codes never exceed `DictionarySize::Size4K.slots() - 1` (4095), so a 16-bit
/// word always holds one without truncation.
pub type Code = u16;

/// Dictionary size (number of hash slots, which is also the code space)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DictionarySize {
    /// 1024 slots (10-bit codes)
    Size1K = 1024,
    /// 2048 slots (11-bit codes)
    Size2K = 2048,
    /// 4096 slots (12-bit codes)
    #[default]
    Size4K = 4096,
}

impl DictionarySize {
    /// Number of hash slots, which is also the first code that forces a reset
    pub fn slots(&self) -> usize {
        *self as usize
    }

    /// Get the number of bits needed to represent any code of this dictionary
    pub fn bits(&self) -> u8 {
        match self {
            DictionarySize::Size1K => 10,
            DictionarySize::Size2K => 11,
            DictionarySize::Size4K => 12,
        }
    }

    /// Number of multi-symbol patterns one dictionary generation can hold
    pub fn generation_capacity(&self) -> usize {
        self.slots() - SINGLETON_COUNT
    }

    /// Create a DictionarySize from the number of code bits
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            10 => Ok(DictionarySize::Size1K),
            11 => Ok(DictionarySize::Size2K),
            12 => Ok(DictionarySize::Size4K),
            _ => Err(LzwdError::InvalidDictionaryBits(bits)),
        }
    }

    /// Create a DictionarySize from a slot count
    pub fn from_slots(slots: u32) -> Result<Self> {
        match slots {
            1024 => Ok(DictionarySize::Size1K),
            2048 => Ok(DictionarySize::Size2K),
            4096 => Ok(DictionarySize::Size4K),
            _ => Err(LzwdError::InvalidDictionarySize(slots)),
        }
    }
}

/// Error type for LZWd operations
#[derive(Debug, Error)]
pub enum LzwdError {
    /// A block with no bytes was handed to the encoder
    #[error("Cannot encode an empty block")]
    EmptyBlock,

    /// Invalid dictionary size bits
    #[error("Invalid dictionary bits: {0} (expected 10, 11, or 12)")]
    InvalidDictionaryBits(u8),

    /// Invalid dictionary slot count
    #[error("Invalid dictionary size: {0} (expected 1024, 2048, or 4096)")]
    InvalidDictionarySize(u32),

    /// Invalid block size
    #[error("Invalid block size: {0} (expected 1..={max})", max = MAX_BLOCK_SIZE)]
    InvalidBlockSize(usize),

    /// The lookahead shrank to an empty pattern without a dictionary hit
    #[error("No dictionary pattern matches at block offset {position}")]
    PatternExhausted {
        /// Block offset where the lookup started
        position: usize,
    },

    /// A code has no pattern in its dictionary generation
    #[error("Unknown code {code} in dictionary generation {generation}")]
    UnknownCode {
        /// The unresolved code
        code: Code,
        /// Generation the code was emitted in
        generation: usize,
    },

    /// Invalid compressed stream format
    #[error("Invalid compressed data format")]
    InvalidFormat,

    /// Invalid data format or corruption
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unexpected end of input
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for LZWd operations
pub type Result<T> = std::result::Result<T, LzwdError>;

// LZWd constants

/// Number of single-byte patterns seeded into every dictionary
pub const SINGLETON_COUNT: usize = 256;

/// First code assigned to a multi-symbol pattern
pub const FIRST_PATTERN_CODE: Code = 256;

/// Default block size read by the stream driver
pub const BLOCK_SIZE_DEFAULT: usize = 64000;

/// Largest accepted block size (16 MiB)
pub const MAX_BLOCK_SIZE: usize = 16 * 1024 * 1024;

/// Extension of compressed files
pub const LZWD_EXTENSION: &str = "lzwd";

/// Statistics for one encoded block
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlockStats {
    /// Raw bytes in the block
    pub source_bytes: usize,
    /// Codes emitted for the block
    pub codes: usize,
    /// Overflow resets performed while encoding the block
    pub resets: usize,
    /// Longest pattern inserted into the dictionary
    pub longest_pattern: usize,
}

/// Statistics for a whole compression run
#[derive(Debug, Default, Clone)]
pub struct CompressionStats {
    /// Number of blocks encoded
    pub blocks: usize,
    /// Total raw bytes read
    pub input_bytes: u64,
    /// Total codes emitted
    pub codes: u64,
    /// Total bytes written, including header and frame headers
    pub output_bytes: u64,
    /// Total overflow resets
    pub resets: u64,
    /// Size of the last block read
    pub last_block_size: usize,
    /// Longest pattern inserted in any block
    pub longest_pattern: usize,
}

impl CompressionStats {
    /// Fold the statistics of one block into the run totals
    pub fn record_block(&mut self, block: &BlockStats) {
        self.blocks += 1;
        self.input_bytes += block.source_bytes as u64;
        self.codes += block.codes as u64;
        self.resets += block.resets as u64;
        self.last_block_size = block.source_bytes;
        self.longest_pattern = self.longest_pattern.max(block.longest_pattern);
    }

    /// Output size relative to input size (0.0 for empty input)
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Percentage of the input saved, `(1 - out/in) * 100`
    ///
    /// Negative when the output grew.
    pub fn space_savings(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            (1.0 - self.compression_ratio()) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_size() {
        // Test slots
        assert_eq!(DictionarySize::Size1K.slots(), 1024);
        assert_eq!(DictionarySize::Size2K.slots(), 2048);
        assert_eq!(DictionarySize::Size4K.slots(), 4096);
        assert_eq!(DictionarySize::default(), DictionarySize::Size4K);

        // Test bits
        assert_eq!(DictionarySize::Size1K.bits(), 10);
        assert_eq!(DictionarySize::Size2K.bits(), 11);
        assert_eq!(DictionarySize::Size4K.bits(), 12);

        // Test from_bits
        assert_eq!(
            DictionarySize::from_bits(10).unwrap(),
            DictionarySize::Size1K
        );
        assert_eq!(
            DictionarySize::from_bits(12).unwrap(),
            DictionarySize::Size4K
        );
        assert!(DictionarySize::from_bits(9).is_err());

        // Test from_slots
        assert_eq!(
            DictionarySize::from_slots(2048).unwrap(),
            DictionarySize::Size2K
        );
        assert!(DictionarySize::from_slots(512).is_err());
    }

    #[test]
    fn test_codes_fit_in_bits() {
        for size in [
            DictionarySize::Size1K,
            DictionarySize::Size2K,
            DictionarySize::Size4K,
        ] {
            let max_code = size.slots() - 1;
            assert!(max_code < (1 << size.bits()));
            assert!(max_code <= Code::MAX as usize);
            assert_eq!(size.generation_capacity(), size.slots() - 256);
        }
    }

    #[test]
    fn test_stats_accumulate() {
        let mut stats = CompressionStats::default();
        stats.record_block(&BlockStats {
            source_bytes: 100,
            codes: 40,
            resets: 0,
            longest_pattern: 6,
        });
        stats.record_block(&BlockStats {
            source_bytes: 20,
            codes: 15,
            resets: 1,
            longest_pattern: 3,
        });

        assert_eq!(stats.blocks, 2);
        assert_eq!(stats.input_bytes, 120);
        assert_eq!(stats.codes, 55);
        assert_eq!(stats.resets, 1);
        assert_eq!(stats.last_block_size, 20);
        assert_eq!(stats.longest_pattern, 6);

        stats.output_bytes = 60;
        assert!((stats.compression_ratio() - 0.5).abs() < f64::EPSILON);
        assert!((stats.space_savings() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_constants() {
        assert_eq!(SINGLETON_COUNT, 256);
        assert_eq!(FIRST_PATTERN_CODE as usize, SINGLETON_COUNT);
        assert_eq!(BLOCK_SIZE_DEFAULT, 64000);
        assert_eq!(LZWD_EXTENSION, "lzwd");
    }
}
