//! Per-block encoding state
//!
//! This module holds the cursor, the adaptive lookahead length and the live
//! dictionary generation for one block, and runs the double-lookahead loop
//! over it.

use super::codebook::CodeBook;
use super::dictionary::Dictionary;
use super::pattern::{Pattern, Symbols};
use crate::common::{BlockStats, Code, LzwdError, Result, FIRST_PATTERN_CODE};
use crate::config::{EncoderOptions, TraceLevel};

/// Encoding state for a single block
#[derive(Debug)]
pub struct EncodeState<'a> {
    /// The block being encoded
    block: &'a [u8],
    /// Live dictionary generation
    dict: Dictionary,
    /// Start of the next Pj read
    cursor: usize,
    /// Code the next inserted pattern receives
    next_code: usize,
    /// Lookahead length tried before shrinking
    max_pattern_size: usize,
    /// Codes emitted so far for this block
    emitted: usize,
    /// Logging verbosity
    trace: TraceLevel,
    /// Block statistics
    stats: BlockStats,
    /// Optional record of every generation's patterns
    codebook: Option<&'a mut CodeBook>,
}

impl<'a> EncodeState<'a> {
    /// Create the state for `block`, rejecting empty blocks
    pub fn new(block: &'a [u8], options: &EncoderOptions) -> Result<Self> {
        if block.is_empty() {
            return Err(LzwdError::EmptyBlock);
        }

        Ok(Self {
            block,
            dict: Dictionary::new(options.dict_size),
            cursor: 0,
            next_code: FIRST_PATTERN_CODE as usize,
            max_pattern_size: 1,
            emitted: 0,
            trace: options.trace,
            stats: BlockStats {
                source_bytes: block.len(),
                ..BlockStats::default()
            },
            codebook: None,
        })
    }

    /// Record every pattern learned into `codebook`
    pub fn with_codebook(mut self, codebook: &'a mut CodeBook) -> Self {
        codebook.start_generation(0);
        self.codebook = Some(codebook);
        self
    }

    /// Current read cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current lookahead length
    pub fn max_pattern_size(&self) -> usize {
        self.max_pattern_size
    }

    /// The live dictionary generation
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Longest dictionary pattern starting at `start`
    ///
    /// Tries `max_pattern_size` symbols (clamped to the end of the block) and
    /// drops the last symbol after every miss. Returns the code and length.
    fn longest_match(&self, start: usize) -> Result<(Code, usize)> {
        let window = self.max_pattern_size.min(self.block.len() - start);
        debug_assert!(window >= 1, "lookahead read at end of block");

        let found = (1..=window).rev().find_map(|len| {
            self.dict
                .lookup(&self.block[start..start + len])
                .map(|code| (code, len))
        });

        // Singletons are seeded into every generation
        debug_assert!(found.is_some(), "no singleton for byte {}", self.block[start]);
        found.ok_or(LzwdError::PatternExhausted { position: start })
    }

    /// Run the lookahead loop over the whole block, appending codes to `out`
    pub fn run(mut self, out: &mut Vec<Code>) -> Result<BlockStats> {
        let block = self.block;
        let end = block.len();

        loop {
            let pj_start = self.cursor;
            let (code_j, len_j) = self.longest_match(pj_start)?;
            let pk_start = pj_start + len_j;

            // Pj reached the end of the block: nothing left to pair it with
            if pk_start >= end {
                self.emit(out, code_j);
                break;
            }

            let (code_k, len_k) = self.longest_match(pk_start)?;
            let pj = &block[pj_start..pk_start];
            let pk = &block[pk_start..pk_start + len_k];

            self.learn(pj, pk)?;
            if self.trace >= TraceLevel::Patterns {
                log::trace!(
                    "@{pj_start}: Pj=[{}] -> {code_j}, Pk=[{}] -> {code_k}, lookahead {}",
                    Symbols(pj),
                    Symbols(pk),
                    self.max_pattern_size
                );
            }
            self.emit(out, code_j);

            // Pk is read again as the next Pj
            self.cursor = pk_start;

            if pk_start + len_k >= end {
                self.emit(out, code_k);
                break;
            }

            if self.next_code >= self.dict.size().slots() {
                self.overflow_reset();
            }
        }

        if self.trace >= TraceLevel::Blocks {
            log::debug!(
                "Encoded block of {} bytes into {} codes ({} resets, longest pattern {})",
                self.stats.source_bytes,
                self.stats.codes,
                self.stats.resets,
                self.stats.longest_pattern
            );
        }

        Ok(self.stats)
    }

    /// Insert `Pj ++ Pk` under the next code and widen the lookahead
    fn learn(&mut self, pj: &[u8], pk: &[u8]) -> Result<()> {
        let pm = Pattern::concat(pj, pk).ok_or(LzwdError::PatternExhausted {
            position: self.cursor,
        })?;
        let len = pm.len();
        let code = self.next_code as Code;

        if let Some(codebook) = self.codebook.as_deref_mut() {
            codebook.record_pattern(code, &pm);
        }
        self.dict.insert(pm, code);

        self.next_code += 1;
        if len > self.max_pattern_size {
            self.max_pattern_size = len;
        }
        self.stats.longest_pattern = self.stats.longest_pattern.max(len);
        Ok(())
    }

    fn emit(&mut self, out: &mut Vec<Code>, code: Code) {
        out.push(code);
        self.emitted += 1;
        self.stats.codes += 1;
    }

    /// Start a new dictionary generation once the code space is used up
    fn overflow_reset(&mut self) {
        if self.trace >= TraceLevel::Blocks {
            log::debug!(
                "Dictionary full at block offset {} after {} codes, resetting",
                self.cursor,
                self.emitted
            );
        }

        self.dict.reset();
        self.next_code = FIRST_PATTERN_CODE as usize;
        self.max_pattern_size = 1;
        self.stats.resets += 1;

        if let Some(codebook) = self.codebook.as_deref_mut() {
            codebook.start_generation(self.emitted);
        }
    }
}
