//! Code book recorded during encoding
//!
//! The encoder can keep, for every dictionary generation of a block, the
//! multi-symbol patterns in code order together with the position in the code
//! stream where the generation starts. With that record any code sequence the
//! block produced can be resolved back into bytes. This is how the round-trip
//! property is checked; it is not a decoder, since the record comes from the
//! encoder and is never part of the compressed stream.

use super::pattern::Pattern;
use crate::common::{Code, DictionarySize, LzwdError, Result, FIRST_PATTERN_CODE};

#[derive(Debug, Clone, Default)]
struct Generation {
    /// Index of the first code emitted in this generation
    first_code_index: usize,
    /// Patterns for codes 256.. in order
    patterns: Vec<Pattern>,
}

/// Per-generation code -> pattern record for one block
#[derive(Debug, Clone)]
pub struct CodeBook {
    size: DictionarySize,
    generations: Vec<Generation>,
}

impl CodeBook {
    /// Create an empty code book for dictionaries of `size`
    pub fn new(size: DictionarySize) -> Self {
        Self {
            size,
            generations: Vec::new(),
        }
    }

    /// Open a new generation whose first code is `first_code_index`
    pub(crate) fn start_generation(&mut self, first_code_index: usize) {
        self.generations.push(Generation {
            first_code_index,
            patterns: Vec::with_capacity(self.size.generation_capacity()),
        });
    }

    /// Record the pattern assigned to `code` in the current generation
    pub(crate) fn record_pattern(&mut self, code: Code, pattern: &Pattern) {
        if self.generations.is_empty() {
            self.start_generation(0);
        }
        if let Some(generation) = self.generations.last_mut() {
            debug_assert_eq!(
                code as usize,
                FIRST_PATTERN_CODE as usize + generation.patterns.len()
            );
            generation.patterns.push(pattern.clone());
        }
    }

    /// Number of dictionary generations the block went through
    pub fn generations(&self) -> usize {
        self.generations.len()
    }

    /// Dictionary size the book was recorded with
    pub fn size(&self) -> DictionarySize {
        self.size
    }

    /// Position in the code stream where `generation` starts
    pub fn first_code_index(&self, generation: usize) -> Option<usize> {
        self.generations.get(generation).map(|g| g.first_code_index)
    }

    /// Multi-symbol patterns learned in `generation`
    pub fn pattern_count(&self, generation: usize) -> usize {
        self.generations
            .get(generation)
            .map_or(0, |g| g.patterns.len())
    }

    /// Symbols of `code` in `generation`
    ///
    /// Singleton codes resolve in every generation.
    pub fn pattern(&self, generation: usize, code: Code) -> Option<&[u8]> {
        static SINGLETONS: [u8; 256] = {
            let mut table = [0u8; 256];
            let mut i = 0;
            while i < 256 {
                table[i] = i as u8;
                i += 1;
            }
            table
        };

        if code < FIRST_PATTERN_CODE {
            let i = code as usize;
            return Some(&SINGLETONS[i..i + 1]);
        }
        let g = self.generations.get(generation)?;
        g.patterns
            .get((code - FIRST_PATTERN_CODE) as usize)
            .map(Pattern::symbols)
    }

    /// Generation the code at position `index` of the stream belongs to
    pub fn generation_of(&self, index: usize) -> usize {
        self.generations
            .iter()
            .rposition(|g| g.first_code_index <= index)
            .unwrap_or(0)
    }

    /// Resolve a block's codes back into its bytes
    pub fn resolve(&self, codes: &[Code]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(codes.len() * 2);
        let mut generation = 0;

        for (index, &code) in codes.iter().enumerate() {
            while self
                .generations
                .get(generation + 1)
                .is_some_and(|next| next.first_code_index <= index)
            {
                generation += 1;
            }

            let symbols = self
                .pattern(generation, code)
                .ok_or(LzwdError::UnknownCode { code, generation })?;
            output.extend_from_slice(symbols);
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> CodeBook {
        let mut book = CodeBook::new(DictionarySize::Size1K);
        book.start_generation(0);
        book.record_pattern(256, &Pattern::new(b"ab").unwrap());
        book.record_pattern(257, &Pattern::new(b"bab").unwrap());
        book.start_generation(3);
        book.record_pattern(256, &Pattern::new(b"zz").unwrap());
        book
    }

    #[test]
    fn test_singletons_resolve_everywhere() {
        let book = CodeBook::new(DictionarySize::Size4K);
        assert_eq!(book.pattern(0, 0), Some(&[0u8][..]));
        assert_eq!(book.pattern(5, 255), Some(&[255u8][..]));
        assert_eq!(book.pattern(0, 256), None);
    }

    #[test]
    fn test_generation_lookup() {
        let book = book();
        assert_eq!(book.generations(), 2);
        assert_eq!(book.pattern_count(0), 2);
        assert_eq!(book.pattern_count(1), 1);
        assert_eq!(book.first_code_index(1), Some(3));
        assert_eq!(book.generation_of(0), 0);
        assert_eq!(book.generation_of(2), 0);
        assert_eq!(book.generation_of(3), 1);
        assert_eq!(book.generation_of(10), 1);
    }

    #[test]
    fn test_resolve_switches_generation() {
        let book = book();
        // Code 256 means "ab" before index 3 and "zz" from index 3 on
        let codes = [256, 257, b'x' as Code, 256, 256];
        assert_eq!(book.resolve(&codes).unwrap(), b"abbabxzzzz");
    }

    #[test]
    fn test_resolve_unknown_code() {
        let book = book();
        let err = book.resolve(&[b'a' as Code, 257, 257, 257]).unwrap_err();
        assert!(matches!(
            err,
            LzwdError::UnknownCode {
                code: 257,
                generation: 1
            }
        ));
    }
}
