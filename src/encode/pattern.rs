//! Dictionary patterns
//!
//! A pattern is the immutable run of byte symbols stored as a dictionary key.
//! Lookups work on borrowed `&[u8]` windows of the block so that probing the
//! dictionary never allocates; a `Pattern` is only built when something is
//! inserted.

use std::fmt;

/// Immutable, non-empty sequence of byte symbols
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pattern(Box<[u8]>);

impl Pattern {
    /// Build a pattern from a symbol slice, `None` if the slice is empty
    pub fn new(symbols: &[u8]) -> Option<Self> {
        if symbols.is_empty() {
            None
        } else {
            Some(Self(symbols.into()))
        }
    }

    /// The one-symbol pattern for `byte`
    pub fn singleton(byte: u8) -> Self {
        Self(Box::new([byte]))
    }

    /// Concatenate two patterns, `head` first
    pub fn concat(head: &[u8], tail: &[u8]) -> Option<Self> {
        let mut symbols = Vec::with_capacity(head.len() + tail.len());
        symbols.extend_from_slice(head);
        symbols.extend_from_slice(tail);
        if symbols.is_empty() {
            None
        } else {
            Some(Self(symbols.into_boxed_slice()))
        }
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the pattern has no symbols
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The symbols of this pattern
    pub fn symbols(&self) -> &[u8] {
        &self.0
    }

    /// Whether this pattern holds exactly `symbols`
    pub fn matches(&self, symbols: &[u8]) -> bool {
        *self.0 == *symbols
    }
}

impl AsRef<[u8]> for Pattern {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Symbols(&self.0), f)
    }
}

/// Space separated decimal symbols, the way debug mode prints blocks
#[derive(Debug, Clone, Copy)]
pub struct Symbols<'a>(pub &'a [u8]);

impl fmt::Display for Symbols<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}
