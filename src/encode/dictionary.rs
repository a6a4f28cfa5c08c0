//! Hash-chained pattern dictionary
//!
//! Every slot holds the head of a singly linked collision chain. Entries live
//! in one arena vector and link to each other by index, so an empty slot and a
//! chain end are both plain `None`s rather than sentinel values.
//!
//! A fresh dictionary always contains the 256 singleton patterns with
//! `code == byte`. That seed is built once per [`DictionarySize`] and cloned
//! for every new generation.

use super::hash::slot_hash;
use super::pattern::Pattern;
use crate::common::{Code, DictionarySize, SINGLETON_COUNT};
use std::sync::OnceLock;

/// Index of an entry in the arena
type EntryId = u32;

#[derive(Debug, Clone)]
struct Entry {
    pattern: Pattern,
    code: Code,
    next: Option<EntryId>,
}

/// Pattern -> code table with a fixed number of slots
#[derive(Debug, Clone)]
pub struct Dictionary {
    size: DictionarySize,
    /// Chain head per slot
    heads: Vec<Option<EntryId>>,
    /// All entries in insertion order
    entries: Vec<Entry>,
}

impl Dictionary {
    /// Create a dictionary seeded with the 256 singleton patterns
    pub fn new(size: DictionarySize) -> Self {
        Self::seed(size).clone()
    }

    /// A dictionary with every slot empty, not even singletons
    fn empty(size: DictionarySize) -> Self {
        Self {
            size,
            heads: vec![None; size.slots()],
            entries: Vec::with_capacity(size.slots()),
        }
    }

    /// Cached singleton seed for `size`
    fn seed(size: DictionarySize) -> &'static Dictionary {
        static SEED_1K: OnceLock<Dictionary> = OnceLock::new();
        static SEED_2K: OnceLock<Dictionary> = OnceLock::new();
        static SEED_4K: OnceLock<Dictionary> = OnceLock::new();

        let cell = match size {
            DictionarySize::Size1K => &SEED_1K,
            DictionarySize::Size2K => &SEED_2K,
            DictionarySize::Size4K => &SEED_4K,
        };

        cell.get_or_init(|| {
            let mut dict = Self::empty(size);
            for byte in 0..=u8::MAX {
                dict.insert(Pattern::singleton(byte), byte as Code);
            }
            dict
        })
    }

    /// Drop every multi-symbol pattern and return to the singleton seed
    ///
    /// Reuses the existing allocations.
    pub fn reset(&mut self) {
        let seed = Self::seed(self.size);
        self.heads.clone_from(&seed.heads);
        self.entries.clone_from(&seed.entries);
    }

    /// Slot a pattern hashes to
    pub fn slot_of(&self, symbols: &[u8]) -> usize {
        slot_hash(symbols, self.size.slots())
    }

    /// Find the code of `symbols`, `None` when no entry matches
    ///
    /// The first matching entry of the chain wins.
    pub fn lookup(&self, symbols: &[u8]) -> Option<Code> {
        let mut cursor = self.heads[self.slot_of(symbols)];
        while let Some(id) = cursor {
            let entry = &self.entries[id as usize];
            if entry.pattern.matches(symbols) {
                return Some(entry.code);
            }
            cursor = entry.next;
        }
        None
    }

    /// Append `(pattern, code)` at the end of its slot's chain
    ///
    /// No duplicate check is made: inserting a pattern twice adds a second,
    /// unreachable entry behind the first. The encoder only inserts patterns it
    /// has just failed to find.
    pub fn insert(&mut self, pattern: Pattern, code: Code) {
        let slot = self.slot_of(pattern.symbols());
        let id = self.entries.len() as EntryId;
        self.entries.push(Entry {
            pattern,
            code,
            next: None,
        });

        match self.heads[slot] {
            None => self.heads[slot] = Some(id),
            Some(head) => {
                let mut tail = head;
                while let Some(next) = self.entries[tail as usize].next {
                    tail = next;
                }
                self.entries[tail as usize].next = Some(id);
            }
        }
    }

    /// Number of entries, singletons included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True only for a dictionary that has not been seeded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of multi-symbol patterns in this generation
    pub fn pattern_count(&self) -> usize {
        self.entries.len().saturating_sub(SINGLETON_COUNT)
    }

    /// Slot count of this dictionary
    pub fn size(&self) -> DictionarySize {
        self.size
    }

    /// Number of entries chained in `slot`
    pub fn chain_len(&self, slot: usize) -> usize {
        let mut len = 0;
        let mut cursor = self.heads.get(slot).copied().flatten();
        while let Some(id) = cursor {
            len += 1;
            cursor = self.entries[id as usize].next;
        }
        len
    }

    /// Length of the longest collision chain
    pub fn longest_chain(&self) -> usize {
        (0..self.heads.len())
            .map(|slot| self.chain_len(slot))
            .max()
            .unwrap_or(0)
    }

    /// Codes of a slot's chain, head first
    pub fn chain_codes(&self, slot: usize) -> Vec<Code> {
        let mut codes = Vec::new();
        let mut cursor = self.heads.get(slot).copied().flatten();
        while let Some(id) = cursor {
            let entry = &self.entries[id as usize];
            codes.push(entry.code);
            cursor = entry.next;
        }
        codes
    }
}
