//! Dictionary storage.
//!
//! `BinaryDictionary` decodes the versioned `LEMA` buffer: a string pool,
//! lemma and word-form tables, packed entries and a sorted bigram table.
//! `DictionaryBuilder` writes the same layout.

mod binary_dict;
mod binary_dict_io;
mod builder;
mod entry;
mod layout;

pub use binary_dict::{BinaryDictionary, DictStats};
pub use builder::DictionaryBuilder;
pub use entry::{Candidate, Case, EntryFormat, Gender, Number, PackedEntry, Pos};
pub use layout::{Header, HEADER_SIZE, MAGIC};

use std::io;

/// Structural problems found while decoding a dictionary buffer.
///
/// Every variant is fatal: a buffer that fails here never becomes a usable
/// `BinaryDictionary`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("buffer too short for header ({len} bytes)")]
    TooShort { len: usize },

    #[error("invalid magic 0x{0:08X} (expected 0x4C454D41)")]
    BadMagic(u32),

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u32),

    #[error("section {section} out of bounds (ends at {end}, buffer is {len} bytes)")]
    OutOfBounds {
        section: &'static str,
        end: u64,
        len: usize,
    },

    #[error("section {section} is not sorted at index {index}")]
    Unsorted { section: &'static str, index: usize },
}

/// Error type for loading, verifying and writing dictionary files.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("build error: {0}")]
    Build(String),
}

/// Read access to a lemma dictionary.
///
/// All lookups lowercase their input and return owned values. Implementors
/// are immutable after construction and safe to share across threads.
pub trait Dictionary: Send + Sync {
    /// Every stored reading of `word` in on-disk order, without deduplication.
    fn readings(&self, word: &str) -> Vec<Candidate>;

    /// Observed corpus frequency of the ordered pair; 0 when absent.
    fn bigram_frequency(&self, word1: &str, word2: &str) -> u32;

    /// Readings of `word` deduplicated on (lemma, POS), first occurrence wins.
    fn candidates(&self, word: &str) -> Vec<Candidate> {
        dedup_candidates(self.readings(word))
    }

    fn is_known(&self, word: &str) -> bool {
        !self.readings(word).is_empty()
    }

    /// Candidates restricted to one part of speech.
    fn candidates_with_pos(&self, word: &str, pos: Pos) -> Vec<Candidate> {
        let mut candidates = self.candidates(word);
        candidates.retain(|c| c.pos == pos);
        candidates
    }

    /// Distinct lemma strings of `word`; an unknown word is its own lemma.
    fn lemmas(&self, word: &str) -> Vec<String> {
        let mut lemmas: Vec<String> = Vec::new();
        for c in self.readings(word) {
            if !lemmas.contains(&c.lemma) {
                lemmas.push(c.lemma);
            }
        }
        if lemmas.is_empty() {
            let lower = crate::unicode::normalize(word);
            if !lower.is_empty() {
                lemmas.push(lower);
            }
        }
        lemmas
    }
}

/// Keep the first reading of each (lemma, POS) pair, preserving order.
pub(crate) fn dedup_candidates(readings: Vec<Candidate>) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = Vec::with_capacity(readings.len());
    for r in readings {
        if !out.iter().any(|c| c.pos == r.pos && c.lemma == r.lemma) {
            out.push(r);
        }
    }
    out
}
