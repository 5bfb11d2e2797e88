//! Known-lemma membership used by the compound splitter.
//!
//! `ExactLemmaSet` is a plain hash set; `BloomFilter` trades a tunable
//! false-positive rate for memory. Neither ever reports an inserted lemma
//! as missing.

mod bloom;

pub use bloom::BloomFilter;

use std::collections::HashSet;

use crate::dict::BinaryDictionary;
use crate::settings::MembershipSettings;
use crate::unicode::normalize;

pub trait LemmaSet: Send + Sync {
    fn contains(&self, lemma: &str) -> bool;

    /// Number of lemmas inserted.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exact membership over lowercase lemma strings.
#[derive(Debug, Clone, Default)]
pub struct ExactLemmaSet {
    lemmas: HashSet<String>,
}

impl ExactLemmaSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lemma: &str) {
        self.lemmas.insert(normalize(lemma));
    }

    pub fn from_dictionary(dict: &BinaryDictionary) -> Self {
        dict.lemmas_iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExactLemmaSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for lemma in iter {
            set.insert(lemma.as_ref());
        }
        set
    }
}

impl LemmaSet for ExactLemmaSet {
    fn contains(&self, lemma: &str) -> bool {
        self.lemmas.contains(&normalize(lemma))
    }

    fn len(&self) -> usize {
        self.lemmas.len()
    }
}

/// Which membership structure to build over a dictionary's lemmas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MembershipKind {
    #[default]
    Exact,
    Bloom,
}

/// A membership structure chosen at load time.
pub enum KnownLemmas {
    Exact(ExactLemmaSet),
    Bloom(BloomFilter),
}

impl KnownLemmas {
    pub fn build(
        kind: MembershipKind,
        dict: &BinaryDictionary,
        settings: &MembershipSettings,
    ) -> Self {
        match kind {
            MembershipKind::Exact => Self::Exact(ExactLemmaSet::from_dictionary(dict)),
            MembershipKind::Bloom => Self::Bloom(BloomFilter::from_dictionary(dict, settings)),
        }
    }

    pub fn kind(&self) -> MembershipKind {
        match self {
            Self::Exact(_) => MembershipKind::Exact,
            Self::Bloom(_) => MembershipKind::Bloom,
        }
    }
}

impl LemmaSet for KnownLemmas {
    fn contains(&self, lemma: &str) -> bool {
        match self {
            Self::Exact(s) => s.contains(lemma),
            Self::Bloom(b) => b.contains(lemma),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Exact(s) => s.len(),
            Self::Bloom(b) => b.len(),
        }
    }
}
