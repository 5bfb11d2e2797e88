use std::path::Path;

use lemma_core::settings::settings;
use lemma_core::{
    BinaryDictionary, Candidate, CompoundSplit, CompoundSplitter, DictError, DisambiguatedToken,
    Dictionary, Disambiguator, FormatError, KnownLemmas, LemmaSet, MembershipKind, Pos,
};
use tracing::{debug_span, info};

/// One loaded dictionary plus the known-lemma set derived from it.
///
/// Immutable after construction; share it behind an `Arc` and query from any
/// number of threads.
pub struct Lemmatizer {
    dict: BinaryDictionary,
    known: KnownLemmas,
}

impl Lemmatizer {
    /// Open a dictionary file with exact lemma membership.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        Self::open_with(path, MembershipKind::default())
    }

    pub fn open_with(path: &Path, kind: MembershipKind) -> Result<Self, DictError> {
        Ok(Self::new(BinaryDictionary::open(path)?, kind))
    }

    pub fn from_bytes(data: Vec<u8>, kind: MembershipKind) -> Result<Self, FormatError> {
        Ok(Self::new(BinaryDictionary::from_bytes(data)?, kind))
    }

    pub fn new(dict: BinaryDictionary, kind: MembershipKind) -> Self {
        let _span = debug_span!("lemmatizer_new", ?kind).entered();
        let known = KnownLemmas::build(kind, &dict, &settings().membership);
        info!(lemmas = known.len(), ?kind, "known lemmas built");
        Self { dict, known }
    }

    pub fn dictionary(&self) -> &BinaryDictionary {
        &self.dict
    }

    pub fn known_lemmas(&self) -> &KnownLemmas {
        &self.known
    }

    /// Distinct (lemma, POS) readings of `word`, optionally restricted to one POS.
    pub fn candidates(&self, word: &str, pos: Option<Pos>) -> Vec<Candidate> {
        match pos {
            Some(pos) => self.dict.candidates_with_pos(word, pos),
            None => self.dict.candidates(word),
        }
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.dict.is_known(word)
    }

    pub fn bigram_frequency(&self, word1: &str, word2: &str) -> u32 {
        self.dict.bigram_frequency(word1, word2)
    }

    /// Every lemma of `word`; an unknown word stands for itself.
    pub fn lemmas(&self, word: &str) -> Vec<String> {
        self.dict.lemmas(word)
    }

    pub fn disambiguate(
        &self,
        word: &str,
        prev: Option<&str>,
        next: Option<&str>,
    ) -> DisambiguatedToken {
        Disambiguator::new(&self.dict).disambiguate(word, prev, next)
    }

    pub fn disambiguate_sentence(&self, tokens: &[&str]) -> Vec<DisambiguatedToken> {
        Disambiguator::new(&self.dict).disambiguate_sentence(tokens)
    }

    pub fn split(&self, word: &str) -> CompoundSplit {
        CompoundSplitter::new(&self.dict, &self.known).split(word)
    }
}
