//! Lemmatization engine: binary dictionary store, context disambiguation
//! and compound splitting for inflected Icelandic word forms.

pub mod compound;
pub mod dict;
pub mod disambiguate;
pub mod lemma_set;
pub mod settings;
#[cfg(test)]
pub(crate) mod testutil;
pub mod unicode;

pub use compound::{CompoundSplit, CompoundSplitter};
pub use dict::{
    BinaryDictionary, Candidate, Case, DictError, DictStats, Dictionary, DictionaryBuilder,
    EntryFormat, FormatError, Gender, Number, Pos,
};
pub use disambiguate::{DisambiguatedToken, Disambiguator, Phase};
pub use lemma_set::{BloomFilter, ExactLemmaSet, KnownLemmas, LemmaSet, MembershipKind};
