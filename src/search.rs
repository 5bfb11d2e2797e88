//! Search-side consumers: lemma terms for indexing and boolean query text.
//!
//! Tokenization happens upstream; these functions take word tokens in
//! sentence order.

use std::collections::{HashMap, HashSet};

use lemma_core::{DisambiguatedToken, Phase, Pos};
use serde::Deserialize;

use crate::Lemmatizer;

#[derive(Debug, thiserror::Error)]
pub enum StopwordsError {
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Caller-supplied stopword table.
///
/// A lemma listed under `contextual` is a stopword only for the listed
/// parts of speech; otherwise membership in `simple` decides.
///
/// ```toml
/// simple = ["og", "eða"]
///
/// [contextual]
/// "á" = ["fs"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stopwords {
    #[serde(default)]
    simple: HashSet<String>,
    #[serde(default)]
    contextual: HashMap<String, Vec<Pos>>,
}

impl Stopwords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, StopwordsError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn add(&mut self, lemma: &str) -> &mut Self {
        self.simple.insert(lemma.to_lowercase());
        self
    }

    pub fn add_contextual(&mut self, lemma: &str, pos: &[Pos]) -> &mut Self {
        self.contextual
            .entry(lemma.to_lowercase())
            .or_default()
            .extend_from_slice(pos);
        self
    }

    pub fn is_stopword(&self, lemma: &str, pos: Option<Pos>) -> bool {
        match self.contextual.get(lemma) {
            Some(tags) => pos.is_some_and(|p| tags.contains(&p)),
            None => self.simple.contains(lemma),
        }
    }
}

/// Lemma alternatives for one token.
///
/// All distinct candidate lemmas, except that a lemma picked from context
/// is dropped when it is a stopword for the chosen POS. An unknown token
/// stands for itself, together with its compound parts when it splits.
fn token_group(
    lz: &Lemmatizer,
    token: &DisambiguatedToken,
    stopwords: &Stopwords,
) -> Vec<String> {
    if token.candidates.is_empty() {
        let split = lz.split(&token.token);
        if split.is_compound {
            return split.index_terms();
        }
        return if token.lemma.is_empty() {
            Vec::new()
        } else {
            vec![token.lemma.clone()]
        };
    }

    let from_context = matches!(
        token.phase,
        Phase::PreferenceRule | Phase::GrammarRule | Phase::Bigram
    );
    let drop_chosen = from_context && stopwords.is_stopword(&token.lemma, token.pos);

    let mut group: Vec<String> = Vec::new();
    for c in &token.candidates {
        if drop_chosen && c.lemma == token.lemma {
            continue;
        }
        if !group.contains(&c.lemma) {
            group.push(c.lemma.clone());
        }
    }
    group
}

/// One lemma group per token, empty groups removed.
pub fn lemma_groups(
    lz: &Lemmatizer,
    tokens: &[&str],
    stopwords: &Stopwords,
) -> Vec<Vec<String>> {
    lz.disambiguate_sentence(tokens)
        .iter()
        .map(|t| token_group(lz, t, stopwords))
        .filter(|g| !g.is_empty())
        .collect()
}

/// Deduplicated lemma terms of a text, in first-seen order.
pub fn index_terms(lz: &Lemmatizer, tokens: &[&str], stopwords: &Stopwords) -> Vec<String> {
    let mut seen = HashSet::new();
    lemma_groups(lz, tokens, stopwords)
        .into_iter()
        .flatten()
        .filter(|lemma| seen.insert(lemma.clone()))
        .collect()
}

/// Boolean query text: groups joined with `&`, alternatives inside a group
/// joined with `|` and parenthesised, e.g. `(á | eiga) & bíll`.
pub fn query_expression(lz: &Lemmatizer, tokens: &[&str], stopwords: &Stopwords) -> String {
    lemma_groups(lz, tokens, stopwords)
        .iter()
        .map(|group| match group.as_slice() {
            [single] => single.clone(),
            alternatives => format!("({})", alternatives.join(" | ")),
        })
        .collect::<Vec<_>>()
        .join(" & ")
}
