//! Context disambiguation of ambiguous word forms.
//!
//! A word's candidates run through a fixed sequence of phases. Each phase
//! either resolves the word (lemma + confidence) or declines; the last phase
//! always resolves, so every call produces an answer.

mod bigram;
mod grammar;
mod rules;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::dict::{Candidate, Dictionary, Pos};
use crate::settings::{settings, DisambiguationSettings};
use crate::unicode::normalize;

/// Confidence of a preference-rule match and of the pronoun + verb rule.
pub(crate) const RULE_CONFIDENCE: f64 = 0.85;
/// Confidence of the case-government rules.
pub(crate) const GOVERNMENT_CONFIDENCE: f64 = 0.9;

/// Pipeline phase that produced an answer, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Unambiguous,
    PreferenceRule,
    GrammarRule,
    Bigram,
    Fallback,
}

impl Phase {
    pub const ORDER: [Phase; 5] = [
        Phase::Unambiguous,
        Phase::PreferenceRule,
        Phase::GrammarRule,
        Phase::Bigram,
        Phase::Fallback,
    ];

    fn resolve(self, ctx: &Context<'_>) -> Option<Resolution> {
        match self {
            Phase::Unambiguous => (ctx.current.candidates.len() == 1).then_some(Resolution {
                index: Some(0),
                confidence: 1.0,
            }),
            Phase::PreferenceRule => rules::apply(ctx),
            Phase::GrammarRule => grammar::apply(ctx),
            Phase::Bigram => bigram::apply(ctx),
            Phase::Fallback => Some(fallback(ctx)),
        }
    }
}

/// Result of disambiguating one token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisambiguatedToken {
    pub token: String,
    pub lemma: String,
    pub pos: Option<Pos>,
    pub candidates: Vec<Candidate>,
    pub ambiguous: bool,
    pub confidence: f64,
    pub phase: Phase,
}

/// A phase's decision: which candidate (none for an unknown word) and how sure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Resolution {
    pub index: Option<usize>,
    pub confidence: f64,
}

impl Resolution {
    pub(crate) fn pick(index: usize, confidence: f64) -> Self {
        Self {
            index: Some(index),
            confidence,
        }
    }
}

/// Dictionary view of one token: every reading plus the deduplicated
/// (lemma, POS) candidates.
#[derive(Debug, Clone)]
pub(crate) struct Analysis {
    pub word: String,
    pub readings: Vec<Candidate>,
    pub candidates: Vec<Candidate>,
}

impl Analysis {
    pub(crate) fn new(dict: &dyn Dictionary, word: &str) -> Self {
        let readings = dict.readings(word);
        let candidates = crate::dict::dedup_candidates(readings.clone());
        Self {
            word: normalize(word),
            readings,
            candidates,
        }
    }

    pub(crate) fn has_pos(&self, pos: Pos) -> bool {
        self.candidates.iter().any(|c| c.pos == pos)
    }

    /// Distinct candidate lemmas; an unknown word stands for itself.
    pub(crate) fn lemmas(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for c in &self.candidates {
            if !out.contains(&c.lemma.as_str()) {
                out.push(&c.lemma);
            }
        }
        if out.is_empty() && !self.word.is_empty() {
            out.push(&self.word);
        }
        out
    }
}

/// Everything a phase may consult.
pub(crate) struct Context<'a> {
    pub dict: &'a dyn Dictionary,
    pub settings: &'a DisambiguationSettings,
    pub current: &'a Analysis,
    pub prev: Option<&'a Analysis>,
    pub next: Option<&'a Analysis>,
}

impl Context<'_> {
    pub(crate) fn prev_is_nominative_pronoun(&self) -> bool {
        self.prev
            .is_some_and(|p| self.settings.nominative_pronouns.contains(&p.word))
    }
}

fn fallback(ctx: &Context<'_>) -> Resolution {
    let n = ctx.current.candidates.len();
    if n == 0 {
        Resolution {
            index: None,
            confidence: 0.0,
        }
    } else {
        Resolution::pick(0, 1.0 / n as f64)
    }
}

/// Runs the disambiguation phases against a dictionary.
pub struct Disambiguator<'a> {
    dict: &'a dyn Dictionary,
    settings: &'a DisambiguationSettings,
}

impl<'a> Disambiguator<'a> {
    /// Disambiguator using the global settings.
    pub fn new(dict: &'a dyn Dictionary) -> Self {
        Self::with_settings(dict, &settings().disambiguation)
    }

    pub fn with_settings(dict: &'a dyn Dictionary, settings: &'a DisambiguationSettings) -> Self {
        Self { dict, settings }
    }

    /// Pick one lemma for `word` given its neighbours. `prev == None` means
    /// `word` starts the sentence.
    pub fn disambiguate(
        &self,
        word: &str,
        prev: Option<&str>,
        next: Option<&str>,
    ) -> DisambiguatedToken {
        let current = Analysis::new(self.dict, word);
        let prev = prev.map(|w| Analysis::new(self.dict, w));
        let next = next.map(|w| Analysis::new(self.dict, w));
        self.run(word, &current, prev.as_ref(), next.as_ref())
    }

    /// Disambiguate every token of a sentence, each against its neighbours.
    pub fn disambiguate_sentence(&self, tokens: &[&str]) -> Vec<DisambiguatedToken> {
        let analyses: Vec<Analysis> = tokens
            .iter()
            .map(|t| Analysis::new(self.dict, t))
            .collect();
        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let prev = i.checked_sub(1).map(|p| &analyses[p]);
                let next = analyses.get(i + 1);
                self.run(token, &analyses[i], prev, next)
            })
            .collect()
    }

    fn run(
        &self,
        token: &str,
        current: &Analysis,
        prev: Option<&Analysis>,
        next: Option<&Analysis>,
    ) -> DisambiguatedToken {
        let _span = debug_span!("disambiguate", word = %current.word).entered();
        let ctx = Context {
            dict: self.dict,
            settings: self.settings,
            current,
            prev,
            next,
        };

        let (phase, resolution) = Phase::ORDER
            .iter()
            .find_map(|&phase| phase.resolve(&ctx).map(|r| (phase, r)))
            .unwrap_or_else(|| (Phase::Fallback, fallback(&ctx)));

        let (lemma, pos) = match resolution.index.and_then(|i| current.candidates.get(i)) {
            Some(c) => (c.lemma.clone(), Some(c.pos)),
            None => (current.word.clone(), None),
        };
        let confidence = resolution.confidence.clamp(0.0, 1.0);
        debug!(?phase, lemma = %lemma, confidence);

        DisambiguatedToken {
            token: token.to_string(),
            lemma,
            pos,
            candidates: current.candidates.clone(),
            ambiguous: current.candidates.len() > 1,
            confidence,
            phase,
        }
    }
}
