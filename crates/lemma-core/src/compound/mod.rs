//! Two-way compound splitting.
//!
//! A word is split at most once: every split point is tried, both halves must
//! map to known lemmas, and the best-scoring split wins. Hyphenated unknown
//! words take a separate path that splits on every hyphen without scoring.

pub mod scoring;

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::dict::Dictionary;
use crate::lemma_set::LemmaSet;
use crate::settings::{settings, CompoundSettings};
use crate::unicode::{char_len, is_hyphen, normalize, split_at_char};

use self::scoring::{SplitFeatures, LINKING_MULTIPLIER, MAX_SCORE};

/// Fixed confidence of a hyphen split.
pub const HYPHEN_CONFIDENCE: f64 = 0.9;

/// Outcome of splitting one word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundSplit {
    pub word: String,
    /// Constituent lemmas for a compound, otherwise the word's own lemmas.
    pub parts: Vec<String>,
    pub confidence: f64,
    pub is_compound: bool,
}

impl CompoundSplit {
    /// Terms to index: `parts` plus the lowercased word itself.
    pub fn index_terms(&self) -> Vec<String> {
        let mut terms = self.parts.clone();
        let word = normalize(&self.word);
        if !word.is_empty() && !terms.contains(&word) {
            terms.push(word);
        }
        terms
    }
}

/// A scored split point.
#[derive(Debug, Clone)]
struct SplitCandidate {
    left: Vec<String>,
    right: Vec<String>,
    score: f64,
}

pub struct CompoundSplitter<'a> {
    dict: &'a dyn Dictionary,
    lemmas: &'a dyn LemmaSet,
    settings: &'a CompoundSettings,
}

impl<'a> CompoundSplitter<'a> {
    /// Splitter using the global settings.
    pub fn new(dict: &'a dyn Dictionary, lemmas: &'a dyn LemmaSet) -> Self {
        Self::with_settings(dict, lemmas, &settings().compound)
    }

    pub fn with_settings(
        dict: &'a dyn Dictionary,
        lemmas: &'a dyn LemmaSet,
        settings: &'a CompoundSettings,
    ) -> Self {
        Self {
            dict,
            lemmas,
            settings,
        }
    }

    pub fn split(&self, word: &str) -> CompoundSplit {
        let normalized = normalize(word);
        let _span = debug_span!("split", word = %normalized).entered();
        let candidates = self.dict.candidates(&normalized);
        let known = !candidates.is_empty();

        let primary_protected = candidates
            .first()
            .is_some_and(|c| self.settings.protected_lemmas.contains(&c.lemma));
        if self.settings.protected_lemmas.contains(&normalized) || primary_protected {
            debug!("protected");
            return self.atomic(word, &normalized, known);
        }

        if !known && normalized.chars().any(is_hyphen) {
            if let Some(split) = self.split_hyphenated(word, &normalized) {
                return split;
            }
        }

        let len = char_len(&normalized);
        if candidates.len() == 1 && len < self.settings.atomic_word_max_len {
            return self.atomic(word, &normalized, known);
        }
        if len < 2 * self.settings.min_part_length {
            return self.atomic(word, &normalized, known);
        }

        let Some(best) = self.best_split(&normalized, len) else {
            return self.atomic(word, &normalized, known);
        };
        if known && best.score <= self.settings.known_word_threshold {
            debug!(score = best.score, "below known-word threshold");
            return self.atomic(word, &normalized, known);
        }

        let mut parts = best.left;
        for lemma in best.right {
            if !parts.contains(&lemma) {
                parts.push(lemma);
            }
        }
        let confidence = (best.score / MAX_SCORE).clamp(0.0, 1.0);
        debug!(?parts, score = best.score, confidence, "split");
        CompoundSplit {
            word: word.to_string(),
            parts,
            confidence,
            is_compound: true,
        }
    }

    /// "Not a compound": the word's own lemmas.
    fn atomic(&self, word: &str, normalized: &str, known: bool) -> CompoundSplit {
        CompoundSplit {
            word: word.to_string(),
            parts: self.dict.lemmas(normalized),
            confidence: if known { 1.0 } else { 0.0 },
            is_compound: false,
        }
    }

    fn split_hyphenated(&self, word: &str, normalized: &str) -> Option<CompoundSplit> {
        let segments: Vec<&str> = normalized
            .split(is_hyphen)
            .filter(|s| !s.is_empty())
            .collect();
        if segments.len() < 2 {
            return None;
        }
        let mut parts: Vec<String> = Vec::new();
        for segment in segments {
            for lemma in self.dict.lemmas(segment) {
                if !parts.contains(&lemma) {
                    parts.push(lemma);
                }
            }
        }
        debug!(?parts, "hyphen split");
        Some(CompoundSplit {
            word: word.to_string(),
            parts,
            confidence: HYPHEN_CONFIDENCE,
            is_compound: true,
        })
    }

    fn best_split(&self, word: &str, len: usize) -> Option<SplitCandidate> {
        let min = self.settings.min_part_length;
        let mut best: Option<SplitCandidate> = None;
        for i in min..=len - min {
            let (left, right) = split_at_char(word, i);
            let right_lemmas = self.known_lemmas(right);
            if right_lemmas.is_empty() {
                continue;
            }

            let direct = self.known_lemmas(left);
            let mut found: Vec<(&str, Vec<String>, f64)> = Vec::new();
            if !direct.is_empty() {
                found.push((left, direct, 1.0));
            }
            found.extend(
                self.strip_linking(left)
                    .map(|(stem, lemmas)| (stem, lemmas, LINKING_MULTIPLIER)),
            );

            for (stem, left_lemmas, multiplier) in found {
                let features = self.features(stem, &left_lemmas, right, &right_lemmas);
                let score = scoring::score(&features) * multiplier;
                if best.as_ref().map_or(true, |b| score > b.score) {
                    best = Some(SplitCandidate {
                        left: left_lemmas,
                        right: right_lemmas.clone(),
                        score,
                    });
                }
            }
        }
        best
    }

    /// Left stems with a linking letter removed that still map to known lemmas.
    fn strip_linking<'w>(
        &'w self,
        left: &'w str,
    ) -> impl Iterator<Item = (&'w str, Vec<String>)> + 'w {
        self.settings.linking_letters.iter().filter_map(move |link| {
            let stem = left.strip_suffix(link.as_str())?;
            if char_len(stem) < self.settings.min_part_length {
                return None;
            }
            let lemmas = self.known_lemmas(stem);
            (!lemmas.is_empty()).then_some((stem, lemmas))
        })
    }

    /// Dictionary lemmas of `part` that are also in the lemma set.
    fn known_lemmas(&self, part: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for c in self.dict.readings(part) {
            if self.lemmas.contains(&c.lemma) && !out.contains(&c.lemma) {
                out.push(c.lemma);
            }
        }
        out
    }

    fn features(
        &self,
        left: &str,
        left_lemmas: &[String],
        right: &str,
        right_lemmas: &[String],
    ) -> SplitFeatures {
        let in_set = |set: &HashSet<String>, part: &str, lemmas: &[String]| {
            set.contains(part) || lemmas.iter().any(|l| set.contains(l))
        };
        SplitFeatures {
            left_len: char_len(left),
            right_len: char_len(right),
            right_is_tail: in_set(&self.settings.common_tails, right, right_lemmas),
            left_common: in_set(&self.settings.common_words, left, left_lemmas),
            right_common: in_set(&self.settings.common_words, right, right_lemmas),
        }
    }
}
