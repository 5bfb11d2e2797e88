//! Corpus bigram scoring.

use super::{Analysis, Context, Resolution};

/// Score each candidate lemma against every lemma reading of both neighbours:
/// `ln(left + 1) * left_weight + ln(right + 1) * right_weight`, summed.
/// Declines unless the best score is strictly positive.
pub(super) fn apply(ctx: &Context<'_>) -> Option<Resolution> {
    if ctx.prev.is_none() && ctx.next.is_none() {
        return None;
    }
    let prev_lemmas = ctx.prev.map(Analysis::lemmas).unwrap_or_default();
    let next_lemmas = ctx.next.map(Analysis::lemmas).unwrap_or_default();
    let left_weight = ctx.settings.left_weight;
    let right_weight = ctx.settings.right_weight;

    let scores: Vec<f64> = ctx
        .current
        .candidates
        .iter()
        .map(|c| {
            let left: f64 = prev_lemmas
                .iter()
                .map(|p| ln_freq(ctx.dict.bigram_frequency(p, &c.lemma)))
                .sum();
            let right: f64 = next_lemmas
                .iter()
                .map(|n| ln_freq(ctx.dict.bigram_frequency(&c.lemma, n)))
                .sum();
            left * left_weight + right * right_weight
        })
        .collect();

    let (best, top) = scores
        .iter()
        .copied()
        .enumerate()
        .fold(None, |acc: Option<(usize, f64)>, (i, s)| match acc {
            Some((_, t)) if t >= s => acc,
            _ => Some((i, s)),
        })?;
    if top <= 0.0 {
        return None;
    }
    // exp(top) / sum(exp(s)), shifted by `top` so large scores stay finite.
    let total: f64 = scores.iter().map(|s| (s - top).exp()).sum();
    Some(Resolution::pick(best, 1.0 / total))
}

fn ln_freq(freq: u32) -> f64 {
    (f64::from(freq) + 1.0).ln()
}
