//! Case-government and pronoun + verb rules.
//!
//! Three sub-rules, tried in order:
//! 1. a preposition reading whose governed cases include the case of the
//!    following word's first noun/adjective reading;
//! 2. after a nominative pronoun, a verb reading competing with a non-verb;
//! 3. after a preposition, a noun reading inflected in a governed case.

use super::{Context, Resolution, GOVERNMENT_CONFIDENCE, RULE_CONFIDENCE};
use crate::dict::{Case, Pos};

pub(super) fn apply(ctx: &Context<'_>) -> Option<Resolution> {
    preposition_government(ctx)
        .or_else(|| pronoun_verb(ctx))
        .or_else(|| noun_after_preposition(ctx))
}

fn preposition_government(ctx: &Context<'_>) -> Option<Resolution> {
    let current = ctx.current;
    // "ég á bíl": the subject pronoun makes the verb reading win over the
    // preposition even though the object is accusative.
    if ctx.prev_is_nominative_pronoun() && current.has_pos(Pos::Verb) {
        return None;
    }
    let next = ctx.next?;
    let case = next
        .readings
        .iter()
        .filter(|r| matches!(r.pos, Pos::Noun | Pos::Adjective))
        .find_map(|r| r.case)?;
    current
        .candidates
        .iter()
        .position(|c| {
            c.pos == Pos::Preposition && ctx.settings.governed_cases(&c.lemma).contains(&case)
        })
        .map(|i| Resolution::pick(i, GOVERNMENT_CONFIDENCE))
}

fn pronoun_verb(ctx: &Context<'_>) -> Option<Resolution> {
    if !ctx.prev_is_nominative_pronoun() {
        return None;
    }
    let candidates = &ctx.current.candidates;
    let verbs: Vec<usize> = (0..candidates.len())
        .filter(|&i| candidates[i].pos == Pos::Verb)
        .collect();
    let first = *verbs.first()?;
    if verbs.len() == candidates.len() {
        return None;
    }
    let chosen = ctx
        .settings
        .dominant_verbs
        .iter()
        .find_map(|v| verbs.iter().copied().find(|&i| candidates[i].lemma == *v))
        .unwrap_or(first);
    Some(Resolution::pick(chosen, RULE_CONFIDENCE))
}

fn noun_after_preposition(ctx: &Context<'_>) -> Option<Resolution> {
    let prev = ctx.prev?;
    if !prev.has_pos(Pos::Preposition) {
        return None;
    }
    let current = ctx.current;
    let only_preposition = prev.candidates.iter().all(|c| c.pos == Pos::Preposition);
    if !only_preposition && prev.has_pos(Pos::Pronoun) && current.has_pos(Pos::Verb) {
        return None;
    }

    let governed: Vec<Case> = prev
        .candidates
        .iter()
        .filter(|c| c.pos == Pos::Preposition)
        .flat_map(|c| ctx.settings.governed_cases(&c.lemma).iter().copied())
        .collect();
    if governed.is_empty() {
        return None;
    }

    current
        .candidates
        .iter()
        .position(|c| {
            c.pos == Pos::Noun
                && current.readings.iter().any(|r| {
                    r.pos == Pos::Noun
                        && r.lemma == c.lemma
                        && r.case.is_some_and(|k| governed.contains(&k))
                })
        })
        .map(|i| Resolution::pick(i, GOVERNMENT_CONFIDENCE))
}
