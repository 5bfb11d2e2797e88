//! Word-specific preference rules.

use super::{Context, Resolution, RULE_CONFIDENCE};
use crate::dict::Pos;
use crate::settings::RuleContext;

/// First configured rule for the current word whose two POS readings are both
/// present and whose context holds.
pub(super) fn apply(ctx: &Context<'_>) -> Option<Resolution> {
    let current = ctx.current;
    ctx.settings
        .preference_rules
        .iter()
        .filter(|rule| rule.word == current.word)
        .find_map(|rule| {
            let preferred = current.candidates.iter().position(|c| c.pos == rule.prefer)?;
            let competes = current.has_pos(rule.over);
            (competes && context_holds(rule.context, ctx))
                .then(|| Resolution::pick(preferred, RULE_CONFIDENCE))
        })
}

fn context_holds(context: RuleContext, ctx: &Context<'_>) -> bool {
    match context {
        RuleContext::BeforeNoun => ctx.next.is_some_and(|n| n.has_pos(Pos::Noun)),
        RuleContext::BeforeVerb => ctx.next.is_some_and(|n| n.has_pos(Pos::Verb)),
        RuleContext::AfterPronoun => ctx.prev_is_nominative_pronoun(),
        RuleContext::SentenceStart => ctx.prev.is_none(),
    }
}
