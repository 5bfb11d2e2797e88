//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::dict::{Case, Pos};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        // Custom TOML was validated by init_custom; the default by build.rs.
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub disambiguation: DisambiguationSettings,
    pub compound: CompoundSettings,
    pub membership: MembershipSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisambiguationSettings {
    pub left_weight: f64,
    pub right_weight: f64,
    pub nominative_pronouns: HashSet<String>,
    pub dominant_verbs: Vec<String>,
    #[serde(default)]
    pub preference_rules: Vec<PreferenceRule>,
    #[serde(default)]
    pub government: HashMap<String, Vec<Case>>,
}

impl DisambiguationSettings {
    /// Cases governed by preposition `lemma`, empty if it is not in the table.
    pub fn governed_cases(&self, lemma: &str) -> &[Case] {
        self.government
            .get(lemma)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Where a preference rule looks for its evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleContext {
    /// The next word has a noun reading.
    BeforeNoun,
    /// The next word has a verb reading.
    BeforeVerb,
    /// The previous word is a nominative pronoun.
    AfterPronoun,
    /// There is no previous word.
    SentenceStart,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreferenceRule {
    pub word: String,
    pub prefer: Pos,
    pub over: Pos,
    pub context: RuleContext,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompoundSettings {
    pub min_part_length: usize,
    pub atomic_word_max_len: usize,
    pub known_word_threshold: f64,
    pub linking_letters: Vec<String>,
    pub protected_lemmas: HashSet<String>,
    pub common_tails: HashSet<String>,
    pub common_words: HashSet<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MembershipSettings {
    pub false_positive_rate: f64,
    pub max_hashes: u32,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_weight {
        ($section:ident . $field:ident) => {
            if !s.$section.$field.is_finite() || s.$section.$field < 0.0 {
                return Err(invalid(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must be a non-negative number",
                ));
            }
        };
    }

    check_weight!(disambiguation.left_weight);
    check_weight!(disambiguation.right_weight);

    for (i, rule) in s.disambiguation.preference_rules.iter().enumerate() {
        if rule.prefer == rule.over {
            return Err(invalid(
                &format!("disambiguation.preference_rules[{i}]"),
                "prefer and over must differ",
            ));
        }
    }
    for (prep, cases) in &s.disambiguation.government {
        if cases.is_empty() {
            return Err(invalid(
                &format!("disambiguation.government.{prep}"),
                "must list at least one case",
            ));
        }
    }

    if s.compound.min_part_length == 0 {
        return Err(invalid("compound.min_part_length", "must be positive"));
    }
    if !(0.0..=1.0).contains(&s.compound.known_word_threshold) {
        return Err(invalid(
            "compound.known_word_threshold",
            "must be within [0, 1]",
        ));
    }
    if s.compound.linking_letters.iter().any(|l| l.is_empty()) {
        return Err(invalid(
            "compound.linking_letters",
            "must not contain empty strings",
        ));
    }

    let p = s.membership.false_positive_rate;
    if !(p > 0.0 && p < 1.0) {
        return Err(invalid(
            "membership.false_positive_rate",
            "must be within (0, 1)",
        ));
    }
    if s.membership.max_hashes == 0 {
        return Err(invalid("membership.max_hashes", "must be positive"));
    }

    Ok(())
}
