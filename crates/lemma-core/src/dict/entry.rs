use serde::{Deserialize, Serialize};

/// Part of speech. The discriminants are the on-disk POS codes and must not
/// be reordered without a format version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Pos {
    #[serde(rename = "no")]
    Noun = 0,
    #[serde(rename = "so")]
    Verb = 1,
    #[serde(rename = "lo")]
    Adjective = 2,
    #[serde(rename = "ao")]
    Adverb = 3,
    #[serde(rename = "fs")]
    Preposition = 4,
    #[serde(rename = "fn")]
    Pronoun = 5,
    #[serde(rename = "st")]
    Conjunction = 6,
    #[serde(rename = "to")]
    Numeral = 7,
    #[serde(rename = "gr")]
    Article = 8,
    #[serde(rename = "uh")]
    Interjection = 9,
}

impl Pos {
    pub const ALL: [Pos; 10] = [
        Pos::Noun,
        Pos::Verb,
        Pos::Adjective,
        Pos::Adverb,
        Pos::Preposition,
        Pos::Pronoun,
        Pos::Conjunction,
        Pos::Numeral,
        Pos::Article,
        Pos::Interjection,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Short BÍN word-class tag (`no`, `so`, `lo`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            Pos::Noun => "no",
            Pos::Verb => "so",
            Pos::Adjective => "lo",
            Pos::Adverb => "ao",
            Pos::Preposition => "fs",
            Pos::Pronoun => "fn",
            Pos::Conjunction => "st",
            Pos::Numeral => "to",
            Pos::Article => "gr",
            Pos::Interjection => "uh",
        }
    }
}

/// Grammatical case. Code 0 on disk means "no case".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Case {
    #[serde(rename = "nf")]
    Nominative,
    #[serde(rename = "þf")]
    Accusative,
    #[serde(rename = "þgf")]
    Dative,
    #[serde(rename = "ef")]
    Genitive,
}

impl Case {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Case::Nominative),
            2 => Some(Case::Accusative),
            3 => Some(Case::Dative),
            4 => Some(Case::Genitive),
            _ => None,
        }
    }

    pub fn code(case: Option<Self>) -> u8 {
        match case {
            None => 0,
            Some(Case::Nominative) => 1,
            Some(Case::Accusative) => 2,
            Some(Case::Dative) => 3,
            Some(Case::Genitive) => 4,
        }
    }
}

/// Grammatical gender. Code 0 on disk means "no gender".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "kk")]
    Masculine,
    #[serde(rename = "kvk")]
    Feminine,
    #[serde(rename = "hk")]
    Neuter,
}

impl Gender {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Gender::Masculine),
            2 => Some(Gender::Feminine),
            3 => Some(Gender::Neuter),
            _ => None,
        }
    }

    pub fn code(gender: Option<Self>) -> u8 {
        match gender {
            None => 0,
            Some(Gender::Masculine) => 1,
            Some(Gender::Feminine) => 2,
            Some(Gender::Neuter) => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Number {
    #[serde(rename = "et")]
    Singular,
    #[serde(rename = "ft")]
    Plural,
}

impl Number {
    pub fn code(number: Option<Self>) -> u8 {
        match number {
            Some(Number::Plural) => 1,
            _ => 0,
        }
    }
}

/// One decoded entry record, before the lemma index is resolved to a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedEntry {
    pub lemma_idx: u32,
    pub pos_code: u8,
    pub case_code: u8,
    pub gender_code: u8,
    pub number_code: u8,
}

/// Entry record packing scheme, chosen once from the header version.
///
/// - `Narrow` (version 1): `lemma_idx << 4 | pos`
/// - `Morphological` (version 2): `lemma_idx << 10 | number << 9 | gender << 7 | case << 4 | pos`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFormat {
    Narrow,
    Morphological,
}

impl EntryFormat {
    pub fn from_version(version: u32) -> Option<Self> {
        match version {
            1 => Some(EntryFormat::Narrow),
            2 => Some(EntryFormat::Morphological),
            _ => None,
        }
    }

    pub fn version(self) -> u32 {
        match self {
            EntryFormat::Narrow => 1,
            EntryFormat::Morphological => 2,
        }
    }

    /// Largest lemma index the packing can hold.
    pub fn max_lemma_idx(self) -> u32 {
        match self {
            EntryFormat::Narrow => u32::MAX >> 4,
            EntryFormat::Morphological => u32::MAX >> 10,
        }
    }

    pub fn unpack(self, packed: u32) -> PackedEntry {
        match self {
            EntryFormat::Narrow => PackedEntry {
                lemma_idx: packed >> 4,
                pos_code: (packed & 0xF) as u8,
                case_code: 0,
                gender_code: 0,
                number_code: 0,
            },
            EntryFormat::Morphological => PackedEntry {
                lemma_idx: packed >> 10,
                pos_code: (packed & 0xF) as u8,
                case_code: ((packed >> 4) & 0x7) as u8,
                gender_code: ((packed >> 7) & 0x3) as u8,
                number_code: ((packed >> 9) & 0x1) as u8,
            },
        }
    }

    /// Pack an entry. Returns `None` when the lemma index does not fit.
    /// Morphology fields are dropped by the narrow layout.
    pub fn pack(self, entry: PackedEntry) -> Option<u32> {
        if entry.lemma_idx > self.max_lemma_idx() {
            return None;
        }
        let pos = u32::from(entry.pos_code & 0xF);
        Some(match self {
            EntryFormat::Narrow => (entry.lemma_idx << 4) | pos,
            EntryFormat::Morphological => {
                (entry.lemma_idx << 10)
                    | (u32::from(entry.number_code & 0x1) << 9)
                    | (u32::from(entry.gender_code & 0x3) << 7)
                    | (u32::from(entry.case_code & 0x7) << 4)
                    | pos
            }
        })
    }
}

/// One reading of a word form: lemma, part of speech and (version 2 only)
/// morphology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub lemma: String,
    pub pos: Pos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<Case>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
}

impl Candidate {
    pub fn new(lemma: impl Into<String>, pos: Pos) -> Self {
        Self {
            lemma: lemma.into(),
            pos,
            case: None,
            gender: None,
            number: None,
        }
    }

    pub fn with_morphology(
        mut self,
        case: Option<Case>,
        gender: Option<Gender>,
        number: Option<Number>,
    ) -> Self {
        self.case = case;
        self.gender = gender;
        self.number = number;
        self
    }

    /// Build from a decoded record. Unknown POS codes (the builder writes 10
    /// for an unmapped word class) read as nouns. Number has no "unset" code,
    /// so it is only reported alongside a case or gender.
    pub(crate) fn from_packed(lemma: String, entry: &PackedEntry) -> Self {
        let case = Case::from_code(entry.case_code);
        let gender = Gender::from_code(entry.gender_code);
        let number = if case.is_some() || gender.is_some() {
            Some(if entry.number_code == 1 {
                Number::Plural
            } else {
                Number::Singular
            })
        } else {
            None
        };
        Self {
            lemma,
            pos: Pos::from_code(entry.pos_code).unwrap_or(Pos::Noun),
            case,
            gender,
            number,
        }
    }

    pub(crate) fn to_packed(&self, lemma_idx: u32) -> PackedEntry {
        PackedEntry {
            lemma_idx,
            pos_code: self.pos.code(),
            case_code: Case::code(self.case),
            gender_code: Gender::code(self.gender),
            number_code: Number::code(self.number),
        }
    }
}
