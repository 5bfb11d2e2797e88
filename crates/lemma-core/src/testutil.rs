//! Shared fixture dictionary for unit tests.

use crate::dict::{
    BinaryDictionary, Candidate, Case, DictionaryBuilder, EntryFormat, Gender, Number, Pos,
};

use Case::*;
use Gender::*;
use Number::*;
use Pos::*;

fn plain(lemma: &str, pos: Pos) -> Candidate {
    Candidate::new(lemma, pos)
}

fn noun(lemma: &str, case: Case, gender: Gender, number: Number) -> Candidate {
    Candidate::new(lemma, Noun).with_morphology(Some(case), Some(gender), Some(number))
}

fn pron(lemma: &str, case: Case, number: Number) -> Candidate {
    Candidate::new(lemma, Pronoun).with_morphology(Some(case), None, Some(number))
}

/// Readings of the fixture, in on-disk order per word.
pub fn fixture_readings() -> Vec<(&'static str, Candidate)> {
    vec![
        ("hestur", noun("hestur", Nominative, Masculine, Singular)),
        ("hesti", noun("hestur", Dative, Masculine, Singular)),
        ("hestinum", noun("hestur", Dative, Masculine, Singular)),
        ("á", plain("á", Preposition)),
        ("á", plain("á", Verb)),
        ("á", plain("eiga", Verb)),
        ("á", noun("á", Nominative, Feminine, Singular)),
        ("á", noun("á", Accusative, Feminine, Singular)),
        ("á", noun("á", Dative, Feminine, Singular)),
        ("ég", pron("ég", Nominative, Singular)),
        ("hann", pron("hann", Nominative, Singular)),
        ("bíl", noun("bíll", Accusative, Masculine, Singular)),
        ("bíl", noun("bíll", Dative, Masculine, Singular)),
        ("borð", noun("borð", Nominative, Neuter, Singular)),
        ("borð", noun("borð", Accusative, Neuter, Singular)),
        ("borðinu", noun("borð", Dative, Neuter, Singular)),
        ("við", plain("við", Preposition)),
        ("við", pron("við", Nominative, Plural)),
        ("glugganum", noun("gluggi", Dative, Masculine, Singular)),
        ("förum", plain("fara", Verb)),
        ("fer", plain("fara", Verb)),
        ("er", plain("vera", Verb)),
        ("er", plain("er", Conjunction)),
        ("í", plain("í", Preposition)),
        ("veiði", noun("veiði", Nominative, Feminine, Singular)),
        ("veiði", noun("veiði", Dative, Feminine, Singular)),
        ("veiði", plain("veiða", Verb)),
        ("gott", plain("góður", Adjective)),
        ("minni", noun("minni", Nominative, Neuter, Singular)),
        ("minni", plain("lítill", Adjective)),
        ("minni", plain("minna", Verb)),
        ("landbúnaður", noun("landbúnaður", Nominative, Masculine, Singular)),
        ("landbúnaðar", noun("landbúnaður", Genitive, Masculine, Singular)),
        ("ráðherra", noun("ráðherra", Nominative, Masculine, Singular)),
        ("ráðherra", noun("ráðherra", Genitive, Masculine, Singular)),
        (
            "landbúnaðarráðherra",
            noun("landbúnaðarráðherra", Nominative, Masculine, Singular),
        ),
        ("ísland", noun("ísland", Nominative, Neuter, Singular)),
        ("ís", noun("ís", Nominative, Masculine, Singular)),
        ("land", noun("land", Nominative, Neuter, Singular)),
        ("safn", noun("safn", Nominative, Neuter, Singular)),
        ("bóka", noun("bók", Genitive, Feminine, Plural)),
        ("hús", noun("hús", Nominative, Neuter, Singular)),
        ("dagur", noun("dagur", Nominative, Masculine, Singular)),
        ("herra", noun("herra", Nominative, Masculine, Singular)),
    ]
}

/// Bigram counts over lemma pairs.
pub fn fixture_bigrams() -> Vec<(&'static str, &'static str, u32)> {
    vec![
        ("ég", "eiga", 500),
        ("eiga", "bíll", 120),
        ("á", "borð", 300),
        ("góður", "minni", 50),
        ("fara", "á", 900),
        ("hann", "vera", 2000),
    ]
}

pub fn build_fixture(format: EntryFormat) -> Vec<u8> {
    let mut b = DictionaryBuilder::new(format);
    for (word, c) in fixture_readings() {
        b.add_reading(word, c);
    }
    for (w1, w2, f) in fixture_bigrams() {
        b.add_bigram(w1, w2, f);
    }
    b.build().expect("fixture builds")
}

/// Version 2 fixture with morphology.
pub fn fixture_dict() -> BinaryDictionary {
    BinaryDictionary::from_bytes(build_fixture(EntryFormat::Morphological))
        .expect("fixture loads")
}

/// Version 1 fixture: same readings, morphology stripped.
pub fn fixture_dict_v1() -> BinaryDictionary {
    BinaryDictionary::from_bytes(build_fixture(EntryFormat::Narrow)).expect("fixture loads")
}
