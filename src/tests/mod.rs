mod scenarios;

use crate::{
    Candidate, Case, DictionaryBuilder, EntryFormat, Gender, Lemmatizer, MembershipKind, Number,
    Pos,
};

fn noun(lemma: &str, case: Case, gender: Gender) -> Candidate {
    Candidate::new(lemma, Pos::Noun).with_morphology(
        Some(case),
        Some(gender),
        Some(Number::Singular),
    )
}

pub fn fixture_bytes() -> Vec<u8> {
    use Case::*;
    use Gender::*;

    let mut b = DictionaryBuilder::new(EntryFormat::Morphological);
    b.add_reading("hesti", noun("hestur", Dative, Masculine));
    b.add_reading("á", Candidate::new("á", Pos::Preposition));
    b.add_reading("á", Candidate::new("á", Pos::Verb));
    b.add_reading("á", Candidate::new("eiga", Pos::Verb));
    b.add_reading("á", noun("á", Nominative, Feminine));
    let eg = Candidate::new("ég", Pos::Pronoun).with_morphology(
        Some(Nominative),
        None,
        Some(Number::Singular),
    );
    b.add_reading("ég", eg);
    b.add_reading("bíl", noun("bíll", Accusative, Masculine));
    b.add_reading("bíl", noun("bíll", Dative, Masculine));
    b.add_reading("borðinu", noun("borð", Dative, Neuter));
    b.add_reading("og", Candidate::new("og", Pos::Conjunction));
    b.add_reading("fer", Candidate::new("fara", Pos::Verb));
    b.add_reading("landbúnaðar", noun("landbúnaður", Genitive, Masculine));
    b.add_reading("ráðherra", noun("ráðherra", Nominative, Masculine));
    b.add_reading(
        "landbúnaðarráðherra",
        noun("landbúnaðarráðherra", Nominative, Masculine),
    );
    b.add_reading("ísland", noun("ísland", Nominative, Neuter));
    b.add_reading("ís", noun("ís", Nominative, Masculine));
    b.add_reading("land", noun("land", Nominative, Neuter));
    b.add_reading("bóka", noun("bók", Genitive, Feminine));
    b.add_reading("safn", noun("safn", Nominative, Neuter));
    b.add_bigram("ég", "eiga", 500);
    b.add_bigram("eiga", "bíll", 120);
    b.add_bigram("fara", "á", 900);
    b.build().expect("fixture builds")
}

pub fn fixture(kind: MembershipKind) -> Lemmatizer {
    Lemmatizer::from_bytes(fixture_bytes(), kind).expect("fixture loads")
}
