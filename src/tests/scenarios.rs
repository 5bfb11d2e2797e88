use std::sync::Arc;

use super::{fixture, fixture_bytes};
use crate::{Lemmatizer, MembershipKind, Phase, Pos};

fn both_kinds() -> [Lemmatizer; 2] {
    [fixture(MembershipKind::Exact), fixture(MembershipKind::Bloom)]
}

#[test]
fn dative_form_maps_to_nominative_lemma() {
    let lz = fixture(MembershipKind::Exact);
    let lemmas: Vec<String> = lz
        .candidates("hesti", None)
        .into_iter()
        .map(|c| c.lemma)
        .collect();
    assert!(lemmas.contains(&"hestur".to_string()));
}

#[test]
fn ambiguous_form_lists_preposition_and_verb() {
    let lz = fixture(MembershipKind::Exact);
    let c = lz.candidates("á", None);
    assert!(c.len() > 1);
    assert!(c.iter().any(|c| c.pos == Pos::Preposition));
    assert!(c.iter().any(|c| c.pos == Pos::Verb && c.lemma == "eiga"));

    let verbs = lz.candidates("á", Some(Pos::Verb));
    assert!(verbs.iter().all(|c| c.pos == Pos::Verb));
    assert_eq!(verbs.len(), 2);
}

#[test]
fn pronoun_selects_verb_reading() {
    let lz = fixture(MembershipKind::Exact);
    let t = lz.disambiguate("á", Some("ég"), Some("bíl"));
    assert_eq!(t.lemma, "eiga");
    assert_eq!(t.pos, Some(Pos::Verb));
    assert_eq!(t.phase, Phase::GrammarRule);
}

#[test]
fn dative_object_selects_preposition_reading() {
    let lz = fixture(MembershipKind::Exact);
    let t = lz.disambiguate("á", None, Some("borðinu"));
    assert_eq!(t.lemma, "á");
    assert_eq!(t.pos, Some(Pos::Preposition));
    assert_eq!(t.phase, Phase::GrammarRule);
}

#[test]
fn long_compound_is_split() {
    for lz in both_kinds() {
        let s = lz.split("landbúnaðarráðherra");
        assert!(s.is_compound);
        assert!(s.parts.contains(&"landbúnaður".to_string()));
        assert!(s.parts.contains(&"ráðherra".to_string()));
        assert!(s.confidence > 0.9);
    }
}

#[test]
fn protected_place_name_is_not_split() {
    for lz in both_kinds() {
        let s = lz.split("Ísland");
        assert!(!s.is_compound);
        assert_eq!(s.parts, ["ísland"]);
    }
}

#[test]
fn absent_bigram_is_zero() {
    let lz = fixture(MembershipKind::Exact);
    assert_eq!(lz.bigram_frequency("óvenjulegt", "orðapar"), 0);
    assert_eq!(lz.bigram_frequency("fara", "á"), 900);
}

#[test]
fn unknown_word_is_its_own_lemma() {
    let lz = fixture(MembershipKind::Exact);
    assert!(!lz.is_known("Blámi"));
    assert_eq!(lz.lemmas("Blámi"), ["blámi"]);
    let t = lz.disambiguate("Blámi", None, None);
    assert_eq!(t.lemma, "blámi");
    assert_eq!(t.confidence, 0.0);
}

#[test]
fn sentence_disambiguation() {
    let lz = fixture(MembershipKind::Exact);
    let tokens = lz.disambiguate_sentence(&["ég", "á", "bíl"]);
    assert_eq!(tokens[1].lemma, "eiga");
    assert!(tokens.iter().all(|t| (0.0..=1.0).contains(&t.confidence)));
}

#[test]
fn concurrent_readers_share_one_instance() {
    let lz = Arc::new(fixture(MembershipKind::Bloom));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lz = Arc::clone(&lz);
            std::thread::spawn(move || {
                (0..50)
                    .map(|_| lz.disambiguate("á", Some("ég"), Some("bíl")).lemma)
                    .all(|l| l == "eiga")
            })
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap());
    }
}

#[test]
fn shared_handle_loads_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.lema");
    std::fs::write(&path, fixture_bytes()).unwrap();

    let first = crate::init_shared(&path).unwrap();
    let second = crate::init_shared(&dir.path().join("missing.lema")).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    let current = crate::shared().unwrap();
    assert!(Arc::ptr_eq(&first, &current));
    assert!(current.is_known("hesti"));
}

#[test]
fn open_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.lema");
    std::fs::write(&path, fixture_bytes()).unwrap();
    let lz = Lemmatizer::open(&path).unwrap();
    assert_eq!(lz.known_lemmas().kind(), MembershipKind::Exact);
    assert!(lz.is_known("hesti"));

    let mut truncated = fixture_bytes();
    truncated.truncate(40);
    std::fs::write(&path, truncated).unwrap();
    assert!(Lemmatizer::open(&path).is_err());
}
