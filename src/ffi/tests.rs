use std::ffi::{CStr, CString};
use std::ptr;

use super::*;
use crate::{Candidate, DictionaryBuilder, EntryFormat, Lemmatizer, Pos};

fn write_test_dict(dir: &std::path::Path) -> CString {
    let mut b = DictionaryBuilder::new(EntryFormat::Morphological);
    b.add_reading("hesti", Candidate::new("hestur", Pos::Noun));
    b.add_reading("á", Candidate::new("á", Pos::Preposition));
    b.add_reading("á", Candidate::new("eiga", Pos::Verb));
    b.add_reading("fer", Candidate::new("fara", Pos::Verb));
    b.add_bigram("fara", "á", 900);
    let path = dir.join("test.lema");
    std::fs::write(&path, b.build().unwrap()).unwrap();
    CString::new(path.to_str().unwrap()).unwrap()
}

fn open_test_lemmatizer(dir: &std::path::Path) -> *mut Lemmatizer {
    let path = write_test_dict(dir);
    let lz = lemma_engine_open(path.as_ptr(), false);
    assert!(!lz.is_null());
    lz
}

unsafe fn take_string(s: *mut c_char) -> String {
    assert!(!s.is_null());
    let out = CStr::from_ptr(s).to_str().unwrap().to_string();
    lemma_engine_string_free(s);
    out
}

#[test]
fn test_ffi_version() {
    let v = unsafe { CStr::from_ptr(lemma_engine_version()) };
    assert_eq!(v.to_str().unwrap(), "0.1.0");
}

#[test]
fn test_ffi_open_missing_file() {
    let path = CString::new("/nonexistent/dict.lema").unwrap();
    assert!(lemma_engine_open(path.as_ptr(), false).is_null());
    assert!(lemma_engine_open(ptr::null(), false).is_null());
}

#[test]
fn test_ffi_lemmas_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let lz = open_test_lemmatizer(dir.path());
    let word = CString::new("á").unwrap();

    let list = lemma_engine_lemmas(lz, word.as_ptr());
    assert_eq!(list.len, 2);
    unsafe {
        let items = std::slice::from_raw_parts(list.strings, list.len as usize);
        assert_eq!(CStr::from_ptr(items[0]).to_str().unwrap(), "á");
        assert_eq!(CStr::from_ptr(items[1]).to_str().unwrap(), "eiga");
    }
    lemma_engine_string_list_free(list);
    lemma_engine_close(lz);
}

#[test]
fn test_ffi_null_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let lz = open_test_lemmatizer(dir.path());

    let list = lemma_engine_lemmas(lz, ptr::null());
    assert_eq!(list.len, 0);
    assert!(list.strings.is_null());
    lemma_engine_string_list_free(list);

    assert!(!lemma_engine_is_known(ptr::null(), ptr::null()));
    assert_eq!(
        lemma_engine_bigram_frequency(lz, ptr::null(), ptr::null()),
        0
    );
    assert!(lemma_engine_split_json(lz, ptr::null()).is_null());
    lemma_engine_string_free(ptr::null_mut());
    lemma_engine_close(ptr::null_mut());
    lemma_engine_close(lz);
}

#[test]
fn test_ffi_lookups() {
    let dir = tempfile::tempdir().unwrap();
    let lz = open_test_lemmatizer(dir.path());
    let hesti = CString::new("Hesti").unwrap();
    let fara = CString::new("fara").unwrap();
    let a = CString::new("á").unwrap();

    assert!(lemma_engine_is_known(lz, hesti.as_ptr()));
    assert_eq!(lemma_engine_bigram_frequency(lz, fara.as_ptr(), a.as_ptr()), 900);
    assert_eq!(lemma_engine_bigram_frequency(lz, a.as_ptr(), fara.as_ptr()), 0);
    lemma_engine_close(lz);
}

#[test]
fn test_ffi_disambiguate_json() {
    let dir = tempfile::tempdir().unwrap();
    let lz = open_test_lemmatizer(dir.path());
    let word = CString::new("á").unwrap();
    let prev = CString::new("fer").unwrap();

    let json = unsafe {
        take_string(lemma_engine_disambiguate_json(
            lz,
            word.as_ptr(),
            prev.as_ptr(),
            ptr::null(),
        ))
    };
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["lemma"], "á");
    assert_eq!(v["phase"], "bigram");
    assert_eq!(v["ambiguous"], true);
    lemma_engine_close(lz);
}

#[test]
fn test_ffi_candidates_and_split_json() {
    let dir = tempfile::tempdir().unwrap();
    let lz = open_test_lemmatizer(dir.path());
    let word = CString::new("hesti").unwrap();

    let json = unsafe { take_string(lemma_engine_candidates_json(lz, word.as_ptr())) };
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v[0]["lemma"], "hestur");
    assert_eq!(v[0]["pos"], "no");

    let json = unsafe { take_string(lemma_engine_split_json(lz, word.as_ptr())) };
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["is_compound"], false);
    assert_eq!(v["parts"][0], "hestur");
    lemma_engine_close(lz);
}

#[test]
fn test_ffi_query() {
    let dir = tempfile::tempdir().unwrap();
    let lz = open_test_lemmatizer(dir.path());
    let text = CString::new("hesti  á").unwrap();
    let q = unsafe { take_string(lemma_engine_query(lz, text.as_ptr())) };
    assert_eq!(q, "hestur & (á | eiga)");
    lemma_engine_close(lz);
}
