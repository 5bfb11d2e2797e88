use std::ffi::c_char;
use std::ptr;

use serde::Serialize;
use tracing::warn;

use super::{cptr_to_str, ffi_guard, string_into_raw};
use crate::search::{self, Stopwords};
use crate::Lemmatizer;

fn to_json<T: Serialize>(value: &T) -> *mut c_char {
    match serde_json::to_string(value) {
        Ok(json) => string_into_raw(json),
        Err(e) => {
            warn!(error = %e, "failed to serialize result");
            ptr::null_mut()
        }
    }
}

/// Candidates of `word` as a JSON array.
#[no_mangle]
pub extern "C" fn lemma_engine_candidates_json(
    lz: *const Lemmatizer,
    word: *const c_char,
) -> *mut c_char {
    ffi_guard!(ptr::null_mut();
        ref: lz = lz,
        str: word = word,
    );
    to_json(&lz.candidates(word, None))
}

/// Disambiguate `word`; `prev` and `next` may be null.
#[no_mangle]
pub extern "C" fn lemma_engine_disambiguate_json(
    lz: *const Lemmatizer,
    word: *const c_char,
    prev: *const c_char,
    next: *const c_char,
) -> *mut c_char {
    ffi_guard!(ptr::null_mut();
        ref: lz = lz,
        str: word = word,
    );
    let prev = unsafe { cptr_to_str(prev) };
    let next = unsafe { cptr_to_str(next) };
    to_json(&lz.disambiguate(word, prev, next))
}

#[no_mangle]
pub extern "C" fn lemma_engine_split_json(
    lz: *const Lemmatizer,
    word: *const c_char,
) -> *mut c_char {
    ffi_guard!(ptr::null_mut();
        ref: lz = lz,
        str: word = word,
    );
    to_json(&lz.split(word))
}

/// Boolean query for whitespace-separated `text`, without stopword filtering.
#[no_mangle]
pub extern "C" fn lemma_engine_query(lz: *const Lemmatizer, text: *const c_char) -> *mut c_char {
    ffi_guard!(ptr::null_mut();
        ref: lz = lz,
        str: text = text,
    );
    let tokens: Vec<&str> = text.split_whitespace().collect();
    string_into_raw(search::query_expression(lz, &tokens, &Stopwords::new()))
}
