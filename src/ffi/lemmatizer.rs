use std::ffi::{c_char, CString};
use std::path::Path;
use std::ptr;

use tracing::warn;

use super::{ffi_close, ffi_guard, owned_drop, owned_new};
use crate::{Lemmatizer, MembershipKind};

/// Lemma strings returned to C. Release with [`lemma_engine_string_list_free`].
#[repr(C)]
pub struct LemmaStringList {
    pub strings: *const *const c_char,
    pub len: u32,
    pub(crate) _owned: *mut OwnedStrings,
}

/// Keeps the pointer array and the `CString`s it points into alive together.
pub(crate) struct OwnedStrings {
    ptrs: Vec<*const c_char>,
    _strings: Vec<CString>,
}

impl LemmaStringList {
    pub(crate) fn empty() -> Self {
        Self {
            strings: ptr::null(),
            len: 0,
            _owned: ptr::null_mut(),
        }
    }

    pub(crate) fn from_strings(items: Vec<String>) -> Self {
        let strings: Vec<CString> = items
            .into_iter()
            .filter_map(|s| CString::new(s).ok())
            .collect();
        if strings.is_empty() {
            return Self::empty();
        }
        // CString data lives on the heap, so these pointers stay valid when
        // the CStrings are moved into `OwnedStrings`.
        let ptrs: Vec<*const c_char> = strings.iter().map(|s| s.as_ptr()).collect();
        let owned = Box::new(OwnedStrings {
            ptrs,
            _strings: strings,
        });
        let data = owned.ptrs.as_ptr();
        let len = owned.ptrs.len() as u32;
        Self {
            strings: data,
            len,
            _owned: Box::into_raw(owned),
        }
    }
}

/// Open a dictionary file. `use_bloom` selects Bloom-filter lemma
/// membership instead of an exact set. Returns null on failure.
#[no_mangle]
pub extern "C" fn lemma_engine_open(path: *const c_char, use_bloom: bool) -> *mut Lemmatizer {
    ffi_guard!(ptr::null_mut();
        str: path_str = path,
    );
    let kind = if use_bloom {
        MembershipKind::Bloom
    } else {
        MembershipKind::Exact
    };
    match Lemmatizer::open_with(Path::new(path_str), kind) {
        Ok(lz) => owned_new(lz),
        Err(e) => {
            warn!(path = path_str, error = %e, "failed to open dictionary");
            ptr::null_mut()
        }
    }
}

ffi_close!(lemma_engine_close, Lemmatizer);

#[no_mangle]
pub extern "C" fn lemma_engine_is_known(lz: *const Lemmatizer, word: *const c_char) -> bool {
    ffi_guard!(false;
        ref: lz = lz,
        str: word = word,
    );
    lz.is_known(word)
}

#[no_mangle]
pub extern "C" fn lemma_engine_bigram_frequency(
    lz: *const Lemmatizer,
    word1: *const c_char,
    word2: *const c_char,
) -> u32 {
    ffi_guard!(0;
        ref: lz = lz,
        str: w1 = word1,
        str: w2 = word2,
    );
    lz.bigram_frequency(w1, w2)
}

/// Distinct lemmas of `word`; an unknown word returns itself.
#[no_mangle]
pub extern "C" fn lemma_engine_lemmas(
    lz: *const Lemmatizer,
    word: *const c_char,
) -> LemmaStringList {
    ffi_guard!(LemmaStringList::empty();
        ref: lz = lz,
        str: word = word,
    );
    LemmaStringList::from_strings(lz.lemmas(word))
}

#[no_mangle]
pub extern "C" fn lemma_engine_string_list_free(list: LemmaStringList) {
    unsafe { owned_drop(list._owned) };
}
