//! Lemmatization for Icelandic search.
//!
//! [`Lemmatizer`] bundles a binary dictionary with the known-lemma set the
//! compound splitter needs. Load it once per process with [`init_shared`]
//! and query it from anywhere through [`shared`], or own one directly.

// FFI functions perform null checks before dereferencing raw pointers.
// Clippy cannot verify this statically, so we allow it at crate level.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

pub mod ffi;
mod lemmatizer;
pub mod search;
pub mod trace_init;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

pub use lemma_core::settings;
pub use lemma_core::{
    BinaryDictionary, Candidate, Case, CompoundSplit, DictError, DisambiguatedToken, Dictionary,
    DictionaryBuilder, EntryFormat, FormatError, Gender, MembershipKind, Number, Phase, Pos,
};
pub use lemmatizer::Lemmatizer;

static SHARED: OnceLock<Arc<Lemmatizer>> = OnceLock::new();
static SHARED_INIT: Mutex<()> = Mutex::new(());

/// Load the process-wide lemmatizer from `path`, or return the one already
/// loaded. The dictionary is opened at most once.
pub fn init_shared(path: &Path) -> Result<Arc<Lemmatizer>, DictError> {
    if let Some(lz) = SHARED.get() {
        return Ok(Arc::clone(lz));
    }
    let _guard = SHARED_INIT.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(lz) = SHARED.get() {
        return Ok(Arc::clone(lz));
    }
    let lz = Arc::new(Lemmatizer::open(path)?);
    let _ = SHARED.set(Arc::clone(&lz));
    Ok(lz)
}

/// The process-wide lemmatizer, if [`init_shared`] has succeeded.
pub fn shared() -> Option<Arc<Lemmatizer>> {
    SHARED.get().cloned()
}
