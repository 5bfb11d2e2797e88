//! C API. Each sub-module covers one area; shared helpers and macros live here.
//!
//! Structured results cross the boundary as JSON strings that the caller
//! releases with [`lemma_engine_string_free`].

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

pub mod analysis;
pub mod lemmatizer;

#[cfg(test)]
mod tests;

pub use analysis::*;
pub use lemmatizer::*;

/// Box `value` for C; release it with [`owned_drop`].
pub(crate) fn owned_new<T>(value: T) -> *mut T {
    Box::into_raw(Box::new(value))
}

/// # Safety
/// `ptr` is null or came from [`owned_new`] and has not been dropped yet.
pub(crate) unsafe fn owned_drop<T>(ptr: *mut T) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Borrow a NUL-terminated UTF-8 string; `None` for null or invalid UTF-8.
pub(crate) unsafe fn cptr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Hand a Rust string to C. Null if it contains an interior NUL.
pub(crate) fn string_into_raw(s: String) -> *mut c_char {
    CString::new(s).map_or(ptr::null_mut(), CString::into_raw)
}

/// Validate FFI arguments and bind them as safe Rust values, returning
/// `$on_err` from the calling function if any check fails.
///
/// - `str: $name = $ptr` binds a non-null, valid UTF-8 `*const c_char` as `&str`.
/// - `ref: $name = $ptr` binds a non-null `*const T` as `&T`.
macro_rules! ffi_guard {
    ($on_err:expr ; ) => {};

    ($on_err:expr ; str: $name:ident = $ptr:expr , $($rest:tt)*) => {
        let Some($name) = (unsafe { $crate::ffi::cptr_to_str($ptr) }) else {
            return $on_err;
        };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };

    ($on_err:expr ; ref: $name:ident = $ptr:expr , $($rest:tt)*) => {
        if $ptr.is_null() {
            return $on_err;
        }
        let $name = unsafe { &*$ptr };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };
}

/// `extern "C"` destructor for a type handed out through [`owned_new`].
macro_rules! ffi_close {
    ($fn_name:ident, $T:ty) => {
        #[no_mangle]
        pub extern "C" fn $fn_name(ptr: *mut $T) {
            unsafe { $crate::ffi::owned_drop(ptr) };
        }
    };
}

pub(crate) use ffi_close;
pub(crate) use ffi_guard;

#[no_mangle]
pub extern "C" fn lemma_engine_version() -> *const c_char {
    c"0.1.0".as_ptr()
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn lemma_engine_trace_init(log_dir: *const c_char) {
    ffi_guard!(();
        str: dir_str = log_dir,
    );
    crate::trace_init::init_tracing(Path::new(dir_str));
}

/// Free a string returned by any `*_json` function. No-op on null.
#[no_mangle]
pub extern "C" fn lemma_engine_string_free(s: *mut c_char) {
    if !s.is_null() {
        // SAFETY: non-null strings handed out by this library come from
        // `CString::into_raw` and are freed exactly once by the caller.
        unsafe { drop(CString::from_raw(s)) };
    }
}
