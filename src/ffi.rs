//! FFI bindings for Synheart Gaze
//!
//! This module provides C-compatible functions for calling Gaze from XR engines
//! and other languages. Strings are null-terminated; returned strings must be
//! freed by the caller using `gaze_free_string`.
//!
//! Predicate functions return `1` (true), `0` (false) or `-1` (error). On error,
//! `gaze_last_error` describes the failure, so an empty input is
//! distinguishable from a negative result.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::slice;

use crate::classifier::GazeClassifier;
use crate::config::GazeConfig;
use crate::error::ClassifyError;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Parse an optional config string; NULL means defaults
unsafe fn config_from_ptr(config_json: *const c_char) -> Result<GazeConfig, String> {
    if config_json.is_null() {
        return Ok(GazeConfig::default());
    }
    let json = cstr_to_string(config_json).ok_or("Invalid config string pointer")?;
    GazeConfig::from_json(&json).map_err(|e| e.to_string())
}

/// View a raw sample buffer; a zero length is valid with any pointer
unsafe fn samples_from_raw<'a>(samples: *const f64, len: usize) -> Option<&'a [f64]> {
    if len == 0 {
        return Some(&[]);
    }
    if samples.is_null() {
        return None;
    }
    Some(slice::from_raw_parts(samples, len))
}

// ============================================================================
// Stateless API
// ============================================================================

/// Classify a JSON sample set and return the report as JSON.
///
/// # Safety
/// - `config_json` must be NULL (defaults) or a valid null-terminated C string.
/// - `samples_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `gaze_free_string`.
/// - Returns NULL on error; call `gaze_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn gaze_classify_json(
    config_json: *const c_char,
    samples_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let config = match config_from_ptr(config_json) {
        Ok(config) => config,
        Err(msg) => {
            set_last_error(&msg);
            return ptr::null_mut();
        }
    };

    let samples_str = match cstr_to_string(samples_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid samples string pointer");
            return ptr::null_mut();
        }
    };

    match crate::classify_json(&samples_str, &config) {
        Ok(report) => string_to_cstr(&report),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Classifier Handle API
// ============================================================================

/// Opaque handle owning a classifier configuration
pub struct GazeClassifierHandle {
    config: GazeConfig,
}

impl GazeClassifierHandle {
    fn classifier(&self) -> GazeClassifier<'_> {
        GazeClassifier::new(&self.config)
    }
}

/// Create a classifier from a JSON configuration.
///
/// # Safety
/// - `config_json` must be NULL (defaults) or a valid null-terminated C string.
/// - Must be freed with `gaze_classifier_free`.
/// - Returns NULL on error; call `gaze_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn gaze_classifier_new(
    config_json: *const c_char,
) -> *mut GazeClassifierHandle {
    clear_last_error();

    match config_from_ptr(config_json) {
        Ok(config) => Box::into_raw(Box::new(GazeClassifierHandle { config })),
        Err(msg) => {
            set_last_error(&msg);
            ptr::null_mut()
        }
    }
}

/// Free a classifier handle.
///
/// # Safety
/// - `handle` must be a valid pointer returned by `gaze_classifier_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn gaze_classifier_free(handle: *mut GazeClassifierHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

unsafe fn run_predicate(
    handle: *const GazeClassifierHandle,
    samples: *const f64,
    len: usize,
    predicate: impl FnOnce(&GazeClassifier<'_>, &[f64]) -> Result<bool, ClassifyError>,
) -> i32 {
    clear_last_error();

    if handle.is_null() {
        set_last_error("Null classifier pointer");
        return -1;
    }

    let samples = match samples_from_raw(samples, len) {
        Some(samples) => samples,
        None => {
            set_last_error("Null samples pointer");
            return -1;
        }
    };

    match predicate(&(*handle).classifier(), samples) {
        Ok(true) => 1,
        Ok(false) => 0,
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

/// Velocity-threshold check.
///
/// # Safety
/// - `handle` must be a valid pointer returned by `gaze_classifier_new`.
/// - `samples` must point to `len` readable doubles (may be NULL when `len` is 0).
#[no_mangle]
pub unsafe extern "C" fn gaze_classifier_exceeds_velocity_threshold(
    handle: *const GazeClassifierHandle,
    samples: *const f64,
    len: usize,
) -> i32 {
    run_predicate(handle, samples, len, |c, s| c.try_exceeds_velocity_threshold(s))
}

/// Saccade detection.
///
/// # Safety
/// Same requirements as `gaze_classifier_exceeds_velocity_threshold`.
#[no_mangle]
pub unsafe extern "C" fn gaze_classifier_detect_saccade(
    handle: *const GazeClassifierHandle,
    samples: *const f64,
    len: usize,
) -> i32 {
    run_predicate(handle, samples, len, |c, s| c.try_detect_saccade(s))
}

/// Fixation detection.
///
/// # Safety
/// Same requirements as `gaze_classifier_exceeds_velocity_threshold`.
#[no_mangle]
pub unsafe extern "C" fn gaze_classifier_detect_fixation(
    handle: *const GazeClassifierHandle,
    samples: *const f64,
    len: usize,
) -> i32 {
    run_predicate(handle, samples, len, |c, s| c.try_detect_fixation(s))
}

/// Biofeedback detection.
///
/// # Safety
/// Same requirements as `gaze_classifier_exceeds_velocity_threshold`.
#[no_mangle]
pub unsafe extern "C" fn gaze_classifier_detect_biofeedback(
    handle: *const GazeClassifierHandle,
    samples: *const f64,
    len: usize,
) -> i32 {
    run_predicate(handle, samples, len, |c, s| c.try_detect_biofeedback(s))
}

/// Pupillometry analysis.
///
/// # Safety
/// Same requirements as `gaze_classifier_exceeds_velocity_threshold`.
#[no_mangle]
pub unsafe extern "C" fn gaze_classifier_analyze_pupillometry(
    handle: *const GazeClassifierHandle,
    samples: *const f64,
    len: usize,
) -> i32 {
    run_predicate(handle, samples, len, |c, s| c.try_analyze_pupillometry(s))
}

/// Mean performance for difficulty adjustment.
///
/// # Safety
/// - Same requirements as `gaze_classifier_exceeds_velocity_threshold`.
/// - `out` must be a valid pointer to a writable double.
/// - Returns 0 on success, -1 on error (`out` is left untouched).
#[no_mangle]
pub unsafe extern "C" fn gaze_classifier_adjust_difficulty(
    handle: *const GazeClassifierHandle,
    samples: *const f64,
    len: usize,
    out: *mut f64,
) -> i32 {
    clear_last_error();

    if handle.is_null() || out.is_null() {
        set_last_error("Null classifier or output pointer");
        return -1;
    }

    let samples = match samples_from_raw(samples, len) {
        Some(samples) => samples,
        None => {
            set_last_error("Null samples pointer");
            return -1;
        }
    };

    match (*handle).classifier().try_adjust_difficulty(samples) {
        Ok(mean) => {
            *out = mean;
            0
        }
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Gaze functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Gaze function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn gaze_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Gaze function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn gaze_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the Gaze library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn gaze_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
