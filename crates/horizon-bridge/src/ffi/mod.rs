//! The C surface.
//!
//! Every exported function works on one process-wide [`Bridge`]. It is
//! created over a [`WinitBackend`] on first use, or supplied up front with
//! [`install`] (which is how the tests run the surface headless).
//!
//! Handles cross the boundary as `void*`. Failures never unwind into the
//! host: a failing call logs a warning and returns `NULL`, zero, or a
//! non-zero exit code.

mod application;
mod cursor;
mod window;

use std::ffi::{CStr, c_char, c_void};
use std::ptr;
use std::sync::{Arc, OnceLock};

use horizon_bridge_core::logging::targets;
use horizon_bridge_core::{Bridge, BridgeConfig, BridgeError, HandleKind, RawHandle, Result};

use crate::native::WinitBackend;

pub use application::*;
pub use cursor::*;
pub use window::*;

static BRIDGE: OnceLock<Bridge> = OnceLock::new();

/// Install the bridge the C surface operates on.
///
/// Must happen before the first exported call. Returns the bridge back if
/// one is already in place.
pub fn install(bridge: Bridge) -> std::result::Result<(), Bridge> {
    BRIDGE.set(bridge)
}

/// The process-wide bridge, created over winit on first use.
pub fn bridge() -> Option<&'static Bridge> {
    if let Some(bridge) = BRIDGE.get() {
        return Some(bridge);
    }

    match WinitBackend::new() {
        Ok(backend) => {
            Some(BRIDGE.get_or_init(|| Bridge::new(Arc::new(backend), BridgeConfig::default())))
        }
        Err(err) => {
            tracing::error!(target: targets::FFI, error = %err, "failed to create the native backend");
            None
        }
    }
}

/// Run `f` against the bridge, logging any failure.
fn with_bridge<T>(operation: &'static str, f: impl FnOnce(&Bridge) -> Result<T>) -> Option<T> {
    report(operation, f(bridge()?))
}

/// Log a failed call and collapse the result to an option.
fn report<T>(operation: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(target: targets::FFI, operation, error = %err, "bridge call failed");
            None
        }
    }
}

fn handle_to_ptr<K: RawHandle>(handle: K) -> *mut c_void {
    ptr::without_provenance_mut(handle.to_raw() as usize)
}

fn ptr_to_handle<K: RawHandle>(ptr: *mut c_void, kind: HandleKind) -> Result<K> {
    K::from_raw(ptr.addr() as u64).ok_or(BridgeError::invalid(kind))
}

/// Copy a NUL-terminated UTF-8 string. `NULL` yields an empty string and
/// invalid UTF-8 is replaced.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn string_from_ptr(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}
