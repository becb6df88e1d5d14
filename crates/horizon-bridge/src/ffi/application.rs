//! Application exports.

use std::ffi::{c_int, c_void};
use std::ptr;

use horizon_bridge_core::HandleKind;

use super::{bridge, handle_to_ptr, ptr_to_handle, with_bridge};

/// Exit code returned when the run loop could not run.
pub const RUN_FAILED: c_int = 1;

#[unsafe(export_name = "CreateApplicationDelegate")]
pub extern "C" fn create_application_delegate() -> *mut c_void {
    with_bridge("CreateApplicationDelegate", |bridge| {
        Ok(bridge.create_application_delegate())
    })
    .map_or(ptr::null_mut(), handle_to_ptr)
}

#[unsafe(export_name = "CreateApplication")]
pub extern "C" fn create_application(delegate: *mut c_void) -> *mut c_void {
    with_bridge("CreateApplication", |bridge| {
        bridge.create_application(ptr_to_handle(delegate, HandleKind::ApplicationDelegate)?)
    })
    .map_or(ptr::null_mut(), handle_to_ptr)
}

#[unsafe(export_name = "AddWindowToAppDelegate")]
pub extern "C" fn add_window_to_app_delegate(delegate: *mut c_void, window: *mut c_void) {
    with_bridge("AddWindowToAppDelegate", |bridge| {
        bridge.add_window_to_app_delegate(
            ptr_to_handle(delegate, HandleKind::ApplicationDelegate)?,
            ptr_to_handle(window, HandleKind::Window)?,
        )
    });
}

#[unsafe(export_name = "GetDelegateFromApp")]
pub extern "C" fn get_delegate_from_app(app: *mut c_void) -> *mut c_void {
    with_bridge("GetDelegateFromApp", |bridge| {
        bridge.delegate_of_app(ptr_to_handle(app, HandleKind::Application)?)
    })
    .map_or(ptr::null_mut(), handle_to_ptr)
}

/// Run the event loop until the application terminates.
///
/// Blocks. Returns the exit code, or [`RUN_FAILED`] if the loop could not
/// run.
#[unsafe(export_name = "RunApplication")]
pub extern "C" fn run_application(app: *mut c_void) -> c_int {
    with_bridge("RunApplication", |bridge| {
        bridge.run_application(ptr_to_handle(app, HandleKind::Application)?)
    })
    .unwrap_or(RUN_FAILED)
}

/// Set (or with `NULL`, clear) the callback fired when the application is
/// about to terminate.
#[unsafe(export_name = "AddApplicationClosedCallback")]
pub extern "C" fn add_application_closed_callback(callback: Option<extern "C" fn()>) {
    let Some(bridge) = bridge() else {
        return;
    };
    match callback {
        Some(callback) => {
            bridge.set_application_closed_callback(move || callback());
        }
        None => {
            bridge.clear_application_closed_callback();
        }
    }
}

/// Ask the run loop to terminate.
#[unsafe(export_name = "QuitApplication")]
pub extern "C" fn quit_application() {
    if let Some(bridge) = bridge() {
        bridge.quit_application();
    }
}

/// Install a log subscriber filtered by `HORIZON_BRIDGE_LOG`.
///
/// Returns `false` if one was already installed.
#[unsafe(export_name = "InitializeLogging")]
pub extern "C" fn initialize_logging() -> bool {
    crate::logging::init_logging()
}
