//! Window exports.

use std::ffi::{c_char, c_void};
use std::ptr;

use horizon_bridge_core::{BridgeError, HandleKind, Rectangle, SizeF, ViewHandle, WindowConfig};

use super::{handle_to_ptr, ptr_to_handle, string_from_ptr, with_bridge};

/// Create a hidden window placed and sized by `rect`.
///
/// `style` is an `NSWindowStyleMask`. Returns `NULL` if the window could not
/// be created.
///
/// # Safety
///
/// `title` must be null or point to a NUL-terminated UTF-8 string.
#[unsafe(export_name = "CreateWindow")]
pub unsafe extern "C" fn create_window(
    rect: Rectangle,
    style: u32,
    title: *const c_char,
) -> *mut c_void {
    let title = unsafe { string_from_ptr(title) };
    let config = WindowConfig::from_raw(rect, style, title);
    with_bridge("CreateWindow", |bridge| bridge.create_window(&config))
        .map_or(ptr::null_mut(), handle_to_ptr)
}

/// The native content view of a window (`NSView*` on macOS).
#[unsafe(export_name = "GetViewPtr")]
pub extern "C" fn get_view_ptr(window: *mut c_void) -> *mut c_void {
    with_bridge("GetViewPtr", |bridge| {
        bridge.view(ptr_to_handle(window, HandleKind::Window)?)
    })
    .map_or(ptr::null_mut(), |view| {
        ptr::with_exposed_provenance_mut(view.addr())
    })
}

/// The current content size of a window. Zero on failure.
#[unsafe(export_name = "GetViewSizeF")]
pub extern "C" fn get_view_size(window: *mut c_void) -> SizeF {
    with_bridge("GetViewSizeF", |bridge| {
        bridge.view_size(ptr_to_handle(window, HandleKind::Window)?)
    })
    .unwrap_or(SizeF::ZERO)
}

#[unsafe(export_name = "ShowWindow")]
pub extern "C" fn show_window(window: *mut c_void) {
    with_bridge("ShowWindow", |bridge| {
        bridge.show_window(ptr_to_handle(window, HandleKind::Window)?)
    });
}

/// Show `window` as a child of `owner`.
#[unsafe(export_name = "ShowWindow2")]
pub extern "C" fn show_window_with_owner(window: *mut c_void, owner: *mut c_void) {
    with_bridge("ShowWindow2", |bridge| {
        bridge.show_window_with_owner(
            ptr_to_handle(window, HandleKind::Window)?,
            ptr_to_handle(owner, HandleKind::Window)?,
        )
    });
}

#[unsafe(export_name = "CreateWindowDelegate")]
pub extern "C" fn create_window_delegate() -> *mut c_void {
    with_bridge("CreateWindowDelegate", |bridge| {
        Ok(bridge.create_window_delegate())
    })
    .map_or(ptr::null_mut(), handle_to_ptr)
}

/// Attach a delegate to a window, replacing any attached before.
#[unsafe(export_name = "SetWindowDelegate")]
pub extern "C" fn set_window_delegate(window: *mut c_void, delegate: *mut c_void) {
    with_bridge("SetWindowDelegate", |bridge| {
        bridge.set_window_delegate(
            ptr_to_handle(window, HandleKind::Window)?,
            ptr_to_handle(delegate, HandleKind::WindowDelegate)?,
        )
    });
}

/// Set (or with `NULL`, clear) the will-resize callback:
/// `(current, proposed)`.
#[unsafe(export_name = "AddWindowWillResizeCallback")]
pub extern "C" fn add_window_will_resize_callback(
    delegate: *mut c_void,
    callback: Option<extern "C" fn(SizeF, SizeF)>,
) {
    with_bridge("AddWindowWillResizeCallback", |bridge| {
        let delegate = ptr_to_handle(delegate, HandleKind::WindowDelegate)?;
        match callback {
            Some(callback) => bridge.set_will_resize_callback(delegate, move |current, proposed| {
                callback(current, proposed)
            }),
            None => bridge.clear_will_resize_callback(delegate),
        }
    });
}

/// Set (or with `NULL`, clear) the did-resize callback: `(final)`.
#[unsafe(export_name = "AddWindowDidResizeCallback")]
pub extern "C" fn add_window_did_resize_callback(
    delegate: *mut c_void,
    callback: Option<extern "C" fn(SizeF)>,
) {
    with_bridge("AddWindowDidResizeCallback", |bridge| {
        let delegate = ptr_to_handle(delegate, HandleKind::WindowDelegate)?;
        match callback {
            Some(callback) => bridge.set_did_resize_callback(delegate, move |size| callback(size)),
            None => bridge.clear_did_resize_callback(delegate),
        }
    });
}

/// Set (or with `NULL`, clear) the will-close callback.
#[unsafe(export_name = "AddWindowWillCloseCallback")]
pub extern "C" fn add_window_will_close_callback(
    delegate: *mut c_void,
    callback: Option<extern "C" fn()>,
) {
    with_bridge("AddWindowWillCloseCallback", |bridge| {
        let delegate = ptr_to_handle(delegate, HandleKind::WindowDelegate)?;
        match callback {
            Some(callback) => bridge.set_will_close_callback(delegate, move || callback()),
            None => bridge.clear_will_close_callback(delegate),
        }
    });
}

/// Back a view with a Metal layer so it can host a GPU surface.
#[unsafe(export_name = "makeViewMetalCompatible")]
pub extern "C" fn make_view_metal_compatible(view: *mut c_void) {
    with_bridge("makeViewMetalCompatible", |bridge| {
        let view = ViewHandle::from_addr(view.addr()).ok_or(BridgeError::invalid(HandleKind::View))?;
        bridge.make_view_surface_compatible(view)
    });
}
