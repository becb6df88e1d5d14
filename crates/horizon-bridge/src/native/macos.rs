//! AppKit calls for what winit does not expose.

use horizon_bridge_core::{BridgeError, Result};
use objc2::msg_send;
use objc2::rc::Retained;
use objc2::runtime::{AnyClass, AnyObject};
use objc2_app_kit::{NSWindow, NSWindowOrderingMode};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::Window;

#[link(name = "QuartzCore", kind = "framework")]
unsafe extern "C" {}

/// The content view of a winit window.
fn ns_view(window: &Window) -> Result<*mut AnyObject> {
    let handle = window
        .window_handle()
        .map_err(|e| BridgeError::Platform(e.to_string()))?;

    match handle.as_raw() {
        RawWindowHandle::AppKit(handle) => Ok(handle.ns_view.as_ptr().cast()),
        _ => Err(BridgeError::Platform(
            "expected AppKit window handle".to_string(),
        )),
    }
}

/// The NSWindow hosting a winit window.
fn ns_window(window: &Window) -> Result<Retained<NSWindow>> {
    let view = ns_view(window)?;
    unsafe {
        let ns_window: *mut NSWindow = msg_send![view, window];
        Retained::retain(ns_window)
            .ok_or_else(|| BridgeError::Platform("NSView has no window".to_string()))
    }
}

/// Back the window's content view with a `CAMetalLayer`.
pub(super) fn attach_metal_layer(window: &Window) -> Result<()> {
    let view = ns_view(window)?;
    let class = AnyClass::get(c"CAMetalLayer")
        .ok_or_else(|| BridgeError::Unsupported("CAMetalLayer is unavailable".to_string()))?;

    unsafe {
        let layer: *mut AnyObject = msg_send![class, layer];
        if layer.is_null() {
            return Err(BridgeError::AllocationFailed("CAMetalLayer".to_string()));
        }

        let _: () = msg_send![view, setWantsLayer: true];
        let _: () = msg_send![view, setLayer: layer];

        let host: *mut AnyObject = msg_send![view, window];
        let scale: f64 = if host.is_null() {
            1.0
        } else {
            msg_send![host, backingScaleFactor]
        };
        let _: () = msg_send![layer, setContentsScale: scale];
    }
    Ok(())
}

/// Attach `child` to `parent` so it moves with it and stays above it.
pub(super) fn add_child_window(parent: &Window, child: &Window) -> Result<()> {
    let parent = ns_window(parent)?;
    let child = ns_window(child)?;
    unsafe {
        let _: () = msg_send![&parent, addChildWindow: &*child, ordered: NSWindowOrderingMode::Above];
    }
    Ok(())
}
