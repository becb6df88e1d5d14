//! Window and application delegates.
//!
//! A [`WindowDelegate`] receives a window's lifecycle notifications. It is
//! created on its own and attached to a window later; an unattached window
//! raises no notifications. An [`ApplicationDelegate`] is the long-lived
//! holder of the application's windows.

use std::sync::Arc;

use crate::callback::{CallbackSlot, DidResizeFn, NotifyFn, WillResizeFn};
use crate::geometry::SizeF;
use crate::handle::WindowHandle;

/// Per-window notification slots.
///
/// Each slot holds at most one callback; registering replaces.
#[derive(Debug, Default)]
pub struct WindowDelegate {
    will_resize: CallbackSlot<WillResizeFn>,
    did_resize: CallbackSlot<DidResizeFn>,
    will_close: CallbackSlot<NotifyFn>,
}

impl WindowDelegate {
    /// Create a delegate with empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pre-commit resize callback. Returns `true` if one was replaced.
    pub fn set_will_resize(&self, callback: Arc<WillResizeFn>) -> bool {
        self.will_resize.replace(callback)
    }

    /// Set the post-commit resize callback. Returns `true` if one was replaced.
    pub fn set_did_resize(&self, callback: Arc<DidResizeFn>) -> bool {
        self.did_resize.replace(callback)
    }

    /// Set the will-close callback. Returns `true` if one was replaced.
    pub fn set_will_close(&self, callback: Arc<NotifyFn>) -> bool {
        self.will_close.replace(callback)
    }

    pub fn clear_will_resize(&self) -> bool {
        self.will_resize.clear()
    }

    pub fn clear_did_resize(&self) -> bool {
        self.did_resize.clear()
    }

    pub fn clear_will_close(&self) -> bool {
        self.will_close.clear()
    }

    /// Invoke the will-resize callback, if any.
    pub fn notify_will_resize(&self, current: SizeF, proposed: SizeF) {
        if let Some(callback) = self.will_resize.get() {
            callback(current, proposed);
        }
    }

    /// Invoke the did-resize callback, if any.
    pub fn notify_did_resize(&self, size: SizeF) {
        if let Some(callback) = self.did_resize.get() {
            callback(size);
        }
    }

    /// Invoke the will-close callback, if any.
    pub fn notify_will_close(&self) {
        if let Some(callback) = self.will_close.get() {
            callback();
        }
    }
}

/// Ordered collection of the application's windows.
///
/// Insertion order is call order. The collection is append-only from the
/// bridge's point of view: closing a window changes its state but does not
/// remove it.
#[derive(Debug, Clone, Default)]
pub struct ApplicationDelegate {
    windows: Vec<WindowHandle>,
}

impl ApplicationDelegate {
    /// Create an empty delegate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a window.
    pub fn add_window(&mut self, window: WindowHandle) {
        self.windows.push(window);
    }

    /// The windows in insertion order.
    pub fn windows(&self) -> &[WindowHandle] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
