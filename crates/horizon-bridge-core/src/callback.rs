//! Single-slot callback registry.
//!
//! Each notification point (will-resize, did-resize, will-close,
//! application-closed) holds at most one handler. Registering replaces the
//! previous handler; there is no multicast.
//!
//! Handlers are invoked synchronously on the calling thread. The slot lock is
//! released before the handler runs, so a handler may re-register or query
//! the bridge without deadlocking.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::geometry::SizeF;

/// Handler for the pre-commit resize notification: `(current, proposed)`.
pub type WillResizeFn = dyn Fn(SizeF, SizeF) + Send + Sync;

/// Handler for the post-commit resize notification: `(final)`.
pub type DidResizeFn = dyn Fn(SizeF) + Send + Sync;

/// Handler for argument-less notifications (window will close, application
/// closed).
pub type NotifyFn = dyn Fn() + Send + Sync;

/// A slot holding at most one callback.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_bridge_core::callback::{CallbackSlot, NotifyFn};
///
/// let slot: CallbackSlot<NotifyFn> = CallbackSlot::new();
/// assert!(!slot.replace(Arc::new(|| println!("first"))));
/// assert!(slot.replace(Arc::new(|| println!("second"))));
///
/// if let Some(handler) = slot.get() {
///     handler();
/// }
/// ```
pub struct CallbackSlot<F: ?Sized> {
    handler: Mutex<Option<Arc<F>>>,
}

impl<F: ?Sized> CallbackSlot<F> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            handler: Mutex::new(None),
        }
    }

    /// Store `handler`, dropping any previous one.
    ///
    /// Returns `true` if a previous handler was replaced.
    pub fn replace(&self, handler: Arc<F>) -> bool {
        self.handler.lock().replace(handler).is_some()
    }

    /// Remove the handler. Returns `true` if one was registered.
    pub fn clear(&self) -> bool {
        self.handler.lock().take().is_some()
    }

    /// Check if a handler is registered.
    pub fn is_set(&self) -> bool {
        self.handler.lock().is_some()
    }

    /// Clone the current handler out of the slot.
    ///
    /// The returned handler stays callable even if the slot is replaced
    /// while it runs.
    pub fn get(&self) -> Option<Arc<F>> {
        self.handler.lock().clone()
    }
}

impl<F: ?Sized> Default for CallbackSlot<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> std::fmt::Debug for CallbackSlot<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackSlot")
            .field("set", &self.is_set())
            .finish()
    }
}
