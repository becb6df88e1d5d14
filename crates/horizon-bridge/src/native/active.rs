//! The running event loop, reachable from inside its own callbacks.
//!
//! winit only hands out an [`ActiveEventLoop`] to handler methods. Host
//! callbacks run inside those methods and may create windows or quit, so
//! each handler method enters an [`ActiveScope`] that publishes the loop to
//! the current thread until it returns.

use std::cell::Cell;
use std::marker::PhantomData;
use std::ptr::NonNull;

use winit::event_loop::ActiveEventLoop;

thread_local! {
    static ACTIVE: Cell<Option<NonNull<ActiveEventLoop>>> = const { Cell::new(None) };
}

/// Publishes an event loop to [`with_active`] for its lifetime.
pub(crate) struct ActiveScope<'a> {
    previous: Option<NonNull<ActiveEventLoop>>,
    _loop: PhantomData<&'a ActiveEventLoop>,
}

impl<'a> ActiveScope<'a> {
    pub(crate) fn enter(event_loop: &'a ActiveEventLoop) -> Self {
        let previous = ACTIVE.with(|active| active.replace(Some(NonNull::from(event_loop))));
        Self {
            previous,
            _loop: PhantomData,
        }
    }
}

impl Drop for ActiveScope<'_> {
    fn drop(&mut self) {
        ACTIVE.with(|active| active.set(self.previous));
    }
}

/// Run `f` with the event loop of the innermost live scope on this thread.
///
/// Returns `None` outside any scope.
pub(crate) fn with_active<R>(f: impl FnOnce(&ActiveEventLoop) -> R) -> Option<R> {
    let event_loop = ACTIVE.with(Cell::get)?;
    // SAFETY: the pointer is published only by an `ActiveScope` borrowing the
    // loop on this thread, and is withdrawn when that scope drops.
    Some(f(unsafe { event_loop.as_ref() }))
}
