//! The seam between the bridge and a native windowing toolkit.
//!
//! A [`NativeBackend`] owns the native objects (windows, views, the run
//! loop). The [`Bridge`](crate::Bridge) owns everything the host can
//! observe through handles and drives the backend through this trait. While
//! the run loop is running, the backend reports what the toolkit does
//! through an [`EventSink`].
//!
//! # Re-entrancy
//!
//! Sink methods run synchronously inside native event dispatch. Backends
//! must not hold their own locks while calling into the sink: the sink
//! invokes host callbacks, and host callbacks may query the backend
//! (`view_size`) or change the cursor.

use crate::cursor::CursorAppearance;
use crate::error::Result;
use crate::geometry::SizeF;
use crate::handle::{ViewHandle, WindowHandle};
use crate::window::WindowConfig;

/// A native windowing toolkit.
pub trait NativeBackend: Send + Sync {
    /// A short name for logs.
    fn name(&self) -> &'static str;

    /// Create a hidden native window for `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::AllocationFailed`](crate::BridgeError) if the
    /// toolkit could not create the window.
    fn create_window(&self, handle: WindowHandle, config: &WindowConfig) -> Result<()>;

    /// The content view of an open window.
    fn view_handle(&self, window: WindowHandle) -> Result<ViewHandle>;

    /// The current content size of an open window in logical units.
    fn view_size(&self, window: WindowHandle) -> Result<SizeF>;

    /// Make a window visible and key. With `owner`, also attach it as a
    /// child of that window.
    fn show_window(&self, window: WindowHandle, owner: Option<WindowHandle>) -> Result<()>;

    /// Prepare a view to host a GPU (Metal) surface.
    ///
    /// The bridge calls this at most once per view.
    fn make_view_surface_compatible(&self, view: ViewHandle) -> Result<()>;

    /// Display the given cursor state on every window.
    fn apply_cursor(&self, appearance: CursorAppearance);

    /// Run the native event loop until it terminates, reporting native events
    /// to `sink`. Returns the process exit code.
    ///
    /// This is the only blocking call.
    fn run(&self, sink: &dyn EventSink) -> Result<i32>;

    /// Ask the running event loop to terminate.
    fn request_exit(&self);
}

/// Receiver for what the native toolkit does while its loop runs.
pub trait EventSink {
    /// A resize is about to be committed.
    fn window_will_resize(&self, window: WindowHandle, current: SizeF, proposed: SizeF);

    /// A resize has been committed.
    fn window_did_resize(&self, window: WindowHandle, size: SizeF);

    /// The toolkit is about to close a window.
    fn window_will_close(&self, window: WindowHandle);

    /// The toolkit has closed a window and released its native resources.
    ///
    /// Returns `true` if the application should terminate.
    fn window_closed(&self, window: WindowHandle) -> bool;

    /// The mouse moved over one of the windows.
    fn mouse_moved(&self);

    /// The run loop is about to terminate.
    fn application_will_terminate(&self);
}

/// A native event, as the headless backend queues it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeEvent {
    /// The user (or the system) resized a window's content to `size`.
    Resized {
        window: WindowHandle,
        size: SizeF,
    },
    /// The user asked to close a window.
    CloseRequested { window: WindowHandle },
    /// The mouse moved.
    MouseMoved,
    /// The application was asked to quit.
    QuitRequested,
}
