//! The bridge context.
//!
//! [`Bridge`] is the composition root: it owns the window registry, the
//! delegates, the application objects, the cursor controller and the native
//! backend. Every operation the host can perform is a `&self` method here.
//!
//! # Locking
//!
//! Registries sit behind `parking_lot` locks so the bridge is `Send + Sync`.
//! No lock is held across a backend call or a host callback: callbacks may
//! call straight back into the bridge (querying a view size from inside a
//! resize callback, changing the cursor from a close callback) without
//! deadlocking.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use slotmap::SlotMap;

use crate::backend::{EventSink, NativeBackend};
use crate::callback::{CallbackSlot, NotifyFn};
use crate::config::BridgeConfig;
use crate::cursor::{CursorAppearance, CursorController, CursorType};
use crate::delegate::{ApplicationDelegate, WindowDelegate};
use crate::error::{BridgeError, Result};
use crate::geometry::SizeF;
use crate::handle::{
    AppDelegateHandle, AppHandle, HandleKind, ViewHandle, WindowDelegateHandle, WindowHandle,
};
use crate::logging::targets;
use crate::thread_check::ThreadAffinity;
use crate::window::{WindowConfig, WindowRecord, WindowState};

/// A native application object, bound to one application delegate.
#[derive(Debug, Clone, Copy)]
struct ApplicationRecord {
    delegate: AppDelegateHandle,
}

/// The bridge between a host application and a native windowing toolkit.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_bridge_core::{Bridge, BridgeConfig, CursorType, HeadlessBackend, WindowConfig};
///
/// let bridge = Bridge::new(Arc::new(HeadlessBackend::new()), BridgeConfig::default());
///
/// let window = bridge.create_window(&WindowConfig::new("Main")).unwrap();
/// bridge.show_window(window).unwrap();
///
/// bridge.set_cursor_type(CursorType::IBeam);
/// assert!(bridge.pop_cursor());
/// assert_eq!(bridge.current_cursor(), CursorType::Arrow);
/// ```
pub struct Bridge {
    config: BridgeConfig,
    backend: Arc<dyn NativeBackend>,
    windows: RwLock<SlotMap<WindowHandle, WindowRecord>>,
    window_delegates: RwLock<SlotMap<WindowDelegateHandle, Arc<WindowDelegate>>>,
    app_delegates: RwLock<SlotMap<AppDelegateHandle, ApplicationDelegate>>,
    applications: RwLock<SlotMap<AppHandle, ApplicationRecord>>,
    app_closed: CallbackSlot<NotifyFn>,
    cursor: Mutex<CursorController>,
    /// Views already prepared for a GPU surface.
    surface_views: Mutex<HashSet<ViewHandle>>,
    running: AtomicBool,
    affinity: ThreadAffinity,
}

impl Bridge {
    /// Create a bridge over `backend`.
    ///
    /// The calling thread becomes the bridge's UI thread.
    pub fn new(backend: Arc<dyn NativeBackend>, config: BridgeConfig) -> Self {
        tracing::debug!(
            target: targets::APPLICATION,
            backend = backend.name(),
            ?config,
            "bridge created"
        );
        Self {
            affinity: ThreadAffinity::current(config.thread_checks()),
            config,
            backend,
            windows: RwLock::new(SlotMap::with_key()),
            window_delegates: RwLock::new(SlotMap::with_key()),
            app_delegates: RwLock::new(SlotMap::with_key()),
            applications: RwLock::new(SlotMap::with_key()),
            app_closed: CallbackSlot::new(),
            cursor: Mutex::new(CursorController::new()),
            surface_views: Mutex::new(HashSet::new()),
            running: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The name of the active backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Create a hidden native window.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::AllocationFailed`] if the toolkit could not
    /// create the window. The failure is final; nothing is retried.
    pub fn create_window(&self, config: &WindowConfig) -> Result<WindowHandle> {
        self.affinity.check("create_window");

        let handle = self.windows.write().insert(WindowRecord::new(config.clone()));
        if let Err(err) = self.backend.create_window(handle, config) {
            self.windows.write().remove(handle);
            tracing::warn!(
                target: targets::WINDOW,
                title = config.title(),
                error = %err,
                "window creation failed"
            );
            return Err(err);
        }

        tracing::debug!(
            target: targets::WINDOW,
            ?handle,
            title = config.title(),
            rect = ?config.rect(),
            style = ?config.style(),
            "window created"
        );
        Ok(handle)
    }

    /// The native content view of an open window.
    pub fn view(&self, window: WindowHandle) -> Result<ViewHandle> {
        self.ensure_open(window)?;
        self.backend.view_handle(window)
    }

    /// The live content size of an open window.
    pub fn view_size(&self, window: WindowHandle) -> Result<SizeF> {
        self.ensure_open(window)?;
        self.backend.view_size(window)
    }

    /// Make a window visible and key.
    pub fn show_window(&self, window: WindowHandle) -> Result<()> {
        self.show(window, None)
    }

    /// Make a window visible and key, attached as a child of `owner`.
    pub fn show_window_with_owner(&self, window: WindowHandle, owner: WindowHandle) -> Result<()> {
        if window == owner {
            return Err(BridgeError::Unsupported(
                "a window cannot own itself".to_string(),
            ));
        }
        self.ensure_open(owner)?;
        self.show(window, Some(owner))
    }

    fn show(&self, window: WindowHandle, owner: Option<WindowHandle>) -> Result<()> {
        self.affinity.check("show_window");
        self.ensure_open(window)?;
        self.backend.show_window(window, owner)?;

        let mut windows = self.windows.write();
        if let Some(record) = windows.get_mut(window) {
            record.visible = true;
            if record.state == WindowState::Created {
                record.state = WindowState::Shown;
            }
            if owner.is_some() {
                record.owner = owner;
            }
        }
        tracing::debug!(target: targets::WINDOW, ?window, ?owner, "window shown");
        Ok(())
    }

    /// The lifecycle state of a window. Closed windows stay queryable.
    pub fn window_state(&self, window: WindowHandle) -> Result<WindowState> {
        self.windows
            .read()
            .get(window)
            .map(|record| record.state)
            .ok_or(BridgeError::invalid(HandleKind::Window))
    }

    /// The window a child window was attached to.
    pub fn window_owner(&self, window: WindowHandle) -> Result<Option<WindowHandle>> {
        self.windows
            .read()
            .get(window)
            .map(|record| record.owner)
            .ok_or(BridgeError::invalid(HandleKind::Window))
    }

    /// The configuration a window was created with.
    pub fn window_config(&self, window: WindowHandle) -> Result<WindowConfig> {
        self.windows
            .read()
            .get(window)
            .map(|record| record.config.clone())
            .ok_or(BridgeError::invalid(HandleKind::Window))
    }

    /// Number of windows that have not been closed.
    pub fn open_window_count(&self) -> usize {
        self.windows
            .read()
            .values()
            .filter(|record| record.state.is_open())
            .count()
    }

    /// Prepare a view to host a Metal surface.
    ///
    /// Returns `false` if the view was already prepared; the backend is only
    /// asked once per view.
    pub fn make_view_surface_compatible(&self, view: ViewHandle) -> Result<bool> {
        self.affinity.check("make_view_surface_compatible");
        if self.surface_views.lock().contains(&view) {
            tracing::trace!(target: targets::WINDOW, ?view, "view already surface compatible");
            return Ok(false);
        }

        self.backend.make_view_surface_compatible(view)?;
        self.surface_views.lock().insert(view);
        tracing::debug!(target: targets::WINDOW, ?view, "view made surface compatible");
        Ok(true)
    }

    fn ensure_open(&self, window: WindowHandle) -> Result<()> {
        match self.windows.read().get(window) {
            None => Err(BridgeError::invalid(HandleKind::Window)),
            Some(record) if !record.state.is_open() => Err(BridgeError::WindowClosed),
            Some(_) => Ok(()),
        }
    }

    // =========================================================================
    // Window delegates
    // =========================================================================

    /// Create a window delegate with empty callback slots.
    pub fn create_window_delegate(&self) -> WindowDelegateHandle {
        let handle = self
            .window_delegates
            .write()
            .insert(Arc::new(WindowDelegate::new()));
        tracing::trace!(target: targets::WINDOW, ?handle, "window delegate created");
        handle
    }

    /// Attach `delegate` to `window`, detaching whatever was attached before.
    ///
    /// Returns the previously attached delegate. Re-attaching the same
    /// delegate changes nothing.
    pub fn set_window_delegate(
        &self,
        window: WindowHandle,
        delegate: WindowDelegateHandle,
    ) -> Result<Option<WindowDelegateHandle>> {
        self.affinity.check("set_window_delegate");
        if !self.window_delegates.read().contains_key(delegate) {
            return Err(BridgeError::invalid(HandleKind::WindowDelegate));
        }

        let mut windows = self.windows.write();
        let record = windows
            .get_mut(window)
            .ok_or(BridgeError::invalid(HandleKind::Window))?;
        if !record.state.is_open() {
            return Err(BridgeError::WindowClosed);
        }

        let previous = record.delegate.replace(delegate);
        if previous.is_some_and(|previous| previous != delegate) {
            tracing::debug!(
                target: targets::WINDOW,
                ?window,
                ?previous,
                ?delegate,
                "window delegate replaced"
            );
        }
        Ok(previous)
    }

    /// The delegate attached to a window, if any.
    pub fn window_delegate_of(&self, window: WindowHandle) -> Result<Option<WindowDelegateHandle>> {
        self.windows
            .read()
            .get(window)
            .map(|record| record.delegate)
            .ok_or(BridgeError::invalid(HandleKind::Window))
    }

    /// Set the will-resize callback of a delegate: `(current, proposed)`.
    ///
    /// Returns `true` if a callback was replaced.
    pub fn set_will_resize_callback<F>(&self, delegate: WindowDelegateHandle, callback: F) -> Result<bool>
    where
        F: Fn(SizeF, SizeF) + Send + Sync + 'static,
    {
        Ok(self.window_delegate(delegate)?.set_will_resize(Arc::new(callback)))
    }

    /// Set the did-resize callback of a delegate: `(final)`.
    ///
    /// Returns `true` if a callback was replaced.
    pub fn set_did_resize_callback<F>(&self, delegate: WindowDelegateHandle, callback: F) -> Result<bool>
    where
        F: Fn(SizeF) + Send + Sync + 'static,
    {
        Ok(self.window_delegate(delegate)?.set_did_resize(Arc::new(callback)))
    }

    /// Set the will-close callback of a delegate.
    ///
    /// Returns `true` if a callback was replaced.
    pub fn set_will_close_callback<F>(&self, delegate: WindowDelegateHandle, callback: F) -> Result<bool>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Ok(self.window_delegate(delegate)?.set_will_close(Arc::new(callback)))
    }

    pub fn clear_will_resize_callback(&self, delegate: WindowDelegateHandle) -> Result<bool> {
        Ok(self.window_delegate(delegate)?.clear_will_resize())
    }

    pub fn clear_did_resize_callback(&self, delegate: WindowDelegateHandle) -> Result<bool> {
        Ok(self.window_delegate(delegate)?.clear_did_resize())
    }

    pub fn clear_will_close_callback(&self, delegate: WindowDelegateHandle) -> Result<bool> {
        Ok(self.window_delegate(delegate)?.clear_will_close())
    }

    fn window_delegate(&self, delegate: WindowDelegateHandle) -> Result<Arc<WindowDelegate>> {
        self.window_delegates
            .read()
            .get(delegate)
            .cloned()
            .ok_or(BridgeError::invalid(HandleKind::WindowDelegate))
    }

    /// The delegate attached to an open window, cloned out of the registry.
    fn attached_delegate(&self, window: WindowHandle) -> Option<Arc<WindowDelegate>> {
        let handle = self.windows.read().get(window)?.delegate?;
        self.window_delegates.read().get(handle).cloned()
    }

    // =========================================================================
    // Applications
    // =========================================================================

    /// Create an empty application delegate.
    pub fn create_application_delegate(&self) -> AppDelegateHandle {
        let handle = self.app_delegates.write().insert(ApplicationDelegate::new());
        tracing::trace!(target: targets::APPLICATION, ?handle, "application delegate created");
        handle
    }

    /// Create an application object bound to `delegate`.
    pub fn create_application(&self, delegate: AppDelegateHandle) -> Result<AppHandle> {
        if !self.app_delegates.read().contains_key(delegate) {
            return Err(BridgeError::invalid(HandleKind::ApplicationDelegate));
        }
        let handle = self
            .applications
            .write()
            .insert(ApplicationRecord { delegate });
        tracing::debug!(target: targets::APPLICATION, ?handle, ?delegate, "application created");
        Ok(handle)
    }

    /// Append a window to an application delegate's collection.
    pub fn add_window_to_app_delegate(
        &self,
        delegate: AppDelegateHandle,
        window: WindowHandle,
    ) -> Result<()> {
        self.ensure_open(window)?;
        let mut delegates = self.app_delegates.write();
        let app_delegate = delegates
            .get_mut(delegate)
            .ok_or(BridgeError::invalid(HandleKind::ApplicationDelegate))?;
        app_delegate.add_window(window);
        tracing::trace!(
            target: targets::APPLICATION,
            ?delegate,
            ?window,
            count = app_delegate.len(),
            "window added to application delegate"
        );
        Ok(())
    }

    /// The windows of an application delegate, in insertion order.
    pub fn app_delegate_windows(&self, delegate: AppDelegateHandle) -> Result<Vec<WindowHandle>> {
        self.app_delegates
            .read()
            .get(delegate)
            .map(|app_delegate| app_delegate.windows().to_vec())
            .ok_or(BridgeError::invalid(HandleKind::ApplicationDelegate))
    }

    /// The delegate an application was created with.
    pub fn delegate_of_app(&self, app: AppHandle) -> Result<AppDelegateHandle> {
        self.applications
            .read()
            .get(app)
            .map(|record| record.delegate)
            .ok_or(BridgeError::invalid(HandleKind::Application))
    }

    /// Run the native event loop until it terminates. Returns the exit code.
    ///
    /// This is the only blocking operation. The loop ends when the last open
    /// window closes (unless disabled in [`BridgeConfig`]) or when
    /// [`quit_application`](Self::quit_application) is called.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::EventLoopRunning`] if called while the loop is
    /// running, for example from inside a callback.
    pub fn run_application(&self, app: AppHandle) -> Result<i32> {
        self.affinity.check("run_application");
        self.delegate_of_app(app)?;
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(BridgeError::EventLoopRunning);
        }

        tracing::info!(
            target: targets::APPLICATION,
            ?app,
            backend = self.backend.name(),
            "run loop starting"
        );
        let result = self.backend.run(self);
        self.running.store(false, Ordering::SeqCst);

        match &result {
            Ok(code) => tracing::info!(target: targets::APPLICATION, code, "run loop finished"),
            Err(err) => tracing::warn!(target: targets::APPLICATION, error = %err, "run loop failed"),
        }
        result
    }

    /// Check if the run loop is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Ask the run loop to terminate.
    pub fn quit_application(&self) {
        tracing::debug!(target: targets::APPLICATION, "quit requested");
        self.backend.request_exit();
    }

    /// Set the callback fired when the run loop is about to terminate.
    ///
    /// Returns `true` if a callback was replaced.
    pub fn set_application_closed_callback<F>(&self, callback: F) -> bool
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.app_closed.replace(Arc::new(callback))
    }

    pub fn clear_application_closed_callback(&self) -> bool {
        self.app_closed.clear()
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    /// Hide the cursor. Returns `true` if it was visible.
    pub fn hide_cursor(&self) -> bool {
        self.update_cursor("hide", CursorController::hide)
    }

    /// Show the cursor. Returns `true` if it was hidden.
    pub fn unhide_cursor(&self) -> bool {
        self.update_cursor("unhide", CursorController::unhide)
    }

    /// Hide the cursor until the mouse next moves, or cancel that.
    pub fn set_cursor_hidden_until_mouse_moves(&self, hidden: bool) {
        self.update_cursor("hidden_until_mouse_moves", |cursor| {
            cursor.set_hidden_until_mouse_moves(hidden)
        });
    }

    /// Push the active cursor and display `cursor`.
    pub fn set_cursor_type(&self, cursor: CursorType) {
        self.update_cursor("set_cursor_type", |controller| {
            controller.set_cursor_type(cursor)
        });
    }

    /// Restore the cursor displaced by the most recent
    /// [`set_cursor_type`](Self::set_cursor_type).
    ///
    /// With nothing to restore the cursor is left unchanged and this returns
    /// `false`.
    pub fn pop_cursor(&self) -> bool {
        let popped = self.update_cursor("pop", CursorController::pop);
        if !popped {
            tracing::debug!(target: targets::CURSOR, "cursor pop with empty stack ignored");
        }
        popped
    }

    /// The active cursor type.
    pub fn current_cursor(&self) -> CursorType {
        self.cursor.lock().current()
    }

    /// What is on screen: the active cursor and its effective visibility.
    pub fn cursor_appearance(&self) -> CursorAppearance {
        self.cursor.lock().appearance()
    }

    /// Whether the cursor is displayed, taking the mouse-move latch into
    /// account.
    pub fn is_cursor_visible(&self) -> bool {
        self.cursor.lock().appearance().visible
    }

    /// Number of cursors [`pop_cursor`](Self::pop_cursor) can restore.
    pub fn cursor_depth(&self) -> usize {
        self.cursor.lock().depth()
    }

    /// Restore the arrow cursor, visible, with an empty stack.
    pub fn reset_cursor(&self) {
        self.update_cursor("reset", CursorController::reset);
    }

    /// Apply `change` to the cursor state and push the result to the backend
    /// if what is displayed changed.
    fn update_cursor<R>(&self, operation: &str, change: impl FnOnce(&mut CursorController) -> R) -> R {
        self.affinity.check(operation);
        let (result, before, after) = {
            let mut cursor = self.cursor.lock();
            let before = cursor.appearance();
            let result = change(&mut cursor);
            (result, before, cursor.appearance())
        };

        if before != after {
            tracing::trace!(
                target: targets::CURSOR,
                operation,
                cursor = ?after.cursor,
                visible = after.visible,
                "cursor changed"
            );
            self.backend.apply_cursor(after);
        }
        result
    }
}

impl EventSink for Bridge {
    fn window_will_resize(&self, window: WindowHandle, current: SizeF, proposed: SizeF) {
        {
            let mut windows = self.windows.write();
            let Some(record) = windows.get_mut(window).filter(|r| r.state.is_open()) else {
                return;
            };
            record.state = WindowState::Resizing;
        }

        tracing::trace!(target: targets::WINDOW, ?window, ?current, ?proposed, "window will resize");
        if let Some(delegate) = self.attached_delegate(window) {
            delegate.notify_will_resize(current, proposed);
        }
    }

    fn window_did_resize(&self, window: WindowHandle, size: SizeF) {
        {
            let mut windows = self.windows.write();
            let Some(record) = windows.get_mut(window).filter(|r| r.state.is_open()) else {
                return;
            };
            record.state = record.resting_state();
        }

        tracing::trace!(target: targets::WINDOW, ?window, ?size, "window did resize");
        if let Some(delegate) = self.attached_delegate(window) {
            delegate.notify_did_resize(size);
        }
    }

    fn window_will_close(&self, window: WindowHandle) {
        if let Ok(view) = self.backend.view_handle(window) {
            self.surface_views.lock().remove(&view);
        }

        tracing::debug!(target: targets::WINDOW, ?window, "window will close");
        if let Some(delegate) = self.attached_delegate(window) {
            delegate.notify_will_close();
        }
    }

    fn window_closed(&self, window: WindowHandle) -> bool {
        let open = {
            let mut windows = self.windows.write();
            if let Some(record) = windows.get_mut(window) {
                record.state = WindowState::Closed;
            }
            windows.values().filter(|r| r.state.is_open()).count()
        };

        let terminate = open == 0 && self.config.terminate_after_last_window_closed();
        tracing::debug!(target: targets::WINDOW, ?window, open, terminate, "window closed");
        terminate
    }

    fn mouse_moved(&self) {
        self.update_cursor("mouse_moved", CursorController::notify_mouse_moved);
    }

    fn application_will_terminate(&self) {
        tracing::debug!(target: targets::APPLICATION, "application will terminate");
        if let Some(callback) = self.app_closed.get() {
            callback();
        }
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("backend", &self.backend.name())
            .field("config", &self.config)
            .field("windows", &self.windows.read().len())
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NativeEvent;
    use crate::headless::HeadlessBackend;

    fn bridge() -> (Arc<HeadlessBackend>, Bridge) {
        let backend = Arc::new(HeadlessBackend::new());
        let bridge = Bridge::new(backend.clone(), BridgeConfig::default());
        (backend, bridge)
    }

    #[test]
    fn test_window_lifecycle_states() {
        let (_, bridge) = bridge();
        let window = bridge.create_window(&WindowConfig::new("a")).unwrap();
        assert_eq!(bridge.window_state(window), Ok(WindowState::Created));

        bridge.show_window(window).unwrap();
        assert_eq!(bridge.window_state(window), Ok(WindowState::Shown));

        bridge.window_will_resize(window, SizeF::new(800.0, 600.0), SizeF::new(10.0, 10.0));
        assert_eq!(bridge.window_state(window), Ok(WindowState::Resizing));
        bridge.window_did_resize(window, SizeF::new(10.0, 10.0));
        assert_eq!(bridge.window_state(window), Ok(WindowState::Shown));
    }

    #[test]
    fn test_resize_of_hidden_window_returns_to_created() {
        let (_, bridge) = bridge();
        let window = bridge.create_window(&WindowConfig::new("a")).unwrap();
        bridge.window_will_resize(window, SizeF::ZERO, SizeF::new(1.0, 1.0));
        bridge.window_did_resize(window, SizeF::new(1.0, 1.0));
        assert_eq!(bridge.window_state(window), Ok(WindowState::Created));
    }

    #[test]
    fn test_failed_creation_leaves_no_record() {
        let (backend, bridge) = bridge();
        backend.fail_next_allocations(1);
        assert!(matches!(
            bridge.create_window(&WindowConfig::default()),
            Err(BridgeError::AllocationFailed(_))
        ));
        assert_eq!(bridge.open_window_count(), 0);
    }

    #[test]
    fn test_window_cannot_own_itself() {
        let (_, bridge) = bridge();
        let window = bridge.create_window(&WindowConfig::default()).unwrap();
        assert!(matches!(
            bridge.show_window_with_owner(window, window),
            Err(BridgeError::Unsupported(_))
        ));
    }

    #[test]
    fn test_owner_recorded() {
        let (backend, bridge) = bridge();
        let parent = bridge.create_window(&WindowConfig::new("parent")).unwrap();
        let child = bridge.create_window(&WindowConfig::new("child")).unwrap();

        bridge.show_window(parent).unwrap();
        bridge.show_window_with_owner(child, parent).unwrap();

        assert_eq!(bridge.window_owner(child), Ok(Some(parent)));
        assert_eq!(backend.window(child).unwrap().owner, Some(parent));
    }

    #[test]
    fn test_unknown_delegate_rejected() {
        let (_, bridge) = bridge();
        let window = bridge.create_window(&WindowConfig::default()).unwrap();
        let delegate = bridge.create_window_delegate();
        bridge.window_delegates.write().remove(delegate);

        assert_eq!(
            bridge.set_window_delegate(window, delegate),
            Err(BridgeError::invalid(HandleKind::WindowDelegate))
        );
    }

    #[test]
    fn test_cursor_changes_reach_backend() {
        let (backend, bridge) = bridge();
        bridge.set_cursor_type(CursorType::Crosshair);
        assert_eq!(
            backend.applied_cursor(),
            Some(CursorAppearance {
                cursor: CursorType::Crosshair,
                visible: true
            })
        );

        // Unchanged appearance is not re-applied.
        let updates = backend.cursor_updates();
        bridge.unhide_cursor();
        assert_eq!(backend.cursor_updates(), updates);
    }

    #[test]
    fn test_run_while_running_rejected() {
        let (backend, bridge) = bridge();
        let bridge = Arc::new(bridge);
        let delegate = bridge.create_application_delegate();
        let app = bridge.create_application(delegate).unwrap();
        let window = bridge.create_window(&WindowConfig::default()).unwrap();
        let window_delegate = bridge.create_window_delegate();
        bridge.set_window_delegate(window, window_delegate).unwrap();

        let nested = Arc::new(Mutex::new(None));
        let weak = Arc::downgrade(&bridge);
        let seen = nested.clone();
        bridge
            .set_did_resize_callback(window_delegate, move |_| {
                if let Some(bridge) = weak.upgrade() {
                    *seen.lock() = Some(bridge.run_application(app));
                }
            })
            .unwrap();

        backend.post_event(NativeEvent::Resized {
            window,
            size: SizeF::new(1.0, 1.0),
        });
        assert_eq!(bridge.run_application(app), Ok(0));
        assert_eq!(*nested.lock(), Some(Err(BridgeError::EventLoopRunning)));
        assert!(!bridge.is_running());
    }
}
