//! In-memory windowing toolkit.
//!
//! [`HeadlessBackend`] behaves like a native toolkit without touching the
//! display: windows are records, views are synthetic addresses, and native
//! events are queued with [`HeadlessBackend::post_event`] and dispatched by
//! [`NativeBackend::run`]. The loop returns once the queue is drained or an
//! exit was requested, which makes whole application lifecycles scriptable:
//!
//! ```
//! use std::sync::Arc;
//! use horizon_bridge_core::{Bridge, BridgeConfig, HeadlessBackend, NativeEvent, SizeF, WindowConfig};
//!
//! let backend = Arc::new(HeadlessBackend::new());
//! let bridge = Bridge::new(backend.clone(), BridgeConfig::default());
//!
//! let window = bridge.create_window(&WindowConfig::new("Test")).unwrap();
//! let delegate = bridge.create_application_delegate();
//! let app = bridge.create_application(delegate).unwrap();
//!
//! backend.post_event(NativeEvent::Resized { window, size: SizeF::new(1024.0, 768.0) });
//! assert_eq!(bridge.run_application(app), Ok(0));
//! assert_eq!(bridge.view_size(window), Ok(SizeF::new(1024.0, 768.0)));
//! ```

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

use crate::backend::{EventSink, NativeBackend, NativeEvent};
use crate::cursor::CursorAppearance;
use crate::error::{BridgeError, Result};
use crate::geometry::{Rectangle, SizeF};
use crate::handle::{HandleKind, ViewHandle, WindowHandle};
use crate::logging::targets;
use crate::style::WindowStyle;
use crate::window::WindowConfig;

/// Synthetic views are spaced this far apart, like real object addresses.
const VIEW_ADDRESS_BASE: usize = 0x1000;
const VIEW_ADDRESS_STRIDE: usize = 0x100;

/// A window as the headless toolkit sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindow {
    pub title: String,
    pub rect: Rectangle,
    pub style: WindowStyle,
    /// Current content size.
    pub size: SizeF,
    pub visible: bool,
    /// Whether this is the key (focused) window.
    pub key: bool,
    pub owner: Option<WindowHandle>,
    pub view: ViewHandle,
    /// Whether the view has been prepared for a GPU surface.
    pub surface_compatible: bool,
}

#[derive(Debug, Default)]
struct HeadlessState {
    windows: HashMap<WindowHandle, HeadlessWindow>,
    queue: VecDeque<NativeEvent>,
    next_view: usize,
    cursor: Option<CursorAppearance>,
    cursor_updates: usize,
    fail_allocations: usize,
    exit_requested: bool,
    runs: usize,
}

/// A deterministic, display-free [`NativeBackend`].
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    state: Mutex<HeadlessState>,
}

impl HeadlessBackend {
    /// Create an empty toolkit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a native event for the next [`run`](NativeBackend::run).
    ///
    /// Events posted from a callback during `run` are dispatched by the same
    /// run.
    pub fn post_event(&self, event: NativeEvent) {
        self.state.lock().queue.push_back(event);
    }

    /// Number of queued, undispatched events.
    pub fn pending_events(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Make the next `count` window creations fail as if the toolkit ran out
    /// of memory.
    pub fn fail_next_allocations(&self, count: usize) {
        self.state.lock().fail_allocations = count;
    }

    /// Snapshot of a live native window.
    pub fn window(&self, handle: WindowHandle) -> Option<HeadlessWindow> {
        self.state.lock().windows.get(&handle).cloned()
    }

    /// Number of live native windows.
    pub fn window_count(&self) -> usize {
        self.state.lock().windows.len()
    }

    /// The cursor state most recently applied.
    pub fn applied_cursor(&self) -> Option<CursorAppearance> {
        self.state.lock().cursor
    }

    /// How many times the cursor state has been applied.
    pub fn cursor_updates(&self) -> usize {
        self.state.lock().cursor_updates
    }

    /// How many times the run loop has been entered.
    pub fn runs(&self) -> usize {
        self.state.lock().runs
    }

    fn next_event(&self) -> Option<NativeEvent> {
        let mut state = self.state.lock();
        if state.exit_requested {
            return None;
        }
        state.queue.pop_front()
    }

    fn dispatch(&self, event: NativeEvent, sink: &dyn EventSink) {
        match event {
            NativeEvent::Resized { window, size } => {
                let Some(current) = self.state.lock().windows.get(&window).map(|w| w.size) else {
                    tracing::trace!(target: targets::BACKEND, ?window, "resize for unknown window dropped");
                    return;
                };
                sink.window_will_resize(window, current, size);
                if let Some(native) = self.state.lock().windows.get_mut(&window) {
                    native.size = size;
                }
                sink.window_did_resize(window, size);
            }
            NativeEvent::CloseRequested { window } => {
                if !self.state.lock().windows.contains_key(&window) {
                    return;
                }
                sink.window_will_close(window);
                self.state.lock().windows.remove(&window);
                if sink.window_closed(window) {
                    self.request_exit();
                }
            }
            NativeEvent::MouseMoved => sink.mouse_moved(),
            NativeEvent::QuitRequested => self.request_exit(),
        }
    }

    fn with_window<R>(
        &self,
        handle: WindowHandle,
        f: impl FnOnce(&mut HeadlessWindow) -> R,
    ) -> Result<R> {
        self.state
            .lock()
            .windows
            .get_mut(&handle)
            .map(f)
            .ok_or(BridgeError::invalid(HandleKind::Window))
    }
}

impl NativeBackend for HeadlessBackend {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn create_window(&self, handle: WindowHandle, config: &WindowConfig) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_allocations > 0 {
            state.fail_allocations -= 1;
            return Err(BridgeError::AllocationFailed(
                "headless allocation failure".to_string(),
            ));
        }

        let view = VIEW_ADDRESS_BASE + state.next_view * VIEW_ADDRESS_STRIDE;
        state.next_view += 1;

        let rect = config.rect();
        state.windows.insert(
            handle,
            HeadlessWindow {
                title: config.title().to_string(),
                rect,
                style: config.style(),
                size: rect.size(),
                visible: false,
                key: false,
                owner: None,
                view: ViewHandle::from_addr(view)
                    .ok_or_else(|| BridgeError::AllocationFailed("view address".to_string()))?,
                surface_compatible: false,
            },
        );
        Ok(())
    }

    fn view_handle(&self, window: WindowHandle) -> Result<ViewHandle> {
        self.with_window(window, |w| w.view)
    }

    fn view_size(&self, window: WindowHandle) -> Result<SizeF> {
        self.with_window(window, |w| w.size)
    }

    fn show_window(&self, window: WindowHandle, owner: Option<WindowHandle>) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(owner) = owner {
            if !state.windows.contains_key(&owner) {
                return Err(BridgeError::invalid(HandleKind::Window));
            }
        }
        if !state.windows.contains_key(&window) {
            return Err(BridgeError::invalid(HandleKind::Window));
        }

        for (handle, native) in state.windows.iter_mut() {
            native.key = *handle == window;
        }
        if let Some(native) = state.windows.get_mut(&window) {
            native.visible = true;
            if owner.is_some() {
                native.owner = owner;
            }
        }
        Ok(())
    }

    fn make_view_surface_compatible(&self, view: ViewHandle) -> Result<()> {
        let mut state = self.state.lock();
        let native = state
            .windows
            .values_mut()
            .find(|w| w.view == view)
            .ok_or(BridgeError::ViewNotFound(view.addr()))?;
        native.surface_compatible = true;
        Ok(())
    }

    fn apply_cursor(&self, appearance: CursorAppearance) {
        let mut state = self.state.lock();
        state.cursor = Some(appearance);
        state.cursor_updates += 1;
    }

    fn run(&self, sink: &dyn EventSink) -> Result<i32> {
        {
            let mut state = self.state.lock();
            state.exit_requested = false;
            state.runs += 1;
        }

        while let Some(event) = self.next_event() {
            self.dispatch(event, sink);
        }

        sink.application_will_terminate();
        Ok(0)
    }

    fn request_exit(&self) {
        self.state.lock().exit_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn handles(count: usize) -> Vec<WindowHandle> {
        let mut keys: SlotMap<WindowHandle, ()> = SlotMap::with_key();
        (0..count).map(|_| keys.insert(())).collect()
    }

    #[derive(Default)]
    struct RecordingSink {
        log: Mutex<Vec<String>>,
    }

    impl EventSink for RecordingSink {
        fn window_will_resize(&self, _: WindowHandle, current: SizeF, proposed: SizeF) {
            self.log
                .lock()
                .push(format!("will {}->{}", current.width, proposed.width));
        }

        fn window_did_resize(&self, _: WindowHandle, size: SizeF) {
            self.log.lock().push(format!("did {}", size.width));
        }

        fn window_will_close(&self, _: WindowHandle) {
            self.log.lock().push("will-close".into());
        }

        fn window_closed(&self, _: WindowHandle) -> bool {
            self.log.lock().push("closed".into());
            true
        }

        fn mouse_moved(&self) {
            self.log.lock().push("moved".into());
        }

        fn application_will_terminate(&self) {
            self.log.lock().push("terminate".into());
        }
    }

    #[test]
    fn test_create_window_uses_rect_size() {
        let backend = HeadlessBackend::new();
        let a = handles(1)[0];
        let config = WindowConfig::new("a").with_size(640, 480);
        backend.create_window(a, &config).unwrap();

        let native = backend.window(a).unwrap();
        assert_eq!(native.size, SizeF::new(640.0, 480.0));
        assert!(!native.visible);
        assert_eq!(native.title, "a");
    }

    #[test]
    fn test_views_are_distinct() {
        let backend = HeadlessBackend::new();
        let hs = handles(2);
        for h in &hs {
            backend.create_window(*h, &WindowConfig::default()).unwrap();
        }
        assert_ne!(
            backend.view_handle(hs[0]).unwrap(),
            backend.view_handle(hs[1]).unwrap()
        );
    }

    #[test]
    fn test_allocation_failure() {
        let backend = HeadlessBackend::new();
        let hs = handles(2);
        backend.fail_next_allocations(1);
        assert!(matches!(
            backend.create_window(hs[0], &WindowConfig::default()),
            Err(BridgeError::AllocationFailed(_))
        ));
        assert!(backend.create_window(hs[1], &WindowConfig::default()).is_ok());
    }

    #[test]
    fn test_show_moves_key_window() {
        let backend = HeadlessBackend::new();
        let hs = handles(2);
        for h in &hs {
            backend.create_window(*h, &WindowConfig::default()).unwrap();
        }

        backend.show_window(hs[0], None).unwrap();
        backend.show_window(hs[1], Some(hs[0])).unwrap();

        assert!(!backend.window(hs[0]).unwrap().key);
        let child = backend.window(hs[1]).unwrap();
        assert!(child.key && child.visible);
        assert_eq!(child.owner, Some(hs[0]));
    }

    #[test]
    fn test_run_dispatches_in_order() {
        let backend = HeadlessBackend::new();
        let a = handles(1)[0];
        backend
            .create_window(a, &WindowConfig::new("a").with_size(100, 100))
            .unwrap();

        backend.post_event(NativeEvent::Resized {
            window: a,
            size: SizeF::new(200.0, 100.0),
        });
        backend.post_event(NativeEvent::MouseMoved);
        backend.post_event(NativeEvent::CloseRequested { window: a });
        backend.post_event(NativeEvent::MouseMoved);

        let sink = RecordingSink::default();
        assert_eq!(backend.run(&sink), Ok(0));

        // The close terminated the loop before the second move.
        assert_eq!(
            *sink.log.lock(),
            vec!["will 100->200", "did 200", "moved", "will-close", "closed", "terminate"]
        );
        assert_eq!(backend.pending_events(), 1);
        assert_eq!(backend.window_count(), 0);
    }

    #[test]
    fn test_quit_request() {
        let backend = HeadlessBackend::new();
        backend.post_event(NativeEvent::QuitRequested);
        backend.post_event(NativeEvent::MouseMoved);

        let sink = RecordingSink::default();
        backend.run(&sink).unwrap();
        assert_eq!(*sink.log.lock(), vec!["terminate"]);
        assert_eq!(backend.runs(), 1);
    }

    #[test]
    fn test_surface_compatible_unknown_view() {
        let backend = HeadlessBackend::new();
        let view = ViewHandle::from_addr(0xdead).unwrap();
        assert_eq!(
            backend.make_view_surface_compatible(view),
            Err(BridgeError::ViewNotFound(0xdead))
        );
    }
}
