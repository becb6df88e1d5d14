//! [`NativeBackend`] over winit.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use horizon_bridge_core::logging::targets;
use horizon_bridge_core::{
    BridgeError, CursorAppearance, EventSink, HandleKind, NativeBackend, Result, SizeF,
    ViewHandle, WindowConfig, WindowHandle,
};
use parking_lot::{Mutex, RwLock};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowAttributes, WindowId};

use super::active::{ActiveScope, with_active};
use super::attributes::window_attributes;

/// Events the backend sends itself through the loop proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BridgeEvent {
    Quit,
}

// `EventLoop` is neither `Send` nor `Sync`; it stays on the thread that built
// it until `run` consumes it.
thread_local! {
    static EVENT_LOOP: RefCell<Option<EventLoop<BridgeEvent>>> = const { RefCell::new(None) };
}

struct NativeWindow {
    window: Arc<Window>,
    /// Last committed content size, in logical units.
    size: SizeF,
}

/// A [`NativeBackend`] driving real windows through winit.
///
/// The event loop is created by [`WinitBackend::new`] on the calling thread,
/// which must be the main thread on macOS. Windows can be created before the
/// loop runs and from inside callbacks while it runs. The loop runs once:
/// after it exits, window creation and further runs fail with
/// [`BridgeError::EventLoopExited`].
pub struct WinitBackend {
    windows: RwLock<HashMap<WindowHandle, NativeWindow>>,
    ids: RwLock<HashMap<WindowId, WindowHandle>>,
    proxy: Mutex<Option<EventLoopProxy<BridgeEvent>>>,
    cursor: Mutex<CursorAppearance>,
}

impl WinitBackend {
    /// Create the backend and its event loop.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Platform`] if the event loop could not be
    /// created, for example because one already exists in this process.
    pub fn new() -> Result<Self> {
        let event_loop: EventLoop<BridgeEvent> = EventLoop::with_user_event()
            .build()
            .map_err(|e| BridgeError::Platform(e.to_string()))?;
        let proxy = event_loop.create_proxy();

        EVENT_LOOP.with(|cell| {
            *cell.borrow_mut() = Some(event_loop);
        });
        tracing::debug!(target: targets::BACKEND, "winit event loop created");

        Ok(Self {
            windows: RwLock::new(HashMap::new()),
            ids: RwLock::new(HashMap::new()),
            proxy: Mutex::new(Some(proxy)),
            cursor: Mutex::new(CursorAppearance::default()),
        })
    }

    /// The winit window behind a handle, for hosts that build GPU surfaces
    /// from it directly.
    pub fn window(&self, handle: WindowHandle) -> Result<Arc<Window>> {
        self.windows
            .read()
            .get(&handle)
            .map(|native| native.window.clone())
            .ok_or(BridgeError::invalid(HandleKind::Window))
    }

    fn handle_for(&self, id: WindowId) -> Option<WindowHandle> {
        self.ids.read().get(&id).copied()
    }

    fn committed_size(&self, handle: WindowHandle) -> Option<(Arc<Window>, SizeF)> {
        self.windows
            .read()
            .get(&handle)
            .map(|native| (native.window.clone(), native.size))
    }

    fn commit_size(&self, handle: WindowHandle, size: SizeF) {
        if let Some(native) = self.windows.write().get_mut(&handle) {
            native.size = size;
        }
    }

    fn window_for_view(&self, view: ViewHandle) -> Result<Arc<Window>> {
        self.windows
            .read()
            .values()
            .find(|native| view_of(&native.window).ok() == Some(view))
            .map(|native| native.window.clone())
            .ok_or(BridgeError::ViewNotFound(view.addr()))
    }

    /// Drop the native window, which closes it.
    fn destroy(&self, handle: WindowHandle) {
        let removed = self.windows.write().remove(&handle);
        if let Some(native) = removed {
            self.ids.write().remove(&native.window.id());
            tracing::trace!(target: targets::BACKEND, ?handle, "native window destroyed");
        }
    }
}

impl NativeBackend for WinitBackend {
    fn name(&self) -> &'static str {
        "winit"
    }

    fn create_window(&self, handle: WindowHandle, config: &WindowConfig) -> Result<()> {
        let window = Arc::new(create_native_window(window_attributes(config))?);

        let cursor = *self.cursor.lock();
        window.set_cursor(cursor.cursor.icon());
        window.set_cursor_visible(cursor.visible);

        self.ids.write().insert(window.id(), handle);
        self.windows.write().insert(
            handle,
            NativeWindow {
                window,
                size: config.rect().size(),
            },
        );
        Ok(())
    }

    fn view_handle(&self, window: WindowHandle) -> Result<ViewHandle> {
        view_of(&*self.window(window)?)
    }

    fn view_size(&self, window: WindowHandle) -> Result<SizeF> {
        self.windows
            .read()
            .get(&window)
            .map(|native| native.size)
            .ok_or(BridgeError::invalid(HandleKind::Window))
    }

    fn show_window(&self, window: WindowHandle, owner: Option<WindowHandle>) -> Result<()> {
        let native = self.window(window)?;
        let parent = owner.map(|owner| self.window(owner)).transpose()?;

        native.set_visible(true);
        native.focus_window();
        if let Some(parent) = parent {
            attach_child(&parent, &native)?;
        }
        Ok(())
    }

    fn make_view_surface_compatible(&self, view: ViewHandle) -> Result<()> {
        let window = self.window_for_view(view)?;

        #[cfg(target_os = "macos")]
        super::macos::attach_metal_layer(&window)?;

        #[cfg(not(target_os = "macos"))]
        {
            // Surfaces are created from the window handle directly here.
            let _ = window;
            tracing::trace!(target: targets::BACKEND, ?view, "no layer setup on this platform");
        }
        Ok(())
    }

    fn apply_cursor(&self, appearance: CursorAppearance) {
        *self.cursor.lock() = appearance;

        let windows: Vec<Arc<Window>> = self
            .windows
            .read()
            .values()
            .map(|native| native.window.clone())
            .collect();
        for window in windows {
            window.set_cursor(appearance.cursor.icon());
            window.set_cursor_visible(appearance.visible);
        }
    }

    fn run(&self, sink: &dyn EventSink) -> Result<i32> {
        let Some(event_loop) = EVENT_LOOP.with(|cell| cell.borrow_mut().take()) else {
            return Err(BridgeError::EventLoopExited);
        };

        let mut handler = BridgeHandler {
            backend: self,
            sink,
        };
        let result = event_loop.run_app(&mut handler);
        *self.proxy.lock() = None;

        result.map_err(|e| BridgeError::Platform(e.to_string()))?;
        Ok(0)
    }

    fn request_exit(&self) {
        if with_active(|event_loop| event_loop.exit()).is_some() {
            return;
        }
        if let Some(proxy) = self.proxy.lock().as_ref() {
            if proxy.send_event(BridgeEvent::Quit).is_err() {
                tracing::trace!(target: targets::BACKEND, "quit sent after the loop closed");
            }
        }
    }
}

impl fmt::Debug for WinitBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WinitBackend")
            .field("windows", &self.windows.read().len())
            .field("cursor", &*self.cursor.lock())
            .finish_non_exhaustive()
    }
}

/// Create a window from inside the running loop, or before it runs.
fn create_native_window(attributes: WindowAttributes) -> Result<Window> {
    let created = match with_active(|event_loop| event_loop.create_window(attributes.clone())) {
        Some(created) => created,
        None => EVENT_LOOP.with(|cell| match cell.borrow().as_ref() {
            Some(event_loop) => Ok(create_before_run(event_loop, attributes)),
            None => Err(BridgeError::EventLoopExited),
        })?,
    };
    created.map_err(|e| BridgeError::AllocationFailed(e.to_string()))
}

#[allow(deprecated)]
fn create_before_run(
    event_loop: &EventLoop<BridgeEvent>,
    attributes: WindowAttributes,
) -> std::result::Result<Window, OsError> {
    event_loop.create_window(attributes)
}

/// The native content view address of a window.
fn view_of(window: &Window) -> Result<ViewHandle> {
    let handle = window
        .window_handle()
        .map_err(|e| BridgeError::Platform(e.to_string()))?;

    let addr = match handle.as_raw() {
        RawWindowHandle::AppKit(handle) => handle.ns_view.as_ptr().expose_provenance(),
        RawWindowHandle::UiKit(handle) => handle.ui_view.as_ptr().expose_provenance(),
        RawWindowHandle::Win32(handle) => handle.hwnd.get() as usize,
        RawWindowHandle::Xlib(handle) => handle.window as usize,
        RawWindowHandle::Xcb(handle) => handle.window.get() as usize,
        RawWindowHandle::Wayland(handle) => handle.surface.as_ptr().expose_provenance(),
        other => {
            return Err(BridgeError::Unsupported(format!(
                "window handle {other:?} has no view"
            )));
        }
    };
    ViewHandle::from_addr(addr).ok_or(BridgeError::invalid(HandleKind::View))
}

#[cfg(target_os = "macos")]
fn attach_child(parent: &Window, child: &Window) -> Result<()> {
    super::macos::add_child_window(parent, child)
}

#[cfg(not(target_os = "macos"))]
fn attach_child(parent: &Window, child: &Window) -> Result<()> {
    // The owner is recorded by the bridge; there is no portable native
    // equivalent of an AppKit child window.
    tracing::trace!(
        target: targets::BACKEND,
        parent = ?parent.id(),
        child = ?child.id(),
        "child window relation recorded only"
    );
    Ok(())
}

/// Routes winit callbacks to the bridge's event sink.
struct BridgeHandler<'a> {
    backend: &'a WinitBackend,
    sink: &'a dyn EventSink,
}

impl BridgeHandler<'_> {
    fn resized(&self, handle: WindowHandle, physical: PhysicalSize<u32>) {
        let Some((window, current)) = self.backend.committed_size(handle) else {
            return;
        };
        let logical = physical.to_logical::<f32>(window.scale_factor());
        let proposed = SizeF::new(logical.width, logical.height);

        // winit also reports the initial size and no-op resizes.
        if proposed.approx_eq(&current) {
            return;
        }

        self.sink.window_will_resize(handle, current, proposed);
        self.backend.commit_size(handle, proposed);
        self.sink.window_did_resize(handle, proposed);
    }

    fn close(&self, event_loop: &ActiveEventLoop, handle: WindowHandle) {
        self.sink.window_will_close(handle);
        self.backend.destroy(handle);
        if self.sink.window_closed(handle) {
            tracing::debug!(target: targets::BACKEND, "last window closed, exiting");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler<BridgeEvent> for BridgeHandler<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let _scope = ActiveScope::enter(event_loop);
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let _scope = ActiveScope::enter(event_loop);
        let Some(handle) = self.backend.handle_for(window_id) else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => self.resized(handle, size),
            WindowEvent::CloseRequested => self.close(event_loop, handle),
            WindowEvent::CursorMoved { .. } => self.sink.mouse_moved(),
            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: BridgeEvent) {
        tracing::trace!(target: targets::BACKEND, ?event, "received user event");
        match event {
            BridgeEvent::Quit => event_loop.exit(),
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        let _scope = ActiveScope::enter(event_loop);
        self.sink.application_will_terminate();
    }
}
