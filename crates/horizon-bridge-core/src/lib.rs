//! Core state for Horizon Bridge.
//!
//! This crate holds everything about the bridge that does not depend on a
//! particular windowing toolkit:
//!
//! - **Windows**: [`WindowConfig`], [`WindowState`] and the window registry
//!   inside [`Bridge`]
//! - **Delegates**: per-window callback slots ([`WindowDelegate`]) and the
//!   application's ordered window collection ([`ApplicationDelegate`])
//! - **Cursor**: [`CursorType`] and the push/pop [`CursorController`]
//! - **Backends**: the [`NativeBackend`] seam and an in-memory
//!   [`HeadlessBackend`]
//!
//! The `horizon-bridge` crate supplies the winit backend and the C surface.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_bridge_core::{
//!     Bridge, BridgeConfig, HeadlessBackend, NativeEvent, SizeF, WindowConfig,
//! };
//!
//! let backend = Arc::new(HeadlessBackend::new());
//! let bridge = Bridge::new(backend.clone(), BridgeConfig::default());
//!
//! let window = bridge.create_window(&WindowConfig::new("Test")).unwrap();
//! let delegate = bridge.create_window_delegate();
//! bridge.set_window_delegate(window, delegate).unwrap();
//! bridge
//!     .set_did_resize_callback(delegate, |size| println!("resized to {size:?}"))
//!     .unwrap();
//! bridge.show_window(window).unwrap();
//!
//! let app = bridge.create_application(bridge.create_application_delegate()).unwrap();
//! backend.post_event(NativeEvent::Resized { window, size: SizeF::new(1024.0, 768.0) });
//! backend.post_event(NativeEvent::CloseRequested { window });
//! assert_eq!(bridge.run_application(app), Ok(0));
//! ```

pub mod backend;
pub mod bridge;
pub mod callback;
pub mod config;
pub mod cursor;
pub mod delegate;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod headless;
pub mod logging;
pub mod style;
pub mod thread_check;
pub mod window;

pub use backend::{EventSink, NativeBackend, NativeEvent};
pub use bridge::Bridge;
pub use config::BridgeConfig;
pub use cursor::{CursorAppearance, CursorController, CursorType};
pub use delegate::{ApplicationDelegate, WindowDelegate};
pub use error::{BridgeError, Result};
pub use geometry::{Rectangle, SizeF};
pub use handle::{
    AppDelegateHandle, AppHandle, CursorHandle, HandleKind, RawHandle, ViewHandle,
    WindowDelegateHandle, WindowHandle,
};
pub use headless::{HeadlessBackend, HeadlessWindow};
pub use style::WindowStyle;
pub use window::{WindowConfig, WindowState};

// Re-export for backends that map cursor types to native cursors.
pub use cursor_icon::CursorIcon;
