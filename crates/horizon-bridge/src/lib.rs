//! Horizon Bridge: native windows and cursors for foreign hosts.
//!
//! This crate puts the [`horizon_bridge_core::Bridge`] on top of a real
//! windowing toolkit and exports it as a C library:
//!
//! - [`WinitBackend`] drives native windows through `winit`, reaching into
//!   AppKit for Metal-backed views and child windows on macOS.
//! - The [`ffi`] module exports the C surface (`CreateWindow`,
//!   `RunApplication`, `SetCursorType`, ...) over one process-wide bridge.
//!
//! Rust hosts can skip the C surface and use the bridge directly:
//!
//! ```no_run
//! use std::sync::Arc;
//! use horizon_bridge::{Bridge, BridgeConfig, WindowConfig, WinitBackend};
//!
//! let backend = WinitBackend::new().expect("event loop");
//! let bridge = Bridge::new(Arc::new(backend), BridgeConfig::default());
//!
//! let window = bridge.create_window(&WindowConfig::new("Main")).unwrap();
//! bridge.show_window(window).unwrap();
//!
//! let app = bridge.create_application(bridge.create_application_delegate()).unwrap();
//! let code = bridge.run_application(app).unwrap();
//! std::process::exit(code);
//! ```

pub mod ffi;
pub mod logging;
pub mod native;

pub use horizon_bridge_core::*;
pub use logging::init_logging;
pub use native::WinitBackend;
