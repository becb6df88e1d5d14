//! The winit backend.
//!
//! [`WinitBackend`] implements [`NativeBackend`](horizon_bridge_core::NativeBackend)
//! on top of `winit`. Platform specifics live in submodules:
//!
//! - `attributes`: mapping a [`WindowConfig`](horizon_bridge_core::WindowConfig)
//!   to winit window attributes
//! - `active`: access to the running event loop from inside callbacks
//! - `macos`: AppKit calls winit does not cover (Metal layers, child windows)

mod active;
mod attributes;
#[cfg(target_os = "macos")]
mod macos;
mod winit_backend;

pub use winit_backend::WinitBackend;
