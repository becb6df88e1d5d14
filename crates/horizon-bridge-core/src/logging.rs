//! Logging targets.
//!
//! The bridge logs through `tracing` and never installs a subscriber itself.
//! Hosts that want output install one, or call `InitializeLogging` from the
//! C surface. Filter by subsystem with these targets:
//!
//! ```text
//! HORIZON_BRIDGE_LOG=horizon_bridge::cursor=trace,horizon_bridge=warn
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Window creation, display and lifecycle.
    pub const WINDOW: &str = "horizon_bridge::window";
    /// Cursor state changes.
    pub const CURSOR: &str = "horizon_bridge::cursor";
    /// Application delegates and the run loop.
    pub const APPLICATION: &str = "horizon_bridge::application";
    /// The C surface.
    pub const FFI: &str = "horizon_bridge::ffi";
    /// Native toolkit backends.
    pub const BACKEND: &str = "horizon_bridge::backend";
    /// Thread affinity reports.
    pub const THREAD: &str = "horizon_bridge::thread";
}
