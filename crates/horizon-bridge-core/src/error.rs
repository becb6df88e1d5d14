//! Error types for Horizon Bridge.

use thiserror::Error;

use crate::handle::HandleKind;

/// The main error type for Horizon Bridge operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The handle does not refer to a live object of the expected kind.
    #[error("invalid {kind} handle")]
    InvalidHandle {
        /// The kind of object the handle was expected to reference.
        kind: HandleKind,
    },

    /// The window has been closed and no longer accepts operations.
    #[error("window has been closed")]
    WindowClosed,

    /// The native toolkit failed to allocate an object.
    #[error("native allocation failed: {0}")]
    AllocationFailed(String),

    /// The run loop is already running.
    #[error("the run loop is already running")]
    EventLoopRunning,

    /// The run loop has already exited and cannot be restarted.
    #[error("the run loop has already exited")]
    EventLoopExited,

    /// The cursor ordinal is outside the known cursor types.
    #[error("invalid cursor type ordinal: {0}")]
    InvalidCursorType(u32),

    /// No open window owns the given view handle.
    #[error("no open window owns view {0:#x}")]
    ViewNotFound(usize),

    /// The operation is not supported by the active backend or platform.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// A platform call failed.
    #[error("platform error: {0}")]
    Platform(String),
}

impl BridgeError {
    /// Shorthand for an [`BridgeError::InvalidHandle`] of the given kind.
    pub fn invalid(kind: HandleKind) -> Self {
        Self::InvalidHandle { kind }
    }

    /// Check whether this error reports a stale or unknown handle.
    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, Self::InvalidHandle { .. } | Self::WindowClosed)
    }
}

/// A specialized Result type for Horizon Bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BridgeError::invalid(HandleKind::Window);
        assert_eq!(err.to_string(), "invalid window handle");

        let err = BridgeError::InvalidCursorType(42);
        assert!(err.to_string().contains("42"));

        let err = BridgeError::ViewNotFound(0x1000);
        assert!(err.to_string().contains("0x1000"));
    }

    #[test]
    fn test_is_invalid_handle() {
        assert!(BridgeError::invalid(HandleKind::Application).is_invalid_handle());
        assert!(BridgeError::WindowClosed.is_invalid_handle());
        assert!(!BridgeError::EventLoopRunning.is_invalid_handle());
    }
}
