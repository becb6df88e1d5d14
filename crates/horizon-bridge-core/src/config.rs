//! Bridge-wide configuration.

/// Configuration for a [`Bridge`](crate::Bridge).
///
/// # Example
///
/// ```
/// use horizon_bridge_core::BridgeConfig;
///
/// let config = BridgeConfig::new()
///     .with_terminate_after_last_window_closed(false)
///     .with_thread_checks(true);
///
/// assert!(!config.terminate_after_last_window_closed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    terminate_after_last_window_closed: bool,
    thread_checks: bool,
}

impl BridgeConfig {
    /// Create the default configuration.
    ///
    /// The application terminates when its last window closes, and thread
    /// checks follow `debug_assertions`.
    pub fn new() -> Self {
        Self {
            terminate_after_last_window_closed: true,
            thread_checks: cfg!(debug_assertions),
        }
    }

    /// Set whether closing the last open window ends the run loop.
    pub fn with_terminate_after_last_window_closed(mut self, terminate: bool) -> Self {
        self.terminate_after_last_window_closed = terminate;
        self
    }

    /// Set whether calls from a thread other than the creating one are
    /// logged.
    pub fn with_thread_checks(mut self, enabled: bool) -> Self {
        self.thread_checks = enabled;
        self
    }

    pub fn terminate_after_last_window_closed(&self) -> bool {
        self.terminate_after_last_window_closed
    }

    pub fn thread_checks(&self) -> bool {
        self.thread_checks
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert!(config.terminate_after_last_window_closed());
        assert_eq!(config.thread_checks(), cfg!(debug_assertions));
    }
}
