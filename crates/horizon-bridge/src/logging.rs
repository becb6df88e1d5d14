//! Subscriber setup for hosts that cannot install one.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, in `RUST_LOG` syntax.
pub const LOG_ENV: &str = "HORIZON_BRIDGE_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a formatting subscriber filtered by [`LOG_ENV`].
///
/// Returns `false` if a global subscriber was already installed, in which
/// case the existing one stays in place.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(target: horizon_bridge_core::logging::targets::FFI, "logging initialized");
    }
    installed
}
