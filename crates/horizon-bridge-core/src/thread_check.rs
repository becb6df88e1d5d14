//! UI-thread affinity tracking.
//!
//! Native toolkits expect every window and cursor call on the thread that
//! runs the event loop. The bridge records the thread it was created on and
//! reports calls from elsewhere. Reports are warnings rather than panics:
//! a panic here would unwind into the host.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::ThreadId;

use crate::logging::targets;

/// The thread an object belongs to, plus a switch for checking it.
#[derive(Debug)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
    enabled: AtomicBool,
}

impl ThreadAffinity {
    /// Bind to the current thread.
    pub fn current(enabled: bool) -> Self {
        Self {
            thread_id: std::thread::current().id(),
            enabled: AtomicBool::new(enabled),
        }
    }

    /// The thread this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread is the bound thread.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Warn if checks are enabled and `operation` runs on another thread.
    ///
    /// Returns `false` if a violation was reported.
    pub fn check(&self, operation: &str) -> bool {
        if !self.is_enabled() || self.is_same_thread() {
            return true;
        }
        report_wrong_thread(operation, self.thread_id);
        false
    }
}

#[cold]
#[inline(never)]
fn report_wrong_thread(operation: &str, expected: ThreadId) {
    let current = std::thread::current();
    tracing::warn!(
        target: targets::THREAD,
        operation,
        current = current.name().unwrap_or("<unnamed>"),
        current_id = ?current.id(),
        expected_id = ?expected,
        "bridge operation called off the UI thread"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_same_thread_passes() {
        let affinity = ThreadAffinity::current(true);
        assert!(affinity.is_same_thread());
        assert!(affinity.check("test"));
    }

    #[test]
    fn test_other_thread_reported() {
        let affinity = Arc::new(ThreadAffinity::current(true));
        let remote = affinity.clone();
        let passed = std::thread::spawn(move || remote.check("remote"))
            .join()
            .unwrap();
        assert!(!passed);
    }

    #[test]
    fn test_disabled_never_reports() {
        let affinity = Arc::new(ThreadAffinity::current(false));
        let remote = affinity.clone();
        assert!(std::thread::spawn(move || remote.check("remote")).join().unwrap());

        affinity.set_enabled(true);
        assert!(affinity.is_enabled());
    }
}
