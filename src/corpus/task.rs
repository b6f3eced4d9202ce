//! Cancellation and timing helpers shared by the load and search fan-outs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::ThreadPoolBuildError;

use crate::error::{CorpusError, Result};

/// Report a worker pool that could not be built as a configuration error.
pub(crate) fn pool_error(name: &str) -> impl FnOnce(ThreadPoolBuildError) -> CorpusError + '_ {
    move |e| CorpusError::invalid_config(format!("Failed to create {name} pool: {e}"))
}

/// Shared cancellation signal with an optional deadline.
///
/// Clones share the same cancellation flag, so cancelling any clone stops
/// every task holding one. Each per-unit task calls [`TaskGuard::check`]
/// before it starts working; tasks that observe cancellation return an error
/// instead of doing work, and the surrounding join still completes.
#[derive(Debug, Clone, Default)]
pub struct TaskGuard {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl TaskGuard {
    /// Create a guard that is never cancelled unless asked to be.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a guard that expires after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().deadline_after(timeout)
    }

    /// Derive a guard sharing this cancellation flag whose deadline is the
    /// earlier of the current one and `timeout` from now. A timeout too
    /// large to represent as an `Instant` adds no deadline.
    pub fn deadline_after(&self, timeout: Duration) -> Self {
        let deadline = match (self.deadline, Instant::now().checked_add(timeout)) {
            (Some(existing), Some(candidate)) => Some(existing.min(candidate)),
            (existing, candidate) => existing.or(candidate),
        };
        Self {
            cancelled: Arc::clone(&self.cancelled),
            deadline,
        }
    }

    /// Apply an optional timeout.
    pub fn limited_by(&self, timeout: Option<Duration>) -> Self {
        match timeout {
            Some(timeout) => self.deadline_after(timeout),
            None => self.clone(),
        }
    }

    /// Signal cancellation to every clone of this guard.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Check if the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail if the guard has been cancelled or has expired.
    pub fn check(&self, what: &str) -> Result<()> {
        if self.is_cancelled() {
            return Err(CorpusError::cancelled(what.to_string()));
        }
        if self.is_expired() {
            return Err(CorpusError::timeout(what.to_string()));
        }
        Ok(())
    }
}

/// Simple timer for measuring elapsed time.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_guard_passes() {
        let guard = TaskGuard::new();
        assert!(guard.check("unit").is_ok());
        assert!(!guard.is_expired());
    }

    #[test]
    fn test_cancel_reaches_clones() {
        let guard = TaskGuard::new();
        let clone = guard.clone();
        let derived = guard.deadline_after(Duration::from_secs(60));

        guard.cancel();

        assert!(clone.is_cancelled());
        assert!(matches!(derived.check("unit"), Err(CorpusError::Cancelled(_))));
    }

    #[test]
    fn test_expired_deadline() {
        let guard = TaskGuard::with_timeout(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(1));
        assert!(guard.is_expired());
        assert!(matches!(guard.check("unit"), Err(CorpusError::Timeout(_))));
    }

    #[test]
    fn test_deadline_keeps_earliest() {
        let guard = TaskGuard::with_timeout(Duration::ZERO);
        let relaxed = guard.deadline_after(Duration::from_secs(3600));
        std::thread::sleep(Duration::from_millis(1));
        assert!(relaxed.is_expired());

        let untouched = TaskGuard::new().limited_by(None);
        assert!(!untouched.is_expired());
    }

    #[test]
    fn test_unrepresentable_timeout_adds_no_deadline() {
        let guard = TaskGuard::with_timeout(Duration::MAX);
        assert!(!guard.is_expired());
        assert!(guard.check("unit").is_ok());

        let expired = TaskGuard::with_timeout(Duration::ZERO);
        let still_expired = expired.limited_by(Some(Duration::MAX));
        std::thread::sleep(Duration::from_millis(1));
        assert!(still_expired.is_expired());
    }

    #[test]
    fn test_pool_build_failure_is_invalid_config() {
        let built = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .spawn_handler(|_| Err(std::io::Error::other("no threads available")))
            .build()
            .map_err(pool_error("search"));

        match built {
            Err(CorpusError::InvalidConfig(msg)) => {
                assert!(msg.starts_with("Failed to create search pool"));
            }
            other => panic!("expected InvalidConfig, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.elapsed() >= Duration::from_millis(5));
    }
}
