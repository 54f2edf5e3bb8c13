//! Circuit breaker for the remote scoring endpoint.
//!
//! After `failure_threshold` consecutive failures the circuit opens for a
//! fixed window and callers fail fast instead of waiting out timeouts
//! against a dependency that is already down. A success resets the failure
//! counter but does not close an already-open window early; the window
//! simply expires.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Internal mutable state guarded by an `RwLock`.
#[derive(Debug)]
struct BreakerInner {
    consecutive_failures: u32,
    open_until: Option<Instant>,
}

/// Thread-safe consecutive-failure circuit breaker.
///
/// Cheaply cloneable; all clones share the same internal state via `Arc`.
/// The failure count is approximate under concurrent updates, which is
/// acceptable for a load-shedding guard.
#[derive(Clone)]
pub struct CircuitBreaker {
    inner: Arc<RwLock<BreakerInner>>,
    failure_threshold: u32,
    open_for: Duration,
    name: Arc<str>,
}

impl CircuitBreaker {
    /// Create a breaker that opens for `open_for` after `failure_threshold`
    /// consecutive failures. Starts closed.
    pub fn new(name: impl Into<String>, failure_threshold: u32, open_for: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BreakerInner {
                consecutive_failures: 0,
                open_until: None,
            })),
            failure_threshold: failure_threshold.max(1),
            open_for,
            name: Arc::from(name.into().as_str()),
        }
    }

    /// Whether the open window is currently in effect. While it is, no
    /// remote call may be attempted.
    pub async fn is_open(&self) -> bool {
        let inner = self.inner.read().await;
        inner.open_until.is_some_and(|until| Instant::now() < until)
    }

    /// Record a failed call and return the new consecutive-failure count.
    ///
    /// Reaching the threshold arms (or extends) the open window. The window
    /// affects only future calls; the caller's own attempt sequence
    /// continues unaffected.
    pub async fn record_failure(&self) -> u32 {
        let mut inner = self.inner.write().await;
        inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);
        if inner.consecutive_failures >= self.failure_threshold {
            inner.open_until = Some(Instant::now() + self.open_for);
        }
        inner.consecutive_failures
    }

    /// Record a successful call: resets the failure counter. An already
    /// armed open window stays in place until it expires.
    pub async fn record_success(&self) {
        let mut inner = self.inner.write().await;
        inner.consecutive_failures = 0;
    }

    /// Current consecutive-failure count (for diagnostics).
    pub async fn failure_count(&self) -> u32 {
        self.inner.read().await.consecutive_failures
    }

    /// Return the breaker name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.name)
            .field("failure_threshold", &self.failure_threshold)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_breaker() -> CircuitBreaker {
        CircuitBreaker::new("test", 3, Duration::from_millis(50))
    }

    #[tokio::test]
    async fn test_starts_closed() {
        let breaker = fast_breaker();
        assert!(!breaker.is_open().await);
        assert_eq!(breaker.failure_count().await, 0);
    }

    #[tokio::test]
    async fn test_opens_after_threshold_failures() {
        let breaker = fast_breaker();
        breaker.record_failure().await;
        breaker.record_failure().await;
        assert!(!breaker.is_open().await); // Not yet
        assert_eq!(breaker.record_failure().await, 3);
        assert!(breaker.is_open().await);
    }

    #[tokio::test]
    async fn test_window_expires() {
        let breaker = fast_breaker();
        for _ in 0..3 {
            breaker.record_failure().await;
        }
        assert!(breaker.is_open().await);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!breaker.is_open().await);
    }

    #[tokio::test]
    async fn test_success_resets_counter() {
        let breaker = fast_breaker();
        breaker.record_failure().await;
        breaker.record_failure().await;
        breaker.record_success().await;
        assert_eq!(breaker.failure_count().await, 0);

        // Two more failures stay under the threshold after the reset.
        breaker.record_failure().await;
        breaker.record_failure().await;
        assert!(!breaker.is_open().await);
    }

    #[tokio::test]
    async fn test_success_does_not_close_open_window() {
        let breaker = fast_breaker();
        for _ in 0..3 {
            breaker.record_failure().await;
        }
        breaker.record_success().await;
        // Counter is reset, but the armed window still runs out its clock.
        assert_eq!(breaker.failure_count().await, 0);
        assert!(breaker.is_open().await);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!breaker.is_open().await);
    }

    #[tokio::test]
    async fn test_continued_failures_extend_window() {
        let breaker = fast_breaker();
        for _ in 0..3 {
            breaker.record_failure().await;
        }
        tokio::time::sleep(Duration::from_millis(30)).await;
        breaker.record_failure().await; // Re-arms from now
        tokio::time::sleep(Duration::from_millis(30)).await;
        // 60 ms after the first arming, but only 30 ms after the re-arm.
        assert!(breaker.is_open().await);
    }
}
