//! Request spacing for a single client instance.
//!
//! Smartlead documents a limit of 10 requests per 2 seconds, but in practice
//! a second, undocumented cap of roughly 60 requests per minute also applies.
//! Spacing every request by about a second keeps both tiers satisfied. The
//! second tier is not published, so both constants are configurable.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::trace;

/// Default minimum spacing between two dispatched requests.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Default pause applied even when the minimum spacing has already elapsed.
pub const DEFAULT_GRACE_INTERVAL: Duration = Duration::from_secs(1);

/// Serializes admissions so that dispatch start times are at least
/// `min_interval` apart.
///
/// Callers contend on a lock; there is no FIFO guarantee between callers that
/// are blocked at the same time.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    grace_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with explicit spacing constants.
    pub fn new(min_interval: Duration, grace_interval: Duration) -> Self {
        Self {
            min_interval,
            grace_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Minimum spacing between admissions.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Pause applied when the minimum spacing has already elapsed.
    pub fn grace_interval(&self) -> Duration {
        self.grace_interval
    }

    /// Wait until a request may be sent, and record the admission time.
    ///
    /// The lock is held across the read, the sleep and the update, so two
    /// callers can never both observe the same previous timestamp.
    pub async fn acquire(&self) -> Instant {
        let mut last_request = self.last_request.lock().await;

        let wait = self.delay_after(*last_request, Instant::now());
        if !wait.is_zero() {
            trace!(wait_ms = wait.as_millis() as u64, "Waiting for rate limit admission");
            sleep(wait).await;
        }

        let admitted = Instant::now();
        *last_request = Some(admitted);
        admitted
    }

    /// How long a caller arriving at `now` must wait.
    ///
    /// This is the remainder of the minimum interval, but never less than the
    /// grace interval. The grace floor deliberately over-throttles to stay under
    /// the per-minute cap.
    fn delay_after(&self, last_request: Option<Instant>, now: Instant) -> Duration {
        let remaining = match last_request {
            Some(last) => self
                .min_interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        };
        remaining.max(self.grace_interval)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL, DEFAULT_GRACE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_delay_after() {
        let limiter = RateLimiter::new(Duration::from_secs(2), Duration::from_millis(100));
        let now = Instant::now();

        // No previous request: only the grace pause.
        assert_eq!(limiter.delay_after(None, now), Duration::from_millis(100));

        // Half the interval has passed: wait for the rest.
        let last = now - Duration::from_secs(1);
        assert_eq!(limiter.delay_after(Some(last), now), Duration::from_secs(1));

        // Interval long gone: still the grace pause.
        let last = now - Duration::from_secs(10);
        assert_eq!(
            limiter.delay_after(Some(last), now),
            Duration::from_millis(100)
        );

        // Remainder shorter than grace: grace wins.
        let last = now - Duration::from_millis(1950);
        assert_eq!(
            limiter.delay_after(Some(last), now),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_defaults() {
        let limiter = RateLimiter::default();
        assert_eq!(limiter.min_interval(), DEFAULT_MIN_INTERVAL);
        assert_eq!(limiter.grace_interval(), DEFAULT_GRACE_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_waits_grace() {
        let limiter = RateLimiter::new(Duration::from_secs(1), Duration::from_millis(250));
        let start = Instant::now();
        let admitted = limiter.acquire().await;
        assert!(admitted - start >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_acquires_are_spaced() {
        let min_interval = Duration::from_millis(500);
        let limiter = Arc::new(RateLimiter::new(min_interval, Duration::from_millis(10)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move { limiter.acquire().await })
            })
            .collect();

        let mut admitted = Vec::new();
        for handle in handles {
            admitted.push(handle.await.unwrap());
        }
        admitted.sort();

        for pair in admitted.windows(2) {
            assert!(pair[1] - pair[0] >= min_interval);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_spacing_never_blocks() {
        let limiter = RateLimiter::new(Duration::ZERO, Duration::ZERO);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.acquire().await;
        }
        assert_eq!(Instant::now(), start);
    }
}
