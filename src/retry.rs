//! Retry policy for rate-limited requests.
//!
//! Only 429 responses are retried; everything else short-circuits the loop
//! in [`Client::request`](crate::Client::request). The schedule prefers the
//! server-advised `Retry-After` and falls back to exponential backoff,
//! clamped to a ceiling. No jitter: the retry ceiling is low and the server
//! advises the wait explicitly most of the time.

use crate::rate_limit::RateLimitError;
use std::time::Duration;

/// Bounded retry schedule for rate-limited requests.
///
/// The defaults mirror the API's cooperative rate-limit semantics: 3 total
/// attempts, 1s/2s backoff between them, never waiting more than 60 seconds.
///
/// # Examples
///
/// ```
/// use toneclone::RetryPolicy;
/// use std::time::Duration;
///
/// // Defaults: 3 attempts, 1s base, 60s cap.
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 3);
///
/// // Tests and latency-sensitive callers can tighten the schedule.
/// let fast = RetryPolicy::new(3, Duration::from_millis(10), Duration::from_secs(1));
/// assert_eq!(fast.max_attempts(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with an explicit attempt bound and delay range.
    ///
    /// `max_attempts` counts total attempts, not retries; it is clamped to
    /// at least 1 so every call performs one round trip.
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Total attempts allowed per logical call.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns `true` if `attempt` (0-based) is the last allowed one.
    pub fn is_final_attempt(&self, attempt: u32) -> bool {
        attempt + 1 >= self.max_attempts
    }

    /// Computes the wait before re-attempting after a rate-limit error.
    ///
    /// Prefers the server's `Retry-After`; falls back to
    /// `base_delay * 2^attempt` (attempt 0-based). Either source is clamped
    /// to `max_delay`.
    pub fn delay_for(&self, attempt: u32, err: &RateLimitError) -> Duration {
        let delay = if err.retry_after_seconds > 0 {
            Duration::from_secs(err.retry_after_seconds)
        } else {
            let multiplier = 2u32.saturating_pow(attempt);
            self.base_delay.saturating_mul(multiplier)
        };
        delay.min(self.max_delay)
    }
}
