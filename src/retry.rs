//! Bounded retry for rate-limited remote calls.
//!
//! Retries are an explicit loop with an attempt counter. The wait between
//! attempts goes through the injectable [`Delay`] port so tests run
//! without sleeping and hosts can cancel a pending retry.

use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Classifies errors that signal remote throttling.
pub trait RateLimited {
    /// Returns `true` when the failure was a rate-limit response.
    fn is_rate_limited(&self) -> bool;
}

/// Fixed-delay retry policy.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taskboard::retry::RetryPolicy;
///
/// let policy = RetryPolicy::fixed(0, Duration::from_millis(5));
/// assert_eq!(policy.max_attempts(), 1);
/// assert_eq!(RetryPolicy::default().max_attempts(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy making at most `max_attempts` attempts (at least
    /// one) with `delay` between them.
    #[must_use]
    pub const fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            delay,
        }
    }

    /// Creates a policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    /// Returns the total number of attempts allowed.
    #[must_use]
    pub const fn max_attempts(self) -> u32 {
        self.max_attempts
    }

    /// Returns the wait between attempts.
    #[must_use]
    pub const fn delay(self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(3, Duration::from_secs(1))
    }
}

/// Returned by a [`Delay`] when the wait was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("retry delay cancelled")]
pub struct Cancelled;

/// Waits between retry attempts.
#[async_trait]
pub trait Delay: Send + Sync {
    /// Waits for `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] when the wait should abort the retry loop.
    async fn wait(&self, duration: Duration) -> Result<(), Cancelled>;
}

/// [`Delay`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) -> Result<(), Cancelled> {
        tokio::time::sleep(duration).await;
        Ok(())
    }
}

/// Runs `operation` until it succeeds, fails with a non-rate-limit error,
/// or exhausts the policy.
///
/// The operation receives the 1-based attempt number.
///
/// # Errors
///
/// Returns the last error produced by `operation`.
pub async fn retry_rate_limited<T, E, F, Fut, D>(
    policy: RetryPolicy,
    delay: &D,
    mut operation: F,
) -> Result<T, E>
where
    E: RateLimited + fmt::Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    D: Delay + ?Sized,
{
    let mut attempt = 1;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_rate_limited() && attempt < policy.max_attempts() => {
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts(),
                    error = %err,
                    "rate limited; retrying after delay"
                );
                if delay.wait(policy.delay()).await.is_err() {
                    debug!(attempt, "retry cancelled during delay");
                    return Err(err);
                }
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cancelled, Delay, RateLimited, RetryPolicy, TokioDelay, retry_rate_limited};
    use async_trait::async_trait;
    use rstest::rstest;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    enum FakeError {
        #[error("throttled")]
        Throttled,
        #[error("broken")]
        Broken,
    }

    impl RateLimited for FakeError {
        fn is_rate_limited(&self) -> bool {
            matches!(self, Self::Throttled)
        }
    }

    #[derive(Default)]
    struct RecordingDelay {
        waits: Mutex<Vec<Duration>>,
        cancel: bool,
    }

    impl RecordingDelay {
        fn waits(&self) -> Vec<Duration> {
            self.waits.lock().map(|w| w.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl Delay for RecordingDelay {
        async fn wait(&self, duration: Duration) -> Result<(), Cancelled> {
            if let Ok(mut waits) = self.waits.lock() {
                waits.push(duration);
            }
            if self.cancel { Err(Cancelled) } else { Ok(()) }
        }
    }

    const POLICY: RetryPolicy = RetryPolicy::fixed(3, Duration::from_millis(250));

    #[rstest]
    #[tokio::test]
    async fn succeeds_after_rate_limited_attempts() {
        let delay = RecordingDelay::default();
        let result = retry_rate_limited(POLICY, &delay, |attempt| async move {
            if attempt < 3 {
                Err(FakeError::Throttled)
            } else {
                Ok(attempt)
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(delay.waits(), vec![Duration::from_millis(250); 2]);
    }

    #[rstest]
    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let delay = RecordingDelay::default();
        let mut calls = 0;
        let result: Result<(), FakeError> = retry_rate_limited(POLICY, &delay, |_| {
            calls += 1;
            async { Err(FakeError::Throttled) }
        })
        .await;

        assert_eq!(result, Err(FakeError::Throttled));
        assert_eq!(calls, 3);
        assert_eq!(delay.waits().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn does_not_retry_other_errors() {
        let delay = RecordingDelay::default();
        let mut calls = 0;
        let result: Result<(), FakeError> = retry_rate_limited(POLICY, &delay, |_| {
            calls += 1;
            async { Err(FakeError::Broken) }
        })
        .await;

        assert_eq!(result, Err(FakeError::Broken));
        assert_eq!(calls, 1);
        assert!(delay.waits().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn cancelled_delay_stops_the_loop() {
        let delay = RecordingDelay {
            cancel: true,
            ..RecordingDelay::default()
        };
        let mut calls = 0;
        let result: Result<(), FakeError> = retry_rate_limited(POLICY, &delay, |_| {
            calls += 1;
            async { Err(FakeError::Throttled) }
        })
        .await;

        assert_eq!(result, Err(FakeError::Throttled));
        assert_eq!(calls, 1);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn tokio_delay_waits_for_the_full_duration() {
        let started = tokio::time::Instant::now();

        let result = TokioDelay.wait(Duration::from_secs(5)).await;

        assert_eq!(result, Ok(()));
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(5, 5)]
    fn fixed_policy_always_allows_one_attempt(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(
            RetryPolicy::fixed(requested, Duration::ZERO).max_attempts(),
            expected
        );
    }
}
