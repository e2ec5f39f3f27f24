//! Tunables for the board and activity services.

use crate::retry::RetryPolicy;
use std::time::Duration;

/// Configuration shared by the tracker services.
///
/// # Examples
///
/// ```
/// use taskboard::config::TrackerConfig;
///
/// let config = TrackerConfig::default();
/// assert_eq!(config.activity_page_size, 10);
/// assert_eq!(config.upload_retry.max_attempts(), 3);
///
/// let eager = TrackerConfig::without_retries();
/// assert_eq!(eager.upload_retry.max_attempts(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Number of activity records requested per page.
    pub activity_page_size: u32,
    /// Retry policy for rate-limited uploads.
    pub upload_retry: RetryPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            activity_page_size: 10,
            upload_retry: RetryPolicy::fixed(3, Duration::from_secs(1)),
        }
    }
}

impl TrackerConfig {
    /// Creates a configuration that surfaces the first rate-limit error.
    #[must_use]
    pub fn without_retries() -> Self {
        Self {
            upload_retry: RetryPolicy::none(),
            ..Self::default()
        }
    }

    /// Overrides the activity page size. Zero is raised to one.
    #[must_use]
    pub const fn with_activity_page_size(mut self, page_size: u32) -> Self {
        self.activity_page_size = if page_size == 0 { 1 } else { page_size };
        self
    }
}
