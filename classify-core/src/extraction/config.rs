//! Configuration for remote extraction retry behavior.

use std::time::Duration;

/// Configuration for remote extraction retry behavior.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum number of remote attempts before falling back (default: 3).
    pub max_attempts: usize,
    /// Backoff unit; the wait after attempt `n` is `n * backoff_step` (default: 500ms).
    pub backoff_step: Duration,
    /// Upper bound on a single remote call (default: 30 seconds).
    pub attempt_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_millis(500),
            attempt_timeout: Duration::from_secs(30),
        }
    }
}

impl ResolverConfig {
    /// Set the maximum number of remote attempts.
    #[must_use]
    pub const fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set the linear backoff unit.
    #[must_use]
    pub const fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }

    /// Set the per-attempt timeout for the remote call.
    #[must_use]
    pub const fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }
}
