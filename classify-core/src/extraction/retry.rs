//! Bounded retry combinator with linear backoff.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use super::config::ResolverConfig;

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: usize,
    /// Linear backoff unit.
    pub backoff_step: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt bound and backoff unit.
    #[must_use]
    pub const fn new(max_attempts: usize, backoff_step: Duration) -> Self {
        Self {
            max_attempts,
            backoff_step,
        }
    }

    /// Wait after a failed `attempt` (1-indexed): `attempt * backoff_step`.
    #[must_use]
    pub fn delay_after(&self, attempt: usize) -> Duration {
        let factor = u32::try_from(attempt).unwrap_or(u32::MAX);
        self.backoff_step.saturating_mul(factor)
    }
}

impl From<&ResolverConfig> for RetryPolicy {
    fn from(config: &ResolverConfig) -> Self {
        Self::new(config.max_attempts, config.backoff_step)
    }
}

/// Source of backoff delays.
///
/// Production code uses [`TokioSleeper`]; tests can record the requested
/// durations instead of waiting.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Non-blocking sleep on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A failed attempt and its error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure<E> {
    /// The attempt number (1-indexed).
    pub attempt: usize,
    /// The error the attempt produced.
    pub error: E,
}

/// Final outcome of [`retry_with_backoff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T, E> {
    /// An attempt produced a value.
    Succeeded {
        /// The produced value.
        value: T,
        /// The attempt that succeeded (1-indexed).
        attempt: usize,
        /// Failures preceding the success, in order.
        failures: Vec<AttemptFailure<E>>,
    },
    /// Every attempt failed.
    Exhausted {
        /// All failures, in order.
        failures: Vec<AttemptFailure<E>>,
    },
}

impl<T, E> RetryOutcome<T, E> {
    /// Number of attempts that were made.
    #[must_use]
    pub fn attempts(&self) -> usize {
        match self {
            Self::Succeeded { attempt, .. } => *attempt,
            Self::Exhausted { failures } => failures.len(),
        }
    }
}

/// Runs `op` until it succeeds or `policy.max_attempts` is reached.
///
/// `op` receives the 1-indexed attempt number. Between failures the task
/// sleeps for [`RetryPolicy::delay_after`]; no sleep follows the final attempt.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use classify_core::extraction::{retry_with_backoff, RetryOutcome, RetryPolicy, TokioSleeper};
///
/// # async fn example() {
/// let policy = RetryPolicy::new(3, Duration::ZERO);
/// let outcome = retry_with_backoff(policy, &TokioSleeper, |attempt| async move {
///     if attempt < 2 { Err("not yet") } else { Ok(attempt) }
/// })
/// .await;
///
/// assert!(matches!(outcome, RetryOutcome::Succeeded { value: 2, attempt: 2, .. }));
/// # }
/// ```
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: RetryPolicy,
    sleeper: &dyn Sleeper,
    mut op: F,
) -> RetryOutcome<T, E>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut failures = Vec::new();

    for attempt in 1..=policy.max_attempts {
        match op(attempt).await {
            Ok(value) => {
                return RetryOutcome::Succeeded {
                    value,
                    attempt,
                    failures,
                };
            }
            Err(error) => {
                failures.push(AttemptFailure { attempt, error });
                if attempt < policy.max_attempts {
                    sleeper.sleep(policy.delay_after(attempt)).await;
                }
            }
        }
    }

    RetryOutcome::Exhausted { failures }
}
