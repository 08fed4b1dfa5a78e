//! Diagnostic hooks called by the resolver at each step.

use super::error::AttemptRecord;
use super::resolver::FallbackReason;
use crate::types::ClassificationResult;

/// Observer notified as a resolution progresses.
///
/// Every method has a no-op default. Observers never influence control flow.
pub trait ResolutionObserver: Send + Sync {
    /// The input was empty or whitespace-only; nothing was extracted.
    fn empty_input(&self) {}

    /// A remote attempt is about to run.
    fn attempt_started(&self, _attempt: usize, _max_attempts: usize) {}

    /// A remote attempt failed.
    fn attempt_failed(&self, _record: &AttemptRecord) {}

    /// A remote attempt produced a valid result.
    fn remote_succeeded(&self, _attempt: usize) {}

    /// All remote attempts failed.
    fn remote_exhausted(&self, _attempts: usize) {}

    /// The deterministic fallback produced the final result.
    fn fallback_used(&self, _reason: FallbackReason, _result: &ClassificationResult) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ResolutionObserver for NoopObserver {}

/// Observer that emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ResolutionObserver for TracingObserver {
    fn empty_input(&self) {
        tracing::debug!(event = "empty_input", "Empty text received, returning default result");
    }

    fn attempt_started(&self, attempt: usize, max_attempts: usize) {
        tracing::debug!(
            event = "remote_attempt_started",
            attempt,
            max_attempts,
            "remote_attempt_started"
        );
    }

    fn attempt_failed(&self, record: &AttemptRecord) {
        tracing::warn!(
            event = "remote_attempt_failed",
            attempt = record.attempt_number,
            kind = record.error.kind(),
            error = %record.error,
            elapsed_ms = u64::try_from(record.elapsed.as_millis()).unwrap_or(u64::MAX),
            "remote_attempt_failed"
        );
    }

    fn remote_succeeded(&self, attempt: usize) {
        tracing::debug!(event = "remote_succeeded", attempt, "remote_succeeded");
    }

    fn remote_exhausted(&self, attempts: usize) {
        tracing::error!(
            event = "remote_exhausted",
            attempts,
            "All remote attempts failed, switching to fallback"
        );
    }

    fn fallback_used(&self, reason: FallbackReason, result: &ClassificationResult) {
        tracing::debug!(
            event = "fallback_used",
            reason = reason.as_str(),
            zip = %result.zip,
            brand = %result.brand,
            category = %result.category,
            time_pref = %result.time_pref,
            "fallback_used"
        );
    }
}
