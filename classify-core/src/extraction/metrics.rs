//! Per-resolution counters.

use std::time::Duration;

/// Metrics collected while resolving one piece of text.
#[derive(Debug, Clone, Default)]
pub struct ResolutionMetrics {
    /// Number of remote attempts made (0 when the remote tier was skipped).
    pub remote_attempts: usize,
    /// Wall-clock time elapsed, including backoff waits.
    pub wall_time: Duration,
    /// Estimated tokens sent per remote attempt.
    pub estimated_prompt_tokens: usize,
}

/// Rough size of a prompt in model tokens, counted as four characters per
/// token and rounded up. Only feeds [`ResolutionMetrics`].
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}
