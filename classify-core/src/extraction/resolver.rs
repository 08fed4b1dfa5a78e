//! The extraction resolver: remote tier with retry, then deterministic fallback.

use std::sync::Arc;

use tokio::time::Instant;

use super::config::ResolverConfig;
use super::error::{AttemptRecord, RemoteExtractionError};
use super::metrics::{estimate_tokens, ResolutionMetrics};
use super::observer::{ResolutionObserver, TracingObserver};
use super::parse::parse_remote_output;
use super::prompt::build_extraction_prompt;
use super::retry::{retry_with_backoff, RetryOutcome, RetryPolicy, Sleeper, TokioSleeper};
use crate::fallback::fallback_extract;
use crate::remote::TextExtractor;
use crate::types::ClassificationResult;

/// Whether a remote extractor is available. Fixed for the resolver's lifetime.
#[derive(Clone)]
pub enum RemoteTier {
    /// Remote extraction is attempted before falling back.
    Configured(Arc<dyn TextExtractor>),
    /// Fallback-only mode.
    Unconfigured,
}

/// Why the deterministic fallback produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No remote extractor is configured.
    Unconfigured,
    /// Every remote attempt failed.
    RemoteExhausted,
}

impl FallbackReason {
    /// Stable label for structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unconfigured => "unconfigured",
            Self::RemoteExhausted => "remote_exhausted",
        }
    }
}

/// Which tier produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// The input was empty or whitespace-only.
    EmptyInput,
    /// The remote extractor succeeded on `attempt`.
    Remote {
        /// The successful attempt (1-indexed).
        attempt: usize,
    },
    /// The deterministic fallback was used.
    Fallback {
        /// Why the remote tier did not produce the result.
        reason: FallbackReason,
    },
}

/// A result together with how it was obtained.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The extracted fields.
    pub result: ClassificationResult,
    /// The tier that produced `result`.
    pub source: ResolutionSource,
    /// Failed remote attempts, in order.
    pub attempts: Vec<AttemptRecord>,
    /// Timing and size metrics.
    pub metrics: ResolutionMetrics,
}

/// Resolves free-form text into a [`ClassificationResult`].
///
/// With a remote extractor configured, the resolver sends a fixed prompt and
/// retries failures with linear backoff. When retries run out, or no remote
/// extractor is configured, it uses [`fallback_extract`]. It never fails.
pub struct ExtractionResolver {
    remote: RemoteTier,
    config: ResolverConfig,
    sleeper: Arc<dyn Sleeper>,
    observer: Arc<dyn ResolutionObserver>,
}

impl ExtractionResolver {
    /// Returns a new builder for configuring the resolver.
    #[must_use]
    pub fn builder() -> ExtractionResolverBuilder {
        ExtractionResolverBuilder::default()
    }

    /// Creates a resolver that only uses the deterministic fallback.
    #[must_use]
    pub fn fallback_only() -> Self {
        Self::builder().build()
    }

    /// Returns `true` when a remote extractor is configured.
    #[must_use]
    pub const fn is_remote_configured(&self) -> bool {
        matches!(self.remote, RemoteTier::Configured(_))
    }

    /// Returns the retry configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Extracts the four fields from `text`.
    ///
    /// Always returns a fully populated result; fields that cannot be found
    /// are empty strings.
    pub async fn resolve(&self, text: &str) -> ClassificationResult {
        self.resolve_detailed(text).await.result
    }

    /// Like [`resolve`](Self::resolve), also reporting which tier produced the
    /// result, the failed attempts, and metrics.
    pub async fn resolve_detailed(&self, text: &str) -> Resolution {
        let start = Instant::now();

        if text.trim().is_empty() {
            self.observer.empty_input();
            return Resolution {
                result: ClassificationResult::empty(),
                source: ResolutionSource::EmptyInput,
                attempts: Vec::new(),
                metrics: ResolutionMetrics {
                    wall_time: start.elapsed(),
                    ..ResolutionMetrics::default()
                },
            };
        }

        let RemoteTier::Configured(extractor) = &self.remote else {
            return self.fall_back(text, FallbackReason::Unconfigured, Vec::new(), start, 0);
        };

        let prompt = build_extraction_prompt(text);
        let prompt_tokens = estimate_tokens(&prompt);
        let prompt = prompt.as_str();
        let extractor = extractor.as_ref();

        let outcome = retry_with_backoff(
            RetryPolicy::from(&self.config),
            self.sleeper.as_ref(),
            move |attempt| self.attempt_once(extractor, prompt, attempt, start),
        )
        .await;

        match outcome {
            RetryOutcome::Succeeded {
                value,
                attempt,
                failures,
            } => {
                self.observer.remote_succeeded(attempt);
                Resolution {
                    result: value,
                    source: ResolutionSource::Remote { attempt },
                    attempts: failures.into_iter().map(|f| f.error).collect(),
                    metrics: ResolutionMetrics {
                        remote_attempts: attempt,
                        wall_time: start.elapsed(),
                        estimated_prompt_tokens: prompt_tokens,
                    },
                }
            }
            RetryOutcome::Exhausted { failures } => {
                let attempts = failures.len();
                self.observer.remote_exhausted(attempts);
                let records = failures.into_iter().map(|f| f.error).collect();
                self.fall_back(
                    text,
                    FallbackReason::RemoteExhausted,
                    records,
                    start,
                    prompt_tokens,
                )
            }
        }
    }

    async fn attempt_once(
        &self,
        extractor: &dyn TextExtractor,
        prompt: &str,
        attempt: usize,
        start: Instant,
    ) -> Result<ClassificationResult, AttemptRecord> {
        self.observer
            .attempt_started(attempt, self.config.max_attempts);

        let timeout = self.config.attempt_timeout;
        let outcome = match tokio::time::timeout(timeout, extractor.complete(prompt)).await {
            Ok(Ok(raw)) => parse_remote_output(&raw),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(RemoteExtractionError::RemoteCallFailure(format!(
                "timed out after {timeout:?}"
            ))),
        };

        outcome.map_err(|error| {
            let record = AttemptRecord {
                attempt_number: attempt,
                error,
                elapsed: start.elapsed(),
            };
            self.observer.attempt_failed(&record);
            record
        })
    }

    fn fall_back(
        &self,
        text: &str,
        reason: FallbackReason,
        attempts: Vec<AttemptRecord>,
        start: Instant,
        prompt_tokens: usize,
    ) -> Resolution {
        let result = fallback_extract(text);
        self.observer.fallback_used(reason, &result);

        Resolution {
            result,
            source: ResolutionSource::Fallback { reason },
            metrics: ResolutionMetrics {
                remote_attempts: attempts.len(),
                wall_time: start.elapsed(),
                estimated_prompt_tokens: prompt_tokens,
            },
            attempts,
        }
    }
}

/// Builder for [`ExtractionResolver`].
pub struct ExtractionResolverBuilder {
    remote: RemoteTier,
    config: ResolverConfig,
    sleeper: Arc<dyn Sleeper>,
    observer: Arc<dyn ResolutionObserver>,
}

impl Default for ExtractionResolverBuilder {
    fn default() -> Self {
        Self {
            remote: RemoteTier::Unconfigured,
            config: ResolverConfig::default(),
            sleeper: Arc::new(TokioSleeper),
            observer: Arc::new(TracingObserver),
        }
    }
}

impl ExtractionResolverBuilder {
    /// Configures a remote extractor.
    #[must_use]
    pub fn remote(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.remote = RemoteTier::Configured(extractor);
        self
    }

    /// Configures a remote extractor if one is given; `None` selects fallback-only mode.
    #[must_use]
    pub fn remote_opt(mut self, extractor: Option<Arc<dyn TextExtractor>>) -> Self {
        self.remote = extractor.map_or(RemoteTier::Unconfigured, RemoteTier::Configured);
        self
    }

    /// Sets the retry configuration.
    #[must_use]
    pub const fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the backoff sleeper. Defaults to [`TokioSleeper`].
    #[must_use]
    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Sets the observer. Defaults to [`TracingObserver`].
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Builds the resolver.
    #[must_use]
    pub fn build(self) -> ExtractionResolver {
        ExtractionResolver {
            remote: self.remote,
            config: self.config,
            sleeper: self.sleeper,
            observer: self.observer,
        }
    }
}
