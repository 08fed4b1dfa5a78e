//! Remote extraction with retry, validation, and fallback.
//!
//! - [`ExtractionResolver`] - Resolves text into a [`ClassificationResult`](crate::types::ClassificationResult)
//! - [`RemoteExtractionError`] - The five ways a remote attempt can fail
//! - [`retry_with_backoff`] - Bounded retry loop with linear backoff
//! - [`ResolutionObserver`] - Diagnostic hooks called at each step
//! - [`parse_remote_output`] - Turns raw model text into a typed result

pub mod config;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod parse;
pub mod prompt;
pub mod resolver;
pub mod retry;

pub use config::ResolverConfig;
pub use error::{AttemptRecord, RemoteExtractionError};
pub use metrics::{estimate_tokens, ResolutionMetrics};
pub use observer::{NoopObserver, ResolutionObserver, TracingObserver};
pub use parse::{locate_json_object, parse_remote_output};
pub use prompt::build_extraction_prompt;
pub use resolver::{
    ExtractionResolver, ExtractionResolverBuilder, FallbackReason, RemoteTier, Resolution,
    ResolutionSource,
};
pub use retry::{retry_with_backoff, AttemptFailure, RetryOutcome, RetryPolicy, Sleeper, TokioSleeper};
