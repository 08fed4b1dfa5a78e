//! Error kinds for a single remote extraction attempt.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during one remote extraction attempt.
///
/// All kinds are retried identically and none of them reach the caller of
/// [`ExtractionResolver::resolve`](super::ExtractionResolver::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteExtractionError {
    /// Transport error, provider error, or timeout from the remote extractor.
    #[error("Remote call failed: {0}")]
    RemoteCallFailure(String),

    /// The remote call succeeded but returned no usable text.
    #[error("Empty response from remote extractor")]
    EmptyResponse,

    /// The response contains no brace-delimited object.
    #[error("No JSON object found in remote output")]
    NoJsonFound,

    /// A JSON-shaped span was found but does not parse.
    #[error("Malformed JSON in remote output: {0}")]
    MalformedJson(String),

    /// The parsed JSON is missing one or more required keys.
    #[error("Invalid structure in remote output: {0}")]
    SchemaViolation(String),
}

impl RemoteExtractionError {
    /// Stable label for structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RemoteCallFailure(_) => "remote_call_failure",
            Self::EmptyResponse => "empty_response",
            Self::NoJsonFound => "no_json_found",
            Self::MalformedJson(_) => "malformed_json",
            Self::SchemaViolation(_) => "schema_violation",
        }
    }
}

/// Record of a single failed remote attempt.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// The attempt number (1-indexed).
    pub attempt_number: usize,
    /// Why the attempt failed.
    pub error: RemoteExtractionError,
    /// Time since resolution started when the attempt failed.
    pub elapsed: Duration,
}
