#![deny(missing_docs)]
//! HTTP front end for the extraction resolver.
//!
//! Exposes `POST /classify`, validates the request body, and hands the text
//! to a shared [`ExtractionResolver`](classify_core::extraction::ExtractionResolver).

/// Server configuration from CLI flags and environment.
pub mod config;
/// Error types for the server and its handlers.
pub mod errors;
/// Routes and request validation.
pub mod routes;

pub use config::{Cli, ServerConfig};
pub use errors::{ApiError, ServerError};
pub use routes::{router, AppState};

use classify_core::extraction::ExtractionResolver;
use classify_core::remote::openai_extractor;

/// Builds the resolver for `config`.
///
/// With a credential the resolver uses the OpenAI-backed remote tier;
/// without one, or when the client cannot be built from it, it runs in
/// fallback-only mode for its whole lifetime.
#[must_use]
pub fn build_resolver(config: &ServerConfig) -> ExtractionResolver {
    let Some(api_key) = config.api_key.as_deref() else {
        tracing::warn!(
            event = "fallback_only_mode",
            "OpenAI API key not found, using fallback mode"
        );
        return ExtractionResolver::fallback_only();
    };

    match openai_extractor(api_key, &config.model) {
        Ok(extractor) => ExtractionResolver::builder().remote(extractor).build(),
        Err(e) => {
            tracing::error!(
                event = "fallback_only_mode",
                error = %e,
                "OpenAI client could not be built, using fallback mode"
            );
            ExtractionResolver::fallback_only()
        }
    }
}
