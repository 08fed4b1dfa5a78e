//! Remote extractor capability and its Rig-backed implementation.

use std::sync::Arc;

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::message::{AssistantContent, Message};
use rig::completion::CompletionModel;
use rig::providers::openai;
use rig::OneOrMany;

use crate::extraction::RemoteExtractionError;

/// Default OpenAI model used for extraction.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Submits a prompt to a language model and returns its text.
///
/// One call is one attempt; retries are the resolver's concern.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Sends `prompt` and returns the raw response text.
    async fn complete(&self, prompt: &str) -> Result<String, RemoteExtractionError>;
}

/// [`TextExtractor`] over any Rig [`CompletionModel`].
///
/// Requests use temperature `0.0` so repeated calls on the same input tend
/// toward the same output.
#[derive(Clone)]
pub struct RigExtractor<M> {
    model: M,
}

impl<M> RigExtractor<M>
where
    M: CompletionModel,
{
    /// Wraps a Rig completion model.
    #[must_use]
    pub const fn new(model: M) -> Self {
        Self { model }
    }
}

#[async_trait]
impl<M> TextExtractor for RigExtractor<M>
where
    M: CompletionModel + Send + Sync + 'static,
{
    async fn complete(&self, prompt: &str) -> Result<String, RemoteExtractionError> {
        let request = self
            .model
            .completion_request(Message::user(prompt))
            .temperature(0.0)
            .build();

        let response = self
            .model
            .completion(request)
            .await
            .map_err(|e| RemoteExtractionError::RemoteCallFailure(e.to_string()))?;

        Ok(response_text(&response.choice))
    }
}

/// Joins the text parts of an assistant response, skipping tool calls and reasoning.
#[must_use]
pub fn response_text(choice: &OneOrMany<AssistantContent>) -> String {
    choice
        .iter()
        .filter_map(|content| match content {
            AssistantContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds an extractor backed by Rig's OpenAI provider, authenticated with `api_key`.
///
/// # Errors
///
/// Returns [`RemoteExtractionError::RemoteCallFailure`] when the client cannot
/// be built, e.g. the key is not a valid header value.
pub fn openai_extractor(
    api_key: &str,
    model: &str,
) -> Result<Arc<dyn TextExtractor>, RemoteExtractionError> {
    let client: openai::Client = openai::Client::new(api_key)
        .map_err(|e| RemoteExtractionError::RemoteCallFailure(e.to_string()))?;
    tracing::info!(event = "remote_extractor_ready", model, "OpenAI client initialized");
    Ok(Arc::new(RigExtractor::new(client.completion_model(model))))
}
