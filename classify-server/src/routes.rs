use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use classify_core::extraction::ExtractionResolver;
use classify_core::types::{ClassificationRequest, ClassificationResult};
use serde_json::Value;

use crate::errors::ApiError;

/// Rejection message when `text` is missing or not a string.
pub const TEXT_NOT_STRING: &str = "\"text\" must be a string";
/// Rejection message when `text` is missing or empty.
pub const TEXT_EMPTY: &str = "\"text\" cannot be empty";

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The resolver; read-only after construction.
    pub resolver: Arc<ExtractionResolver>,
}

impl AppState {
    /// Wraps a resolver for sharing across requests.
    #[must_use]
    pub fn new(resolver: ExtractionResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/classify", post(classify))
        .with_state(state)
}

#[tracing::instrument(skip_all, fields(http.route = "/classify", text_len = tracing::field::Empty))]
async fn classify(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ClassificationResult>), ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(event = "body_rejected", error = %rejection.body_text(), "body_rejected");
        ApiError::Validation(vec![rejection.body_text()])
    })?;

    let request = validate_request(body)?;
    tracing::Span::current().record("text_len", request.text.len());

    let result = state.resolver.resolve(&request.text).await;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Checks that `body` carries a non-empty string `text` field.
///
/// Whitespace-only text is accepted; the resolver handles it.
pub fn validate_request(body: Value) -> Result<ClassificationRequest, ApiError> {
    let Value::Object(mut map) = body else {
        return Err(ApiError::Validation(vec![
            "request body must be a JSON object".to_string(),
        ]));
    };

    match map.remove("text") {
        Some(Value::String(text)) if text.is_empty() => {
            Err(ApiError::Validation(vec![TEXT_EMPTY.to_string()]))
        }
        Some(Value::String(text)) => Ok(ClassificationRequest { text }),
        _ => Err(ApiError::Validation(vec![
            TEXT_NOT_STRING.to_string(),
            TEXT_EMPTY.to_string(),
        ])),
    }
}
