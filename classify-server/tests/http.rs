use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use classify_core::extraction::{ExtractionResolver, RemoteExtractionError};
use classify_core::remote::TextExtractor;
use classify_server::{build_resolver, router, AppState, ServerConfig};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

struct CountingExtractor {
    response: &'static str,
    calls: AtomicUsize,
}

#[async_trait]
impl TextExtractor for CountingExtractor {
    async fn complete(&self, _prompt: &str) -> Result<String, RemoteExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.to_string())
    }
}

fn fallback_app() -> Router {
    router(AppState::new(ExtractionResolver::fallback_only()))
}

async fn post_classify(app: Router, body: Body, content_type: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri("/classify");
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(body).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post_json(app: Router, body: &Value) -> (StatusCode, Value) {
    post_classify(app, Body::from(body.to_string()), Some("application/json")).await
}

#[tokio::test]
async fn test_classify_with_fallback() {
    let (status, body) = post_json(
        fallback_app(),
        &json!({"text": "brand:Acme category:Electronics time_pref:Morning zip 90210"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "zip": "90210",
            "brand": "Acme",
            "category": "Electronics",
            "time_pref": "Morning"
        })
    );
}

#[tokio::test]
async fn test_classify_returns_all_keys_when_nothing_found() {
    let (status, body) = post_json(fallback_app(), &json!({"text": "hello there"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"zip": "", "brand": "", "category": "", "time_pref": ""})
    );
}

#[tokio::test]
async fn test_classify_uses_remote_extractor() {
    let extractor = Arc::new(CountingExtractor {
        response: r#"Sure! {"zip":"10001","brand":"Nike","category":"Shoes","time_pref":"Evening"} done"#,
        calls: AtomicUsize::new(0),
    });
    let resolver = ExtractionResolver::builder()
        .remote(extractor.clone())
        .build();
    let app = router(AppState::new(resolver));

    let (status, body) = post_json(app, &json!({"text": "Nike shoes in 10001 tonight"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["brand"], "Nike");
    assert_eq!(body["time_pref"], "Evening");
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_whitespace_text_skips_remote() {
    let extractor = Arc::new(CountingExtractor {
        response: "{}",
        calls: AtomicUsize::new(0),
    });
    let resolver = ExtractionResolver::builder()
        .remote(extractor.clone())
        .build();
    let app = router(AppState::new(resolver));

    let (status, body) = post_json(app, &json!({"text": "   "})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"zip": "", "brand": "", "category": "", "time_pref": ""})
    );
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_text_is_rejected() {
    let (status, body) = post_json(fallback_app(), &json!({"text": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], json!(["\"text\" cannot be empty"]));
}

#[tokio::test]
async fn test_missing_text_is_rejected() {
    let (status, body) = post_json(fallback_app(), &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!(["\"text\" must be a string", "\"text\" cannot be empty"])
    );
}

#[tokio::test]
async fn test_non_string_text_is_rejected() {
    let (status, body) = post_json(fallback_app(), &json!({"text": 12345})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"][0], "\"text\" must be a string");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (status, body) =
        post_classify(fallback_app(), Body::from("{not json"), Some("application/json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let (status, _) = post_classify(
        fallback_app(),
        Body::from(json!({"text": "brand:Acme"}).to_string()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_is_not_allowed() {
    let request = Request::builder()
        .method("GET")
        .uri("/classify")
        .body(Body::empty())
        .unwrap();
    let response = fallback_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_resolver_without_credential_is_fallback_only() {
    let config = ServerConfig::default();
    let resolver = build_resolver(&config);

    assert!(!resolver.is_remote_configured());
}

#[tokio::test]
async fn test_resolver_with_configured_key_uses_remote() {
    std::env::remove_var("OPENAI_API_KEY");
    let config = ServerConfig {
        api_key: Some("sk-from-config".to_string()),
        ..ServerConfig::default()
    };
    let resolver = build_resolver(&config);

    assert!(resolver.is_remote_configured());
}

#[tokio::test]
async fn test_resolver_with_unusable_key_falls_back() {
    let config = ServerConfig {
        api_key: Some("sk-bad\nkey".to_string()),
        ..ServerConfig::default()
    };
    let resolver = build_resolver(&config);

    assert!(!resolver.is_remote_configured());
}
