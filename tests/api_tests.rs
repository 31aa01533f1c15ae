use gemini_relay::message::{ChatResponse, ErrorResponse};
use gemini_relay::routes::create_router;
use gemini_relay::services::generator::{TextGenerator, UpstreamError};
use gemini_relay::state::AppState;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

/// Answers every prompt from a fixed table and remembers what it was asked.
#[derive(Default)]
struct ScriptedGenerator {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match prompt {
            "2+2" => Ok("4".to_string()),
            other => Ok(format!("echo: {}", other)),
        }
    }
}

#[derive(Default)]
struct FailingGenerator {
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate_text(&self, _prompt: &str) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(UpstreamError::Status {
            status: 429,
            body: "quota exceeded".to_string(),
        })
    }
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_chat_endpoint_relays_message() {
    let generator = Arc::new(ScriptedGenerator::default());
    let state = Arc::new(AppState::new(generator.clone()));
    let app = create_router().with_state(state);

    let response = app.oneshot(chat_request(r#"{"input": "2+2"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(json, serde_json::json!({ "message": "4" }));
    assert_eq!(*generator.prompts.lock().unwrap(), vec!["2+2".to_string()]);
}

#[tokio::test]
async fn test_prompt_is_forwarded_verbatim() {
    let generator = Arc::new(ScriptedGenerator::default());
    let state = Arc::new(AppState::new(generator.clone()));
    let app = create_router().with_state(state);

    let response = app
        .oneshot(chat_request(r#"{"input": "  spaced\nout  "}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let chat_resp: ChatResponse = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(chat_resp.message, "echo:   spaced\nout  ");
    assert_eq!(generator.prompts.lock().unwrap()[0], "  spaced\nout  ");
}

#[tokio::test]
async fn test_upstream_failure_returns_generic_500() {
    let generator = Arc::new(FailingGenerator::default());
    let state = Arc::new(AppState::new(generator.clone()));
    let app = create_router().with_state(state);

    let response = app.oneshot(chat_request(r#"{"input": "hello"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    // The upstream reason (quota) must not leak to the caller.
    assert_eq!(
        json,
        serde_json::json!({ "error": "Failed to generate response" })
    );
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unusable_body_gets_generic_500() {
    let generator = Arc::new(ScriptedGenerator::default());
    let state = Arc::new(AppState::new(generator.clone()));
    let app = create_router().with_state(state);

    for body in ["{}", r#"{"input": 42}"#, "not json", r#"{"message": "hi"}"#] {
        let response = app.clone().oneshot(chat_request(body)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "body: {}",
            body
        );

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let err: ErrorResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(err.error, "Failed to generate response");
    }
    assert!(generator.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_requests_are_independent() {
    let generator = Arc::new(ScriptedGenerator::default());
    let state = Arc::new(AppState::new(generator.clone()));
    let app = create_router().with_state(state);

    let (a, b) = tokio::join!(
        app.clone().oneshot(chat_request(r#"{"input": "first"}"#)),
        app.clone().oneshot(chat_request(r#"{"input": "second"}"#)),
    );

    for (response, expected) in [(a.unwrap(), "echo: first"), (b.unwrap(), "echo: second")] {
        assert_eq!(response.status(), StatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let chat_resp: ChatResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(chat_resp.message, expected);
    }
    assert_eq!(generator.prompts.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let state = Arc::new(AppState::new(Arc::new(ScriptedGenerator::default())));
    let app = create_router().with_state(state);

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/chat")
        .header("origin", "https://somewhere.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(preflight).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("GET"));
    assert!(methods.contains("POST"));
    let allowed = headers["access-control-allow-headers"].to_str().unwrap();
    assert!(allowed.eq_ignore_ascii_case("content-type"));
}

#[tokio::test]
async fn test_health() {
    let state = Arc::new(AppState::new(Arc::new(ScriptedGenerator::default())));
    let app = create_router().with_state(state);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body_bytes[..], b"OK");
}
