use std::time::Duration;

use serde_json::json;
use triz_harness::gateway::gemini::{GeminiAdapter, GenerationConfig};
use triz_harness::gateway::{GenerativeGateway, ProviderError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter_for(server: &MockServer) -> GeminiAdapter {
    GeminiAdapter::with_config(
        "test-key",
        server.uri(),
        "gemini-2.0-flash-exp",
        Duration::from_secs(5),
        GenerationConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn gemini_joins_candidate_text_parts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash-exp:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hello " }, { "text": "world" }] },
                "finishReason": "STOP"
            }]
        })))
        .mount(&server)
        .await;

    let text = adapter_for(&server).generate("hi").await.unwrap();
    assert_eq!(text, "hello world");
}

#[tokio::test]
async fn gemini_sends_sampling_config() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash-exp:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "temperature": 0.7,
                "topP": 0.95,
                "maxOutputTokens": 8192
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "ok" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    adapter_for(&server).generate("hi").await.unwrap();
}

#[tokio::test]
async fn gemini_maps_429_to_quota_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "rate limited", "status": "RESOURCE_EXHAUSTED" }
        })))
        .mount(&server)
        .await;

    let err = adapter_for(&server).generate("hi").await.unwrap_err();
    match err {
        ProviderError::QuotaExhausted { message, context } => {
            assert_eq!(message, "rate limited");
            assert_eq!(context.http_status, Some(429));
            assert_eq!(context.provider_status.as_deref(), Some("RESOURCE_EXHAUSTED"));
        }
        other => panic!("expected QuotaExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn gemini_maps_403_to_auth_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "message": "key not valid", "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let err = adapter_for(&server).generate("hi").await.unwrap_err();
    assert!(matches!(err, ProviderError::AuthRejected { .. }));
    assert_eq!(err.code(), "auth_rejected");
}

#[tokio::test]
async fn gemini_maps_400_to_invalid_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "message": "bad payload", "status": "INVALID_ARGUMENT" }
        })))
        .mount(&server)
        .await;

    let err = adapter_for(&server).generate("hi").await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidRequest { .. }));
}

#[tokio::test]
async fn gemini_maps_unexpected_status_to_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = adapter_for(&server).generate("hi").await.unwrap_err();
    match err {
        ProviderError::Provider { provider, message, .. } => {
            assert_eq!(provider, "gemini");
            assert_eq!(message, "HTTP 503");
        }
        other => panic!("expected Provider, got {other:?}"),
    }
}

#[tokio::test]
async fn gemini_reports_empty_response_when_no_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = adapter_for(&server).generate("hi").await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyResponse(_)));
}

#[tokio::test]
async fn gemini_surfaces_blocked_prompt_feedback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let err = adapter_for(&server).generate("hi").await.unwrap_err();
    match err {
        ProviderError::EmptyResponse(message) => assert!(message.contains("SAFETY")),
        other => panic!("expected EmptyResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn gemini_rejects_safety_finish_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "partial" }] },
                "finishReason": "SAFETY"
            }]
        })))
        .mount(&server)
        .await;

    let err = adapter_for(&server).generate("hi").await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyResponse(_)));
}

#[tokio::test]
async fn gemini_truncates_oversized_response_on_a_char_boundary() {
    let server = MockServer::start().await;

    // 400k euro signs is 1.2MB; the 1MB cap falls mid-character.
    let oversized = "€".repeat(400_000);
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": oversized }] }
            }]
        })))
        .mount(&server)
        .await;

    let text = adapter_for(&server).generate("hi").await.unwrap();
    assert!(text.len() <= 1_024 * 1_024);
    assert!(text.chars().all(|c| c == '€'));
}

#[tokio::test]
async fn gemini_rejects_oversized_input_without_a_request() {
    let server = MockServer::start().await;
    // No mock mounted: an outbound request would 404 and fail differently.

    let prompt = "x".repeat(500_001);
    let err = adapter_for(&server).generate(&prompt).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidRequest { .. }));
}
