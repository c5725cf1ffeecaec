mod common;

use axum::http::{Method, StatusCode};
use common::{config_with_key, MockUpstream};
use prompt_client::{GenerationError, PromptClient, PromptStyle};
use prompt_gateway::{GatewayRequest, GenerationService, InProcessService};
use serde_json::json;

fn post(body: &'static str) -> GatewayRequest {
    GatewayRequest::new(Method::POST, body)
}

#[tokio::test]
async fn round_trip_returns_extracted_text() {
    let upstream = MockUpstream::replying(json!({ "candidates": [{ "content": [{ "text": "Hello" }] }] }));
    let service = GenerationService::new(upstream.clone(), &config_with_key(Some("secret")));

    let response = service
        .handle(post(r#"{"topic":"test","style":"Concise"}"#))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Some(json!({ "text": "Hello" })));
    assert_eq!(upstream.call_count(), 1);

    let (api_key, instruction) = &upstream.calls()[0];
    assert_eq!(api_key, "secret");
    assert!(instruction.user.contains("\"test\""));
    assert!(instruction.system.contains("Style requested: Concise"));
}

#[tokio::test]
async fn missing_topic_is_rejected_without_upstream_call() {
    let upstream = MockUpstream::replying(json!({ "text": "unused" }));
    let service = GenerationService::new(upstream.clone(), &config_with_key(Some("secret")));

    for body in [
        r#"{"style":"Concise"}"#,
        r#"{"topic":"","style":"Concise"}"#,
        r#"{"topic":"   "}"#,
        r#"{"topic":42}"#,
        r#"["topic"]"#,
        "",
    ] {
        let response = service.handle(post(body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response.body, Some(json!({ "error": "Missing topic" })));
    }

    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let upstream = MockUpstream::replying(json!({ "text": "unused" }));
    let service = GenerationService::new(upstream.clone(), &config_with_key(Some("secret")));

    let response = service.handle(post("{topic: nope")).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, Some(json!({ "error": "Invalid JSON" })));
    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn overlong_topic_is_rejected() {
    let upstream = MockUpstream::replying(json!({ "text": "unused" }));
    let mut config = config_with_key(Some("secret"));
    config.max_topic_chars = 5;
    let service = GenerationService::new(upstream.clone(), &config);

    let response = service.handle(post(r#"{"topic":"sixsix"}"#)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, Some(json!({ "error": "Topic too long" })));
    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn wrong_method_is_405() {
    let upstream = MockUpstream::replying(json!({ "text": "unused" }));
    let service = GenerationService::new(upstream.clone(), &config_with_key(Some("secret")));

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let response = service
            .handle(GatewayRequest::new(method, r#"{"topic":"x"}"#))
            .await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.body, Some(json!({ "error": "Method not allowed" })));
    }
    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn preflight_is_empty_204() {
    let upstream = MockUpstream::replying(json!({ "text": "unused" }));
    let service = GenerationService::new(upstream.clone(), &config_with_key(None));

    let response = service.handle(GatewayRequest::new(Method::OPTIONS, "")).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(response.body, None);
    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn missing_credential_is_a_configuration_error() {
    let upstream = MockUpstream::replying(json!({ "text": "unused" }));
    let service = GenerationService::new(upstream.clone(), &config_with_key(Some("  ")));

    let response = service.handle(post(r#"{"topic":"x"}"#)).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        Some(json!({ "error": "Server not configured: GENAI_API_KEY missing" }))
    );
    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn upstream_status_is_propagated() {
    let upstream = MockUpstream::failing(429, r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#);
    let service = GenerationService::new(upstream.clone(), &config_with_key(Some("secret")));

    let response = service.handle(post(r#"{"topic":"x"}"#)).await;

    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    let message = response.body.unwrap()["error"].as_str().unwrap().to_string();
    assert!(message.starts_with("Upstream error (429): "));
    assert!(message.contains("RESOURCE_EXHAUSTED"));
    assert_eq!(upstream.call_count(), 1);
}

#[tokio::test]
async fn unknown_shape_is_returned_as_raw_json() {
    let upstream = MockUpstream::replying(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
    let service = GenerationService::new(upstream.clone(), &config_with_key(Some("secret")));

    let response = service.handle(post(r#"{"topic":"x"}"#)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        Some(json!({ "text": r#"{"promptFeedback":{"blockReason":"SAFETY"}}"# }))
    );
}

#[tokio::test]
async fn missing_style_defaults_to_structured_label() {
    let upstream = MockUpstream::replying(json!({ "text": "ok" }));
    let service = GenerationService::new(upstream.clone(), &config_with_key(Some("secret")));

    service.handle(post(r#"{"topic":"x","style":null}"#)).await;

    let (_, instruction) = &upstream.calls()[0];
    assert!(instruction.system.contains("Style requested: Structured (CO-STAR)"));
    assert!(instruction.system.contains("# Role, # Context"));
}

#[tokio::test]
async fn in_process_client_shares_the_pipeline() {
    let upstream = MockUpstream::replying(json!({ "candidates": [{ "text": "Act as a historian." }] }));
    let service = GenerationService::new(upstream.clone(), &config_with_key(Some("secret")));
    let client = PromptClient::new(InProcessService::new(service));

    let text = client.generate("  rome  ", PromptStyle::Academic).await.unwrap();

    assert_eq!(text, "Act as a historian.");
    let (_, instruction) = &upstream.calls()[0];
    assert!(instruction.user.contains("\"rome\""));
    assert!(instruction.system.contains("request citations/reasoning"));

    let err = client.generate(" ", PromptStyle::Academic).await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyTopic));
    assert_eq!(upstream.call_count(), 1);
}

#[tokio::test]
async fn in_process_client_maps_upstream_failures() {
    let upstream = MockUpstream::failing(503, "overloaded");
    let service = GenerationService::new(upstream.clone(), &config_with_key(Some("secret")));
    let client = PromptClient::new(InProcessService::new(service));

    let err = client.generate("rome", PromptStyle::Concise).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("Upstream error (503): overloaded"));
}
