//! Tests for OpenAI-compatible constructors and wire shape.

use cascade_openai::{OpenAI, base};
use llm::{GenerationParams, LLM, ProviderError};
use serde_json::json;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

#[test]
fn groq_uses_default_endpoint() {
    let provider = OpenAI::groq(llm::Client::new(), "k").expect("provider");
    assert_eq!(
        provider.endpoint(),
        "https://api.groq.com/openai/v1/chat/completions"
    );
}

#[test]
fn custom_constructor_sets_endpoint() {
    let provider =
        OpenAI::custom(llm::Client::new(), "k", "http://localhost:9999/v1/").expect("provider");
    assert_eq!(provider.endpoint(), "http://localhost:9999/v1/chat/completions");
}

#[test]
fn openrouter_sends_attribution_headers() {
    let provider = OpenAI::openrouter(llm::Client::new(), "k").expect("provider");
    assert_eq!(
        provider.endpoint(),
        format!("{}/chat/completions", base::OPENROUTER)
    );
    assert!(provider.headers().get("http-referer").is_some());
    assert!(provider.headers().get("x-title").is_some());
}

#[tokio::test]
async fn complete_wraps_prompt_as_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "llama-3.3-70b-versatile",
            "messages": [{ "role": "user", "content": "categorize" }],
            "max_tokens": 64
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Rust, CLI" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAI::custom(
        llm::Client::new(),
        "sk-test",
        &format!("{}/v1", server.uri()),
    )
    .unwrap();
    let params = GenerationParams::new().max_tokens(64);
    let response = provider
        .complete("llama-3.3-70b-versatile", "categorize", &params)
        .await
        .unwrap();
    assert_eq!(response.content, "Rust, CLI");
}

#[tokio::test]
async fn probe_requests_a_single_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "max_tokens": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "h" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAI::custom(llm::Client::new(), "k", &server.uri()).unwrap();
    provider.probe("m", Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn unauthorized_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Invalid API Key", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let provider = OpenAI::custom(llm::Client::new(), "bad", &server.uri()).unwrap();
    let err = provider
        .complete("m", "hi", &GenerationParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn in_body_rate_limit_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": 429, "message": "Rate limit exceeded: free-models-per-day" }
        })))
        .mount(&server)
        .await;

    let provider = OpenAI::openrouter_at(llm::Client::new(), "k", &server.uri()).unwrap();
    let err = provider
        .complete("stepfun/step-3.5-flash:free", "hi", &GenerationParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 429, .. }));
}
