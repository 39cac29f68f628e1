//! Tests for request building, prompt truncation and response normalization.

use cascade_llm::{CompletionRequest, GenerationParams, ProviderError, Response, truncate_prompt};
use serde_json::json;

#[test]
fn request_defaults_to_free_providers() {
    let req = CompletionRequest::new("summarize this");
    assert_eq!(req.prompt, "summarize this");
    assert!(!req.allow_paid);
    assert!(req.params.is_empty());
}

#[test]
fn params_serialize_flat() {
    let params = GenerationParams::new()
        .temperature(0.2)
        .max_tokens(512)
        .set("top_p", 0.9);
    let value = serde_json::to_value(&params).unwrap();
    assert_eq!(value, json!({ "max_tokens": 512, "temperature": 0.2, "top_p": 0.9 }));
}

#[test]
fn request_deserializes_without_optional_fields() {
    let req: CompletionRequest = serde_json::from_str(r#"{"prompt": "hi"}"#).unwrap();
    assert!(!req.allow_paid);
    assert!(req.params.is_empty());
}

#[test]
fn truncate_keeps_char_boundaries() {
    assert_eq!(truncate_prompt("привет мир", 6), "привет");
    assert_eq!(truncate_prompt("short", 100), "short");
    assert_eq!(truncate_prompt("", 3), "");
}

#[test]
fn response_reads_chat_shape() {
    let body = json!({ "choices": [{ "message": { "role": "assistant", "content": "done" } }] });
    let response = Response::from_body(body.clone()).unwrap();
    assert_eq!(response.content, "done");
    assert_eq!(response.body, body);
}

#[test]
fn response_reads_generate_shape() {
    let response = Response::from_body(json!({ "model": "m", "response": "ok", "done": true }))
        .unwrap();
    assert_eq!(response.content, "ok");
}

#[test]
fn response_without_text_is_decode_error() {
    let err = Response::from_body(json!({ "choices": [] })).unwrap_err();
    assert!(matches!(err, ProviderError::Decode(_)));
}
