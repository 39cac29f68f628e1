//! Normalized single-attempt response.

use crate::ProviderError;
use serde_json::Value;

/// Text produced by one successful attempt, plus the raw upstream body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The generated text.
    pub content: String,

    /// The upstream JSON body, untouched.
    pub body: Value,
}

impl Response {
    /// Normalize an upstream body.
    ///
    /// Chat-style bodies carry the text at `choices[0].message.content`;
    /// generate-style bodies carry it as a flat `response` string.
    pub fn from_body(body: Value) -> Result<Self, ProviderError> {
        let content = body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .or_else(|| body.get("response").and_then(Value::as_str))
            .map(str::to_owned);

        match content {
            Some(content) => Ok(Self { content, body }),
            None => Err(ProviderError::Decode(format!(
                "no completion text in response: {}",
                preview(&body)
            ))),
        }
    }
}

fn preview(body: &Value) -> String {
    let text = body.to_string();
    crate::truncate_prompt(&text, 200).to_owned()
}
