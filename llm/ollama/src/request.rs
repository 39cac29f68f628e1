//! Generate request body.

use llm::GenerationParams;
use serde::Serialize;
use serde_json::{Value, json};

/// Ollama `/api/generate` request body.
#[derive(Debug, Clone, Serialize)]
pub struct Request<'a> {
    /// The model identifier.
    pub model: &'a str,
    /// The prompt text.
    pub prompt: &'a str,
    /// Always false: responses are awaited whole.
    pub stream: bool,
    /// Runtime options (e.g. `num_predict`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    /// Caller parameters, flattened next to the fields above.
    #[serde(flatten)]
    pub params: &'a GenerationParams,
}

impl<'a> Request<'a> {
    /// Build a non-streaming generate request.
    pub fn new(model: &'a str, prompt: &'a str, params: &'a GenerationParams) -> Self {
        Self {
            model,
            prompt,
            stream: false,
            options: None,
            params,
        }
    }

    /// Limit generation to `tokens` tokens.
    pub fn num_predict(mut self, tokens: u32) -> Self {
        self.options = Some(json!({ "num_predict": tokens }));
        self
    }
}
