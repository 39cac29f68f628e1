//! Chat completions request body.

use llm::GenerationParams;
use serde::Serialize;

/// A single chat message.
#[derive(Debug, Clone, Serialize)]
pub struct Message<'a> {
    /// Always `user`: calls are single-shot.
    pub role: &'static str,
    /// The message text.
    pub content: &'a str,
}

/// OpenAI-compatible chat completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct Request<'a> {
    /// The model identifier.
    pub model: &'a str,
    /// The messages to send.
    pub messages: [Message<'a>; 1],
    /// Caller parameters, flattened next to the fields above.
    #[serde(flatten)]
    pub params: &'a GenerationParams,
}

impl<'a> Request<'a> {
    /// Wrap `prompt` as the single user message.
    pub fn new(model: &'a str, prompt: &'a str, params: &'a GenerationParams) -> Self {
        Self {
            model,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
            params,
        }
    }
}
