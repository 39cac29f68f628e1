//! Completion request and generation parameters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prompt length, in characters, that every configured provider accepts.
pub const DEFAULT_PROMPT_CHARS: usize = 10_000;

/// Free-form generation parameters (temperature, max output size, ...).
///
/// Passed through opaquely: backends flatten the map into their request
/// body next to `model` and the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationParams(Map<String, Value>);

impl GenerationParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary parameter.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(self, temperature: f64) -> Self {
        self.set("temperature", temperature)
    }

    /// Set the maximum number of tokens to generate.
    pub fn max_tokens(self, max_tokens: u64) -> Self {
        self.set("max_tokens", max_tokens)
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// One single-shot completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The prompt text.
    pub prompt: String,

    /// Whether providers marked external/paid may serve this call.
    #[serde(default)]
    pub allow_paid: bool,

    /// Generation parameters passed to the provider.
    #[serde(default, skip_serializing_if = "GenerationParams::is_empty")]
    pub params: GenerationParams,
}

impl CompletionRequest {
    /// Create a request that stays on free providers.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            allow_paid: false,
            params: GenerationParams::default(),
        }
    }

    /// Allow or forbid falling back to paid providers.
    pub fn allow_paid(mut self, allow: bool) -> Self {
        self.allow_paid = allow;
        self
    }

    /// Replace the generation parameters.
    pub fn params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

/// Cut `text` to at most `max_chars` characters, on a char boundary.
pub fn truncate_prompt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
