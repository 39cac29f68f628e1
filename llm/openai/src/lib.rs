//! OpenAI-compatible hosted gateway backend.
//!
//! Covers Groq, OpenRouter, OpenAI and any other service exposing the
//! OpenAI chat completions API.

use anyhow::Result;
use llm::{Client, HttpProvider};
pub use request::Request;

mod provider;
mod request;

/// OpenAI-compatible API base URLs.
pub mod base {
    /// Groq.
    pub const GROQ: &str = "https://api.groq.com/openai/v1";
    /// OpenRouter.
    pub const OPENROUTER: &str = "https://openrouter.ai/api/v1";
    /// OpenAI.
    pub const OPENAI: &str = "https://api.openai.com/v1";
}

/// Attribution headers OpenRouter uses to identify the calling app.
pub mod attribution {
    /// Sent as `HTTP-Referer`.
    pub const REFERER: &str = "http://localhost:8000";
    /// Sent as `X-Title`.
    pub const TITLE: &str = "Bookmark AI";
}

/// An OpenAI-compatible completion gateway.
#[derive(Clone)]
pub struct OpenAI {
    http: HttpProvider,
}

impl OpenAI {
    /// Create a provider targeting Groq.
    pub fn groq(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, key, base::GROQ)
    }

    /// Create a provider targeting OpenRouter, with attribution headers.
    pub fn openrouter(client: Client, key: &str) -> Result<Self> {
        Self::openrouter_at(client, key, base::OPENROUTER)
    }

    /// Create a provider targeting an OpenRouter-style gateway at `base_url`.
    pub fn openrouter_at(client: Client, key: &str, base_url: &str) -> Result<Self> {
        let http = HttpProvider::bearer(client, key, &endpoint(base_url))?
            .with_header("http-referer", attribution::REFERER)?
            .with_header("x-title", attribution::TITLE)?;
        Ok(Self { http })
    }

    /// Create a provider targeting the OpenAI API.
    pub fn api(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, key, base::OPENAI)
    }

    /// Create a provider targeting a custom OpenAI-compatible base URL
    /// (everything before `/chat/completions`).
    pub fn custom(client: Client, key: &str, base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpProvider::bearer(client, key, &endpoint(base_url))?,
        })
    }

    /// Get the chat completions endpoint URL.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }

    /// Get the request headers.
    pub fn headers(&self) -> &llm::reqwest::header::HeaderMap {
        self.http.headers()
    }
}

fn endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}
