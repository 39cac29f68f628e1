//! Self-hosted inference server backend.
//!
//! Talks to Ollama's native generate API (`/api/generate`), which takes a
//! flat prompt and answers with a flat `response` string. No API key.

use llm::{Client, HttpProvider};
pub use request::Request;

mod provider;
mod request;

/// Default server address.
pub const BASE_URL: &str = "http://localhost:11434";

/// An Ollama server.
#[derive(Clone)]
pub struct Ollama {
    http: HttpProvider,
}

impl Ollama {
    /// Target a server on the default local address.
    pub fn local(client: Client) -> Self {
        Self::custom(client, BASE_URL)
    }

    /// Target a server at `base_url` (scheme, host and port).
    pub fn custom(client: Client, base_url: &str) -> Self {
        let endpoint = format!("{}/api/generate", base_url.trim_end_matches('/'));
        Self {
            http: HttpProvider::no_auth(client, &endpoint),
        }
    }

    /// Get the generate endpoint URL.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }
}
