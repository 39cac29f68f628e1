//! Shared completion types and traits.
//!
//! This crate provides the types every backend speaks: `CompletionRequest`,
//! `GenerationParams`, `Response`, `ProviderError`, and the `LLM` trait.
//! Also provides `HttpProvider`, the JSON-over-HTTP transport shared by the
//! self-hosted and hosted backends, and `client()` for building one
//! `reqwest::Client` per provider.

pub use error::ProviderError;
pub use http::{HttpProvider, client};
pub use provider::LLM;
pub use request::{CompletionRequest, DEFAULT_PROMPT_CHARS, GenerationParams, truncate_prompt};
pub use reqwest::{self, Client};
pub use response::Response;

mod error;
mod http;
mod provider;
mod request;
mod response;
