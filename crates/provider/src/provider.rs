//! Provider implementation
//!
//! `Backend` is the enum dispatch over the upstream API families.
//! `Provider` pairs a backend with its ordered model list; `Cascade` is the
//! cursor into that list, owned by whoever is walking it.

use crate::config::{BackendConfig, ProviderConfig};
use anyhow::{Result, ensure};
use llm::{CompletionRequest, GenerationParams, LLM, ProviderError, Response};
use ollama::Ollama;
use openai::OpenAI;
use std::{fmt, time::Duration};

/// Unified backend enum.
///
/// Dispatcher and registry never branch on the variant; they only use the
/// `LLM` impl.
#[derive(Clone)]
pub enum Backend {
    /// Ollama native generate API.
    Ollama(Ollama),
    /// OpenAI-compatible chat completions (Groq, OpenRouter, OpenAI).
    OpenAI(OpenAI),
}

impl LLM for Backend {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Response, ProviderError> {
        match self {
            Self::Ollama(p) => p.complete(model, prompt, params).await,
            Self::OpenAI(p) => p.complete(model, prompt, params).await,
        }
    }

    async fn probe(&self, model: &str, timeout: Duration) -> Result<(), ProviderError> {
        match self {
            Self::Ollama(p) => p.probe(model, timeout).await,
            Self::OpenAI(p) => p.probe(model, timeout).await,
        }
    }
}

/// Construct a `Backend` from config, with its own HTTP client carrying
/// the per-attempt timeout and proxy.
pub fn build_backend(config: &ProviderConfig) -> Result<Backend> {
    let client = llm::client(config.timeout(), config.proxy.as_deref())?;
    let key = config.api_key().unwrap_or_default();
    let backend = match &config.backend {
        BackendConfig::Ollama(lc) => match &lc.base_url {
            Some(url) => Backend::Ollama(Ollama::custom(client, url)),
            None => Backend::Ollama(Ollama::local(client)),
        },
        BackendConfig::Groq(rc) => match &rc.base_url {
            Some(url) => Backend::OpenAI(OpenAI::custom(client, key, url)?),
            None => Backend::OpenAI(OpenAI::groq(client, key)?),
        },
        BackendConfig::OpenRouter(rc) => match &rc.base_url {
            Some(url) => Backend::OpenAI(OpenAI::openrouter_at(client, key, url)?),
            None => Backend::OpenAI(OpenAI::openrouter(client, key)?),
        },
        BackendConfig::OpenAI(rc) => match &rc.base_url {
            Some(url) => Backend::OpenAI(OpenAI::custom(client, key, url)?),
            None => Backend::OpenAI(OpenAI::api(client, key)?),
        },
    };
    Ok(backend)
}

/// Construct a `Provider` from a validated config.
pub fn build_provider(config: &ProviderConfig) -> Result<Provider> {
    config.validate()?;
    Provider::new(
        config.name.clone(),
        config.models(),
        config.external_paid(),
        build_backend(config)?,
    )
}

/// One upstream endpoint and its ordered candidate models.
///
/// Immutable once built, so it can be shared by any number of concurrent
/// dispatches.
#[derive(Clone)]
pub struct Provider<B = Backend> {
    name: String,
    models: Vec<String>,
    external_paid: bool,
    backend: B,
}

impl<B> Provider<B> {
    /// Create a provider. `models` must be non-empty, best first.
    pub fn new(
        name: impl Into<String>,
        models: Vec<String>,
        external_paid: bool,
        backend: B,
    ) -> Result<Self> {
        let name = name.into();
        ensure!(!models.is_empty(), "provider '{name}' has no models");
        Ok(Self {
            name,
            models,
            external_paid,
            backend,
        })
    }

    /// The provider name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The model cascade, best first.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Whether requests must opt in before this provider is used.
    pub fn is_external_paid(&self) -> bool {
        self.external_paid
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// A fresh cursor positioned on the best model.
    pub fn cascade(&self) -> Cascade<'_> {
        Cascade::new(&self.models)
    }
}

impl<B: LLM> Provider<B> {
    /// Probe the first model with a minimal request.
    pub async fn health_check(&self, timeout: Duration) -> Result<(), ProviderError> {
        self.backend.probe(&self.models[0], timeout).await
    }

    /// One completion attempt against `model`. Never retries.
    pub async fn complete(
        &self,
        model: &str,
        request: &CompletionRequest,
    ) -> Result<Response, ProviderError> {
        self.backend
            .complete(model, &request.prompt, &request.params)
            .await
    }
}

impl<B> fmt::Debug for Provider<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("models", &self.models)
            .field("external_paid", &self.external_paid)
            .finish()
    }
}

/// Cursor into a provider's model list.
///
/// The cursor is always a valid index or equal to the list length, which
/// means the cascade is exhausted.
#[derive(Debug, Clone)]
pub struct Cascade<'a> {
    models: &'a [String],
    cursor: usize,
}

impl<'a> Cascade<'a> {
    /// Start a cascade on the first model.
    pub fn new(models: &'a [String]) -> Self {
        Self { models, cursor: 0 }
    }

    /// The model the cursor points at, `None` once exhausted.
    pub fn current(&self) -> Option<&'a str> {
        self.models.get(self.cursor).map(String::as_str)
    }

    /// Move to the next model. Returns false once the list is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.models.len() {
            self.cursor += 1;
        }
        self.cursor < self.models.len()
    }

    /// Go back to the first model.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Index of the current model.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Whether every model has been tried.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.models.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Cascade;

    fn models() -> Vec<String> {
        vec!["a1".into(), "a2".into()]
    }

    #[test]
    fn cascade_walks_models_in_order() {
        let models = models();
        let mut cascade = Cascade::new(&models);
        assert_eq!(cascade.current(), Some("a1"));
        assert!(cascade.advance());
        assert_eq!(cascade.current(), Some("a2"));
        assert_eq!(cascade.position(), 1);
        assert!(!cascade.advance());
        assert!(cascade.is_exhausted());
        assert_eq!(cascade.current(), None);
    }

    #[test]
    fn cascade_stays_exhausted() {
        let models = models();
        let mut cascade = Cascade::new(&models);
        while cascade.advance() {}
        assert!(!cascade.advance());
        assert_eq!(cascade.position(), models.len());
    }

    #[test]
    fn cascade_reset_returns_to_best_model() {
        let models = models();
        let mut cascade = Cascade::new(&models);
        cascade.advance();
        cascade.advance();
        cascade.reset();
        assert_eq!(cascade.current(), Some("a1"));
    }

    #[test]
    fn cursors_are_independent() {
        let models = models();
        let mut first = Cascade::new(&models);
        let second = Cascade::new(&models);
        first.advance();
        assert_eq!(first.current(), Some("a2"));
        assert_eq!(second.current(), Some("a1"));
    }
}
