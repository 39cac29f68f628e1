//! Provider configuration
//!
//! One entry per upstream provider, in priority order. The backend family is
//! discriminated by the `provider` field and flattened into the entry, so
//! all fields appear at the same level in TOML. Model lists, base URLs,
//! timeouts and the paid flag fall back to per-family defaults.

use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-family defaults.
pub mod defaults {
    /// Self-hosted server models, best first.
    pub const OLLAMA_MODELS: &[&str] = &[
        "gemini-3-flash-preview:cloud",
        "qwen3-vl:235b-instruct-cloud",
        "gpt-oss:120b-cloud",
        "kimi-k2:1t-cloud",
    ];

    /// Groq models, best first.
    pub const GROQ_MODELS: &[&str] = &[
        "meta-llama/llama-4-scout-17b-16e-instruct",
        "llama-3.3-70b-versatile",
        "llama-3.1-8b-instant",
        "mixtral-8x7b-32768",
    ];

    /// OpenRouter models, best first.
    pub const OPENROUTER_MODELS: &[&str] = &[
        "stepfun/step-3.5-flash:free",
        "google/gemini-2.0-flash-exp:free",
        "mistralai/pixtral-12b:free",
        "meta-llama/llama-3.1-8b-instruct:free",
    ];

    /// OpenAI models, best first.
    pub const OPENAI_MODELS: &[&str] = &["gpt-4o-mini"];

    /// Per-attempt timeout for the self-hosted server.
    pub const OLLAMA_TIMEOUT_SECS: u64 = 60;
    /// Per-attempt timeout for Groq.
    pub const GROQ_TIMEOUT_SECS: u64 = 30;
    /// Per-attempt timeout for other hosted gateways.
    pub const GATEWAY_TIMEOUT_SECS: u64 = 60;

    /// Health probe timeout.
    pub const PROBE_TIMEOUT_SECS: u64 = 10;
}

/// Named provider configuration. Combines identity (`name`) and the model
/// cascade with the family-specific settings in `BackendConfig`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Unique name for this provider entry.
    pub name: String,
    /// Family-specific settings, discriminated by the `provider` field.
    #[serde(flatten)]
    pub backend: BackendConfig,
    /// Model identifiers, best first. Empty means the family defaults.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,
    /// Outbound proxy URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Per-attempt timeout override, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Whether calls cost money and need explicit permission per request.
    /// Defaults to true for OpenRouter only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_paid: Option<bool>,
}

/// Family-specific configuration, discriminated by the `provider` field
/// in TOML/JSON.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Self-hosted Ollama server, no key required.
    Ollama(LocalConfig),
    /// Groq hosted gateway.
    Groq(RemoteConfig),
    /// OpenRouter hosted gateway.
    #[serde(rename = "openrouter")]
    OpenRouter(RemoteConfig),
    /// OpenAI or any OpenAI-compatible API.
    #[serde(rename = "openai")]
    OpenAI(RemoteConfig),
}

/// Configuration for keyed hosted APIs.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RemoteConfig {
    /// API key (supports `${ENV_VAR}` expansion at the config-file layer).
    /// Empty means absent.
    #[serde(default)]
    pub api_key: String,
    /// Optional base URL override (everything before `/chat/completions`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Configuration for the self-hosted server.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LocalConfig {
    /// Optional base URL override. Defaults to `http://localhost:11434`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Create an entry with family defaults for everything but the name.
    pub fn new(name: impl Into<String>, backend: BackendConfig) -> Self {
        Self {
            name: name.into(),
            backend,
            models: Vec::new(),
            proxy: None,
            timeout_secs: None,
            external_paid: None,
        }
    }

    /// Human-readable family string for logging.
    pub fn kind(&self) -> &'static str {
        match &self.backend {
            BackendConfig::Ollama(_) => "ollama",
            BackendConfig::Groq(_) => "groq",
            BackendConfig::OpenRouter(_) => "openrouter",
            BackendConfig::OpenAI(_) => "openai",
        }
    }

    /// The model cascade, best first.
    pub fn models(&self) -> Vec<String> {
        if !self.models.is_empty() {
            return self.models.clone();
        }
        let defaults = match &self.backend {
            BackendConfig::Ollama(_) => defaults::OLLAMA_MODELS,
            BackendConfig::Groq(_) => defaults::GROQ_MODELS,
            BackendConfig::OpenRouter(_) => defaults::OPENROUTER_MODELS,
            BackendConfig::OpenAI(_) => defaults::OPENAI_MODELS,
        };
        defaults.iter().map(|m| (*m).to_owned()).collect()
    }

    /// Whether the family needs an API key.
    pub fn requires_key(&self) -> bool {
        !matches!(self.backend, BackendConfig::Ollama(_))
    }

    /// The API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        match &self.backend {
            BackendConfig::Ollama(_) => None,
            BackendConfig::Groq(rc) | BackendConfig::OpenRouter(rc) | BackendConfig::OpenAI(rc) => {
                Some(rc.api_key.trim()).filter(|key| !key.is_empty())
            }
        }
    }

    /// The per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        let secs = self.timeout_secs.unwrap_or(match &self.backend {
            BackendConfig::Ollama(_) => defaults::OLLAMA_TIMEOUT_SECS,
            BackendConfig::Groq(_) => defaults::GROQ_TIMEOUT_SECS,
            BackendConfig::OpenRouter(_) | BackendConfig::OpenAI(_) => {
                defaults::GATEWAY_TIMEOUT_SECS
            }
        });
        Duration::from_secs(secs)
    }

    /// Whether this provider is external/paid.
    pub fn external_paid(&self) -> bool {
        self.external_paid
            .unwrap_or(matches!(self.backend, BackendConfig::OpenRouter(_)))
    }

    /// Check the entry for mistakes that make it unusable.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.name.trim().is_empty(), "provider name must not be empty");
        ensure!(
            self.models.iter().all(|m| !m.trim().is_empty()),
            "provider '{}' has a blank model identifier",
            self.name
        );
        if self.timeout_secs == Some(0) {
            bail!("provider '{}' has a zero timeout", self.name);
        }
        Ok(())
    }
}

/// Dispatcher settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DispatchConfig {
    /// Upper bound on one whole dispatch, in seconds. `None` leaves it
    /// bounded only by the sum of per-attempt timeouts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_secs: Option<u64>,
    /// Health probe timeout at startup, in seconds.
    pub probe_timeout_secs: u64,
    /// Stop the whole dispatch on a fatal classification instead of moving
    /// to the next provider.
    pub halt_on_fatal: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            deadline_secs: None,
            probe_timeout_secs: defaults::PROBE_TIMEOUT_SECS,
            halt_on_fatal: false,
        }
    }
}

impl DispatchConfig {
    /// The overall dispatch deadline.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }

    /// The health probe timeout.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Check the settings for values that make every dispatch fail.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.probe_timeout_secs > 0, "probe timeout must be positive");
        ensure!(self.deadline_secs != Some(0), "dispatch deadline must be positive");
        Ok(())
    }
}
