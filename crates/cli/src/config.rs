//! Configuration for the CLI

use anyhow::{Context, Result};
use provider::{BackendConfig, DispatchConfig, ProviderConfig, config::{LocalConfig, RemoteConfig}};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The `cascade.toml` file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Provider names to use, in priority order. Absent means every
    /// configured provider in file order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,

    /// Dispatcher settings.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Provider entries.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl Config {
    /// Parse a TOML string, expanding `${VAR}` references first.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded)?;
        config.dispatch.validate()?;
        Ok(config)
    }

    /// Load the configuration from the file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Save the configuration to the file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// The providers to boot, in priority order.
    ///
    /// `order` overrides the file's `order` list when non-empty. Unknown
    /// names are warned about and ignored.
    pub fn ordered(&self, order: &[String]) -> Vec<ProviderConfig> {
        let names = match (order, &self.order) {
            ([], None) => return self.providers.clone(),
            ([], Some(names)) => names.as_slice(),
            (names, _) => names,
        };

        names
            .iter()
            .filter_map(|name| {
                let found = self.providers.iter().find(|p| &p.name == name);
                if found.is_none() {
                    tracing::warn!("unknown provider {name} in order, ignoring");
                }
                found.cloned()
            })
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        let keyed = |var: &str| RemoteConfig {
            api_key: format!("${{{var}}}"),
            base_url: None,
        };
        Self {
            order: None,
            dispatch: DispatchConfig::default(),
            providers: vec![
                ProviderConfig::new("ollama", BackendConfig::Ollama(LocalConfig::default())),
                ProviderConfig::new("groq", BackendConfig::Groq(keyed("GROQ_API_KEY"))),
                ProviderConfig::new(
                    "openrouter",
                    BackendConfig::OpenRouter(keyed("OPENROUTER_API_KEY")),
                ),
            ],
        }
    }
}

/// Expand `${VAR}` patterns with environment variable values.
///
/// Unknown variables are replaced with an empty string.
pub fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            rest = &rest[start..];
            break;
        };
        if let Ok(value) = std::env::var(&after[..end]) {
            result.push_str(&value);
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}
