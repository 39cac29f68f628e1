//! The admitted providers, in configured order.
//!
//! Boot is two-phase: configs become candidate providers, then every
//! candidate is probed and the survivors form the registry. Nothing mutates
//! the registry afterwards; clones share the same provider list.

use crate::{
    config::ProviderConfig,
    provider::{Backend, Provider, build_provider},
};
use futures_util::future::join_all;
use llm::LLM;
use serde::Serialize;
use std::{fmt, sync::Arc, time::Duration};

/// Read-only, ordered set of providers that passed health admission.
pub struct Registry<B = Backend> {
    providers: Arc<[Provider<B>]>,
}

/// Snapshot of one admitted provider returned by `describe()`.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInfo {
    /// Provider name.
    pub name: String,
    /// Model cascade, best first.
    pub models: Vec<String>,
    /// Whether requests must opt in to use it.
    pub external_paid: bool,
}

impl Registry {
    /// Build candidates from `configs` and admit the healthy ones.
    ///
    /// Keyed providers without a key are skipped without probing; configs
    /// that fail to build are skipped with an error. An empty result is a
    /// valid registry.
    pub async fn initialize(configs: &[ProviderConfig], probe_timeout: Duration) -> Self {
        let mut candidates = Vec::with_capacity(configs.len());
        for config in configs {
            if config.requires_key() && config.api_key().is_none() {
                tracing::warn!("API key for provider {} not found, skipping", config.name);
                continue;
            }
            match build_provider(config) {
                Ok(provider) => candidates.push(provider),
                Err(e) => tracing::error!("failed to initialize provider {}: {e:#}", config.name),
            }
        }
        Self::admit(candidates, probe_timeout).await
    }
}

impl<B: LLM> Registry<B> {
    /// Probe every candidate concurrently and keep the healthy ones in
    /// their original order.
    pub async fn admit(candidates: Vec<Provider<B>>, probe_timeout: Duration) -> Self {
        for candidate in &candidates {
            tracing::info!("checking provider {}...", candidate.name());
        }
        let probes = join_all(
            candidates
                .iter()
                .map(|provider| provider.health_check(probe_timeout)),
        )
        .await;

        let admitted = candidates
            .into_iter()
            .zip(probes)
            .filter_map(|(provider, probe)| match probe {
                Ok(()) => {
                    tracing::info!("provider {} admitted", provider.name());
                    Some(provider)
                }
                Err(e) => {
                    tracing::warn!("provider {} failed health check: {e}", provider.name());
                    None
                }
            })
            .collect::<Vec<_>>();

        if admitted.is_empty() {
            tracing::error!("no provider is available, completions will fail");
        }
        Self::from_providers(admitted)
    }

    /// Build a registry from already-trusted providers, without probing.
    pub fn from_providers(providers: Vec<Provider<B>>) -> Self {
        Self {
            providers: providers.into(),
        }
    }

    /// The admitted providers, in priority order.
    pub fn list(&self) -> &[Provider<B>] {
        &self.providers
    }

    /// Number of admitted providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider was admitted.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Describe the admitted providers.
    pub fn describe(&self) -> Vec<ProviderInfo> {
        self.providers
            .iter()
            .map(|provider| ProviderInfo {
                name: provider.name().to_owned(),
                models: provider.models().to_vec(),
                external_paid: provider.is_external_paid(),
            })
            .collect()
    }
}

impl<B> Clone for Registry<B> {
    fn clone(&self) -> Self {
        Self {
            providers: Arc::clone(&self.providers),
        }
    }
}

impl<B> fmt::Debug for Registry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
