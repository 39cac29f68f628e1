//! Completion dispatcher.
//!
//! `submit()` walks the registry in order. For each eligible provider it
//! walks the model cascade from the best model, one awaited attempt at a
//! time, until an attempt succeeds or the classifier says to move on. The
//! first success wins; when nothing succeeds the caller gets a
//! `DispatchError` carrying a `Report` of every attempt.
//!
//! The cascade cursor is local to the call, so any number of `submit()`
//! calls may share one dispatcher. Dropping a `submit()` future drops the
//! in-flight request with it and abandons the rest of the cascade.

use crate::{
    classify::{Action, Classifier, classify},
    config::DispatchConfig,
    provider::Backend,
    registry::Registry,
    report::{Attempt, Outcome, Report},
};
use llm::{CompletionRequest, LLM, ProviderError};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// A successful dispatch.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Provider that answered.
    pub provider: String,
    /// Model that answered.
    pub model: String,
    /// The generated text.
    pub content: String,
    /// The raw upstream body.
    pub body: Value,
    /// Network attempts this dispatch made, the successful one included.
    pub attempts: usize,
}

impl Completion {
    /// Parse the generated text as JSON.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(self.content.trim())
    }
}

/// Terminal dispatch failures.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// No provider passed health admission.
    #[error("no providers available")]
    NoProviders,
    /// Every eligible provider was exhausted or aborted.
    #[error("all providers failed: {0}")]
    Exhausted(Report),
    /// A fatal failure stopped the dispatch.
    #[error("dispatch halted: {0}")]
    Halted(Report),
    /// The overall deadline expired.
    #[error("dispatch deadline exceeded: {0}")]
    DeadlineExceeded(Report),
}

impl DispatchError {
    /// The attempt report, if any provider was considered.
    pub fn report(&self) -> Option<&Report> {
        match self {
            Self::NoProviders => None,
            Self::Exhausted(report) | Self::Halted(report) | Self::DeadlineExceeded(report) => {
                Some(report)
            }
        }
    }
}

/// Outcome of one `submit()` call.
pub type CompletionResult = Result<Completion, DispatchError>;

/// Resilient completion dispatcher over a `Registry`.
pub struct Dispatcher<B = Backend> {
    registry: Registry<B>,
    classifier: Classifier,
    deadline: Option<Duration>,
    halt_on_fatal: bool,
}

impl<B: LLM> Dispatcher<B> {
    /// Create a dispatcher with the default classifier and no deadline.
    pub fn new(registry: Registry<B>) -> Self {
        Self {
            registry,
            classifier: classify,
            deadline: None,
            halt_on_fatal: false,
        }
    }

    /// Create a dispatcher from config.
    pub fn with_config(registry: Registry<B>, config: &DispatchConfig) -> Self {
        Self::new(registry)
            .deadline(config.deadline())
            .halt_on_fatal(config.halt_on_fatal)
    }

    /// Replace the failure classifier.
    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Bound each whole dispatch.
    pub fn deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Stop the whole dispatch on a fatal classification.
    pub fn halt_on_fatal(mut self, halt: bool) -> Self {
        self.halt_on_fatal = halt;
        self
    }

    /// The registry this dispatcher walks.
    pub fn registry(&self) -> &Registry<B> {
        &self.registry
    }

    /// Produce a completion for `request`, cascading across models and
    /// providers.
    pub async fn submit(&self, request: &CompletionRequest) -> CompletionResult {
        let providers = self.registry.list();
        if providers.is_empty() {
            tracing::error!("no providers available for request");
            return Err(DispatchError::NoProviders);
        }

        // a deadline past the clock's range is no deadline
        let deadline = self.deadline.and_then(|d| Instant::now().checked_add(d));
        let mut report = Report::default();
        let mut total = 0;

        for provider in providers {
            let name = provider.name();
            if provider.is_external_paid() && !request.allow_paid {
                tracing::info!(provider = name, "skipping paid provider");
                report.push(name, Outcome::Skipped, Vec::new());
                continue;
            }

            let mut attempts = Vec::new();
            let mut cascade = provider.cascade();
            let outcome = loop {
                let Some(model) = cascade.current() else {
                    break Outcome::Exhausted;
                };

                if deadline.is_some_and(|at| Instant::now() >= at) {
                    tracing::error!(provider = name, model, "dispatch deadline exceeded");
                    report.push(name, Outcome::Interrupted, attempts);
                    return Err(DispatchError::DeadlineExceeded(report));
                }

                total += 1;
                tracing::info!(provider = name, model, attempt = total, "requesting completion");
                let call = provider.complete(model, request);
                let result = match deadline {
                    Some(at) => match tokio::time::timeout_at(at, call).await {
                        Ok(result) => result,
                        Err(_) => {
                            tracing::error!(provider = name, model, "dispatch deadline exceeded");
                            attempts.push(Attempt {
                                model: model.to_owned(),
                                action: Action::RetryNextModel,
                                error: ProviderError::Timeout,
                            });
                            report.push(name, Outcome::Interrupted, attempts);
                            return Err(DispatchError::DeadlineExceeded(report));
                        }
                    },
                    None => call.await,
                };

                let error = match result {
                    Ok(response) => {
                        tracing::info!(
                            provider = name,
                            model,
                            attempt = total,
                            "completion succeeded"
                        );
                        return Ok(Completion {
                            provider: name.to_owned(),
                            model: model.to_owned(),
                            content: response.content,
                            body: response.body,
                            attempts: total,
                        });
                    }
                    Err(error) => error,
                };

                let action = (self.classifier)(&error);
                match action {
                    Action::RetryNextModel => {
                        tracing::warn!(
                            provider = name,
                            model,
                            %action,
                            "transient failure: {error}"
                        );
                    }
                    Action::AbortProvider | Action::Fatal => {
                        tracing::error!(
                            provider = name,
                            model,
                            %action,
                            "provider failure: {error}"
                        );
                    }
                }
                attempts.push(Attempt {
                    model: model.to_owned(),
                    action,
                    error,
                });

                match action {
                    Action::RetryNextModel => {
                        if !cascade.advance() {
                            tracing::warn!(provider = name, "provider ran out of models");
                            break Outcome::Exhausted;
                        }
                    }
                    Action::Fatal if self.halt_on_fatal => {
                        report.push(name, Outcome::Halted, attempts);
                        return Err(DispatchError::Halted(report));
                    }
                    Action::AbortProvider | Action::Fatal => break Outcome::Aborted,
                }
            };
            report.push(name, outcome, attempts);
        }

        tracing::error!("all providers and models exhausted: {report}");
        Err(DispatchError::Exhausted(report))
    }
}

impl<B> Clone for Dispatcher<B> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            classifier: self.classifier,
            deadline: self.deadline,
            halt_on_fatal: self.halt_on_fatal,
        }
    }
}
