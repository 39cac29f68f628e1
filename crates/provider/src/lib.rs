//! Provider crate: health admission, model and provider cascades, and the
//! completion dispatcher.
//!
//! `Provider` pairs a backend (enum-dispatched over the upstream API
//! families in `Backend`) with an ordered model list. `Registry` is built
//! once by probing every configured provider and keeping the survivors in
//! configured order. `Dispatcher` walks the registry for each request,
//! cascading across each provider's models and then across providers, with
//! `classify` deciding which failures advance the model and which abandon
//! the provider. The model cursor (`Cascade`) lives in the dispatch call,
//! never on the shared provider.

pub mod classify;
pub mod config;
pub mod dispatch;
mod provider;
pub mod registry;
pub mod report;

pub use {
    classify::{Action, Classifier, classify},
    config::{BackendConfig, DispatchConfig, ProviderConfig},
    dispatch::{Completion, CompletionResult, DispatchError, Dispatcher},
    llm::{
        CompletionRequest, DEFAULT_PROMPT_CHARS, GenerationParams, LLM, ProviderError, Response,
        truncate_prompt,
    },
    provider::{Backend, Cascade, Provider, build_backend, build_provider},
    registry::{ProviderInfo, Registry},
    report::{Attempt, Outcome, Report, Trace},
};
