//! Scripted backend shared by the registry and dispatcher tests.

#![allow(dead_code)]

use cascade_provider::{GenerationParams, LLM, Provider, ProviderError, Response};
use serde_json::json;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

/// What a scripted model does when called.
#[derive(Clone)]
pub enum Reply {
    /// Answer with this text.
    Text(String),
    /// Fail with this error.
    Fail(ProviderError),
    /// Sleep, then answer with this text.
    Slow(Duration, String),
}

/// Every call made against any `Script` sharing the log, as `name/model`
/// for completions and `name/probe/model` for health checks.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// A backend answering from a per-model script.
#[derive(Clone)]
pub struct Script {
    name: String,
    replies: Arc<HashMap<String, Reply>>,
    probe: Result<(), ProviderError>,
    log: CallLog,
}

impl Script {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_owned(),
            replies: Arc::new(HashMap::new()),
            probe: Ok(()),
            log: Arc::clone(log),
        }
    }

    pub fn reply(mut self, model: &str, reply: Reply) -> Self {
        Arc::make_mut(&mut self.replies).insert(model.to_owned(), reply);
        self
    }

    pub fn text(self, model: &str, text: &str) -> Self {
        self.reply(model, Reply::Text(text.to_owned()))
    }

    pub fn fail(self, model: &str, error: ProviderError) -> Self {
        self.reply(model, Reply::Fail(error))
    }

    pub fn probe_fails(mut self, error: ProviderError) -> Self {
        self.probe = Err(error);
        self
    }

    /// Wrap into a provider with the given cascade.
    pub fn provider(self, models: &[&str]) -> Provider<Script> {
        self.provider_with(models, false)
    }

    pub fn provider_with(self, models: &[&str], external_paid: bool) -> Provider<Script> {
        let name = self.name.clone();
        Provider::new(
            name,
            models.iter().map(|m| (*m).to_owned()).collect(),
            external_paid,
            self,
        )
        .unwrap()
    }
}

impl LLM for Script {
    async fn complete(
        &self,
        model: &str,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<Response, ProviderError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}/{model}", self.name));
        let reply = self
            .replies
            .get(model)
            .cloned()
            .unwrap_or_else(|| Reply::Fail(ProviderError::Status {
                status: 404,
                message: format!("model {model} not found"),
            }));
        match reply {
            Reply::Text(text) => Ok(response(&text)),
            Reply::Fail(error) => Err(error),
            Reply::Slow(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(response(&text))
            }
        }
    }

    async fn probe(&self, model: &str, _timeout: Duration) -> Result<(), ProviderError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}/probe/{model}", self.name));
        self.probe.clone()
    }
}

fn response(text: &str) -> Response {
    Response {
        content: text.to_owned(),
        body: json!({ "response": text }),
    }
}

pub fn log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn status(status: u16) -> ProviderError {
    ProviderError::Status {
        status,
        message: format!("upstream returned {status}"),
    }
}
