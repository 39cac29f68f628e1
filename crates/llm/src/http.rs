//! Shared JSON-over-HTTP transport for completion backends.
//!
//! `HttpProvider` wraps a `reqwest::Client` with pre-configured headers and
//! endpoint URL. `post()` sends one request and turns every way it can go
//! wrong into a [`ProviderError`]: transport failures, non-2xx statuses and
//! 2xx bodies carrying an `error` field.

use crate::ProviderError;
use anyhow::{Context, Result};
use reqwest::{
    Client, Method, Proxy,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client for one provider.
///
/// `timeout` bounds every attempt made through the client; `proxy` routes
/// all outbound traffic through the given URL.
pub fn client(timeout: Duration, proxy: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(CONNECT_TIMEOUT));
    if let Some(url) = proxy {
        let proxy = Proxy::all(url).with_context(|| format!("invalid proxy url '{url}'"))?;
        builder = builder.proxy(proxy);
    }
    builder.build().context("failed to build http client")
}

/// Shared HTTP transport for completion providers.
///
/// Holds a `reqwest::Client`, pre-built headers (auth + content-type),
/// and the target endpoint URL.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
}

impl HttpProvider {
    /// Create a provider with Bearer token authentication.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        let mut provider = Self::no_auth(client, endpoint);
        provider
            .headers
            .insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(provider)
    }

    /// Create a provider without authentication (e.g. a self-hosted server).
    pub fn no_auth(client: Client, endpoint: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        }
    }

    /// Add an extra header sent with every request.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        self.headers
            .insert(name.parse::<HeaderName>()?, value.parse::<HeaderValue>()?);
        Ok(self)
    }

    /// POST `body` and return the upstream JSON on success.
    ///
    /// `timeout` overrides the client's per-attempt timeout for this call.
    pub async fn post(
        &self,
        body: &impl Serialize,
        timeout: Option<Duration>,
    ) -> Result<Value, ProviderError> {
        if let Ok(body) = serde_json::to_string(body) {
            tracing::trace!("request: {body}");
        }
        let mut request = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::trace!("response ({status}): {text}");

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let body: Value =
            serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))?;
        match body.get("error") {
            Some(error) if !error.is_null() => Err(in_body_error(error)),
            _ => Ok(body),
        }
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Map an in-body `error` value to a provider error.
///
/// Gateways that report failures inside a 2xx body often include the HTTP
/// status they would have used as `code` or `status`; when present and in
/// the HTTP error range it is kept so the classifier can act on it.
fn in_body_error(error: &Value) -> ProviderError {
    let message = match error {
        Value::String(s) => s.clone(),
        _ => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| error.to_string()),
    };
    let status = ["code", "status"]
        .iter()
        .find_map(|key| error.get(*key)?.as_u64())
        .filter(|code| (400..600).contains(code));

    match status {
        Some(status) => ProviderError::Status {
            status: status as u16,
            message,
        },
        None => ProviderError::Body(message),
    }
}

/// Best-effort error text from a non-2xx body.
fn error_message(text: &str) -> String {
    let parsed = serde_json::from_str::<Value>(text).ok();
    let message = parsed.as_ref().and_then(|body| {
        let error = body.get("error")?;
        error
            .as_str()
            .or_else(|| error.get("message").and_then(Value::as_str))
            .map(str::to_owned)
    });
    message.unwrap_or_else(|| crate::truncate_prompt(text.trim(), 200).to_owned())
}
