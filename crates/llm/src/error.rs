//! Failures observed during a single completion attempt.

use thiserror::Error;

/// A failed attempt against one model of one provider.
///
/// Variants describe what was observed on the wire, not what the caller
/// should do about it. Mapping to a cascade decision lives in the provider
/// crate's classifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The attempt did not complete within its timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection refused, reset, DNS failure or any other transport error.
    #[error("network error: {0}")]
    Network(String),

    /// Upstream answered with an HTTP error status, or with an in-body error
    /// object carrying one.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error text reported by the upstream.
        message: String,
    },

    /// Upstream answered 2xx but the body holds an error field with no
    /// usable status.
    #[error("upstream error: {0}")]
    Body(String),

    /// The body could not be understood as a completion.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Upstream refused the prompt itself (e.g. content policy). Another
    /// provider is expected to refuse it too.
    #[error("prompt rejected: {0}")]
    Rejected(String),
}

impl ProviderError {
    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Status {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            Self::Network(e.to_string())
        }
    }
}
