//! Failure classification driving cascade decisions.

use llm::ProviderError;
use std::fmt;

/// HTTP statuses that say "this model, right now" rather than "this
/// provider": rate limits, oversized payloads and unavailable upstreams.
const TRANSIENT_STATUS: [u16; 6] = [413, 429, 500, 502, 503, 504];

/// What the dispatcher does after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Try the provider's next model.
    RetryNextModel,
    /// Give up on this provider and move to the next one.
    AbortProvider,
    /// The failure would recur on every provider.
    Fatal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RetryNextModel => "retry-next-model",
            Self::AbortProvider => "abort-provider",
            Self::Fatal => "fatal",
        })
    }
}

/// A classification function, pluggable on the dispatcher.
pub type Classifier = fn(&ProviderError) -> Action;

/// Default classification.
pub fn classify(error: &ProviderError) -> Action {
    match error {
        ProviderError::Timeout
        | ProviderError::Network(_)
        | ProviderError::Body(_)
        | ProviderError::Decode(_) => Action::RetryNextModel,
        ProviderError::Status { status, .. } if TRANSIENT_STATUS.contains(status) => {
            Action::RetryNextModel
        }
        ProviderError::Status { .. } => Action::AbortProvider,
        ProviderError::Rejected(_) => Action::Fatal,
    }
}
