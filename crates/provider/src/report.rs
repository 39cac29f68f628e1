//! What a dispatch tried, for diagnosing total failures.

use crate::Action;
use llm::ProviderError;
use std::fmt;

/// One failed attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// The model that was called.
    pub model: String,
    /// How the failure was classified.
    pub action: Action,
    /// The failure itself.
    pub error: ProviderError,
}

/// How a provider's part of a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Paid provider, and the request did not allow paid providers.
    Skipped,
    /// Every model failed with a transient error.
    Exhausted,
    /// A provider-level failure ended the model cascade early.
    Aborted,
    /// A fatal failure stopped the whole dispatch.
    Halted,
    /// The dispatch deadline expired mid-cascade.
    Interrupted,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Skipped => "skipped (paid)",
            Self::Exhausted => "exhausted",
            Self::Aborted => "aborted",
            Self::Halted => "halted",
            Self::Interrupted => "interrupted",
        })
    }
}

/// A provider's part of a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Provider name.
    pub provider: String,
    /// How it ended.
    pub outcome: Outcome,
    /// Failed attempts, in order.
    pub attempts: Vec<Attempt>,
}

impl Trace {
    /// The last classified failure, if any attempt was made.
    pub fn last_error(&self) -> Option<&Attempt> {
        self.attempts.last()
    }
}

/// Every provider a failed dispatch went through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Traces in registry order.
    pub providers: Vec<Trace>,
}

impl Report {
    /// Total network attempts.
    pub fn attempts(&self) -> usize {
        self.providers.iter().map(|t| t.attempts.len()).sum()
    }

    /// The trace for `provider`.
    pub fn trace(&self, provider: &str) -> Option<&Trace> {
        self.providers.iter().find(|t| t.provider == provider)
    }

    pub(crate) fn push(&mut self, provider: &str, outcome: Outcome, attempts: Vec<Attempt>) {
        self.providers.push(Trace {
            provider: provider.to_owned(),
            outcome,
            attempts,
        });
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.providers.is_empty() {
            return f.write_str("no provider was eligible");
        }
        for (idx, trace) in self.providers.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", trace.provider, trace.outcome)?;
            if trace.attempts.is_empty() {
                continue;
            }
            let models = trace
                .attempts
                .iter()
                .map(|a| a.model.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " after [{models}]")?;
            if let Some(last) = trace.last_error() {
                write!(f, ", last {} -> {} ({})", last.model, last.error, last.action)?;
            }
        }
        Ok(())
    }
}
