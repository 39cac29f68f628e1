//! Backend abstraction shared by every upstream API family.

use crate::{GenerationParams, ProviderError, Response};
use std::time::Duration;

/// A trait for upstream completion backends.
///
/// A backend knows one wire format and one endpoint. It does not know about
/// model lists or fallback: each call targets exactly the model it is given
/// and issues exactly one network request.
pub trait LLM: Clone + Send + Sync {
    /// Issue one completion call against `model`.
    fn complete(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> impl Future<Output = Result<Response, ProviderError>> + Send;

    /// Issue the smallest possible completion call against `model`,
    /// bounded by `timeout`.
    fn probe(
        &self,
        model: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), ProviderError>> + Send;
}
