//! LLM trait implementation for the OpenAI-compatible provider.

use crate::{OpenAI, Request};
use llm::{GenerationParams, LLM, ProviderError, Response};
use std::time::Duration;

const PROBE_PROMPT: &str = "hi";

impl LLM for OpenAI {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Response, ProviderError> {
        let body = self.http.post(&Request::new(model, prompt, params), None).await?;
        Response::from_body(body)
    }

    async fn probe(&self, model: &str, timeout: Duration) -> Result<(), ProviderError> {
        let params = GenerationParams::new().max_tokens(1);
        let request = Request::new(model, PROBE_PROMPT, &params);
        self.http.post(&request, Some(timeout)).await.map(|_| ())
    }
}
