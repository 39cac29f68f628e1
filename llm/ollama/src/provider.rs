//! LLM trait implementation for Ollama.

use crate::{Ollama, Request};
use llm::{GenerationParams, LLM, ProviderError, Response};
use std::time::Duration;

const PROBE_PROMPT: &str = "test";

impl LLM for Ollama {
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
        let params = GenerationParams::default();
        let request = Request::new(model, PROBE_PROMPT, &params).num_predict(1);
        self.http.post(&request, Some(timeout)).await.map(|_| ())
    }
}
