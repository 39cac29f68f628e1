//! Complete command

use super::Config;
use anyhow::{Result, bail};
use clap::Args;
use provider::{
    CompletionRequest, DEFAULT_PROMPT_CHARS, Dispatcher, GenerationParams, Registry,
    truncate_prompt,
};
use std::path::Path;

/// Complete command arguments
#[derive(Debug, Args)]
pub struct CompleteCmd {
    /// Allow providers marked as external/paid
    #[arg(long)]
    pub paid: bool,

    /// Sampling temperature
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Maximum output tokens
    #[arg(short, long)]
    pub max_tokens: Option<u64>,

    /// Provider names to use, in priority order (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub order: Vec<String>,

    /// The prompt to send
    pub prompt: String,
}

impl CompleteCmd {
    /// Run the complete command
    pub async fn run(&self, path: &Path) -> Result<()> {
        let config = Config::load(path)?;
        let providers = config.ordered(&self.order);
        let registry = Registry::initialize(&providers, config.dispatch.probe_timeout()).await;
        let dispatcher = Dispatcher::with_config(registry, &config.dispatch);

        let request = self.request();
        match dispatcher.submit(&request).await {
            Ok(completion) => {
                println!("{}/{}", completion.provider, completion.model);
                println!("\n{}", completion.content);
                Ok(())
            }
            Err(e) => bail!(e),
        }
    }

    /// Build the request from the arguments.
    pub fn request(&self) -> CompletionRequest {
        let mut params = GenerationParams::new();
        if let Some(temperature) = self.temperature {
            params = params.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            params = params.max_tokens(max_tokens);
        }

        let prompt = truncate_prompt(&self.prompt, DEFAULT_PROMPT_CHARS);
        if prompt.len() < self.prompt.len() {
            tracing::warn!("prompt truncated to {DEFAULT_PROMPT_CHARS} characters");
        }
        CompletionRequest::new(prompt)
            .allow_paid(self.paid)
            .params(params)
    }
}
