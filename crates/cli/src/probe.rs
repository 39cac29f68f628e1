//! Probe command

use super::Config;
use anyhow::Result;
use clap::Args;
use provider::Registry;
use std::path::Path;

/// Probe command arguments
#[derive(Debug, Args)]
pub struct ProbeCmd {
    /// Provider names to probe, in priority order (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub order: Vec<String>,

    /// Print the admitted providers as JSON
    #[arg(long)]
    pub json: bool,
}

impl ProbeCmd {
    /// Run the probe command
    pub async fn run(&self, path: &Path) -> Result<()> {
        let config = Config::load(path)?;
        let providers = config.ordered(&self.order);
        let registry = Registry::initialize(&providers, config.dispatch.probe_timeout()).await;

        let admitted = registry.describe();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&admitted)?);
            return Ok(());
        }

        println!("{} of {} providers admitted", admitted.len(), providers.len());
        for info in admitted {
            let paid = if info.external_paid { " (paid)" } else { "" };
            println!("  {}{paid}: {}", info.name, info.models.join(", "));
        }
        Ok(())
    }
}
