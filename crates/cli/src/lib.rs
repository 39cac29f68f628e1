//! Cascade CLI

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};
pub use {
    complete::CompleteCmd,
    config::{Config, expand_env_vars},
    probe::ProbeCmd,
};

mod complete;
mod config;
mod probe;

/// Cascade CLI
#[derive(Debug, Parser)]
#[command(name = "cascade", version, about)]
pub struct App {
    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "cascade.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe the configured providers and list the admitted ones
    Probe(ProbeCmd),

    /// Dispatch one prompt through the provider cascade
    Complete(CompleteCmd),

    /// Generate the configuration file
    Generate {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl App {
    /// Initialize tracing subscriber based on verbosity
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "info",
                1 => "cascade=debug",
                2 => "cascade=trace",
                3 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .with_writer(std::io::stderr)
            .init();
    }
}
