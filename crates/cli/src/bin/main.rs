use anyhow::{Result, bail};
use cascade_cli::{App, Command, Config};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();
    app.init_tracing();

    match &app.command {
        Command::Probe(probe) => probe.run(&app.config).await?,
        Command::Complete(complete) => complete.run(&app.config).await?,
        Command::Generate { force } => {
            if app.config.exists() && !force {
                bail!(
                    "{} already exists, pass --force to overwrite",
                    app.config.display()
                );
            }
            Config::default().save(&app.config)?
        }
    }

    Ok(())
}
