mod cli;
mod scenarios;
mod transcript;

use crate::cli::Cli;
use crate::scenarios::Session;
use anyhow::Context;
use clap::Parser;
use persona::domain::config::PersonaConfig;
use persona::kernel::config::load_config;
use persona_logger::Logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config: PersonaConfig = match &cli.config {
        Some(path) => load_config(Some(path)).context("Critical: Configuration is malformed")?,
        None => PersonaConfig::default(),
    };
    cli.apply(&mut config);

    let _log = Logger::from_settings(&config.logger)?;

    let session = Session::new(&config.transcript, std::io::stdout())?;
    session.run(cli.command)?;
    session.finish()?;

    Ok(())
}
