//! # CLI Argument Definitions
//!
//! Subcommands select a scenario; global flags override the configuration file.

use clap::{Parser, Subcommand, ValueEnum};
use persona::domain::config::{PersonaConfig, TranscriptFormat};
use persona::domain::events::EventMask;
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "persona")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Runs the person lifecycle scenarios and prints their transcript")]
pub struct Cli {
    /// Configuration file (any format the `config` crate detects)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Transcript format written to stdout
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<FormatArg>,

    /// Comma-separated event kinds to show: created, renamed, year_changed, dropped, all
    #[arg(short, long, global = true)]
    pub events: Option<String>,

    /// Log level for diagnostics on stderr: trace, debug, info, warn, error, off
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// The scenario to run.
    #[command(subcommand)]
    pub command: Scenario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Scenario {
    /// Person records created, mutated and dropped in nested scopes
    Scope,
    /// A sentinel owned by the process scope, torn down after the body
    Global,
    /// A sentinel local to a nested function
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for TranscriptFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut PersonaConfig) {
        if let Some(format) = self.format {
            config.transcript.format = format.into();
        }
        if let Some(events) = &self.events {
            config.transcript.events = EventMask::parse_list(events);
        }
        if let Some(level) = &self.log_level {
            config.logger.level.clone_from(level);
        }
    }
}
