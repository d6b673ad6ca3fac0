//! Command-line interface definitions.
//!
//! Defines the CLI structure for the studybot service using `clap`.
//! Running the binary without a subcommand serves with default arguments,
//! which is how managed-function hosts start it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default configuration file, resolved relative to the working directory.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Authenticated streaming study assistant
#[derive(Parser, Debug)]
#[command(name = "studybot")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand to run, defaulting to `serve`.
    #[must_use]
    pub fn into_command(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Serve(ServeArgs::default()))
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the endpoint until interrupted
    Serve(ServeArgs),

    /// Validate configuration and secrets without serving
    Check(CheckArgs),
}

/// Arguments for the `serve` subcommand.
///
/// Optional fields override the corresponding configuration file values.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Path to the configuration file (defaults apply if it does not exist).
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Override the listen address (e.g. 127.0.0.1:8081).
    #[arg(long)]
    pub bind: Option<String>,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG),
            bind: None,
            log_level: None,
            json_logs: false,
        }
    }
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the configuration file (defaults apply if it does not exist).
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}
