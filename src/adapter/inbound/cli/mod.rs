//! Command-line entry points.

pub mod check;
pub mod command;
pub mod serve;

use crate::error::Result;
use command::{Cli, Commands};

/// Environment variable managed-function hosts use to assign the port.
pub const PORT_ENV: &str = "PORT";

/// Run the command selected by `cli`.
///
/// # Errors
///
/// Returns the first configuration, secret or listener error encountered.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.into_command() {
        Commands::Serve(args) => serve::execute(&args).await,
        Commands::Check(args) => check::execute(&args),
    }
}

/// The host-assigned port, if any. Blank values are ignored.
pub(crate) fn port_from_env() -> Option<String> {
    std::env::var(PORT_ENV)
        .ok()
        .filter(|port| !port.trim().is_empty())
}
