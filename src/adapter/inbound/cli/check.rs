//! Handler for the `check` command.

use super::command::CheckArgs;
use super::port_from_env;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::secrets::Secrets;
use crate::infrastructure::config::settings::Config;

/// Validate configuration and secrets without binding a listener.
pub fn execute(args: &CheckArgs) -> Result<()> {
    let source = if args.config.exists() {
        args.config.display().to_string()
    } else {
        "built-in defaults".to_string()
    };

    let config = Config::load_or_default(&args.config)?.with_port(port_from_env().as_deref())?;
    let secrets = Secrets::from_env()?;
    bootstrap::build_studybot(&config, &secrets)?;

    println!("Configuration OK");
    println!("  config:     {source}");
    println!("  bind:       {}", config.bind_addr()?);
    println!("  path:       {}", config.server.path);
    println!("  model:      {}", config.llm.model);
    println!("  project id: {}", secrets.service_account.project_id);
    Ok(())
}
