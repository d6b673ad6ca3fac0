//! Handler for the `serve` command.

use tokio::net::TcpListener;
use tracing::{info, warn};

use super::command::ServeArgs;
use super::port_from_env;
use crate::adapter::inbound::http;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::secrets::Secrets;
use crate::infrastructure::config::logging::LogFormat;
use crate::infrastructure::config::settings::Config;

/// Load configuration and secrets, then serve until Ctrl-C.
///
/// Missing secrets are fatal before the listener is bound.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let config = resolve_config(args)?;
    config.init_logging();

    let secrets = Secrets::from_env()?;
    let app = bootstrap::build_app(&config, &secrets)?;

    let listener = TcpListener::bind(config.bind_addr()?).await?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        path = %config.server.path,
        project_id = %secrets.service_account.project_id,
        "studybot starting"
    );

    http::serve(listener, app, shutdown_signal()).await?;
    info!("studybot stopped");
    Ok(())
}

/// Apply `PORT` and then the command-line overrides to the file config.
fn resolve_config(args: &ServeArgs) -> Result<Config> {
    let mut config = Config::load_or_default(&args.config)?
        .with_port(port_from_env().as_deref())?
        .with_bind(args.bind.as_deref())?;

    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs {
        config.logging.format = LogFormat::Json;
    }
    config.logging.level_filter()?;
    Ok(config)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
