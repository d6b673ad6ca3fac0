//! Composition root: wires adapters into the application service.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::adapter::inbound::http;
use crate::adapter::outbound::identity::firebase::FirebaseVerifier;
use crate::adapter::outbound::llm::openai::OpenAi;
use crate::application::StudyBot;
use crate::error::Result;
use crate::infrastructure::config::secrets::Secrets;
use crate::infrastructure::config::settings::Config;
use crate::port::{CompletionStreamer, CredentialVerifier};

/// Build the Firebase verifier for the service account's project.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_verifier(config: &Config, secrets: &Secrets) -> Result<Arc<dyn CredentialVerifier>> {
    let verifier =
        FirebaseVerifier::from_config(&secrets.service_account.project_id, &config.identity)?;
    info!(
        verifier = verifier.name(),
        project_id = verifier.project_id(),
        "identity verifier initialized"
    );
    Ok(Arc::new(verifier))
}

/// Build the generation client.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_streamer(config: &Config, secrets: &Secrets) -> Result<Arc<dyn CompletionStreamer>> {
    let client = OpenAi::from_config(&secrets.openai_api_key, &config.llm)?;
    info!(
        provider = client.name(),
        model = %config.llm.model,
        "generation client initialized"
    );
    Ok(Arc::new(client))
}

/// Build the request handler from configuration and secrets.
///
/// # Errors
///
/// Returns an error if either outbound client cannot be constructed.
pub fn build_studybot(config: &Config, secrets: &Secrets) -> Result<StudyBot> {
    Ok(StudyBot::new(
        build_verifier(config, secrets)?,
        build_streamer(config, secrets)?,
    ))
}

/// Build the full HTTP application.
///
/// # Errors
///
/// Same as [`build_studybot`].
pub fn build_app(config: &Config, secrets: &Secrets) -> Result<Router> {
    let bot = build_studybot(config, secrets)?;
    Ok(http::router(bot, &config.server, &config.cors))
}
