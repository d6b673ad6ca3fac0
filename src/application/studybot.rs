//! The single use case: answer an authenticated prompt with a text stream.
//!
//! Each call runs once through a fixed sequence and never loops back:
//!
//! ```text
//! parse prompt ──▶ extract token ──▶ verify ──▶ open stream ──▶ relay
//!      │                 │              │            │
//!   InvalidPrompt    Unauthorized   Unauthorized   Upstream
//! ```
//!
//! Nothing after a failed step runs, so a bad prompt never reaches either
//! external service and a bad token never reaches the generation service.

use std::sync::Arc;

use futures_util::StreamExt;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::error::DomainError;
use crate::domain::{BearerToken, FragmentStream, Prompt, UserId};
use crate::error::Error;
use crate::port::outbound::identity::{CredentialVerifier, VerifyError};
use crate::port::outbound::llm::CompletionStreamer;

/// Terminal failure of a request, before any output is sent.
///
/// Verification failures carry no detail: every cause collapses into
/// [`AskError::Unauthorized`].
#[derive(Error, Debug)]
pub enum AskError {
    #[error(transparent)]
    InvalidPrompt(#[from] DomainError),

    #[error("invalid token")]
    Unauthorized,

    #[error("generation service failed: {0}")]
    Upstream(#[source] Error),
}

/// Request handler wired to one verifier and one streamer.
///
/// Holds no per-request state; a single instance serves all requests.
#[derive(Clone)]
pub struct StudyBot {
    verifier: Arc<dyn CredentialVerifier>,
    streamer: Arc<dyn CompletionStreamer>,
}

impl StudyBot {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, streamer: Arc<dyn CompletionStreamer>) -> Self {
        Self { verifier, streamer }
    }

    /// Validate, authenticate and open the generation stream.
    ///
    /// `raw_prompt` is the `prompt` field of the request body, if any;
    /// `authorization` is the raw `Authorization` header value, if any.
    ///
    /// # Errors
    ///
    /// - [`AskError::InvalidPrompt`] when the prompt is missing or blank
    /// - [`AskError::Unauthorized`] when the token is missing or rejected
    /// - [`AskError::Upstream`] when the generation call fails to start
    pub async fn ask(
        &self,
        raw_prompt: Option<&str>,
        authorization: Option<&str>,
    ) -> Result<FragmentStream, AskError> {
        let prompt = Prompt::parse(raw_prompt.unwrap_or_default())?;

        let token = BearerToken::from_header(authorization);
        if token.is_empty() {
            debug!("rejected request without bearer token");
            return Err(AskError::Unauthorized);
        }

        let identity = self
            .verifier
            .verify(token.as_str())
            .await
            .map_err(|e| self.reject(&e))?;
        let user_id = identity.user_id().clone();
        debug!(user_id = %user_id, "caller authenticated");

        let fragments = self
            .streamer
            .stream(&prompt, &identity)
            .await
            .map_err(|e| {
                warn!(
                    user_id = %user_id,
                    provider = self.streamer.name(),
                    error = %e,
                    "generation call failed before output"
                );
                AskError::Upstream(e)
            })?;

        Ok(observe(fragments, user_id, self.streamer.name()))
    }

    fn reject(&self, error: &VerifyError) -> AskError {
        match error {
            VerifyError::Unavailable(_) => {
                warn!(verifier = self.verifier.name(), error = %error, "credential verification failed");
            }
            _ => {
                debug!(verifier = self.verifier.name(), error = %error, "credential rejected");
            }
        }
        AskError::Unauthorized
    }
}

/// Logs how a stream ended without changing what it yields.
struct Outcome {
    user_id: UserId,
    provider: &'static str,
    fragments: usize,
    finished: bool,
}

impl Drop for Outcome {
    fn drop(&mut self) {
        if !self.finished {
            info!(
                user_id = %self.user_id,
                provider = self.provider,
                fragments = self.fragments,
                "caller went away, generation abandoned"
            );
        }
    }
}

fn observe(inner: FragmentStream, user_id: UserId, provider: &'static str) -> FragmentStream {
    Box::pin(async_stream::stream! {
        let mut inner = inner;
        let mut outcome = Outcome {
            user_id,
            provider,
            fragments: 0,
            finished: false,
        };

        while let Some(item) = inner.next().await {
            let failed = match &item {
                Ok(_) => {
                    outcome.fragments += 1;
                    false
                }
                Err(e) => {
                    outcome.finished = true;
                    warn!(
                        user_id = %outcome.user_id,
                        provider,
                        fragments = outcome.fragments,
                        error = %e,
                        "generation stream failed mid-response"
                    );
                    true
                }
            };
            yield item;
            if failed {
                return;
            }
        }

        outcome.finished = true;
        info!(
            user_id = %outcome.user_id,
            provider,
            fragments = outcome.fragments,
            "generation complete"
        );
    })
}
