//! Studybot - authenticated streaming study assistant.
//!
//! One HTTP endpoint accepts a prompt, verifies the caller's Firebase ID
//! token, forwards the prompt to OpenAI chat completions and streams the
//! generated text back as a chunked `text/plain` body.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Prompt, bearer token, identity and fragment types
//! - [`port`] - `CredentialVerifier` and `CompletionStreamer` traits
//! - [`adapter`] - Firebase and OpenAI clients, axum router, CLI
//! - [`application`] - `StudyBot`, the per-request flow
//! - [`infrastructure`] - Configuration, secrets and wiring
//!
//! # Example
//!
//! ```no_run
//! use studybot::infrastructure::bootstrap;
//! use studybot::infrastructure::config::secrets::Secrets;
//! use studybot::infrastructure::config::settings::Config;
//!
//! # fn main() -> studybot::error::Result<()> {
//! let config = Config::load_or_default("config.toml")?;
//! let secrets = Secrets::from_env()?;
//! let _app = bootstrap::build_app(&config, &secrets)?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
