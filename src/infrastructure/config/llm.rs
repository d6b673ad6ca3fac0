//! Generation service configuration.
//!
//! The API key is read from `OPENAI_API_KEY` at startup (see
//! [`Secrets`](super::secrets::Secrets)); it never lives in the config file.

use serde::Deserialize;

use crate::adapter::outbound::llm::openai::DEFAULT_BASE_URL;

/// OpenAI-compatible streaming model settings.
///
/// Fixed for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API root, without `/chat/completions`.
    ///
    /// Defaults to the public OpenAI endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier.
    ///
    /// Defaults to "gpt-4o-mini".
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for generation.
    ///
    /// Defaults to 0.4.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens in the response. Unset leaves it to the provider.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// TCP connect timeout for the generation service.
    ///
    /// Defaults to 10 seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Wait for the response status and headers after the request is sent.
    ///
    /// The body stream that follows is not time-limited. Defaults to 60 seconds.
    #[serde(default = "default_response_timeout_secs")]
    pub response_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            response_timeout_secs: default_response_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_temperature() -> f64 {
    0.4
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

const fn default_response_timeout_secs() -> u64 {
    60
}
