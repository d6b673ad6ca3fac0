//! HTTP listener and CORS configuration.

use serde::Deserialize;

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind. Defaults to `0.0.0.0:8081`.
    ///
    /// Replaced by `0.0.0.0:$PORT` when `PORT` is set.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Route path for the endpoint. Defaults to `/studybot`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            path: default_path(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8081".into()
}

fn default_path() -> String {
    "/studybot".into()
}

/// Cross-origin settings. Methods and headers are fixed to `POST`,
/// `Authorization` and `Content-Type`.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `"*"` allows any. Defaults to `["*"]`.
    ///
    /// Production deployments should list their front-end origins.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".into()]
}
