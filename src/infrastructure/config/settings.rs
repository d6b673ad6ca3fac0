//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all non-secret
//! settings. Configuration is loaded from an optional TOML file; every
//! section has defaults. Secrets come from the environment through
//! [`Secrets`](super::secrets::Secrets).
//!
//! # Example
//!
//! ```no_run
//! use studybot::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_or_default("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::identity::IdentityConfig;
use super::llm::LlmConfig;
use super::logging::{LogFormat, LoggingConfig};
use super::server::{CorsConfig, ServerConfig};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Cross-origin policy.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Generation service settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Identity service settings.
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for a file that exists.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Rebind to `0.0.0.0:<port>`, as managed-function hosts require.
    ///
    /// `None` leaves the configured bind address untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if `port` is not a valid TCP port.
    #[allow(clippy::result_large_err)]
    pub fn with_port(mut self, port: Option<&str>) -> Result<Self> {
        if let Some(port) = port {
            let port: u16 = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT",
                reason: format!("'{port}' is not a valid port"),
            })?;
            self.server.bind = format!("0.0.0.0:{port}");
        }
        Ok(self)
    }

    /// Override the bind address (CLI `--bind`).
    ///
    /// # Errors
    ///
    /// Returns an error if `bind` is not a socket address.
    #[allow(clippy::result_large_err)]
    pub fn with_bind(mut self, bind: Option<&str>) -> Result<Self> {
        if let Some(bind) = bind {
            self.server.bind = bind.to_string();
            self.bind_addr()?;
        }
        Ok(self)
    }

    /// The listener address.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.bind` is not a socket address.
    #[allow(clippy::result_large_err)]
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    field: "bind",
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Initialize the global tracing subscriber.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    ///
    /// Checks that values are within acceptable ranges.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        self.logging.level_filter()?;

        let path = &self.server.path;
        if !path.starts_with('/') || path.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "path",
                reason: "must start with '/' and contain no whitespace".to_string(),
            }
            .into());
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature",
                reason: "must be between 0 and 2".to_string(),
            }
            .into());
        }
        if self.llm.max_tokens == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_tokens",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "model" }.into());
        }
        if self.llm.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.llm.response_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "response_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        validate_http_url("base_url", &self.llm.base_url)?;

        if self.identity.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        validate_http_url("jwks_url", &self.identity.jwks_url)?;

        if self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "allowed_origins",
                reason: "must list at least one origin or \"*\"".to_string(),
            }
            .into());
        }
        for origin in self.cors.allowed_origins.iter().filter(|o| *o != "*") {
            validate_http_url("allowed_origins", origin)?;
        }

        Ok(())
    }
}

#[allow(clippy::result_large_err)]
fn validate_http_url(field: &'static str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: format!("'{value}': {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("'{value}' must be an http(s) URL"),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8081");
        assert_eq!(config.server.path, "/studybot");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.temperature, 0.4);
        assert_eq!(config.llm.response_timeout_secs, 60);
        assert!(config.cors.allows_any_origin());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
[server]
bind = "127.0.0.1:9000"
path = "/api/studybot"

[cors]
allowed_origins = ["https://study.example.com"]

[llm]
model = "gpt-4o"
temperature = 0.0
max_tokens = 512

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().port(), 9000);
        assert_eq!(config.server.path, "/api/studybot");
        assert!(!config.cors.allows_any_origin());
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.max_tokens, Some(512));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let result = Config::parse_toml("[llm]\ntemperature = 2.5\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "temperature",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_relative_path() {
        let result = Config::parse_toml("[server]\npath = \"studybot\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "path", .. }))
        ));
    }

    #[test]
    fn rejects_bad_bind() {
        let result = Config::parse_toml("[server]\nbind = \"localhost\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "bind", .. }))
        ));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = Config::parse_toml("[llm]\nbase_url = \"ftp://example.com\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "base_url",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_empty_origin_list() {
        let result = Config::parse_toml("[cors]\nallowed_origins = []\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_timeouts() {
        assert!(Config::parse_toml("[llm]\nconnect_timeout_secs = 0\n").is_err());
        assert!(matches!(
            Config::parse_toml("[llm]\nresponse_timeout_secs = 0\n"),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "response_timeout_secs",
                ..
            }))
        ));
        assert!(Config::parse_toml("[identity]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let result = Config::parse_toml("[logging]\nlevel = \"chatty\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "level", .. }))
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = Config::parse_toml("[server\nbind = ");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn port_override_rebinds_all_interfaces() {
        let config = Config::default().with_port(Some("8080")).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn absent_port_keeps_bind() {
        let config = Config::default().with_port(None).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8081");
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(Config::default().with_port(Some("http")).is_err());
        assert!(Config::default().with_port(Some("70000")).is_err());
    }

    #[test]
    fn bind_override_is_validated() {
        assert!(Config::default().with_bind(Some("not-an-addr")).is_err());
        let config = Config::default().with_bind(Some("127.0.0.1:0")).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:0");
    }
}
