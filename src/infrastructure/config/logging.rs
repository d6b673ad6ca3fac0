//! Tracing subscriber setup.
//!
//! The configured level applies to this crate and to the HTTP trace layer.
//! Everything else (hyper, reqwest, rustls) logs at `warn` unless `RUST_LOG`
//! says otherwise.

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for terminals.
    #[default]
    Pretty,
    /// One JSON object per line, for log collectors.
    Json,
}

/// `[logging]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Level for studybot and request tracing: `off`, `error`, `warn`,
    /// `info`, `debug` or `trace`.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Parse the configured level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for anything that is not a level name.
    #[allow(clippy::result_large_err)]
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level.trim().parse().map_err(|_| {
            ConfigError::InvalidValue {
                field: "level",
                reason: format!("'{}' is not a log level", self.level),
            }
            .into()
        })
    }

    /// Filter directives used when `RUST_LOG` is unset.
    #[must_use]
    pub fn directives(&self) -> String {
        let level = self.level.trim().to_ascii_lowercase();
        format!(
            "warn,{crate_name}={level},tower_http={level}",
            crate_name = env!("CARGO_CRATE_NAME")
        )
    }

    /// Install the global subscriber.
    ///
    /// `RUST_LOG` replaces [`directives`](Self::directives) entirely. A
    /// subscriber installed earlier stays in place.
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.directives()));

        let installed = match self.format {
            LogFormat::Json => fmt()
                .json()
                .with_current_span(false)
                .with_env_filter(filter)
                .try_init(),
            LogFormat::Pretty => fmt().with_env_filter(filter).try_init(),
        };
        if installed.is_err() {
            tracing::debug!("tracing subscriber already installed");
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".into()
}
