//! Identity service configuration.

use serde::Deserialize;

use crate::adapter::outbound::identity::firebase::DEFAULT_JWKS_URL;

/// Where and how to fetch ID-token signing keys.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// JWK set endpoint. Defaults to Google's Firebase key endpoint.
    #[serde(default = "default_jwks_url")]
    pub jwks_url: String,

    /// Whole-request timeout for the key fetch. Defaults to 10 seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            jwks_url: default_jwks_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_jwks_url() -> String {
    DEFAULT_JWKS_URL.into()
}

const fn default_timeout_secs() -> u64 {
    10
}
