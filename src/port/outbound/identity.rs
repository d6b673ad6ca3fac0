//! Credential verification port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Identity;

/// Why a credential was rejected.
///
/// The detail is for logs only. Callers of the HTTP endpoint see one
/// uniform unauthorized outcome whatever the variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("token is empty")]
    Empty,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token expired")]
    Expired,

    #[error("token signed with unknown key {kid:?}")]
    UnknownKey { kid: Option<String> },

    #[error("invalid claim {claim}: {reason}")]
    InvalidClaim { claim: &'static str, reason: String },

    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

/// Verifies an opaque bearer credential against an identity service.
///
/// One attempt per call, no retries and no local state.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Verify `token` (already stripped of any `Bearer ` prefix).
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError>;
}
