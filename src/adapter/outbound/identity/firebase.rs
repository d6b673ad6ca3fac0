//! Firebase Auth ID-token verifier.
//!
//! Provides an implementation of the [`CredentialVerifier`] trait that checks
//! Firebase ID tokens (RS256 JWTs) against Google's published signing keys.
//! Keys are fetched on every call; nothing is cached between requests.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::Deserialize;

use crate::domain::Identity;
use crate::error::Result;
use crate::infrastructure::config::identity::IdentityConfig;
use crate::port::outbound::identity::{CredentialVerifier, VerifyError};

/// Google's JWK endpoint for Firebase ID-token signing keys.
pub const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Issuer prefix; the project id completes it.
const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Firebase caps user ids at 128 characters.
const MAX_UID_LEN: usize = 128;

/// Firebase ID-token verifier bound to one project.
#[derive(Debug)]
pub struct FirebaseVerifier {
    client: Client,
    project_id: String,
    jwks_url: String,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    iat: Option<u64>,
    #[serde(default)]
    auth_time: Option<u64>,
}

impl FirebaseVerifier {
    /// Create a verifier for `project_id` using Google's public key endpoint.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            project_id: project_id.into(),
            jwks_url: DEFAULT_JWKS_URL.to_string(),
        }
    }

    /// Build a verifier from the `[identity]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(project_id: impl Into<String>, config: &IdentityConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            project_id: project_id.into(),
            jwks_url: config.jwks_url.clone(),
        })
    }

    /// Fetch signing keys from a different endpoint (emulators, test servers).
    #[must_use]
    pub fn with_jwks_url(mut self, jwks_url: impl Into<String>) -> Self {
        self.jwks_url = jwks_url.into();
        self
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn issuer(&self) -> String {
        format!("{ISSUER_PREFIX}{}", self.project_id)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.project_id.as_str()]);
        validation.set_issuer(&[self.issuer()]);
        validation.set_required_spec_claims(&["exp", "iat", "aud", "iss", "sub"]);
        validation.leeway = 0;
        validation
    }

    async fn fetch_keys(&self) -> std::result::Result<JwkSet, VerifyError> {
        let unavailable = |e: reqwest::Error| VerifyError::Unavailable(e.to_string());
        self.client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json::<JwkSet>()
            .await
            .map_err(unavailable)
    }
}

fn map_decode_error(error: &jsonwebtoken::errors::Error) -> VerifyError {
    match error.kind() {
        ErrorKind::ExpiredSignature => VerifyError::Expired,
        ErrorKind::InvalidAudience => VerifyError::InvalidClaim {
            claim: "aud",
            reason: "does not match project".into(),
        },
        ErrorKind::InvalidIssuer => VerifyError::InvalidClaim {
            claim: "iss",
            reason: "does not match project".into(),
        },
        ErrorKind::MissingRequiredClaim(claim) => VerifyError::Malformed(format!(
            "missing required claim {claim}"
        )),
        _ => VerifyError::Malformed(error.to_string()),
    }
}

fn check_time_claims(claims: &Claims, now: u64) -> std::result::Result<(), VerifyError> {
    if claims.iat.is_some_and(|iat| iat > now) {
        return Err(VerifyError::InvalidClaim {
            claim: "iat",
            reason: "issued in the future".into(),
        });
    }
    if claims.auth_time.is_some_and(|auth_time| auth_time > now) {
        return Err(VerifyError::InvalidClaim {
            claim: "auth_time",
            reason: "authenticated in the future".into(),
        });
    }
    Ok(())
}

fn check_subject(sub: &str) -> std::result::Result<(), VerifyError> {
    if sub.is_empty() {
        return Err(VerifyError::InvalidClaim {
            claim: "sub",
            reason: "must be non-empty".into(),
        });
    }
    if sub.chars().count() > MAX_UID_LEN {
        return Err(VerifyError::InvalidClaim {
            claim: "sub",
            reason: format!("must be at most {MAX_UID_LEN} characters"),
        });
    }
    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[async_trait]
impl CredentialVerifier for FirebaseVerifier {
    fn name(&self) -> &'static str {
        "firebase"
    }

    async fn verify(&self, token: &str) -> std::result::Result<Identity, VerifyError> {
        if token.is_empty() {
            return Err(VerifyError::Empty);
        }

        let header = decode_header(token).map_err(|e| VerifyError::Malformed(e.to_string()))?;
        if header.alg != Algorithm::RS256 {
            return Err(VerifyError::Malformed(format!(
                "unexpected algorithm {:?}",
                header.alg
            )));
        }
        let kid = header.kid.ok_or(VerifyError::UnknownKey { kid: None })?;

        let keys = self.fetch_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| VerifyError::UnknownKey { kid: Some(kid.clone()) })?;
        let key = DecodingKey::from_jwk(jwk)
            .map_err(|e| VerifyError::Unavailable(format!("unusable signing key {kid}: {e}")))?;

        let claims = decode::<Claims>(token, &key, &self.validation())
            .map_err(|e| map_decode_error(&e))?
            .claims;

        check_time_claims(&claims, unix_now())?;
        check_subject(&claims.sub)?;

        Ok(Identity::new(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(iat: Option<u64>, auth_time: Option<u64>) -> Claims {
        Claims {
            sub: "uid".into(),
            iat,
            auth_time,
        }
    }

    #[test]
    fn issuer_includes_project() {
        let verifier = FirebaseVerifier::new("study-bot");
        assert_eq!(verifier.issuer(), "https://securetoken.google.com/study-bot");
    }

    #[test]
    fn validation_pins_rs256_and_zero_leeway() {
        let validation = FirebaseVerifier::new("study-bot").validation();
        assert_eq!(validation.algorithms, vec![Algorithm::RS256]);
        assert_eq!(validation.leeway, 0);
        assert!(validation.required_spec_claims.contains("sub"));
    }

    #[test]
    fn future_iat_is_rejected() {
        let result = check_time_claims(&claims(Some(200), None), 100);
        assert!(matches!(
            result,
            Err(VerifyError::InvalidClaim { claim: "iat", .. })
        ));
    }

    #[test]
    fn future_auth_time_is_rejected() {
        let result = check_time_claims(&claims(Some(50), Some(200)), 100);
        assert!(matches!(
            result,
            Err(VerifyError::InvalidClaim {
                claim: "auth_time",
                ..
            })
        ));
    }

    #[test]
    fn past_times_are_accepted() {
        assert!(check_time_claims(&claims(Some(50), Some(40)), 100).is_ok());
    }

    #[test]
    fn empty_subject_is_rejected() {
        assert!(check_subject("").is_err());
    }

    #[test]
    fn long_subject_is_rejected() {
        assert!(check_subject(&"a".repeat(MAX_UID_LEN + 1)).is_err());
        assert!(check_subject(&"a".repeat(MAX_UID_LEN)).is_ok());
    }

    #[tokio::test]
    async fn empty_token_fails_without_network() {
        let verifier = FirebaseVerifier::new("study-bot").with_jwks_url("http://127.0.0.1:1/keys");
        assert_eq!(verifier.verify("").await, Err(VerifyError::Empty));
    }

    #[tokio::test]
    async fn garbage_token_is_malformed() {
        let verifier = FirebaseVerifier::new("study-bot").with_jwks_url("http://127.0.0.1:1/keys");
        let result = verifier.verify("not-a-jwt").await;
        assert!(matches!(result, Err(VerifyError::Malformed(_))));
    }
}
