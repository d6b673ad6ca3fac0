//! In-memory [`CredentialVerifier`] for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::Identity;
use crate::port::outbound::identity::{CredentialVerifier, VerifyError};

/// Accepts a fixed set of tokens and counts verification calls.
#[derive(Debug, Default)]
pub struct StaticVerifier {
    tokens: HashMap<String, String>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl StaticVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A verifier whose identity service is down: every call fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Accept `token` as the user `user_id`.
    pub fn allow(mut self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), user_id.into());
        self
    }

    /// Number of `verify` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialVerifier for StaticVerifier {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn verify(&self, token: &str) -> Result<Identity, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(VerifyError::Unavailable("identity service down".into()));
        }
        self.tokens
            .get(token)
            .map(|user_id| Identity::new(user_id.as_str()))
            .ok_or_else(|| VerifyError::Malformed("unknown test token".into()))
    }
}
