//! Identity adapters.
//!
//! Provides implementations of the
//! [`CredentialVerifier`](crate::port::outbound::identity::CredentialVerifier) trait.

pub mod firebase;
