//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`identity`] - `StaticVerifier`, a token table standing in for the
//!   identity service.
//! - [`llm`] - `ScriptedStreamer`, a scripted generation service with
//!   failure injection and cancellation tracking.
//! - [`config`] - Canonical test configuration and secrets.

pub mod config;
pub mod identity;
pub mod llm;
