//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌─────────────────────────┐
//!   HTTP ────────▶│  application::StudyBot  │
//!                 └─────────────────────────┘
//!                      │               │
//!                      ▼               ▼
//!          ┌────────────────────┐ ┌────────────────────┐
//!          │ CredentialVerifier │ │ CompletionStreamer │
//!          │ (Firebase)         │ │ (OpenAI)           │
//!          └────────────────────┘ └────────────────────┘
//! ```

pub mod outbound;

pub use outbound::identity::{CredentialVerifier, VerifyError};
pub use outbound::llm::CompletionStreamer;
