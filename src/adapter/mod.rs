//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - HTTP endpoint and command line
//! - [`outbound`] - Firebase identity verification and OpenAI streaming

pub mod inbound;
pub mod outbound;
