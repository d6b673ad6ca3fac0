//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the two external collaborators: the identity
//! service and the generation service.

pub mod identity;
pub mod llm;
