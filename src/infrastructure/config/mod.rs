//! Infrastructure configuration modules.

pub mod identity;
pub mod llm;
pub mod logging;
pub mod secrets;
pub mod server;
pub mod settings;
