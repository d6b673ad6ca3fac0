//! Driving adapters.

pub mod cli;
pub mod http;
