//! LLM adapter modules.
//!
//! Provides implementations of the
//! [`CompletionStreamer`](crate::port::outbound::llm::CompletionStreamer) trait.

pub mod openai;
