//! Streaming completion port for generation adapters.
//!
//! Defines the interface the request handler uses to turn a validated prompt
//! into a sequence of text fragments.

use async_trait::async_trait;

use crate::domain::{FragmentStream, Identity, Prompt};
use crate::error::Result;

/// Client for a streaming large language model.
///
/// Implementations wrap a specific provider and own its model, sampling
/// parameters and credentials, all fixed at construction.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) so one instance can
/// serve concurrent requests.
///
/// # Errors
///
/// [`stream`](Self::stream) fails when the call is rejected before any
/// output exists. Failures after that surface as an `Err` item that ends the
/// returned stream.
#[async_trait]
pub trait CompletionStreamer: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Open a streaming completion for `prompt` on behalf of `identity`.
    ///
    /// The identity is attached as attribution metadata and does not affect
    /// routing. Resolves once the generation service has accepted the call.
    async fn stream(&self, prompt: &Prompt, identity: &Identity) -> Result<FragmentStream>;
}
