//! Scripted [`CompletionStreamer`] for tests.
//!
//! Plays back a fixed list of generation events. Empty events are dropped the
//! way a real adapter drops empty deltas, so callers can check they never
//! reach the response body.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Fragment, FragmentStream, Identity, Prompt};
use crate::error::{Error, Result};
use crate::port::outbound::llm::CompletionStreamer;

/// A streamer with a scripted event list and call recording.
#[derive(Debug, Default)]
pub struct ScriptedStreamer {
    events: Vec<String>,
    start_failure: Option<u16>,
    fail_after: Option<usize>,
    delay: Option<Duration>,
    tag_with_user: bool,
    requests: Mutex<Vec<(String, String)>>,
    calls: AtomicUsize,
    emitted: Arc<AtomicUsize>,
    abandoned: Arc<AtomicBool>,
}

impl ScriptedStreamer {
    pub fn new<I, S>(events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            events: events.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// A streamer whose calls are rejected with `status` before any output.
    pub fn failing_to_start(status: u16) -> Self {
        Self {
            start_failure: Some(status),
            ..Self::default()
        }
    }

    /// Fail the stream after `count` events have been played.
    pub fn fail_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Sleep before each event.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Prefix every event with `"<user_id>:"`.
    pub fn tagged_by_user(mut self) -> Self {
        self.tag_with_user = true;
        self
    }

    /// Number of `stream` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(prompt, user_id)` for every `stream` call, in call order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Events played so far across all streams.
    pub fn emitted(&self) -> usize {
        self.emitted.load(Ordering::SeqCst)
    }

    /// Whether a stream was dropped before it finished.
    pub fn abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }
}

/// Marks the stream abandoned unless it ran to the end.
struct Completion {
    abandoned: Arc<AtomicBool>,
    done: bool,
}

impl Drop for Completion {
    fn drop(&mut self) {
        if !self.done {
            self.abandoned.store(true, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl CompletionStreamer for ScriptedStreamer {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn stream(&self, prompt: &Prompt, identity: &Identity) -> Result<FragmentStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let user_id = identity.user_id().to_string();
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((prompt.as_str().to_string(), user_id.clone()));

        if let Some(status) = self.start_failure {
            return Err(Error::Upstream {
                status,
                message: "scripted start failure".into(),
            });
        }

        let events = self.events.clone();
        let fail_after = self.fail_after;
        let delay = self.delay;
        let tag_with_user = self.tag_with_user;
        let emitted = Arc::clone(&self.emitted);
        let abandoned = Arc::clone(&self.abandoned);

        Ok(Box::pin(async_stream::stream! {
            let mut completion = Completion { abandoned, done: false };

            for (index, event) in events.into_iter().enumerate() {
                if fail_after == Some(index) {
                    completion.done = true;
                    yield Err(Error::Stream("scripted mid-stream failure".into()));
                    return;
                }
                match delay {
                    Some(delay) => tokio::time::sleep(delay).await,
                    None => tokio::task::yield_now().await,
                }
                emitted.fetch_add(1, Ordering::SeqCst);

                let text = if tag_with_user && !event.is_empty() {
                    format!("{user_id}:{event}")
                } else {
                    event
                };
                if let Some(fragment) = Fragment::new(text) {
                    yield Ok(fragment);
                }
            }

            completion.done = true;
        }))
    }
}
