//! OpenAI streaming chat client.
//!
//! Provides an implementation of the [`CompletionStreamer`] trait for the
//! OpenAI Chat Completions API with `stream: true`.

use std::time::Duration;

use async_stream::try_stream;
use async_trait::async_trait;
use bytes::Bytes;
use eventsource_stream::{EventStreamError, Eventsource};
use futures_util::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Fragment, FragmentStream, Identity, Prompt};
use crate::error::{Error, Result};
use crate::infrastructure::config::llm::LlmConfig;
use crate::port::outbound::llm::CompletionStreamer;

/// Default OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Marker event that ends an OpenAI stream.
const DONE_MARKER: &str = "[DONE]";

/// Upstream error bodies are cut to this many bytes before logging.
const MAX_ERROR_BODY: usize = 512;

/// How long to wait for the response status before giving up.
const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI API client.
#[derive(Debug)]
pub struct OpenAi {
    /// HTTP client for API requests.
    client: Client,
    /// API key for authentication.
    api_key: String,
    /// Base URL, without the `/chat/completions` suffix.
    base_url: String,
    /// Model identifier (e.g., "gpt-4o-mini").
    model: String,
    /// Sampling temperature (0.0 to 2.0).
    temperature: f64,
    /// Optional cap on generated tokens.
    max_tokens: Option<u32>,
    /// Limit on the wait for response headers. The body is not limited.
    response_timeout: Duration,
}

impl OpenAi {
    /// Create a new OpenAI client against the public API.
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            temperature,
            max_tokens: None,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
        }
    }

    /// Build a client from the `[llm]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(api_key: impl Into<String>, config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            response_timeout: Duration::from_secs(config.response_timeout_secs),
        })
    }

    /// Point the client at a different API root (proxies, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
    messages: Vec<Message<'a>>,
    /// End-user attribution; does not affect routing.
    user: &'a str,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChunkEvent {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Default)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Outcome of decoding one SSE payload.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Fragment(Fragment),
    Skip,
    Done,
}

fn decode_event(data: &str) -> Result<Step> {
    if data.trim() == DONE_MARKER {
        return Ok(Step::Done);
    }

    let event: ChunkEvent = serde_json::from_str(data)?;
    if let Some(error) = event.error {
        return Err(Error::Stream(error.message));
    }

    let content = event
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .and_then(Fragment::new);

    Ok(content.map_or(Step::Skip, Step::Fragment))
}

/// Turn an SSE response body into a fragment stream.
///
/// Empty deltas are dropped. The stream ends at `[DONE]`, at the end of the
/// body, or with an `Err` item on the first transport or decode failure.
pub(crate) fn fragments<S, E>(body: S) -> impl Stream<Item = Result<Fragment>> + Send
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
    Error: From<E>,
{
    try_stream! {
        let events = body.eventsource();
        futures_util::pin_mut!(events);

        while let Some(event) = events.next().await {
            let event = event.map_err(event_error)?;
            if event.data.is_empty() {
                continue;
            }
            match decode_event(&event.data)? {
                Step::Fragment(fragment) => {
                    yield fragment;
                }
                Step::Skip => {}
                Step::Done => break,
            }
        }
    }
}

fn event_error<E>(err: EventStreamError<E>) -> Error
where
    E: std::fmt::Display,
    Error: From<E>,
{
    match err {
        EventStreamError::Transport(e) => Error::from(e),
        other => Error::Parse(format!("malformed event stream: {other}")),
    }
}

fn truncate(mut message: String) -> String {
    if message.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message.truncate(end);
    }
    message
}

#[async_trait]
impl CompletionStreamer for OpenAi {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn stream(&self, prompt: &Prompt, identity: &Identity) -> Result<FragmentStream> {
        let request = Request {
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: true,
            messages: vec![Message {
                role: "user",
                content: prompt.as_str(),
            }],
            user: identity.user_id().as_str(),
        };

        let send = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send();
        let response = tokio::time::timeout(self.response_timeout, send)
            .await
            .map_err(|_| Error::Timeout(self.response_timeout))??;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                message: truncate(message),
            });
        }

        debug!(model = %self.model, "generation stream opened");
        Ok(Box::pin(fragments(response.bytes_stream())))
    }
}
