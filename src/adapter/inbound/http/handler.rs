//! `POST /studybot` handler.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use futures_util::TryStreamExt;
use serde::Deserialize;

use super::error::ApiError;
use crate::application::StudyBot;

/// Inbound request body. Only `prompt` is read; other fields are ignored.
#[derive(Debug, Deserialize)]
struct StudyRequest {
    #[serde(default)]
    prompt: Option<String>,
}

/// Validate and authenticate, then stream fragments as a `text/plain` body.
///
/// The 200 status is committed as soon as the generation call is accepted;
/// each fragment becomes one body chunk. A mid-stream failure aborts the
/// chunked body, so the caller sees a truncated response.
pub async fn studybot(
    State(bot): State<StudyBot>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: StudyRequest = serde_json::from_slice(&body).map_err(ApiError::Body)?;
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let fragments = bot.ask(request.prompt.as_deref(), authorization).await?;
    let body = Body::from_stream(fragments.map_ok(|fragment| Bytes::from(fragment.into_string())));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response())
}
