//! Mapping of request failures to HTTP responses.
//!
//! Every failure leaves the handler as a status code plus a JSON
//! `{"detail": ...}` body; nothing propagates past the HTTP boundary.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::application::AskError;

/// Failure of a `POST` to the endpoint, before the body starts streaming.
#[derive(Debug)]
pub enum ApiError {
    /// Body was not a JSON object with an optional string `prompt`.
    Body(serde_json::Error),
    Ask(AskError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Body(_) | Self::Ask(AskError::InvalidPrompt(_)) => StatusCode::BAD_REQUEST,
            Self::Ask(AskError::Unauthorized) => StatusCode::UNAUTHORIZED,
            Self::Ask(AskError::Upstream(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message for the caller. Upstream and verification detail is withheld.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Body(e) => format!("invalid request body: {e}"),
            Self::Ask(AskError::InvalidPrompt(e)) => e.to_string(),
            Self::Ask(AskError::Unauthorized) => "Invalid token".to_string(),
            Self::Ask(AskError::Upstream(_)) => "Generation service unavailable".to_string(),
        }
    }
}

impl From<AskError> for ApiError {
    fn from(err: AskError) -> Self {
        Self::Ask(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "detail": self.detail() }));
        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
