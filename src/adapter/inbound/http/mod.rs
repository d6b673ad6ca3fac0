//! HTTP surface: one authenticated streaming route.
//!
//! Built on `axum` with `tower-http` layers for CORS and request tracing.

pub mod error;
pub mod handler;

use std::future::Future;

use axum::http::{header, HeaderValue, Method};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::application::StudyBot;
use crate::error::Result;
use crate::infrastructure::config::server::{CorsConfig, ServerConfig};

/// Build the router for `bot` with CORS and tracing applied.
pub fn router(bot: StudyBot, server: &ServerConfig, cors: &CorsConfig) -> Router {
    Router::new()
        .route(&server.path, post(handler::studybot))
        .with_state(bot)
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy: configured origins, `POST` only, `Authorization` and
/// `Content-Type` request headers only.
pub fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins = if cors.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let values = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring unusable CORS origin");
                    None
                }
            })
            .collect::<Vec<_>>();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Serve `app` on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the listener fails.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
