//! API layer - HTTP entry points.

pub mod http;

use axum::http::{HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app::App;

/// The full HTTP router with tracing and CORS applied.
pub fn router(app: Arc<App>, cors_allowed_origins: Option<&str>) -> Router {
    http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_allowed_origins))
}

/// Restrict CORS to a comma-separated origin list, or mirror any origin when
/// no list is configured (or it is `*`).
pub fn build_cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = match allowed_origins.map(str::trim) {
        None | Some("") | Some("*") => return CorsLayer::permissive(),
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect(),
    };

    if origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS has no valid origins, allowing any origin");
        return cors.allow_origin(Any);
    }
    cors.allow_origin(origins)
}
