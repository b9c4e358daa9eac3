//! HTTP router construction.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>, cors_origin: &str) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/notes/{file_id}", post(api::generate_notes))
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

/// `*` allows any origin; otherwise a comma-separated origin list.
fn cors_layer(cors_origin: &str) -> CorsLayer {
    if cors_origin.trim() == "*" {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = cors_origin
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
