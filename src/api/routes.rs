//! Public link routes.

use crate::api::handlers::{
    create_link_handler, health_handler, not_found_handler, redirect_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All link routes. None of them require authentication.
///
/// # Endpoints
///
/// - `POST /`        - Create a short link
/// - `GET  /`        - Redirect to the not-found page
/// - `GET  /health`  - Store health check
/// - `GET  /{code}`  - Resolve a short code and redirect
///
/// Any other path falls back to the not-found redirect.
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(not_found_handler).post(create_link_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .fallback(not_found_handler)
}
