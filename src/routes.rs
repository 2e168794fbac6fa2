//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`        - Create a short link
//! - `GET  /{code}`  - Short link redirect
//! - `GET  /health`  - Health check
//! - anything else   - 301 to the not-found page
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin may call the API
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/abc123/` resolves the
/// same code as `/abc123`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = api::routes::link_routes()
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
