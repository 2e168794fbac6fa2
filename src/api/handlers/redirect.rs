//! Handlers for short URL redirects.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::application::services::Resolution;
use crate::domain::entities::RedirectType;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code through [`crate::application::services::LinkService::resolve`],
///    which counts the hit and persists it
/// 2. Redirect with the link's status (301 or 302) to its target
///
/// Unknown, burnt, expired and malformed codes all get the same 301 to the
/// configured not-found page; callers cannot tell them apart. A path segment
/// that does not decode to UTF-8 is a malformed code.
///
/// # Errors
///
/// Returns 500 Internal Server Error only for fatal store failures.
pub async fn redirect_handler(
    State(state): State<AppState>,
    code: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let Ok(Path(code)) = code else {
        return Ok(not_found(&state));
    };

    let response = match state.link_service.resolve(&code).await? {
        Resolution::Redirect {
            location,
            redirect_type,
        } => redirect(status_for(redirect_type), &location),
        Resolution::NotFound(_) => not_found(&state),
    };

    Ok(response)
}

/// Sends every unmatched request (bare `/`, nested paths) to the not-found page.
pub async fn not_found_handler(State(state): State<AppState>) -> Response {
    not_found(&state)
}

fn status_for(redirect_type: RedirectType) -> StatusCode {
    match redirect_type {
        RedirectType::Permanent => StatusCode::MOVED_PERMANENTLY,
        RedirectType::Found => StatusCode::FOUND,
    }
}

fn not_found(state: &AppState) -> Response {
    redirect(StatusCode::MOVED_PERMANENTLY, &state.not_found_url)
}

fn redirect(status: StatusCode, location: &str) -> Response {
    (status, [(header::LOCATION, location.to_string())]).into_response()
}
