//! Handler for link creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::dto::create_link::{CreateLinkRequest, CreateLinkResponse};
use crate::error::{AppError, ValidationKind};
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com/some/long/path",
///   "redirectType": 302,
///   "mode": "EXPCOUNTER",   // optional: ETERNAL | EXPDATE | EXPCOUNTER
///   "timesToExpire": 3,     // optional
///   "expiredDate": "31/12/2030"  // optional, DD/MM/YYYY
/// }
/// ```
///
/// A literal `null` body is treated as an empty object.
///
/// # Response
///
/// ```json
/// { "tinyId": "https://sntg.it/aB3xY9" }
/// ```
///
/// # Errors
///
/// Returns 422 Unprocessable Entity with `{"message"}` if the body is not
/// valid JSON or fails validation; nothing is written in that case.
/// Returns 500 Internal Server Error if the store fails or no free code is
/// found.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<Option<CreateLinkRequest>>, JsonRejection>,
) -> Result<Json<CreateLinkResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::validation(ValidationKind::MalformedBody, "body", rejection.body_text())
    })?;

    let new_link = request
        .unwrap_or_default()
        .into_new_link(state.validate_url_syntax)?;

    let record = state.link_service.create_link(new_link).await?;

    Ok(Json(CreateLinkResponse {
        tiny_id: state.short_url(&record.code),
    }))
}
