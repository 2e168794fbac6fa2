//! API-facing error type.
//!
//! Every error renders as `{"message": "..."}` with a status derived from the
//! variant. Not-found outcomes are deliberately absent here: the resolver
//! turns them into redirects (see [`crate::application::services::Resolution`]).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::repositories::StoreError;

/// Which creation rule rejected the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Body is not JSON or a field has the wrong JSON type.
    MalformedBody,
    MissingField,
    InvalidUrl,
    MalformedDate,
    InvalidEnum,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        kind: ValidationKind,
        field: &'static str,
        message: String,
    },

    #[error("Failed to generate a unique code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error("Store: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(kind: ValidationKind, field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            field,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the rejected rule for validation errors.
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            Self::Validation { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::CodeSpaceExhausted { .. } | Self::Store(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = ErrorBody {
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
