//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::mail::{ErrorKind, MailError};

// Errors

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Map a mail error to a response. Server side failures are
    /// prefixed with `context` so the client knows which step failed.
    pub fn from_mail(err: MailError, context: &str) -> Self {
        let status = match err.kind() {
            ErrorKind::Auth => StatusCode::UNAUTHORIZED,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Upstream | ErrorKind::Normalization => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = if status.is_server_error() {
            format!("{}: {}", context, err)
        } else {
            err.to_string()
        };
        Self::new(status, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}", self.message);
        } else {
            tracing::debug!("{} {}", self.status, self.message);
        }

        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Enables using `?` on functions that return `Result<_, MailError>`
impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        Self::from_mail(err, "Something went wrong")
    }
}

// Re-export public types from each route

pub mod auth {
    pub use crate::api::routes::auth::public::*;
}

pub mod group {
    pub use crate::api::routes::group::public::*;
}

pub mod mail {
    pub use crate::api::routes::mail::public::*;
}
