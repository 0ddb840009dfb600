use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::DomainError;

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
}

/// Axum-renderable API error: status code plus a message carried verbatim in
/// the response body.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(status = %self.status, "{}", self.message);
        let body = ErrorBody {
            status_code: self.status.as_u16(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Map domain errors onto HTTP statuses: not-found → 404, conflicts → 409,
/// malformed input → 400, everything else → 500 with the underlying message
/// in the body.
impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UserNotFound { .. } | DomainError::TaskNotFound { .. } => {
                Self::not_found(e.to_string())
            }
            DomainError::PassportAlreadyRegistered { .. }
            | DomainError::TaskAlreadyCompleted { .. } => Self::conflict(e.to_string()),
            DomainError::MalformedPassport { .. } => Self::bad_request(e.to_string()),
            DomainError::Lookup { .. } | DomainError::Database { .. } => {
                Self::internal(e.to_string())
            }
        }
    }
}
