//! Translation of handler failures into JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{dto::ErrorResponse, service::ServiceError};

/// Every way a request can fail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No authenticated user, or the credentials were rejected (401).
    #[error("{0}")]
    Unauthorized(String),

    /// A required parameter is missing or malformed (400).
    #[error("{0}")]
    BadRequest(String),

    /// Raised by the persistence service; keeps its own status and message.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Service(e) => match e {
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Message shown to the client. Storage failures are reported
    /// generically, their cause only goes to the log.
    pub fn message(&self) -> String {
        match self {
            Self::Service(ServiceError::Storage(_)) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("request rejected: {}", self);
        }

        let body = ErrorResponse {
            status: status.as_u16(),
            message: self.message(),
        };

        (status, Json(body)).into_response()
    }
}
