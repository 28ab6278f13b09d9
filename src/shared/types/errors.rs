use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Error taxonomy for the API surface.
///
/// Every variant maps to a fixed HTTP status and a generic client-facing
/// message. Internal detail never reaches the client; it goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown username or wrong password. Deliberately does not say which.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No bearer token on a protected route.
    #[error("Missing authentication token")]
    MissingToken,

    /// Token failed signature or claim validation.
    #[error("Invalid authentication token")]
    TokenInvalid,

    /// Token signature is fine but the expiry window has elapsed.
    #[error("Token has expired")]
    TokenExpired,

    /// Authenticated but the permission set does not cover the action.
    #[error("Insufficient permissions")]
    Forbidden,

    /// Malformed request body (missing or empty fields).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Anything unclassified. The detail is logged, never serialized.
    #[error("Internal server error")]
    Internal(String),
}

/// JSON body for every error response: `{"error": ..., "message": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials
            | Self::MissingToken
            | Self::TokenInvalid
            | Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "InvalidCredentials",
            Self::MissingToken => "MissingToken",
            Self::TokenInvalid => "TokenInvalid",
            Self::TokenExpired => "TokenExpired",
            Self::Forbidden => "Forbidden",
            Self::Validation(_) => "ValidationError",
            Self::Internal(_) => "InternalError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            error!("internal error: {}", detail);
        }

        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::Validation("username is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_not_serialized() {
        let err = ApiError::Internal("connection pool exhausted".into());
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn invalid_credentials_message_is_generic() {
        // Must not reveal whether the username or the password was wrong.
        assert_eq!(
            ApiError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }
}
