//! Unified error types for the greeting API.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::envelope::Envelope;

/// Client-supplied data failed a contract. Always reported as HTTP 400.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name missing, empty, or not a JSON string.
    #[error("Name is required and must be a string")]
    NameRequired,

    /// Trimmed name longer than the allowed maximum.
    #[error("Name must be {max} characters or less")]
    NameTooLong {
        /// Maximum length in characters.
        max: usize,
    },

    /// Nothing left after stripping disallowed characters.
    #[error("Name contains only invalid characters")]
    NameInvalidCharacters,

    /// Language present but not a JSON string.
    #[error("Language must be a string")]
    LanguageNotString,

    /// Request body is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    MalformedBody(String),
}

/// Errors returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request data rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No handler for the requested API path.
    #[error("API endpoint not found: {path}")]
    NotFound {
        /// Path (and query) of the original request.
        path: String,
    },

    /// Request body could not be read, e.g. over the size limit.
    #[error("{}", .0.body_text())]
    Body(#[from] BytesRejection),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Body(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let envelope = match &self {
            ApiError::Validation(e) => {
                tracing::debug!(error = %e, "request rejected");
                Envelope::failure(e.to_string())
            }
            ApiError::NotFound { .. } => {
                Envelope::failure(self.to_string()).with_available_endpoints()
            }
            ApiError::Body(rejection) => {
                tracing::debug!(status = %rejection.status(), "request body rejected");
                Envelope::failure(rejection.body_text())
            }
        };

        envelope.into_response_with(status)
    }
}

/// Convenient Result type alias for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_contract() {
        assert_eq!(
            ValidationError::NameRequired.to_string(),
            "Name is required and must be a string"
        );
        assert_eq!(
            ValidationError::NameTooLong { max: 50 }.to_string(),
            "Name must be 50 characters or less"
        );
        assert_eq!(
            ValidationError::NameInvalidCharacters.to_string(),
            "Name contains only invalid characters"
        );
    }

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            ApiError::from(ValidationError::NameRequired).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound { path: "/api/x".into() }.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn not_found_message_contains_path() {
        let err = ApiError::NotFound {
            path: "/api/unknown?x=1".into(),
        };
        assert_eq!(err.to_string(), "API endpoint not found: /api/unknown?x=1");
    }
}
