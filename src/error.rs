//! Error types with HTTP status code mapping.
//!
//! [`PortfolioError`] is the central error type. Validation problems are
//! reported to the client verbatim; every other variant is shaped by an
//! [`ErrorPolicy`], which decides whether internal detail reaches the
//! response body or is replaced by a generic per-endpoint message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// { "error": "Please provide a valid email address." }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Client input was malformed. Always maps to `400 Bad Request`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent or blank after trimming.
    #[error("All fields (name, email, message) are required.")]
    MissingField(&'static str),

    /// A field exceeds the stored column width, in characters.
    #[error("The {field} field must be at most {max} characters.")]
    TooLong {
        /// Offending field.
        field: &'static str,
        /// Maximum accepted length.
        max: usize,
    },

    /// The email address does not look like `local@domain.tld`.
    #[error("Please provide a valid email address.")]
    InvalidEmail,

    /// The request body could not be decoded as the expected JSON shape.
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant       | HTTP Status               |
/// |---------------|---------------------------|
/// | `Validation`  | 400 Bad Request           |
/// | `NotFound`    | 404 Not Found             |
/// | `Connection`  | 500 Internal Server Error |
/// | `Persistence` | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    /// Request validation failed before any I/O.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backing store could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// A read or write against the backing store failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Requested record does not exist. Reserved; no route produces it yet.
    #[error("not found: {0}")]
    NotFound(String),
}

impl PortfolioError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Connection(_) | Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An error already shaped for the wire: a status code and the message
/// the client is allowed to see.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error response with the given status and message.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// HTTP status that will be sent.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Message that will be placed in the `error` field.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = self.status;
        response
    }
}

/// Decides how much of an internal error is revealed to clients.
///
/// Built once from configuration and carried in the application state, so
/// error shaping never consults the process environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorPolicy {
    expose_internal: bool,
}

impl ErrorPolicy {
    /// Creates a policy. With `expose_internal` set, 5xx bodies carry the
    /// underlying error text instead of the generic fallback.
    #[must_use]
    pub const fn new(expose_internal: bool) -> Self {
        Self { expose_internal }
    }

    /// Whether internal error detail is sent to clients.
    #[must_use]
    pub const fn exposes_internal(&self) -> bool {
        self.expose_internal
    }

    /// Shapes `err` into a response. Validation errors keep their own
    /// message; anything else is logged and answered with `fallback`
    /// unless the policy exposes internal detail.
    #[must_use]
    pub fn reject(&self, err: PortfolioError, fallback: &str) -> ApiError {
        let status = err.status_code();
        match err {
            PortfolioError::Validation(validation) => {
                tracing::debug!(error = %validation, "request rejected");
                ApiError::new(status, validation.to_string())
            }
            other => ApiError::new(status, self.detail(&other, fallback)),
        }
    }

    /// Returns the client-visible description of a non-validation error,
    /// logging the full detail either way.
    #[must_use]
    pub fn detail(&self, err: &PortfolioError, fallback: &str) -> String {
        tracing::error!(error = %err, "{fallback}");
        if self.expose_internal {
            err.to_string()
        } else {
            fallback.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = PortfolioError::from(ValidationError::InvalidEmail);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_map_to_internal_error() {
        let conn = PortfolioError::Connection("refused".to_string());
        let write = PortfolioError::Persistence("disk full".to_string());
        assert_eq!(conn.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(write.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            PortfolioError::NotFound("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn suppressing_policy_hides_detail() {
        let policy = ErrorPolicy::new(false);
        let shaped = policy.reject(
            PortfolioError::Persistence("relation \"visitors\" does not exist".to_string()),
            "Failed to track visit.",
        );
        assert_eq!(shaped.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(shaped.message(), "Failed to track visit.");
    }

    #[test]
    fn exposing_policy_reveals_detail() {
        let policy = ErrorPolicy::new(true);
        let shaped = policy.reject(
            PortfolioError::Connection("connection refused".to_string()),
            "Failed to track visit.",
        );
        assert_eq!(shaped.message(), "connection error: connection refused");
    }

    #[test]
    fn validation_message_is_never_replaced() {
        for policy in [ErrorPolicy::new(false), ErrorPolicy::new(true)] {
            let shaped = policy.reject(
                ValidationError::MissingField("name").into(),
                "Something went wrong. Please try again later.",
            );
            assert_eq!(shaped.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                shaped.message(),
                "All fields (name, email, message) are required."
            );
        }
    }

    #[test]
    fn default_policy_suppresses() {
        assert!(!ErrorPolicy::default().exposes_internal());
    }
}
