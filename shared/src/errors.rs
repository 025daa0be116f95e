//! # Application Error Types
//!
//! Unified error handling for the catalog, grade, enrollment, and admin
//! services with automatic HTTP conversion.
//!
//! ## Design Philosophy
//!
//! Each variant maps to one RPC status and carries the human-readable,
//! user-safe message callers are expected to surface.
//!
//! ## Error Categories
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                          ApiError Categories                          │
//! ├───────────────────┬───────────────────┬───────────────────────────────┤
//! │ Input (400)       │ Authz (401/403)   │ State preconditions (409)     │
//! ├───────────────────┼───────────────────┼───────────────────────────────┤
//! │ InvalidArgument    │ MissingAuth       │ FailedPrecondition            │
//! │ ValidationError    │ PermissionDenied  │ AlreadyExists                 │
//! ├───────────────────┴───────────────────┼───────────────────────────────┤
//! │ Not found (404)                       │ Infra (500/503/504)           │
//! ├────────────────────────────────────────┼──────────────────────────────┤
//! │ NotFound                               │ DatabaseError                │
//! │                                         │ Unavailable                  │
//! │                                         │ DeadlineExceeded              │
//! │                                         │ Internal                     │
//! └─────────────────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! ## HTTP Response Format
//!
//! ```json
//! {
//!   "code": "FAILED_PRECONDITION",
//!   "message": "course CS-201 is full",
//!   "request_id": "550e8400-e29b-41d4-a716-446655440000",
//!   "details": { ... },
//!   "timestamp": "2024-01-15T10:30:00Z"
//! }
//! ```

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidationErrors;

pub type ApiResult<T> = Result<T, ApiError>;

/// Application error type with automatic HTTP status mapping.
///
/// Variants are named after RPC statuses rather than raw HTTP codes,
/// since the same taxonomy is shared by all four services.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed field. Maps to `INVALID_ARGUMENT` / 400.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Request body failed `validator` rules. Maps to `INVALID_ARGUMENT` / 400.
    #[error("Validation error")]
    ValidationError(#[from] ValidationErrors),

    /// Gateway identity header missing. Maps to 401.
    #[error("Missing authentication")]
    MissingAuth,

    /// Role mismatch or faculty-not-assigned-to-course.
    /// Maps to `PERMISSION_DENIED` / 403.
    #[error("Permission denied")]
    PermissionDenied { reason: String },

    /// Unknown id. Maps to `NOT_FOUND` / 404.
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Would violate a uniqueness constraint (e.g. duplicate email).
    /// Maps to `ALREADY_EXISTS` / 409.
    #[error("Resource already exists: {resource}")]
    AlreadyExists { resource: String },

    /// Business-rule violation: capacity full, closed course, cart limit,
    /// missing prereq, duplicate active enrollment, schedule conflict,
    /// enrollment window closed. Maps to `FAILED_PRECONDITION` / 409.
    #[error("{message}")]
    FailedPrecondition { cause: FailureCause, message: String },

    /// PostgreSQL query failed. Maps to `INTERNAL` / 500.
    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    /// A peer RPC (Catalog/Grade) is down or refused the call.
    /// Maps to `UNAVAILABLE` / 503.
    #[error("Service unavailable: {service}")]
    Unavailable { service: String },

    /// A peer RPC exceeded its deadline. Maps to
    /// `DEADLINE_EXCEEDED` / 504.
    #[error("Deadline exceeded calling {service}")]
    DeadlineExceeded { service: String },

    /// Unspecified internal error. Maps to `INTERNAL` / 500.
    #[error("Internal server error")]
    InternalError { message: String },
}

/// Machine-readable cause tag for `FAILED_PRECONDITION` errors, so gateways
/// and UIs can branch without parsing the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCause {
    CartEmpty,
    CartFull,
    DuplicateInCart,
    ScheduleConflict,
    MissingPrerequisite,
    UnitCapExceeded,
    CourseClosed,
    CourseFull,
    DuplicateActiveEnrollment,
    EnrollmentWindowClosed,
    CapacityBelowEnrolled,
    CourseHasActiveEnrollments,
}

impl ApiError {
    /// Returns a machine-readable error code, stable across releases.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::ValidationError(_) => "INVALID_ARGUMENT",
            Self::MissingAuth => "MISSING_AUTH",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::FailedPrecondition { .. } => "FAILED_PRECONDITION",
            Self::DatabaseError(_) => "INTERNAL",
            Self::Unavailable { .. } => "UNAVAILABLE",
            Self::DeadlineExceeded { .. } => "DEADLINE_EXCEEDED",
            Self::InternalError { .. } => "INTERNAL",
        }
    }

    /// Returns the HTTP status code for this error. Source of truth for
    /// both the Actix `ResponseError` impl and the gateway's RPC-status
    /// translation.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument { .. } | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::MissingAuth => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AlreadyExists { .. } => StatusCode::CONFLICT,
            Self::FailedPrecondition { .. } => StatusCode::CONFLICT,
            Self::DatabaseError(_) | Self::InternalError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::DeadlineExceeded { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// `true` for 5xx-class errors: logged at ERROR, never expose internals.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_)
                | Self::InternalError { .. }
                | Self::Unavailable { .. }
                | Self::DeadlineExceeded { .. }
        )
    }

    /// Convenience constructor for a `FAILED_PRECONDITION` with the
    /// offending course code embedded in the message (e.g. "course
    /// CS-201 is full").
    pub fn precondition(cause: FailureCause, message: impl Into<String>) -> Self {
        Self::FailedPrecondition {
            cause,
            message: message.into(),
        }
    }
}

/// Standard error response body returned by every service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<FailureCause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ErrorResponse {
    pub fn new(error: &ApiError) -> Self {
        let cause = match error {
            ApiError::FailedPrecondition { cause, .. } => Some(*cause),
            _ => None,
        };

        let details = match error {
            ApiError::ValidationError(errors) => {
                Some(serde_json::to_value(errors).unwrap_or_default())
            }
            // Server errors: don't expose internals to clients.
            ApiError::DatabaseError(_) | ApiError::InternalError { .. } => None,
            _ => None,
        };

        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            cause,
            request_id: None,
            details,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        ApiError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        } else {
            tracing::warn!(error = %self, code = self.error_code(), "request rejected");
        }
        let response = ErrorResponse::new(self);
        HttpResponse::build(ApiError::status_code(self)).json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_return_400() {
        assert_eq!(
            ApiError::InvalidArgument { message: "x".into() }.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_permission_denied_returns_403() {
        assert_eq!(
            ApiError::PermissionDenied { reason: "x".into() }.status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_failed_precondition_returns_409() {
        let err = ApiError::precondition(FailureCause::CourseFull, "course CS-201 is full");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "FAILED_PRECONDITION");
    }

    #[test]
    fn test_not_found_returns_404() {
        assert_eq!(
            ApiError::NotFound { resource: "course:x".into() }.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_server_errors_are_flagged() {
        assert!(ApiError::InternalError { message: "x".into() }.is_server_error());
        assert!(ApiError::Unavailable { service: "catalog".into() }.is_server_error());
        assert!(!ApiError::NotFound { resource: "x".into() }.is_server_error());
    }

    #[test]
    fn test_error_response_includes_cause() {
        let err = ApiError::precondition(FailureCause::MissingPrerequisite, "prereq not met");
        let response = ErrorResponse::new(&err);
        assert_eq!(response.cause, Some(FailureCause::MissingPrerequisite));
    }
}
