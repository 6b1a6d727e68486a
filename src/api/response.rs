//! Response types for the HR API.
//!
//! Successful calls answer with an [`ApiSuccess`] envelope; failures with an
//! [`ApiError`] body and the status code chosen for the engine error.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::services::{ListSummary, Listing, strip_html};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs a status with an error body.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// 401 for requests without a usable identity.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", message))
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::Store { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            EngineError::InvalidRange { .. } => (StatusCode::BAD_REQUEST, "INVALID_RANGE"),
            EngineError::MissingField { .. } => (StatusCode::BAD_REQUEST, "MISSING_FIELD"),
            EngineError::UnknownField { .. } => (StatusCode::BAD_REQUEST, "UNKNOWN_FIELD"),
            EngineError::InvalidField { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            EngineError::OutsideGeofence { .. } => (StatusCode::BAD_REQUEST, "OUTSIDE_GEOFENCE"),
            EngineError::RequestCutoffPassed { .. } => {
                (StatusCode::BAD_REQUEST, "REQUEST_CUTOFF_PASSED")
            }
            EngineError::SubmissionRejected { .. } => {
                (StatusCode::BAD_REQUEST, "SUBMISSION_REJECTED")
            }
            EngineError::MissingCalendar { .. } => (StatusCode::NOT_FOUND, "MISSING_CALENDAR"),
            EngineError::DocumentNotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            EngineError::NoLinkedEmployee { .. } => {
                (StatusCode::NOT_FOUND, "NO_LINKED_EMPLOYEE")
            }
            EngineError::DuplicateEntry { .. } => (StatusCode::CONFLICT, "DUPLICATE_ENTRY"),
            EngineError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        };

        // Internal failures keep their cause out of the message.
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            ApiError::with_details(code, "Internal error", strip_html(&error.to_string()))
        } else {
            ApiError::new(code, strip_html(&error.to_string()))
        };
        Self::new(status, error)
    }
}

/// Success envelope shared by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSuccess<T> {
    /// Always true.
    pub status: bool,
    /// What was done.
    pub message: String,
    /// The payload.
    pub data: T,
    /// Totals, for list endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ListSummary>,
}

impl<T> ApiSuccess<T> {
    /// Wraps `data` with a message.
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data,
            summary: None,
        }
    }
}

impl<T> ApiSuccess<Vec<T>> {
    /// Wraps a listing, moving its summary into the envelope.
    pub fn listing(message: impl Into<String>, listing: Listing<T>) -> Self {
        Self {
            summary: Some(listing.summary),
            ..Self::new(message, listing.items)
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Handler result: an envelope or an error response.
pub type ApiResult<T> = Result<ApiSuccess<T>, ApiErrorResponse>;
