//! Request extraction for the HR API.
//!
//! The caller is identified by the `x-user-id` header (and optionally
//! `x-role-profile`). Bodies are loose JSON objects that the services map
//! through their own allow-lists.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderMap, StatusCode},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::services::Identity;
use crate::services::payload::into_fields;
use crate::store::Fields;

use super::response::{ApiError, ApiErrorResponse};

/// Header carrying the calling user's id.
pub const USER_HEADER: &str = "x-user-id";

/// Header carrying the calling user's role profile.
pub const ROLE_PROFILE_HEADER: &str = "x-role-profile";

/// Query for `GET /api/employees`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeListQuery {
    /// Return only the caller's own record.
    #[serde(default)]
    pub only_self: bool,
}

/// Query for `GET /api/leave-dashboard`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    /// Date to report balances on; defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Reads the caller from the request headers.
pub fn caller(headers: &HeaderMap) -> Result<Identity, ApiErrorResponse> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let Some(user) = header(USER_HEADER) else {
        return Err(ApiErrorResponse::unauthorized(format!(
            "{} header is required",
            USER_HEADER
        )));
    };
    let mut identity = Identity::new(user);
    if let Some(profile) = header(ROLE_PROFILE_HEADER) {
        identity = identity.with_role_profile(profile);
    }
    Ok(identity)
}

/// Unwraps a JSON body into a field map.
pub fn body_fields(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Fields, ApiErrorResponse> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(error = %body_text, "JSON data error");
                    ApiError::validation_error(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return Err(ApiErrorResponse::new(StatusCode::BAD_REQUEST, error));
        }
    };
    Ok(into_fields(body)?)
}
