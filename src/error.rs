//! Error types for the HR engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition raised by the reconciler, the lifecycle hooks
//! and the API services.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the HR engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use hr_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/hr_config.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/hr_config.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A date range was inverted, or a half-day fell outside its range.
    #[error("Invalid date range {from_date} to {to_date}: {message}")]
    InvalidRange {
        /// Start of the offending range.
        from_date: NaiveDate,
        /// End of the offending range.
        to_date: NaiveDate,
        /// What was wrong with it.
        message: String,
    },

    /// No holiday list could be resolved. Callers usually treat this as
    /// "no holidays" and only log it.
    #[error("No holiday list found for {subject}")]
    MissingCalendar {
        /// The employee, company or list name the lookup was made for.
        subject: String,
    },

    /// A document was looked up by name and did not exist.
    #[error("{kind} not found: {name}")]
    DocumentNotFound {
        /// The document kind (e.g. "Leave Application").
        kind: String,
        /// The document name.
        name: String,
    },

    /// A uniqueness rule was violated.
    #[error("Duplicate entry not allowed: {message}")]
    DuplicateEntry {
        /// A description of the duplicate.
        message: String,
    },

    /// A required payload field was absent or empty.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field.
        field: String,
    },

    /// A payload carried a field outside the entity's allow-list.
    #[error("Unknown field '{field}' for {kind}")]
    UnknownField {
        /// The document kind the payload was for.
        kind: String,
        /// The rejected field.
        field: String,
    },

    /// A field was present but its value was unusable.
    #[error("Invalid field '{field}': {message}")]
    InvalidField {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The caller is not allowed to perform the operation.
    #[error("Unauthorized access: {message}")]
    Unauthorized {
        /// Why the caller was refused.
        message: String,
    },

    /// The calling user has no Employee record.
    #[error("No Employee linked with user {user}")]
    NoLinkedEmployee {
        /// The calling user id.
        user: String,
    },

    /// A check-in was made outside the configured geofence.
    #[error("You are outside the allowed check-in area. Distance: {distance_meters}m, Allowed: {allowed_meters}m.")]
    OutsideGeofence {
        /// Distance from the configured point, rounded to centimetres.
        distance_meters: f64,
        /// The configured radius.
        allowed_meters: f64,
    },

    /// A same-day request was made after the configured cutoff.
    #[error("You can't request work from home after the shift has started (cutoff {cutoff}).")]
    RequestCutoffPassed {
        /// The configured cutoff time.
        cutoff: String,
    },

    /// A document failed its submission checks.
    #[error("Submission rejected: {message}")]
    SubmissionRejected {
        /// Why submission was refused.
        message: String,
    },

    /// The document store failed.
    #[error("Document store error: {message}")]
    Store {
        /// A description of the store failure.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        EngineError::DocumentNotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub(crate) fn missing_field(field: impl Into<String>) -> Self {
        EngineError::MissingField {
            field: field.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
