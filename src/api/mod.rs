//! HTTP API module for the HR engine.
//!
//! This module exposes the employee self-service operations (check-ins,
//! leave, work from home, attendance requests, holidays) as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ROLE_PROFILE_HEADER, USER_HEADER};
pub use response::{ApiError, ApiErrorResponse, ApiResult, ApiSuccess};
pub use state::AppState;
