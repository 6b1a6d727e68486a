//! Work-from-home request hooks.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::config::WorkFromHomeConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{DocStatus, WorkFromHomeRequest};
use crate::reconcile::{DateRange, DayCountResult, HolidayCalendar, count_days};

/// Names a request `"{employee}-{from_date}"`.
pub fn autoname(request: &WorkFromHomeRequest) -> EngineResult<String> {
    if request.employee.is_empty() {
        return Err(EngineError::missing_field("employee"));
    }
    Ok(format!("{}-{}", request.employee, request.from_date))
}

/// Sets `days` to the number of calendar days requested.
///
/// Work from home covers holidays too, so no calendar is consulted.
pub fn before_save(request: &mut WorkFromHomeRequest) -> EngineResult<DayCountResult> {
    let range = DateRange::new(request.from_date, request.to_date)?;
    let result = count_days(&range, &HolidayCalendar::empty(), None, true)?;
    request.days = result.total_days;
    Ok(result)
}

/// Rejects same-day requests raised after the configured cutoff.
///
/// Only draft requests from callers holding the restricted role profile
/// are checked. A request is same-day when it starts and ends on the date
/// of `now`.
pub fn validate_cutoff(
    request: &WorkFromHomeRequest,
    config: &WorkFromHomeConfig,
    role_profile: Option<&str>,
    now: NaiveDateTime,
) -> EngineResult<()> {
    if request.docstatus != DocStatus::Draft {
        return Ok(());
    }
    if role_profile != Some(config.restricted_role_profile.as_str()) {
        return Ok(());
    }

    let today = now.date();
    if request.from_date != today || request.to_date != today {
        return Ok(());
    }

    let cutoff = config.last_request_time.ok_or_else(|| EngineError::InvalidField {
        field: "work_from_home.last_request_time".to_string(),
        message: "Work from home cutoff time is not set in HR Config".to_string(),
    })?;

    if now.time() > cutoff {
        warn!(employee = %request.employee, cutoff = %cutoff, "Same-day request after cutoff");
        return Err(EngineError::RequestCutoffPassed {
            cutoff: cutoff.to_string(),
        });
    }
    Ok(())
}
