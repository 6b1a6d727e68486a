//! Leave application hooks.

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Attendance, DocStatus, LeaveApplication, LeaveStatus};
use crate::reconcile::{
    DateRange, DayCountResult, count_days, materialize_attendance, resolve_holiday_calendar,
};
use crate::store::DocumentStore;

/// Sets `total_leave_days`, skipping the employee's holidays.
pub fn before_save(
    store: &dyn DocumentStore,
    leave: &mut LeaveApplication,
) -> EngineResult<DayCountResult> {
    let range = DateRange::new(leave.from_date, leave.to_date)?;
    let calendar = resolve_holiday_calendar(store, Some(&leave.employee), leave.company.as_deref())?;
    let result = count_days(&range, &calendar, leave.half_day_date, false)?;
    leave.total_leave_days = result.total_days;
    Ok(result)
}

/// Marks the application approved and writes attendance for every day it
/// covers.
///
/// The application must already be saved (named) and still be a draft.
/// Attendance is written before the application's own state changes, so a
/// store failure leaves the application a draft with some days written.
pub fn on_submit(
    store: &mut dyn DocumentStore,
    leave: &mut LeaveApplication,
) -> EngineResult<Vec<Attendance>> {
    if leave.name.is_empty() {
        return Err(EngineError::SubmissionRejected {
            message: "Leave Application must be saved before it is submitted".to_string(),
        });
    }
    if leave.docstatus != DocStatus::Draft {
        return Err(EngineError::SubmissionRejected {
            message: format!("Leave Application '{}' is not a draft", leave.name),
        });
    }

    let range = DateRange::new(leave.from_date, leave.to_date)?;
    let attendance = materialize_attendance(
        store,
        &leave.employee,
        &range,
        leave.half_day_date,
        &leave.name,
        &leave.leave_type,
    )?;

    leave.status = LeaveStatus::Approved;
    leave.docstatus = DocStatus::Submitted;
    info!(leave_application = %leave.name, employee = %leave.employee, "Leave application submitted");

    Ok(attendance)
}
