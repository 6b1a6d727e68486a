//! Per-day attendance materialization for approved leave.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::EngineResult;
use crate::models::{Attendance, AttendanceStatus};
use crate::store::{DocKind, DocumentStore, Filter, encode};

use super::day_range::DateRange;

/// Writes one Attendance record per day of `range` for `employee`.
///
/// Each day is upserted on `(employee, attendance_date)`: an existing record
/// is updated in place, otherwise a new one is created. The half-day date is
/// marked `Half Day`, every other day `On Leave`. Holidays are not skipped.
///
/// Writes are independent. If the store fails on day *k*, days before *k*
/// stay committed and the error is returned. Running the same call twice
/// leaves the same records.
pub fn materialize_attendance(
    store: &mut dyn DocumentStore,
    employee: &str,
    range: &DateRange,
    half_day_date: Option<NaiveDate>,
    leave_reference: &str,
    leave_type: &str,
) -> EngineResult<Vec<Attendance>> {
    range.validate_half_day(half_day_date)?;

    let mut written = Vec::with_capacity(range.len_days() as usize);
    for date in range.days() {
        let status = if Some(date) == half_day_date {
            AttendanceStatus::HalfDay
        } else {
            AttendanceStatus::OnLeave
        };

        let attendance = Attendance {
            name: String::new(),
            employee: employee.to_string(),
            attendance_date: date,
            status,
            leave_application: Some(leave_reference.to_string()),
            leave_type: Some(leave_type.to_string()),
        };
        let key = Filter::new()
            .with("employee", employee)
            .with("attendance_date", date);

        let record = store.upsert(DocKind::Attendance, &key, encode(&attendance)?)?;
        debug!(employee = %employee, date = %date, status = %status, name = %record.name, "Attendance written");
        written.push(record.decode::<Attendance>()?);
    }

    info!(
        employee = %employee,
        range = %range,
        leave_application = %leave_reference,
        days = written.len(),
        "Materialized attendance"
    );
    Ok(written)
}
