//! Attendance listing.

use crate::error::EngineResult;
use crate::models::Attendance;
use crate::store::{DocumentStore, Filter, list_docs};

use super::identity::{Identity, linked_employee};

/// Lists the caller's attendance, newest first.
pub fn list_attendance(
    store: &dyn DocumentStore,
    identity: &Identity,
) -> EngineResult<Vec<Attendance>> {
    let employee = linked_employee(store, identity)?;
    let mut records: Vec<Attendance> =
        list_docs(store, &Filter::new().with("employee", &employee.name))?;
    records.sort_by(|a, b| b.attendance_date.cmp(&a.attendance_date));
    Ok(records)
}
