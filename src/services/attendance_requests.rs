//! Attendance request CRUD.

use tracing::info;

use crate::error::EngineResult;
use crate::hooks::attendance_request::calculate_custom_days;
use crate::models::AttendanceRequest;
use crate::store::{DocKind, DocumentStore, Fields, Filter, get_doc, list_docs, save_doc};

use super::identity::{Identity, linked_employee};
use super::payload::FieldTable;
use super::{ListSummary, Listing};

const CREATE_FIELDS: FieldTable = FieldTable::new(
    DocKind::AttendanceRequest,
    &[
        "from_date",
        "to_date",
        "reason",
        "explanation",
        "half_day",
        "half_day_date",
        "include_holidays",
        "shift",
        "company",
    ],
    &["from_date", "to_date", "reason"],
);

const UPDATE_FIELDS: FieldTable = FieldTable::new(
    DocKind::AttendanceRequest,
    &[
        "from_date",
        "to_date",
        "reason",
        "explanation",
        "half_day",
        "half_day_date",
        "include_holidays",
        "shift",
        "company",
    ],
    &[],
);

/// Lists the caller's attendance requests, latest start first.
pub fn list_attendance_requests(
    store: &dyn DocumentStore,
    identity: &Identity,
) -> EngineResult<Listing<AttendanceRequest>> {
    let employee = linked_employee(store, identity)?;
    let mut items: Vec<AttendanceRequest> =
        list_docs(store, &Filter::new().with("employee", &employee.name))?;
    items.sort_by(|a, b| b.from_date.cmp(&a.from_date));

    Ok(Listing {
        summary: ListSummary::total(items.len()),
        items,
    })
}

/// Raises an attendance request for the caller.
pub fn create_attendance_request(
    store: &mut dyn DocumentStore,
    identity: &Identity,
    payload: &Fields,
) -> EngineResult<AttendanceRequest> {
    let employee = linked_employee(&*store, identity)?;

    let mut base = Fields::new();
    base.insert("employee".to_string(), employee.name.into());
    let mut request: AttendanceRequest = CREATE_FIELDS.create(base, payload)?;
    calculate_custom_days(&*store, &mut request)?;

    let request = save_doc(store, &request)?;
    info!(
        attendance_request = %request.name,
        employee = %request.employee,
        custom_days = %request.custom_days,
        "Attendance request created"
    );
    Ok(request)
}

/// Updates an attendance request and recomputes its custom days.
pub fn update_attendance_request(
    store: &mut dyn DocumentStore,
    identity: &Identity,
    name: &str,
    payload: &Fields,
) -> EngineResult<AttendanceRequest> {
    identity.authorize()?;
    let current: AttendanceRequest = get_doc(&*store, name)?;
    let mut request = UPDATE_FIELDS.update(&current, payload)?;
    calculate_custom_days(&*store, &mut request)?;
    save_doc(store, &request)
}

/// Deletes an attendance request.
pub fn delete_attendance_request(
    store: &mut dyn DocumentStore,
    identity: &Identity,
    name: &str,
) -> EngineResult<()> {
    identity.authorize()?;
    store.delete(DocKind::AttendanceRequest, name)?;
    info!(attendance_request = %name, "Attendance request deleted");
    Ok(())
}
