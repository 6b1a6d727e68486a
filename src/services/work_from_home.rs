//! Work-from-home request CRUD.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::config::WorkFromHomeConfig;
use crate::error::{EngineError, EngineResult};
use crate::hooks::work_from_home;
use crate::models::{DocStatus, WorkFromHomeRequest};
use crate::store::{DocKind, DocumentStore, Fields, Filter, get_doc, insert_doc, list_docs, save_doc};

use super::identity::{Identity, linked_employee, target_employee};
use super::payload::FieldTable;
use super::{ListSummary, Listing};

const WFH_FIELDS: FieldTable = FieldTable::new(
    DocKind::WorkFromHomeRequest,
    &["from_date", "to_date", "reason", "work_details", "request_approver"],
    &["from_date", "to_date", "reason"],
);

/// Lists the caller's requests, latest start first.
pub fn list_work_from_home(
    store: &dyn DocumentStore,
    identity: &Identity,
) -> EngineResult<Listing<WorkFromHomeRequest>> {
    let employee = linked_employee(store, identity)?;
    let mut items: Vec<WorkFromHomeRequest> =
        list_docs(store, &Filter::new().with("employee", &employee.name))?;
    items.sort_by(|a, b| b.from_date.cmp(&a.from_date));

    Ok(Listing {
        summary: ListSummary::by_status(items.iter().map(|r| r.status.as_str())),
        items,
    })
}

/// Raises a work-from-home request.
///
/// The request is for the caller unless the payload names an `employee`.
/// Requests overlapping an existing one for the same employee are
/// rejected, as are same-day requests past the cutoff.
pub fn create_work_from_home(
    store: &mut dyn DocumentStore,
    config: &WorkFromHomeConfig,
    identity: &Identity,
    payload: &Fields,
    now: NaiveDateTime,
) -> EngineResult<WorkFromHomeRequest> {
    let (employee, payload) = target_employee(&*store, identity, payload)?;

    let mut base = Fields::new();
    base.insert("employee".to_string(), employee.name.into());
    let mut request: WorkFromHomeRequest = WFH_FIELDS.create(base, &payload)?;

    work_from_home::before_save(&mut request)?;
    reject_overlap(&*store, &request)?;
    work_from_home::validate_cutoff(&request, config, identity.role_profile.as_deref(), now)?;
    request.name = work_from_home::autoname(&request)?;

    let request = insert_doc(store, &request)?;
    info!(
        request = %request.name,
        employee = %request.employee,
        days = %request.days,
        "Work from home request created"
    );
    Ok(request)
}

/// Updates a request and recounts its days.
pub fn update_work_from_home(
    store: &mut dyn DocumentStore,
    config: &WorkFromHomeConfig,
    identity: &Identity,
    name: &str,
    payload: &Fields,
    now: NaiveDateTime,
) -> EngineResult<WorkFromHomeRequest> {
    identity.authorize()?;
    let current: WorkFromHomeRequest = get_doc(&*store, name)?;

    let mut request = WFH_FIELDS.update(&current, payload)?;
    work_from_home::before_save(&mut request)?;
    reject_overlap(&*store, &request)?;
    work_from_home::validate_cutoff(&request, config, identity.role_profile.as_deref(), now)?;

    save_doc(store, &request)
}

/// Deletes a request.
pub fn delete_work_from_home(
    store: &mut dyn DocumentStore,
    identity: &Identity,
    name: &str,
) -> EngineResult<()> {
    identity.authorize()?;
    store.delete(DocKind::WorkFromHomeRequest, name)?;
    info!(request = %name, "Work from home request deleted");
    Ok(())
}

fn reject_overlap(store: &dyn DocumentStore, request: &WorkFromHomeRequest) -> EngineResult<()> {
    let clash = overlapping(store, &request.employee, request.from_date, request.to_date)?
        .into_iter()
        .any(|other| other.name != request.name);
    if clash {
        warn!(employee = %request.employee, from_date = %request.from_date, "Overlapping work from home request");
        return Err(EngineError::DuplicateEntry {
            message: "Duplicate WFH request exists for the selected dates".to_string(),
        });
    }
    Ok(())
}

fn overlapping(
    store: &dyn DocumentStore,
    employee: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> EngineResult<Vec<WorkFromHomeRequest>> {
    Ok(
        list_docs::<WorkFromHomeRequest>(store, &Filter::new().with("employee", employee))?
            .into_iter()
            .filter(|r| r.docstatus != DocStatus::Cancelled && r.overlaps(from, to))
            .collect(),
    )
}
