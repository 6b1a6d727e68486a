//! Leave applications and the leave dashboard.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::hooks::leave_application;
use crate::models::{Attendance, DocStatus, LeaveAllocation, LeaveApplication, LeaveStatus};
use crate::store::{DocKind, DocumentStore, Fields, Filter, get_doc, list_docs, save_doc};

use super::identity::{Identity, linked_employee, target_employee};
use super::payload::FieldTable;
use super::{ListSummary, Listing};

const LEAVE_FIELDS: FieldTable = FieldTable::new(
    DocKind::LeaveApplication,
    &[
        "leave_type",
        "from_date",
        "to_date",
        "half_day",
        "half_day_date",
        "session",
        "description",
        "company",
    ],
    &["leave_type", "from_date", "to_date"],
);

/// A submitted application with the attendance it produced.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedLeave {
    /// The application, now approved.
    pub leave_application: LeaveApplication,
    /// One record per covered day.
    pub attendance: Vec<Attendance>,
}

/// Balance for one leave type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeaveBalance {
    /// Leaves allocated for the period.
    pub total_leaves: Decimal,
    /// Approved leave days inside the allocation period.
    pub leaves_taken: Decimal,
    /// `total_leaves - leaves_taken`.
    pub remaining_leaves: Decimal,
}

/// Leave balances on a given date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeaveDashboard {
    /// Balance per leave type with an allocation covering the date.
    pub leave_allocation: BTreeMap<String, LeaveBalance>,
    /// Leave types the employee can apply for.
    pub allowed_leave_types: Vec<String>,
}

/// Lists the caller's leave applications, latest start first.
pub fn list_leave_applications(
    store: &dyn DocumentStore,
    identity: &Identity,
) -> EngineResult<Listing<LeaveApplication>> {
    let employee = linked_employee(store, identity)?;
    let mut items: Vec<LeaveApplication> =
        list_docs(store, &Filter::new().with("employee", &employee.name))?;
    items.sort_by(|a, b| b.from_date.cmp(&a.from_date));

    Ok(Listing {
        summary: ListSummary::by_status(items.iter().map(|l| l.status)),
        items,
    })
}

/// Creates a draft leave application.
///
/// The application is for the caller unless the payload names an
/// `employee`.
pub fn create_leave_application(
    store: &mut dyn DocumentStore,
    identity: &Identity,
    payload: &Fields,
    today: NaiveDate,
) -> EngineResult<LeaveApplication> {
    let (employee, payload) = target_employee(&*store, identity, payload)?;

    let mut base = Fields::new();
    base.insert("employee".to_string(), employee.name.into());
    base.insert("posting_date".to_string(), Value::String(today.to_string()));
    if let Some(company) = employee.company {
        if payload.get("company").is_none_or(Value::is_null) {
            base.insert("company".to_string(), Value::String(company));
        }
    }

    let mut leave: LeaveApplication = LEAVE_FIELDS.create(base, &payload)?;
    leave_application::before_save(&*store, &mut leave)?;

    let leave = save_doc(store, &leave)?;
    info!(
        leave_application = %leave.name,
        employee = %leave.employee,
        total_leave_days = %leave.total_leave_days,
        "Leave application created"
    );
    Ok(leave)
}

/// Updates a draft leave application and recounts its days.
pub fn update_leave_application(
    store: &mut dyn DocumentStore,
    identity: &Identity,
    name: &str,
    payload: &Fields,
) -> EngineResult<LeaveApplication> {
    identity.authorize()?;
    let current: LeaveApplication = get_doc(&*store, name)?;
    ensure_draft(&current, "modified")?;

    let mut leave = LEAVE_FIELDS.update(&current, payload)?;
    leave_application::before_save(&*store, &mut leave)?;
    save_doc(store, &leave)
}

/// Deletes a draft leave application.
pub fn delete_leave_application(
    store: &mut dyn DocumentStore,
    identity: &Identity,
    name: &str,
) -> EngineResult<()> {
    identity.authorize()?;
    let current: LeaveApplication = get_doc(&*store, name)?;
    ensure_draft(&current, "deleted")?;

    store.delete(DocKind::LeaveApplication, name)?;
    info!(leave_application = %name, "Leave application deleted");
    Ok(())
}

/// Submits a draft application, writing its attendance.
pub fn submit_leave_application(
    store: &mut dyn DocumentStore,
    identity: &Identity,
    name: &str,
) -> EngineResult<SubmittedLeave> {
    identity.authorize()?;
    let mut leave: LeaveApplication = get_doc(&*store, name)?;
    let attendance = leave_application::on_submit(store, &mut leave)?;
    let leave = save_doc(store, &leave)?;

    Ok(SubmittedLeave {
        leave_application: leave,
        attendance,
    })
}

/// Leave balances for the caller on `date`.
///
/// Only submitted allocations covering `date` count, summed per leave
/// type. Leave taken is the sum of approved applications of that type
/// overlapping any of those allocation periods.
pub fn leave_dashboard(
    store: &dyn DocumentStore,
    identity: &Identity,
    date: NaiveDate,
) -> EngineResult<LeaveDashboard> {
    let employee = linked_employee(store, identity)?;
    let allocations: Vec<LeaveAllocation> =
        list_docs(store, &Filter::new().with("employee", &employee.name))?;
    let approved: Vec<LeaveApplication> = list_docs(
        store,
        &Filter::new()
            .with("employee", &employee.name)
            .with("status", LeaveStatus::Approved),
    )?;

    let mut covering: BTreeMap<&str, Vec<&LeaveAllocation>> = BTreeMap::new();
    for allocation in allocations
        .iter()
        .filter(|a| a.docstatus == DocStatus::Submitted)
        .filter(|a| a.from_date <= date && date <= a.to_date)
    {
        covering
            .entry(allocation.leave_type.as_str())
            .or_default()
            .push(allocation);
    }

    let mut dashboard = LeaveDashboard::default();
    for (leave_type, periods) in covering {
        let total_leaves: Decimal = periods.iter().map(|a| a.total_leaves_allocated).sum();
        // Each application counts once even when allocation periods overlap.
        let leaves_taken: Decimal = approved
            .iter()
            .filter(|l| l.leave_type == leave_type)
            .filter(|l| periods.iter().any(|a| l.overlaps(a.from_date, a.to_date)))
            .map(|l| l.total_leave_days)
            .sum();

        dashboard.leave_allocation.insert(
            leave_type.to_string(),
            LeaveBalance {
                total_leaves,
                leaves_taken,
                remaining_leaves: total_leaves - leaves_taken,
            },
        );
    }
    dashboard.allowed_leave_types = dashboard.leave_allocation.keys().cloned().collect();

    Ok(dashboard)
}

fn ensure_draft(leave: &LeaveApplication, action: &str) -> EngineResult<()> {
    if leave.docstatus != DocStatus::Draft {
        return Err(EngineError::SubmissionRejected {
            message: format!(
                "Leave Application '{}' is submitted and cannot be {}",
                leave.name, action
            ),
        });
    }
    Ok(())
}
