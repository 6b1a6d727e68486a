//! Off day work entry hooks.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{DocStatus, OffDayWorkEntry, WeekendTracker};
use crate::store::{DocKind, DocumentStore, Filter, find_doc, insert_doc};

use super::weekend_tracker::save_tracker;

const UNKNOWN_EMPLOYEE: &str = "UNKNOWN";

/// Names an entry `"{employee}-NNN"` from a per-employee series.
///
/// Entries without an employee fall into the `UNKNOWN-` series.
pub fn autoname(store: &dyn DocumentStore, entry: &OffDayWorkEntry) -> EngineResult<String> {
    let prefix = entry
        .employee_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .unwrap_or(UNKNOWN_EMPLOYEE);
    let series_key = format!("{}-", prefix);

    let last = store
        .list(DocKind::OffDayWorkEntry, &Filter::new())?
        .iter()
        .filter_map(|record| record.name.strip_prefix(&series_key)?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    Ok(format!("{}{:03}", series_key, last + 1))
}

/// What submitting an off day work entry changed.
#[derive(Debug, Clone, Serialize)]
pub struct OffDaySubmission {
    /// New entry holding the rows that were not redeemed, if any.
    pub carried_over: Option<OffDayWorkEntry>,
    /// The employee's tracker after crediting the entry.
    pub tracker: WeekendTracker,
}

/// Redeems an entry into the employee's weekend tracker.
///
/// Rejects entries with no positive `total_work_day`, no redeemed row or no
/// employee. Rows not marked for redemption move to a new draft entry and
/// are dropped from this one. The tracker is created or incremented by
/// `total_work_day`, which in turn syncs the extra earned leave allocation.
pub fn before_submit(
    store: &mut dyn DocumentStore,
    entry: &mut OffDayWorkEntry,
    policy: &LeavePolicy,
    today: NaiveDate,
) -> EngineResult<OffDaySubmission> {
    if entry.total_work_day <= rust_decimal::Decimal::ZERO {
        return Err(EngineError::SubmissionRejected {
            message: "Total Work Day must be greater than 0 before submission".to_string(),
        });
    }
    if !entry.work_day_details.iter().any(|row| row.redeem) {
        return Err(EngineError::SubmissionRejected {
            message: "At least one row must be marked for redemption before submission"
                .to_string(),
        });
    }
    let employee = entry
        .employee_id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| EngineError::SubmissionRejected {
            message: "Employee ID is missing on Off Day Work Entry".to_string(),
        })?;

    let (redeemed, kept): (Vec<_>, Vec<_>) = entry
        .work_day_details
        .drain(..)
        .partition(|row| row.redeem);
    entry.work_day_details = redeemed;

    let carried_over = if kept.is_empty() {
        None
    } else {
        let mut carry = OffDayWorkEntry {
            name: String::new(),
            employee_id: Some(employee.clone()),
            total_work_day: rust_decimal::Decimal::ZERO,
            work_day_details: kept,
            docstatus: DocStatus::Draft,
        };
        carry.name = autoname(&*store, &carry)?;
        let carry = insert_doc(store, &carry)?;
        info!(entry = %entry.name, carried_over = %carry.name, "Moved unredeemed rows to a new entry");
        Some(carry)
    };

    let tracker = match find_doc::<WeekendTracker>(&*store, &Filter::new().with("employee", &employee))? {
        Some(mut existing) => {
            existing.total_work_day += entry.total_work_day;
            existing
        }
        None => WeekendTracker {
            name: String::new(),
            employee: employee.clone(),
            total_work_day: entry.total_work_day,
        },
    };
    let tracker = save_tracker(store, &tracker, policy, today)?;
    info!(employee = %employee, total_work_day = %tracker.total_work_day, "Weekend tracker credited");

    Ok(OffDaySubmission {
        carried_over,
        tracker,
    })
}
