//! Weekend tracker hooks.
//!
//! The tracker's running total of worked off days is mirrored into a
//! yearly Leave Allocation of the extra earned leave type.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{DocStatus, LeaveAllocation, WeekendTracker};
use crate::store::{DocumentStore, Filter, find_doc, save_doc};

/// Upserts the allocation for the current year when the total changed.
///
/// `previous` is the tracker as last stored, `None` for a new tracker.
/// Returns the allocation written, or `None` when the total is unchanged.
pub fn before_save(
    store: &mut dyn DocumentStore,
    previous: Option<&WeekendTracker>,
    tracker: &WeekendTracker,
    policy: &LeavePolicy,
    today: NaiveDate,
) -> EngineResult<Option<LeaveAllocation>> {
    let previous_total = previous.map_or(Decimal::ZERO, |p| p.total_work_day);
    if tracker.total_work_day == previous_total {
        return Ok(None);
    }

    let (from_date, to_date) = calendar_year(today)?;
    let key = Filter::new()
        .with("employee", &tracker.employee)
        .with("leave_type", &policy.extra_earned_leave_type)
        .with("from_date", from_date)
        .with("to_date", to_date)
        .with("docstatus", DocStatus::Submitted);

    let allocation = match find_doc::<LeaveAllocation>(&*store, &key)? {
        Some(mut existing) => {
            existing.new_leaves_allocated = tracker.total_work_day;
            existing.total_leaves_allocated = tracker.total_work_day;
            existing
        }
        None => LeaveAllocation {
            name: String::new(),
            employee: tracker.employee.clone(),
            leave_type: policy.extra_earned_leave_type.clone(),
            from_date,
            to_date,
            new_leaves_allocated: tracker.total_work_day,
            total_leaves_allocated: tracker.total_work_day,
            docstatus: DocStatus::Submitted,
        },
    };

    let saved = save_doc(store, &allocation)?;
    info!(
        employee = %tracker.employee,
        allocation = %saved.name,
        total = %tracker.total_work_day,
        "Synced extra earned leave allocation"
    );
    Ok(Some(saved))
}

/// Saves a tracker, running [`before_save`] against its stored version.
pub fn save_tracker(
    store: &mut dyn DocumentStore,
    tracker: &WeekendTracker,
    policy: &LeavePolicy,
    today: NaiveDate,
) -> EngineResult<WeekendTracker> {
    let previous = if tracker.name.is_empty() {
        None
    } else {
        find_doc::<WeekendTracker>(&*store, &Filter::by_name(&tracker.name))?
    };
    before_save(store, previous.as_ref(), tracker, policy, today)?;
    save_doc(store, tracker)
}

fn calendar_year(today: NaiveDate) -> EngineResult<(NaiveDate, NaiveDate)> {
    let year = today.year();
    NaiveDate::from_ymd_opt(year, 1, 1)
        .zip(NaiveDate::from_ymd_opt(year, 12, 31))
        .ok_or_else(|| EngineError::InvalidField {
            field: "today".to_string(),
            message: format!("year {} is out of range", year),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DocKind, InMemoryStore, list_docs};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker(name: &str, total: i64) -> WeekendTracker {
        WeekendTracker {
            name: name.to_string(),
            employee: "E1".to_string(),
            total_work_day: Decimal::from(total),
        }
    }

    #[test]
    fn test_new_tracker_creates_allocation_for_the_year() {
        let mut store = InMemoryStore::new();
        let allocation = before_save(
            &mut store,
            None,
            &tracker("", 2),
            &LeavePolicy::default(),
            date(2024, 6, 15),
        )
        .unwrap()
        .unwrap();

        assert_eq!(allocation.leave_type, "Extra Earned Leave");
        assert_eq!(allocation.from_date, date(2024, 1, 1));
        assert_eq!(allocation.to_date, date(2024, 12, 31));
        assert_eq!(allocation.new_leaves_allocated, Decimal::from(2));
        assert_eq!(allocation.total_leaves_allocated, Decimal::from(2));
        assert_eq!(allocation.docstatus, DocStatus::Submitted);
    }

    #[test]
    fn test_unchanged_total_writes_nothing() {
        let mut store = InMemoryStore::new();
        let stored = tracker("HR-WKT-00001", 3);
        let result = before_save(
            &mut store,
            Some(&stored),
            &stored,
            &LeavePolicy::default(),
            date(2024, 6, 15),
        )
        .unwrap();

        assert!(result.is_none());
        assert_eq!(store.count(DocKind::LeaveAllocation), 0);
    }

    #[test]
    fn test_changed_total_updates_existing_allocation() {
        let mut store = InMemoryStore::new();
        let policy = LeavePolicy::default();
        let today = date(2024, 6, 15);

        let first = save_tracker(&mut store, &tracker("", 1), &policy, today).unwrap();
        let mut updated = first.clone();
        updated.total_work_day = Decimal::from(4);
        save_tracker(&mut store, &updated, &policy, today).unwrap();

        let allocations: Vec<LeaveAllocation> = list_docs(&store, &Filter::new()).unwrap();
        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].total_leaves_allocated, Decimal::from(4));
    }

    #[test]
    fn test_new_year_gets_its_own_allocation() {
        let mut store = InMemoryStore::new();
        let policy = LeavePolicy::default();

        let saved = save_tracker(&mut store, &tracker("", 1), &policy, date(2024, 12, 30)).unwrap();
        let mut next = saved.clone();
        next.total_work_day = Decimal::from(2);
        save_tracker(&mut store, &next, &policy, date(2025, 1, 2)).unwrap();

        assert_eq!(store.count(DocKind::LeaveAllocation), 2);
    }
}
