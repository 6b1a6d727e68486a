//! Attendance request hooks.

use tracing::debug;

use crate::error::EngineResult;
use crate::models::AttendanceRequest;
use crate::reconcile::{DateRange, DayCountResult, count_days, resolve_holiday_calendar};
use crate::store::DocumentStore;

/// Fills `custom_days` on an attendance request before it is saved.
///
/// Holidays come from the employee's list, falling back to the request's
/// company. They are skipped unless the request includes holidays.
pub fn calculate_custom_days(
    store: &dyn DocumentStore,
    request: &mut AttendanceRequest,
) -> EngineResult<DayCountResult> {
    let range = DateRange::new(request.from_date, request.to_date)?;
    let calendar =
        resolve_holiday_calendar(store, Some(&request.employee), request.company.as_deref())?;

    let result = count_days(
        &range,
        &calendar,
        request.half_day_date,
        request.include_holidays,
    )?;
    request.custom_days = result.total_days;

    debug!(
        employee = %request.employee,
        range = %range,
        custom_days = %result.total_days,
        "Calculated custom days"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{Company, DocStatus, Employee, Holiday};
    use crate::store::{InMemoryStore, save_doc};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(from: NaiveDate, to: NaiveDate) -> AttendanceRequest {
        AttendanceRequest {
            name: String::new(),
            employee: "E1".to_string(),
            company: Some("Acme".to_string()),
            from_date: from,
            to_date: to,
            half_day_date: None,
            include_holidays: false,
            reason: "On Duty".to_string(),
            explanation: String::new(),
            shift: None,
            custom_days: Decimal::ZERO,
            docstatus: DocStatus::Draft,
        }
    }

    fn seeded_store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        save_doc(
            &mut store,
            &Employee {
                name: "E1".to_string(),
                company: Some("Acme".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        save_doc(
            &mut store,
            &Company {
                name: "Acme".to_string(),
                default_holiday_list: Some("HL-2024".to_string()),
            },
        )
        .unwrap();
        save_doc(
            &mut store,
            &Holiday {
                name: String::new(),
                parent: "HL-2024".to_string(),
                holiday_date: date(2024, 1, 3),
                description: "Founders Day".to_string(),
                weekly_off: false,
            },
        )
        .unwrap();
        store
    }

    #[test]
    fn test_custom_days_skip_company_holidays() {
        let store = seeded_store();
        let mut req = request(date(2024, 1, 1), date(2024, 1, 5));

        calculate_custom_days(&store, &mut req).unwrap();
        assert_eq!(req.custom_days, dec("4"));
    }

    #[test]
    fn test_custom_days_with_half_day() {
        let store = seeded_store();
        let mut req = request(date(2024, 1, 1), date(2024, 1, 5));
        req.half_day_date = Some(date(2024, 1, 5));

        let result = calculate_custom_days(&store, &mut req).unwrap();
        assert_eq!(req.custom_days, dec("3.5"));
        assert_eq!(result.audit_step.rule_id, "count_days");
    }

    #[test]
    fn test_custom_days_including_holidays() {
        let store = seeded_store();
        let mut req = request(date(2024, 1, 1), date(2024, 1, 5));
        req.include_holidays = true;

        calculate_custom_days(&store, &mut req).unwrap();
        assert_eq!(req.custom_days, dec("5"));
    }

    #[test]
    fn test_inverted_request_is_rejected() {
        let store = seeded_store();
        let mut req = request(date(2024, 1, 10), date(2024, 1, 5));

        let result = calculate_custom_days(&store, &mut req);
        assert!(matches!(result, Err(EngineError::InvalidRange { .. })));
        assert_eq!(req.custom_days, Decimal::ZERO);
    }
}
