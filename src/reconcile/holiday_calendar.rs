//! Holiday calendar resolution.
//!
//! An employee's holidays come from the holiday list assigned to them, or
//! failing that from their company's default list. With neither, the
//! calendar is empty and the caveat is logged rather than raised.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Company, Employee, Holiday};
use crate::store::{DocumentStore, Filter, find_doc, list_docs};

/// An immutable set of holiday dates for one computation.
///
/// # Example
///
/// ```
/// use hr_engine::reconcile::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let calendar: HolidayCalendar = [NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()]
///     .into_iter()
///     .collect();
/// assert!(calendar.contains(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    source: Option<String>,
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// A calendar drawn from the named holiday list.
    pub fn new(source: impl Into<String>, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            source: Some(source.into()),
            dates: dates.into_iter().collect(),
        }
    }

    /// A calendar with no holidays.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The holiday list this calendar came from, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns true if `date` is a holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Number of holiday dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true when there are no holidays.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            source: None,
            dates: iter.into_iter().collect(),
        }
    }
}

/// Finds the holiday list name for an employee, falling back to the
/// company's default list.
///
/// The company considered is `company` when given, otherwise the
/// employee's own company.
pub fn resolve_holiday_list_name(
    store: &dyn DocumentStore,
    employee: Option<&str>,
    company: Option<&str>,
) -> EngineResult<Option<String>> {
    let employee_doc = match employee {
        Some(id) => find_doc::<Employee>(store, &Filter::by_name(id))?,
        None => None,
    };

    if let Some(list) = employee_doc.as_ref().and_then(|e| e.holiday_list.clone()) {
        return Ok(Some(list));
    }

    let company = company
        .map(str::to_string)
        .or_else(|| employee_doc.and_then(|e| e.company));
    let Some(company) = company else {
        return Ok(None);
    };

    Ok(find_doc::<Company>(store, &Filter::by_name(&company))?
        .and_then(|c| c.default_holiday_list))
}

/// Resolves the holiday calendar for an employee.
///
/// Every holiday on the list counts, weekly offs included. When no list can
/// be found the calendar is empty and a `MissingCalendar` caveat is logged.
pub fn resolve_holiday_calendar(
    store: &dyn DocumentStore,
    employee: Option<&str>,
    company: Option<&str>,
) -> EngineResult<HolidayCalendar> {
    let Some(list) = resolve_holiday_list_name(store, employee, company)? else {
        let caveat = EngineError::MissingCalendar {
            subject: employee.or(company).unwrap_or("unknown").to_string(),
        };
        warn!(caveat = %caveat, "Treating as no holidays");
        return Ok(HolidayCalendar::empty());
    };

    let holidays: Vec<Holiday> = list_docs(store, &Filter::new().with("parent", &list))?;
    debug!(holiday_list = %list, holidays = holidays.len(), "Resolved holiday calendar");

    Ok(HolidayCalendar::new(
        list,
        holidays.into_iter().map(|h| h.holiday_date),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeStatus;
    use crate::store::{InMemoryStore, save_doc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seed_holiday(store: &mut InMemoryStore, list: &str, d: NaiveDate, weekly_off: bool) {
        save_doc(
            store,
            &Holiday {
                name: String::new(),
                parent: list.to_string(),
                holiday_date: d,
                description: String::new(),
                weekly_off,
            },
        )
        .unwrap();
    }

    fn seed_employee(store: &mut InMemoryStore, holiday_list: Option<&str>, company: Option<&str>) {
        save_doc(
            store,
            &Employee {
                name: "E1".to_string(),
                status: EmployeeStatus::Active,
                holiday_list: holiday_list.map(str::to_string),
                company: company.map(str::to_string),
                ..Default::default()
            },
        )
        .unwrap();
    }

    fn seed_company(store: &mut InMemoryStore, list: &str) {
        save_doc(
            store,
            &Company {
                name: "Acme".to_string(),
                default_holiday_list: Some(list.to_string()),
            },
        )
        .unwrap();
    }

    #[test]
    fn test_employee_list_takes_precedence() {
        let mut store = InMemoryStore::new();
        seed_employee(&mut store, Some("HL-EMP"), Some("Acme"));
        seed_company(&mut store, "HL-CO");
        seed_holiday(&mut store, "HL-EMP", date(2024, 1, 3), false);
        seed_holiday(&mut store, "HL-CO", date(2024, 1, 4), false);

        let calendar = resolve_holiday_calendar(&store, Some("E1"), None).unwrap();
        assert_eq!(calendar.source(), Some("HL-EMP"));
        assert!(calendar.contains(date(2024, 1, 3)));
        assert!(!calendar.contains(date(2024, 1, 4)));
    }

    #[test]
    fn test_falls_back_to_explicit_company() {
        let mut store = InMemoryStore::new();
        seed_employee(&mut store, None, None);
        seed_company(&mut store, "HL-CO");
        seed_holiday(&mut store, "HL-CO", date(2024, 1, 4), false);

        let calendar = resolve_holiday_calendar(&store, Some("E1"), Some("Acme")).unwrap();
        assert_eq!(calendar.source(), Some("HL-CO"));
        assert!(calendar.contains(date(2024, 1, 4)));
    }

    #[test]
    fn test_falls_back_to_employee_company() {
        let mut store = InMemoryStore::new();
        seed_employee(&mut store, None, Some("Acme"));
        seed_company(&mut store, "HL-CO");

        let name = resolve_holiday_list_name(&store, Some("E1"), None).unwrap();
        assert_eq!(name.as_deref(), Some("HL-CO"));
    }

    #[test]
    fn test_weekly_offs_are_included() {
        let mut store = InMemoryStore::new();
        seed_employee(&mut store, Some("HL-EMP"), None);
        seed_holiday(&mut store, "HL-EMP", date(2024, 1, 5), true);

        let calendar = resolve_holiday_calendar(&store, Some("E1"), None).unwrap();
        assert!(calendar.contains(date(2024, 1, 5)));
    }

    #[test]
    fn test_no_list_yields_empty_calendar() {
        let mut store = InMemoryStore::new();
        seed_employee(&mut store, None, None);

        let calendar = resolve_holiday_calendar(&store, Some("E1"), None).unwrap();
        assert!(calendar.is_empty());
        assert!(calendar.source().is_none());
    }

    #[test]
    fn test_unknown_employee_yields_empty_calendar() {
        let store = InMemoryStore::new();
        let calendar = resolve_holiday_calendar(&store, Some("E404"), None).unwrap();
        assert!(calendar.is_empty());
    }
}
