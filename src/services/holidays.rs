//! Holiday lists and upcoming birthdays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Holiday};
use crate::reconcile::resolve_holiday_list_name;
use crate::store::{DocumentStore, Filter, list_docs};

use super::identity::{Identity, linked_employee};
use super::strip_html;

/// Which holiday list to show.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidayQuery {
    /// Resolve the list assigned to this employee.
    #[serde(default)]
    pub employee: Option<String>,
    /// Show this list directly.
    #[serde(default)]
    pub holiday_list: Option<String>,
}

/// One holiday as shown to employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidayEntry {
    /// The holiday date.
    pub holiday_date: NaiveDate,
    /// Plain-text description.
    pub description: String,
}

/// The holidays of one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidayListView {
    /// The list shown.
    pub holiday_list: String,
    /// Its holidays in date order, weekly offs excluded.
    pub holidays: Vec<HolidayEntry>,
}

/// An employee's next birthday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingBirthday {
    /// The employee.
    pub employee: String,
    /// Display name.
    pub employee_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Next occurrence on or after today.
    pub next_birthday: NaiveDate,
    /// Days from today until `next_birthday`.
    pub days_until: i64,
}

/// Shows a holiday list.
///
/// `holiday_list` wins over `employee`; with neither, the caller's own
/// list is shown. Fails with `MissingCalendar` only when no list name
/// resolves; a list without holidays is shown empty.
pub fn holiday_list(
    store: &dyn DocumentStore,
    identity: &Identity,
    query: &HolidayQuery,
) -> EngineResult<HolidayListView> {
    let list = match (&query.holiday_list, &query.employee) {
        (Some(list), _) => Some(list.clone()),
        (None, Some(employee)) => {
            identity.authorize()?;
            resolve_holiday_list_name(store, Some(employee.as_str()), None)?
        }
        (None, None) => {
            let me = linked_employee(store, identity)?;
            resolve_holiday_list_name(store, Some(me.name.as_str()), None)?
        }
    };
    let Some(list) = list else {
        return Err(EngineError::MissingCalendar {
            subject: query
                .employee
                .clone()
                .unwrap_or_else(|| identity.user.clone()),
        });
    };

    let mut holidays: Vec<Holiday> = list_docs(store, &Filter::new().with("parent", &list))?;
    holidays.sort_by_key(|h| h.holiday_date);

    Ok(HolidayListView {
        holidays: holidays
            .into_iter()
            .filter(|h| !h.weekly_off)
            .map(|h| HolidayEntry {
                holiday_date: h.holiday_date,
                description: strip_html(&h.description),
            })
            .collect(),
        holiday_list: list,
    })
}

/// Active employees with a date of birth, nearest birthday first.
pub fn birthdays(
    store: &dyn DocumentStore,
    identity: &Identity,
    today: NaiveDate,
) -> EngineResult<Vec<UpcomingBirthday>> {
    identity.authorize()?;
    let employees: Vec<Employee> = list_docs(store, &Filter::new())?;

    let mut upcoming: Vec<UpcomingBirthday> = employees
        .into_iter()
        .filter(Employee::is_active)
        .filter_map(|e| {
            let next = e.next_birthday(today)?;
            Some(UpcomingBirthday {
                date_of_birth: e.date_of_birth?,
                next_birthday: next,
                days_until: (next - today).num_days(),
                employee: e.name,
                employee_name: e.employee_name,
            })
        })
        .collect();
    upcoming.sort_by(|a, b| {
        a.days_until
            .cmp(&b.days_until)
            .then_with(|| a.employee.cmp(&b.employee))
    });
    Ok(upcoming)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeStatus;
    use crate::store::{InMemoryStore, save_doc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn me() -> Identity {
        Identity::new("ayesha@example.com")
    }

    fn holiday(list: &str, date: NaiveDate, description: &str, weekly_off: bool) -> Holiday {
        Holiday {
            name: String::new(),
            parent: list.to_string(),
            holiday_date: date,
            description: description.to_string(),
            weekly_off,
        }
    }

    fn seeded_store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        save_doc(
            &mut store,
            &Employee {
                name: "E1".to_string(),
                user_id: Some("ayesha@example.com".to_string()),
                holiday_list: Some("HL-2024".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        for h in [
            holiday("HL-2024", date(2024, 12, 16), "<p>Victory Day</p>", false),
            holiday("HL-2024", date(2024, 3, 26), "<b>Independence</b> Day", false),
            holiday("HL-2024", date(2024, 3, 29), "Friday", true),
        ] {
            save_doc(&mut store, &h).unwrap();
        }
        store
    }

    #[test]
    fn test_own_list_sorted_without_weekly_offs() {
        let store = seeded_store();
        let view = holiday_list(&store, &me(), &HolidayQuery::default()).unwrap();

        assert_eq!(view.holiday_list, "HL-2024");
        assert_eq!(view.holidays.len(), 2);
        assert_eq!(view.holidays[0].holiday_date, date(2024, 3, 26));
        assert_eq!(view.holidays[0].description, "Independence Day");
        assert_eq!(view.holidays[1].description, "Victory Day");
    }

    #[test]
    fn test_list_without_holidays_is_empty() {
        let store = seeded_store();
        let query = HolidayQuery {
            holiday_list: Some("HL-1999".to_string()),
            ..Default::default()
        };
        let view = holiday_list(&store, &me(), &query).unwrap();
        assert_eq!(view.holiday_list, "HL-1999");
        assert!(view.holidays.is_empty());
    }

    #[test]
    fn test_employee_without_list_is_missing_calendar() {
        let mut store = seeded_store();
        save_doc(
            &mut store,
            &Employee {
                name: "E2".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        let query = HolidayQuery {
            employee: Some("E2".to_string()),
            ..Default::default()
        };
        match holiday_list(&store, &me(), &query) {
            Err(EngineError::MissingCalendar { subject }) => assert_eq!(subject, "E2"),
            other => panic!("Expected MissingCalendar, got {:?}", other),
        }
    }

    #[test]
    fn test_birthdays_nearest_first() {
        let mut store = InMemoryStore::new();
        let people = [
            ("E1", Some(date(1990, 1, 5)), EmployeeStatus::Active),
            ("E2", Some(date(1985, 12, 30)), EmployeeStatus::Active),
            ("E3", None, EmployeeStatus::Active),
            ("E4", Some(date(1992, 12, 29)), EmployeeStatus::Left),
        ];
        for (name, dob, status) in people {
            save_doc(
                &mut store,
                &Employee {
                    name: name.to_string(),
                    date_of_birth: dob,
                    status,
                    ..Default::default()
                },
            )
            .unwrap();
        }

        let upcoming = birthdays(&store, &me(), date(2024, 12, 28)).unwrap();
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].employee, "E2");
        assert_eq!(upcoming[0].days_until, 2);
        assert_eq!(upcoming[1].employee, "E1");
        assert_eq!(upcoming[1].next_birthday, date(2025, 1, 5));
    }
}
