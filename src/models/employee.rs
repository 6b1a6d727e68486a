//! Employee model and related types.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::store::{DocKind, Document};

/// Lifecycle status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmployeeStatus {
    /// Currently employed.
    #[default]
    Active,
    /// Temporarily inactive.
    Inactive,
    /// Suspended.
    Suspended,
    /// No longer employed.
    Left,
}

/// Represents an employee master record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Employee {
    /// Document name (employee id).
    #[serde(default)]
    pub name: String,
    /// Full display name.
    #[serde(default)]
    pub employee_name: String,
    /// Login user linked to this employee.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: EmployeeStatus,
    /// Employing company.
    #[serde(default)]
    pub company: Option<String>,
    /// Holiday list assigned to this employee, overriding the company's.
    #[serde(default)]
    pub holiday_list: Option<String>,
    /// Date of birth.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Date the employee joined.
    #[serde(default)]
    pub date_of_joining: Option<NaiveDate>,
    /// Personal email address (unique).
    #[serde(default)]
    pub personal_email: Option<String>,
    /// Company email address (unique).
    #[serde(default)]
    pub company_email: Option<String>,
    /// Payroll number (unique).
    #[serde(default)]
    pub employee_number: Option<String>,
    /// Branch.
    #[serde(default)]
    pub branch: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Designation.
    #[serde(default)]
    pub designation: Option<String>,
}

impl Document for Employee {
    const KIND: DocKind = DocKind::Employee;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Employee {
    /// Returns true if the employee is active.
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// The next occurrence of the employee's birthday on or after `today`.
    ///
    /// A 29 February birthday falls on 28 February in non-leap years.
    ///
    /// # Example
    ///
    /// ```
    /// use hr_engine::models::Employee;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     date_of_birth: NaiveDate::from_ymd_opt(1990, 3, 15),
    ///     ..Default::default()
    /// };
    /// let today = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
    /// assert_eq!(employee.next_birthday(today), NaiveDate::from_ymd_opt(2025, 3, 15));
    /// ```
    pub fn next_birthday(&self, today: NaiveDate) -> Option<NaiveDate> {
        let dob = self.date_of_birth?;
        let in_year = |year: i32| {
            NaiveDate::from_ymd_opt(year, dob.month(), dob.day())
                .or_else(|| NaiveDate::from_ymd_opt(year, dob.month(), dob.day() - 1))
        };
        let this_year = in_year(today.year())?;
        if this_year >= today {
            Some(this_year)
        } else {
            in_year(today.year() + 1)
        }
    }
}
