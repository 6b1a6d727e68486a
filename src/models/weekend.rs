//! Weekend tracker and off-day work entry models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::{DocKind, Document};

use super::DocStatus;

/// Running total of off days an employee has worked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekendTracker {
    /// Document name.
    #[serde(default)]
    pub name: String,
    /// The employee.
    pub employee: String,
    /// Off days worked and credited so far.
    #[serde(default)]
    pub total_work_day: Decimal,
}

impl Document for WeekendTracker {
    const KIND: DocKind = DocKind::WeekendTracker;

    fn name(&self) -> &str {
        &self.name
    }
}

/// One worked off-day period on an [`OffDayWorkEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDayDetail {
    /// Attendance request evidencing the work.
    #[serde(default)]
    pub attendance_req_link: Option<String>,
    /// First day worked.
    pub from_date: NaiveDate,
    /// Last day worked.
    pub to_date: NaiveDate,
    /// Hours worked over the period.
    #[serde(default)]
    pub total_working_hours: Decimal,
    /// Whether this row is redeemed on submission.
    #[serde(default)]
    pub redeem: bool,
}

/// Off days worked by an employee, redeemed into extra earned leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffDayWorkEntry {
    /// Document name, `"{employee}-NNN"`.
    #[serde(default)]
    pub name: String,
    /// The employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Days credited when submitted.
    #[serde(default)]
    pub total_work_day: Decimal,
    /// Worked periods.
    #[serde(default)]
    pub work_day_details: Vec<WorkDayDetail>,
    /// Submission state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl Document for OffDayWorkEntry {
    const KIND: DocKind = DocKind::OffDayWorkEntry;

    fn name(&self) -> &str {
        &self.name
    }
}
