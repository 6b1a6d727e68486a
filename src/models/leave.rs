//! Leave application and leave allocation models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::{DocKind, Document};

use super::DocStatus;

/// Approval status of a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeaveStatus {
    /// Awaiting approval.
    #[default]
    Open,
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
    /// Cancelled.
    Cancelled,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Open => write!(f, "Open"),
            LeaveStatus::Approved => write!(f, "Approved"),
            LeaveStatus::Rejected => write!(f, "Rejected"),
            LeaveStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A leave application over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// Document name.
    #[serde(default)]
    pub name: String,
    /// The applying employee.
    pub employee: String,
    /// Leave type (e.g. "Casual Leave").
    pub leave_type: String,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave.
    pub to_date: NaiveDate,
    /// Date the application was raised.
    #[serde(default)]
    pub posting_date: Option<NaiveDate>,
    /// Day taken as a half day, if any.
    #[serde(default)]
    pub half_day_date: Option<NaiveDate>,
    /// Which half of the half day (e.g. "First Half").
    #[serde(default)]
    pub session: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Company, used for the holiday-list fallback.
    #[serde(default)]
    pub company: Option<String>,
    /// Approval status.
    #[serde(default)]
    pub status: LeaveStatus,
    /// Submission state.
    #[serde(default)]
    pub docstatus: DocStatus,
    /// Leave days covered, computed on save.
    #[serde(default)]
    pub total_leave_days: Decimal,
}

impl Document for LeaveApplication {
    const KIND: DocKind = DocKind::LeaveApplication;

    fn name(&self) -> &str {
        &self.name
    }
}

impl LeaveApplication {
    /// Returns true when the application overlaps `[from, to]`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.from_date <= to && self.to_date >= from
    }
}

/// Leave granted to an employee for one leave type and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveAllocation {
    /// Document name.
    #[serde(default)]
    pub name: String,
    /// The employee.
    pub employee: String,
    /// Leave type allocated.
    pub leave_type: String,
    /// Start of the allocation period.
    pub from_date: NaiveDate,
    /// End of the allocation period.
    pub to_date: NaiveDate,
    /// Leaves granted by this allocation.
    pub new_leaves_allocated: Decimal,
    /// Leaves granted including carry-forward.
    pub total_leaves_allocated: Decimal,
    /// Submission state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl Document for LeaveAllocation {
    const KIND: DocKind = DocKind::LeaveAllocation;

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn application(from: NaiveDate, to: NaiveDate) -> LeaveApplication {
        LeaveApplication {
            name: String::new(),
            employee: "E1".to_string(),
            leave_type: "Casual Leave".to_string(),
            from_date: from,
            to_date: to,
            posting_date: None,
            half_day_date: None,
            session: None,
            description: String::new(),
            company: None,
            status: LeaveStatus::Open,
            docstatus: DocStatus::Draft,
            total_leave_days: Decimal::ZERO,
        }
    }

    #[test]
    fn test_overlaps_inclusive_bounds() {
        let leave = application(date(2024, 1, 10), date(2024, 1, 12));
        assert!(leave.overlaps(date(2024, 1, 12), date(2024, 1, 20)));
        assert!(leave.overlaps(date(2024, 1, 1), date(2024, 1, 10)));
        assert!(!leave.overlaps(date(2024, 1, 13), date(2024, 1, 20)));
    }

    #[test]
    fn test_leave_status_default_is_open() {
        let json = r#"{
            "employee": "E1",
            "leave_type": "Sick Leave",
            "from_date": "2024-02-01",
            "to_date": "2024-02-02"
        }"#;
        let leave: LeaveApplication = serde_json::from_str(json).unwrap();
        assert_eq!(leave.status, LeaveStatus::Open);
        assert_eq!(leave.docstatus, DocStatus::Draft);
    }
}
