//! Attendance and attendance request models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::{DocKind, Document};

use super::DocStatus;

/// Status recorded on an attendance ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Worked the day.
    Present,
    /// On approved leave.
    #[serde(rename = "On Leave")]
    OnLeave,
    /// Half a day of leave.
    #[serde(rename = "Half Day")]
    HalfDay,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "Present"),
            AttendanceStatus::OnLeave => write!(f, "On Leave"),
            AttendanceStatus::HalfDay => write!(f, "Half Day"),
        }
    }
}

/// One attendance ledger entry, unique per employee and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Document name.
    #[serde(default)]
    pub name: String,
    /// The employee.
    pub employee: String,
    /// The day this entry covers.
    pub attendance_date: NaiveDate,
    /// The recorded status.
    pub status: AttendanceStatus,
    /// Leave application that produced this entry.
    #[serde(default)]
    pub leave_application: Option<String>,
    /// Leave type of that application.
    #[serde(default)]
    pub leave_type: Option<String>,
}

impl Document for Attendance {
    const KIND: DocKind = DocKind::Attendance;

    fn name(&self) -> &str {
        &self.name
    }
}

/// An employee's request to be marked present over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// Document name.
    #[serde(default)]
    pub name: String,
    /// The requesting employee.
    pub employee: String,
    /// Company, used for the holiday-list fallback.
    #[serde(default)]
    pub company: Option<String>,
    /// First day requested.
    pub from_date: NaiveDate,
    /// Last day requested.
    pub to_date: NaiveDate,
    /// Day counted as half, if any.
    #[serde(default)]
    pub half_day_date: Option<NaiveDate>,
    /// Whether holidays in the range count towards the total.
    #[serde(default)]
    pub include_holidays: bool,
    /// Reason code (e.g. "On Duty", "Work From Home").
    pub reason: String,
    /// Free-text explanation.
    #[serde(default)]
    pub explanation: String,
    /// Shift type.
    #[serde(default)]
    pub shift: Option<String>,
    /// Working days covered, computed on save.
    #[serde(default)]
    pub custom_days: Decimal,
    /// Submission state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

impl Document for AttendanceRequest {
    const KIND: DocKind = DocKind::AttendanceRequest;

    fn name(&self) -> &str {
        &self.name
    }
}
