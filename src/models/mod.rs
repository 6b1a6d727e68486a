//! Core data models for the HR engine.
//!
//! Each model is a typed view of one document kind in the store.

mod attendance;
mod audit;
mod checkin;
mod employee;
mod holiday;
mod leave;
mod weekend;
mod work_from_home;

use serde::{Deserialize, Serialize};

pub use attendance::{Attendance, AttendanceRequest, AttendanceStatus};
pub use audit::AuditStep;
pub use checkin::{EmployeeCheckin, LogType};
pub use employee::{Employee, EmployeeStatus};
pub use holiday::{Company, Holiday};
pub use leave::{LeaveAllocation, LeaveApplication, LeaveStatus};
pub use weekend::{OffDayWorkEntry, WeekendTracker, WorkDayDetail};
pub use work_from_home::WorkFromHomeRequest;

/// Submission state of a submittable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    /// Saved but not submitted.
    #[default]
    Draft,
    /// Submitted; hooks have run.
    Submitted,
    /// Cancelled after submission.
    Cancelled,
}
