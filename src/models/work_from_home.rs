//! Work-from-home request model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::{DocKind, Document};

use super::DocStatus;

/// A request to work from home over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkFromHomeRequest {
    /// Document name, `"{employee}-{from_date}"`.
    #[serde(default)]
    pub name: String,
    /// The requesting employee.
    pub employee: String,
    /// First day.
    pub from_date: NaiveDate,
    /// Last day.
    pub to_date: NaiveDate,
    /// Calendar days covered, computed on save.
    #[serde(default)]
    pub days: Decimal,
    /// Why the request was raised.
    pub reason: String,
    /// What will be worked on.
    #[serde(default)]
    pub work_details: Option<String>,
    /// Approver, if chosen by the requester.
    #[serde(default)]
    pub request_approver: Option<String>,
    /// Approval status label.
    #[serde(default = "default_status")]
    pub status: String,
    /// Submission state.
    #[serde(default)]
    pub docstatus: DocStatus,
}

fn default_status() -> String {
    "Open".to_string()
}

impl Document for WorkFromHomeRequest {
    const KIND: DocKind = DocKind::WorkFromHomeRequest;

    fn name(&self) -> &str {
        &self.name
    }
}

impl WorkFromHomeRequest {
    /// Returns true when the request overlaps `[from, to]`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.from_date <= to && self.to_date >= from
    }
}
