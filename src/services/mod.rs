//! API operations.
//!
//! Each service function takes the calling [`Identity`], the store and any
//! configuration explicitly, maps the request payload through an allow-list
//! and runs the relevant lifecycle hooks before persisting.
//!
//! # Modules
//!
//! - [`identity`]: The caller and their linked employee
//! - [`payload`]: Allow-listed payload mapping
//! - [`employees`]: Employee CRUD
//! - [`checkins`]: Check-in/check-out and auto checkout
//! - [`attendance`]: Attendance listing
//! - [`attendance_requests`]: Attendance request CRUD
//! - [`leave`]: Leave applications and the leave dashboard
//! - [`work_from_home`]: Work-from-home request CRUD
//! - [`holidays`]: Holiday lists and birthdays

pub mod attendance;
pub mod attendance_requests;
pub mod checkins;
pub mod employees;
pub mod holidays;
pub mod identity;
pub mod leave;
pub mod payload;
pub mod work_from_home;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use identity::{Identity, linked_employee, target_employee};

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("HTML tag pattern is valid"));

/// Removes HTML tags and surrounding whitespace from a message.
///
/// # Example
///
/// ```
/// use hr_engine::services::strip_html;
///
/// assert_eq!(strip_html("<p>Victory <b>Day</b></p>\n"), "Victory Day");
/// ```
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").trim().to_string()
}

/// Totals attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    /// Number of documents returned.
    pub total: usize,
    /// Documents per status, when the kind has one.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub status_counts: BTreeMap<String, usize>,
}

impl ListSummary {
    /// A summary with only a total.
    pub fn total(total: usize) -> Self {
        Self {
            total,
            status_counts: BTreeMap::new(),
        }
    }

    /// A summary counting documents by status.
    pub fn by_status<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut summary = Self::default();
        for status in statuses {
            *summary.status_counts.entry(status.to_string()).or_insert(0) += 1;
            summary.total += 1;
        }
        summary
    }
}

/// A list of documents with its summary.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T> {
    /// The documents.
    pub items: Vec<T>,
    /// Totals over `items`.
    pub summary: ListSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_removes_tags() {
        assert_eq!(strip_html("<div>Eid <i>ul</i> Fitr</div>"), "Eid ul Fitr");
        assert_eq!(strip_html("plain"), "plain");
    }

    #[test]
    fn test_summary_counts_statuses() {
        let summary = ListSummary::by_status(["Open", "Approved", "Open"]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.status_counts["Open"], 2);
        assert_eq!(summary.status_counts["Approved"], 1);
    }

    #[test]
    fn test_total_only_summary_omits_counts() {
        let json = serde_json::to_value(ListSummary::total(4)).unwrap();
        assert_eq!(json, serde_json::json!({"total": 4}));
    }
}
