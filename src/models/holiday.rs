//! Company and holiday models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{DocKind, Document};

/// A company, carrying the fallback holiday list for its employees.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Company {
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// Holiday list used when an employee has none assigned.
    #[serde(default)]
    pub default_holiday_list: Option<String>,
}

impl Document for Company {
    const KIND: DocKind = DocKind::Company;

    fn name(&self) -> &str {
        &self.name
    }
}

/// One date on a holiday list.
///
/// # Example
///
/// ```
/// use hr_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     name: String::new(),
///     parent: "HL-2024".to_string(),
///     holiday_date: NaiveDate::from_ymd_opt(2024, 3, 26).unwrap(),
///     description: "Independence Day".to_string(),
///     weekly_off: false,
/// };
/// assert!(!holiday.weekly_off);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Document name.
    #[serde(default)]
    pub name: String,
    /// The holiday list this date belongs to.
    pub parent: String,
    /// The holiday date.
    pub holiday_date: NaiveDate,
    /// Free-text description; may contain HTML.
    #[serde(default)]
    pub description: String,
    /// True for recurring weekly offs (e.g. every Friday).
    #[serde(default)]
    pub weekly_off: bool,
}

impl Document for Holiday {
    const KIND: DocKind = DocKind::Holiday;

    fn name(&self) -> &str {
        &self.name
    }
}
