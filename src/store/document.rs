//! Document kinds, filters and typed conversion.
//!
//! Documents travel through the store as loosely typed field maps, the same
//! shape the underlying document ORM exposes. Typed models convert to and
//! from that shape with serde, so only fields a model declares ever reach
//! business logic.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};

/// The field map of a stored document, excluding its name.
pub type Fields = Map<String, Value>;

/// The document kinds this engine reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocKind {
    /// Employee master record.
    Employee,
    /// Company, carrying the default holiday list.
    Company,
    /// One date on a holiday list.
    Holiday,
    /// Per-day attendance ledger entry.
    Attendance,
    /// Employee-raised attendance correction.
    AttendanceRequest,
    /// Leave application.
    LeaveApplication,
    /// Leave allocation for a leave type and period.
    LeaveAllocation,
    /// Work-from-home request.
    WorkFromHomeRequest,
    /// Check-in or check-out log.
    EmployeeCheckin,
    /// Running count of off days worked per employee.
    WeekendTracker,
    /// Off days worked, pending redemption.
    OffDayWorkEntry,
}

impl DocKind {
    /// Human-readable kind name, as used in messages.
    pub fn label(self) -> &'static str {
        match self {
            DocKind::Employee => "Employee",
            DocKind::Company => "Company",
            DocKind::Holiday => "Holiday",
            DocKind::Attendance => "Attendance",
            DocKind::AttendanceRequest => "Attendance Request",
            DocKind::LeaveApplication => "Leave Application",
            DocKind::LeaveAllocation => "Leave Allocation",
            DocKind::WorkFromHomeRequest => "Request Work From Home",
            DocKind::EmployeeCheckin => "Employee Checkin",
            DocKind::WeekendTracker => "Weekend Tracker",
            DocKind::OffDayWorkEntry => "Off Day Work Entry",
        }
    }

    /// Prefix of the naming series used when a document is inserted
    /// without an explicit name.
    pub fn naming_prefix(self) -> &'static str {
        match self {
            DocKind::Employee => "HR-EMP",
            DocKind::Company => "COMP",
            DocKind::Holiday => "HOL",
            DocKind::Attendance => "HR-ATT",
            DocKind::AttendanceRequest => "HR-ARQ",
            DocKind::LeaveApplication => "HR-LAP",
            DocKind::LeaveAllocation => "HR-LAL",
            DocKind::WorkFromHomeRequest => "HR-WFH",
            DocKind::EmployeeCheckin => "EMP-CKIN",
            DocKind::WeekendTracker => "HR-WKT",
            DocKind::OffDayWorkEntry => "HR-ODW",
        }
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An equality filter over document fields.
///
/// The pseudo-field `name` matches the document name. A filter on `Null`
/// matches documents where the field is absent.
///
/// # Example
///
/// ```
/// use hr_engine::store::Filter;
///
/// let key = Filter::new().with("employee", "E1").with("attendance_date", "2024-02-01");
/// assert_eq!(key.conditions().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
    invalid: Option<String>,
}

impl Filter {
    /// An empty filter, matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter matching one document by name.
    pub fn by_name(name: &str) -> Self {
        Self::new().with("name", name)
    }

    /// Adds an equality condition.
    ///
    /// A value that fails to serialize poisons the filter: it matches
    /// nothing and [`Filter::validate`] reports the failure, which stores
    /// surface as `InvalidField`.
    pub fn with(mut self, field: &str, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => self.conditions.push((field.to_string(), value)),
            Err(e) => {
                self.invalid
                    .get_or_insert_with(|| format!("condition on '{}': {}", field, e));
            }
        }
        self
    }

    /// Fails with `InvalidField` when a condition could not be built.
    pub fn validate(&self) -> EngineResult<()> {
        match &self.invalid {
            Some(message) => Err(EngineError::InvalidField {
                field: "filter".to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    /// The conditions, in insertion order.
    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    /// Returns true when the named document satisfies every condition.
    pub fn matches(&self, name: &str, fields: &Fields) -> bool {
        if self.invalid.is_some() {
            return false;
        }
        self.conditions.iter().all(|(field, expected)| {
            if field == "name" {
                return expected.as_str() == Some(name);
            }
            fields.get(field).unwrap_or(&Value::Null) == expected
        })
    }

    /// The conditions as a field map, used to seed a document on insert.
    pub fn to_fields(&self) -> Fields {
        self.conditions
            .iter()
            .filter(|(field, _)| field != "name")
            .cloned()
            .collect()
    }
}

/// A stored document: its name and its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique document name within its kind.
    pub name: String,
    /// Field values.
    pub fields: Fields,
}

impl Record {
    /// Decodes the record into a typed model.
    pub fn decode<T: Document>(&self) -> EngineResult<T> {
        let mut map = self.fields.clone();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        serde_json::from_value(Value::Object(map)).map_err(|e| EngineError::Store {
            message: format!("malformed {} '{}': {}", T::KIND, self.name, e),
        })
    }
}

/// A typed model stored as a document of a fixed kind.
pub trait Document: Serialize + DeserializeOwned {
    /// The document kind this model is stored as.
    const KIND: DocKind;

    /// The document name; empty until the document is first saved.
    fn name(&self) -> &str;
}

/// Encodes a typed model into a field map, without its name.
pub fn encode<T: Document>(doc: &T) -> EngineResult<Fields> {
    match serde_json::to_value(doc) {
        Ok(Value::Object(mut map)) => {
            map.remove("name");
            Ok(map)
        }
        Ok(other) => Err(EngineError::Store {
            message: format!("{} did not encode to an object: {}", T::KIND, other),
        }),
        Err(e) => Err(EngineError::Store {
            message: format!("failed to encode {}: {}", T::KIND, e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_filter_matches_on_all_conditions() {
        let doc = fields(json!({"employee": "E1", "attendance_date": "2024-02-01"}));
        let key = Filter::new()
            .with("employee", "E1")
            .with("attendance_date", "2024-02-01");

        assert!(key.matches("HR-ATT-00001", &doc));
        assert!(!Filter::new().with("employee", "E2").matches("HR-ATT-00001", &doc));
    }

    #[test]
    fn test_filter_by_name_matches_document_name() {
        let doc = fields(json!({"employee": "E1"}));
        assert!(Filter::by_name("HR-ATT-00001").matches("HR-ATT-00001", &doc));
        assert!(!Filter::by_name("HR-ATT-00002").matches("HR-ATT-00001", &doc));
    }

    #[test]
    fn test_null_condition_matches_absent_field() {
        let doc = fields(json!({"employee": "E1"}));
        let filter = Filter::new().with("holiday_list", Option::<String>::None);
        assert!(filter.matches("E1", &doc));
    }

    #[test]
    fn test_unserializable_condition_matches_nothing() {
        let doc = fields(json!({"employee": "E1"}));
        let bad_key = std::collections::BTreeMap::from([((1, 2), 3)]);
        let filter = Filter::new().with("employee", "E1").with("shift", bad_key);

        assert!(!filter.matches("E1", &doc));
        match filter.validate() {
            Err(EngineError::InvalidField { field, message }) => {
                assert_eq!(field, "filter");
                assert!(message.contains("shift"));
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(Filter::new().matches("x", &Fields::new()));
    }

    #[test]
    fn test_to_fields_skips_name() {
        let seeded = Filter::by_name("A").with("employee", "E1").to_fields();
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded["employee"], json!("E1"));
    }
}
