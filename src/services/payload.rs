//! Allow-listed payload mapping.
//!
//! Request bodies arrive as loose JSON objects. Each entity declares a
//! [`FieldTable`] naming the fields a caller may set and those a create
//! must carry; anything else is rejected before it reaches a document.

use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::store::{DocKind, Document, Fields, encode};

/// Checkbox fields accepted as booleans, 0/1 or "0"/"1".
const FLAG_FIELDS: &[&str] = &["include_holidays", "skip_auto_attendance"];

/// The fields a caller may set on one entity.
#[derive(Debug, Clone, Copy)]
pub struct FieldTable {
    kind: DocKind,
    allowed: &'static [&'static str],
    required: &'static [&'static str],
}

impl FieldTable {
    /// Declares a table. Every required field must also be allowed.
    pub const fn new(
        kind: DocKind,
        allowed: &'static [&'static str],
        required: &'static [&'static str],
    ) -> Self {
        Self {
            kind,
            allowed,
            required,
        }
    }

    /// Fails with `UnknownField` on the first field outside the table.
    pub fn check(&self, payload: &Fields) -> EngineResult<()> {
        match payload.keys().find(|key| !self.allowed.contains(&key.as_str())) {
            Some(field) => Err(EngineError::UnknownField {
                kind: self.kind.label().to_string(),
                field: field.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Fails with `MissingField` on the first required field that is
    /// absent, null or an empty string.
    pub fn require(&self, payload: &Fields) -> EngineResult<()> {
        match self.required.iter().find(|field| is_blank(payload.get(**field))) {
            Some(field) => Err(EngineError::missing_field(*field)),
            None => Ok(()),
        }
    }

    /// Builds a new document from `base` (fields the service sets itself)
    /// and the caller's payload.
    pub fn create<T: Document>(&self, base: Fields, payload: &Fields) -> EngineResult<T> {
        self.check(payload)?;
        self.require(payload)?;
        let mut fields = self.normalize(payload, None)?;
        fields.extend(base);
        decode_fields("", fields)
    }

    /// Applies the caller's payload to an existing document.
    pub fn update<T: Document>(&self, current: &T, payload: &Fields) -> EngineResult<T> {
        self.check(payload)?;
        let mut fields = encode(current)?;
        let changes = self.normalize(payload, Some(&fields))?;
        fields.extend(changes);
        decode_fields(current.name(), fields)
    }

    /// Resolves the `half_day` checkbox into `half_day_date` and coerces
    /// flag fields to booleans.
    ///
    /// On create (`current` is `None`) a date sent without a truthy flag is
    /// dropped. On update a truthy flag may rely on the stored date, and an
    /// absent flag leaves the stored date alone.
    fn normalize(&self, payload: &Fields, current: Option<&Fields>) -> EngineResult<Fields> {
        let mut fields = payload.clone();
        let half_day = fields.remove("half_day");

        if self.allowed.contains(&"half_day_date") {
            match half_day {
                Some(flag) if is_truthy(&flag) => {
                    if is_blank(fields.get("half_day_date")) {
                        fields.remove("half_day_date");
                        if is_blank(current.and_then(|c| c.get("half_day_date"))) {
                            return Err(EngineError::missing_field("half_day_date"));
                        }
                    }
                }
                Some(_) => {
                    fields.insert("half_day_date".to_string(), Value::Null);
                }
                None if current.is_none() => {
                    fields.insert("half_day_date".to_string(), Value::Null);
                }
                None => {}
            }
        }

        for flag in FLAG_FIELDS {
            if let Some(value) = fields.get_mut(*flag) {
                *value = Value::Bool(is_truthy(value));
            }
        }

        Ok(fields)
    }
}

/// Turns a JSON body into a field map, rejecting non-objects.
pub fn into_fields(body: Value) -> EngineResult<Fields> {
    match body {
        Value::Object(map) => Ok(map),
        other => Err(EngineError::InvalidField {
            field: "body".to_string(),
            message: format!("expected a JSON object, got {}", other),
        }),
    }
}

fn decode_fields<T: Document>(name: &str, mut fields: Fields) -> EngineResult<T> {
    fields.insert("name".to_string(), Value::String(name.to_string()));
    serde_json::from_value(Value::Object(fields)).map_err(|e| EngineError::InvalidField {
        field: T::KIND.label().to_string(),
        message: e.to_string(),
    })
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(s.trim(), "1" | "true" | "True" | "yes"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceRequest;
    use chrono::NaiveDate;
    use serde_json::json;

    const TABLE: FieldTable = FieldTable::new(
        DocKind::AttendanceRequest,
        &[
            "from_date",
            "to_date",
            "reason",
            "half_day",
            "half_day_date",
            "include_holidays",
        ],
        &["from_date", "to_date", "reason"],
    );

    fn fields(value: Value) -> Fields {
        into_fields(value).unwrap()
    }

    fn base() -> Fields {
        fields(json!({"employee": "E1"}))
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let payload = fields(json!({"from_date": "2024-01-01", "custom_days": 99}));
        match TABLE.check(&payload) {
            Err(EngineError::UnknownField { kind, field }) => {
                assert_eq!(kind, "Attendance Request");
                assert_eq!(field, "custom_days");
            }
            other => panic!("Expected UnknownField, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_required_field_is_missing() {
        let payload = fields(json!({"from_date": "2024-01-01", "to_date": "2024-01-02", "reason": " "}));
        match TABLE.create::<AttendanceRequest>(base(), &payload) {
            Err(EngineError::MissingField { field }) => assert_eq!(field, "reason"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_create_maps_flags_and_half_day() {
        let payload = fields(json!({
            "from_date": "2024-01-01",
            "to_date": "2024-01-05",
            "reason": "On Duty",
            "half_day": 1,
            "half_day_date": "2024-01-05",
            "include_holidays": "1"
        }));

        let request: AttendanceRequest = TABLE.create(base(), &payload).unwrap();
        assert_eq!(request.employee, "E1");
        assert!(request.include_holidays);
        assert_eq!(request.half_day_date, NaiveDate::from_ymd_opt(2024, 1, 5));
    }

    #[test]
    fn test_half_day_off_clears_date() {
        let payload = fields(json!({
            "from_date": "2024-01-01",
            "to_date": "2024-01-05",
            "reason": "On Duty",
            "half_day": 0,
            "half_day_date": "2024-01-05"
        }));

        let request: AttendanceRequest = TABLE.create(base(), &payload).unwrap();
        assert!(request.half_day_date.is_none());
    }

    #[test]
    fn test_half_day_without_date_is_missing_field() {
        let payload = fields(json!({
            "from_date": "2024-01-01",
            "to_date": "2024-01-05",
            "reason": "On Duty",
            "half_day": true
        }));
        assert!(matches!(
            TABLE.create::<AttendanceRequest>(base(), &payload),
            Err(EngineError::MissingField { .. })
        ));
    }

    #[test]
    fn test_create_drops_date_without_half_day_flag() {
        let payload = fields(json!({
            "from_date": "2024-01-01",
            "to_date": "2024-01-05",
            "reason": "On Duty",
            "half_day_date": "2024-01-05"
        }));

        let request: AttendanceRequest = TABLE.create(base(), &payload).unwrap();
        assert!(request.half_day_date.is_none());
    }

    #[test]
    fn test_update_flag_keeps_stored_half_day_date() {
        let payload = fields(json!({
            "from_date": "2024-01-01",
            "to_date": "2024-01-05",
            "reason": "On Duty",
            "half_day": 1,
            "half_day_date": "2024-01-03"
        }));
        let stored: AttendanceRequest = TABLE.create(base(), &payload).unwrap();

        let updated: AttendanceRequest = TABLE
            .update(&stored, &fields(json!({"half_day": 1, "reason": "Client visit"})))
            .unwrap();
        assert_eq!(updated.half_day_date, NaiveDate::from_ymd_opt(2024, 1, 3));
        assert_eq!(updated.reason, "Client visit");

        let untouched: AttendanceRequest = TABLE
            .update(&stored, &fields(json!({"to_date": "2024-01-04"})))
            .unwrap();
        assert_eq!(untouched.half_day_date, NaiveDate::from_ymd_opt(2024, 1, 3));
    }

    #[test]
    fn test_update_flag_without_any_date_is_missing_field() {
        let payload = fields(json!({"from_date": "2024-01-01", "to_date": "2024-01-05", "reason": "On Duty"}));
        let stored: AttendanceRequest = TABLE.create(base(), &payload).unwrap();

        match TABLE.update(&stored, &fields(json!({"half_day": true}))) {
            Err(EngineError::MissingField { field }) => assert_eq!(field, "half_day_date"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_base_fields_cannot_be_overridden() {
        let table = FieldTable::new(
            DocKind::AttendanceRequest,
            &["employee", "from_date", "to_date", "reason"],
            &[],
        );
        let payload = fields(json!({
            "employee": "E2",
            "from_date": "2024-01-01",
            "to_date": "2024-01-05",
            "reason": "On Duty"
        }));
        let request: AttendanceRequest = table.create(base(), &payload).unwrap();
        assert_eq!(request.employee, "E1");
    }

    #[test]
    fn test_update_keeps_name_and_untouched_fields() {
        let payload = fields(json!({"from_date": "2024-01-01", "to_date": "2024-01-05", "reason": "On Duty"}));
        let mut request: AttendanceRequest = TABLE.create(base(), &payload).unwrap();
        request.name = "HR-ARQ-00001".to_string();

        let updated = TABLE
            .update(&request, &fields(json!({"reason": "Client visit"})))
            .unwrap();
        assert_eq!(updated.name, "HR-ARQ-00001");
        assert_eq!(updated.reason, "Client visit");
        assert_eq!(updated.from_date, request.from_date);
    }

    #[test]
    fn test_wrongly_typed_value_is_invalid_field() {
        let payload = fields(json!({"from_date": "yesterday", "to_date": "2024-01-05", "reason": "x"}));
        assert!(matches!(
            TABLE.create::<AttendanceRequest>(base(), &payload),
            Err(EngineError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert!(into_fields(json!([1, 2])).is_err());
    }
}
