//! Check-in and check-out.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use tracing::info;

use crate::config::HrConfig;
use crate::error::{EngineError, EngineResult};
use crate::hooks::geofence::check_geofence;
use crate::models::{EmployeeCheckin, LogType};
use crate::store::{DocKind, DocumentStore, Fields, Filter, list_docs, save_doc};

use super::identity::{Identity, linked_employee};
use super::payload::FieldTable;

const CHECKIN_FIELDS: FieldTable = FieldTable::new(
    DocKind::EmployeeCheckin,
    &[
        "log_type",
        "time",
        "latitude",
        "longitude",
        "checkin_image",
        "device_id",
        "skip_auto_attendance",
    ],
    &["log_type", "time", "latitude", "longitude", "checkin_image"],
);

/// Filters for listing check-ins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckinQuery {
    /// Only logs of this type.
    #[serde(default)]
    pub log_type: Option<LogType>,
    /// Month (1-12); applies only together with `year`.
    #[serde(default)]
    pub month: Option<u32>,
    /// Year; applies only together with `month`.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Records a check-in or check-out for the caller.
///
/// When the geofence is required the position must lie within it. The
/// image is stored as an opaque file reference.
pub fn create_checkin(
    store: &mut dyn DocumentStore,
    config: &HrConfig,
    identity: &Identity,
    payload: &Fields,
) -> EngineResult<EmployeeCheckin> {
    let employee = linked_employee(&*store, identity)?;

    let mut base = Fields::new();
    base.insert("employee".to_string(), employee.name.clone().into());
    let checkin: EmployeeCheckin = CHECKIN_FIELDS.create(base, payload)?;

    if let (Some(latitude), Some(longitude)) = (checkin.latitude, checkin.longitude) {
        check_geofence(&config.geofence, latitude, longitude)?;
    }

    let checkin = save_doc(store, &checkin)?;
    info!(
        employee = %checkin.employee,
        checkin = %checkin.name,
        log_type = ?checkin.log_type,
        "Check-in recorded"
    );
    Ok(checkin)
}

/// Lists the caller's check-ins, newest first.
pub fn list_checkins(
    store: &dyn DocumentStore,
    identity: &Identity,
    query: &CheckinQuery,
) -> EngineResult<Vec<EmployeeCheckin>> {
    let employee = linked_employee(store, identity)?;

    let mut filter = Filter::new().with("employee", &employee.name);
    if let Some(log_type) = query.log_type {
        filter = filter.with("log_type", log_type);
    }
    let window = match (query.month, query.year) {
        (Some(month), Some(year)) => Some(month_window(year, month)?),
        _ => None,
    };

    let mut checkins: Vec<EmployeeCheckin> = list_docs::<EmployeeCheckin>(store, &filter)?
        .into_iter()
        .filter(|c: &EmployeeCheckin| {
            window.is_none_or(|(start, end)| c.time >= start && c.time < end)
        })
        .collect();
    checkins.sort_by(|a, b| b.time.cmp(&a.time));
    Ok(checkins)
}

/// Closes every check-in made today that has no later check-out.
///
/// Each open IN since midnight of `now` gets an OUT stamped `now`.
/// Returns the check-outs created.
pub fn auto_checkout(
    store: &mut dyn DocumentStore,
    now: NaiveDateTime,
) -> EngineResult<Vec<EmployeeCheckin>> {
    let start_of_day = now.date().and_time(NaiveTime::MIN);
    let open: Vec<EmployeeCheckin> =
        list_docs::<EmployeeCheckin>(&*store, &Filter::new().with("log_type", LogType::In))?
            .into_iter()
            .filter(|c: &EmployeeCheckin| c.time >= start_of_day)
            .collect();

    let mut created = Vec::new();
    for checkin in open {
        if has_later_checkout(&*store, &checkin)? {
            continue;
        }
        let out = EmployeeCheckin {
            name: String::new(),
            employee: checkin.employee.clone(),
            log_type: LogType::Out,
            time: now,
            latitude: None,
            longitude: None,
            device_id: None,
            skip_auto_attendance: false,
            checkin_image: None,
        };
        created.push(save_doc(store, &out)?);
    }

    info!(created = created.len(), "Auto checkout finished");
    Ok(created)
}

fn has_later_checkout(store: &dyn DocumentStore, checkin: &EmployeeCheckin) -> EngineResult<bool> {
    let filter = Filter::new()
        .with("employee", &checkin.employee)
        .with("log_type", LogType::Out);
    Ok(list_docs::<EmployeeCheckin>(store, &filter)?
        .iter()
        .any(|out| out.time > checkin.time))
}

/// `[first instant of the month, first instant of the next month)`.
fn month_window(year: i32, month: u32) -> EngineResult<(NaiveDateTime, NaiveDateTime)> {
    let invalid = || EngineError::InvalidField {
        field: "month".to_string(),
        message: "Invalid month/year format".to_string(),
    };
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if start.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    Ok((start.and_time(NaiveTime::MIN), next.and_time(NaiveTime::MIN)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::Employee;
    use crate::services::payload::into_fields;
    use crate::store::InMemoryStore;
    use serde_json::{Value, json};

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn hr_config() -> HrConfig {
        ConfigLoader::load("./config/default").unwrap().hr().clone()
    }

    fn me() -> Identity {
        Identity::new("ayesha@example.com")
    }

    fn store_with_employee() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        save_doc(
            &mut store,
            &Employee {
                name: "E1".to_string(),
                user_id: Some("ayesha@example.com".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        store
    }

    fn body(log_type: &str, time: &str, lat: f64, lon: f64) -> Value {
        json!({
            "log_type": log_type,
            "time": time,
            "latitude": lat,
            "longitude": lon,
            "checkin_image": "/private/files/checkin_E1.png"
        })
    }

    fn checkin(store: &mut InMemoryStore, log_type: &str, time: &str) -> EmployeeCheckin {
        create_checkin(
            store,
            &hr_config(),
            &me(),
            &into_fields(body(log_type, time, 23.7808875, 90.2792371)).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_checkin_inside_geofence_is_recorded() {
        let mut store = store_with_employee();
        let record = checkin(&mut store, "IN", "2024-03-04T09:01:00");

        assert_eq!(record.employee, "E1");
        assert_eq!(record.log_type, LogType::In);
        assert!(record.name.starts_with("EMP-CKIN-"));
    }

    #[test]
    fn test_checkin_outside_geofence_is_rejected() {
        let mut store = store_with_employee();
        let result = create_checkin(
            &mut store,
            &hr_config(),
            &me(),
            &into_fields(body("IN", "2024-03-04T09:01:00", 23.80, 90.2792371)).unwrap(),
        );

        assert!(matches!(result, Err(EngineError::OutsideGeofence { .. })));
        assert_eq!(store.count(DocKind::EmployeeCheckin), 0);
    }

    #[test]
    fn test_checkin_requires_image() {
        let mut store = store_with_employee();
        let mut payload = into_fields(body("IN", "2024-03-04T09:01:00", 23.78, 90.27)).unwrap();
        payload.remove("checkin_image");

        match create_checkin(&mut store, &hr_config(), &me(), &payload) {
            Err(EngineError::MissingField { field }) => assert_eq!(field, "checkin_image"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_unlinked_user_cannot_check_in() {
        let mut store = InMemoryStore::new();
        let result = create_checkin(
            &mut store,
            &hr_config(),
            &me(),
            &into_fields(body("IN", "2024-03-04T09:01:00", 23.78, 90.27)).unwrap(),
        );
        assert!(matches!(result, Err(EngineError::NoLinkedEmployee { .. })));
    }

    #[test]
    fn test_list_filters_by_month_newest_first() {
        let mut store = store_with_employee();
        checkin(&mut store, "IN", "2024-02-29T09:00:00");
        checkin(&mut store, "IN", "2024-03-01T09:00:00");
        checkin(&mut store, "OUT", "2024-03-31T18:00:00");
        checkin(&mut store, "IN", "2024-04-01T09:00:00");

        let march = list_checkins(
            &store,
            &me(),
            &CheckinQuery {
                log_type: None,
                month: Some(3),
                year: Some(2024),
            },
        )
        .unwrap();
        assert_eq!(march.len(), 2);
        assert_eq!(march[0].time, dt(2024, 3, 31, 18, 0));

        let ins = list_checkins(
            &store,
            &me(),
            &CheckinQuery {
                log_type: Some(LogType::In),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(ins.len(), 3);
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let store = store_with_employee();
        let result = list_checkins(
            &store,
            &me(),
            &CheckinQuery {
                log_type: None,
                month: Some(13),
                year: Some(2024),
            },
        );
        assert!(matches!(result, Err(EngineError::InvalidField { .. })));
    }

    #[test]
    fn test_auto_checkout_closes_open_checkins_only() {
        let mut store = store_with_employee();
        checkin(&mut store, "IN", "2024-03-03T09:00:00");
        checkin(&mut store, "IN", "2024-03-04T09:00:00");
        checkin(&mut store, "IN", "2024-03-04T13:00:00");

        let now = dt(2024, 3, 4, 23, 0);
        let created = auto_checkout(&mut store, now).unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].log_type, LogType::Out);
        assert_eq!(created[0].time, now);

        let again = auto_checkout(&mut store, now).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn test_auto_checkout_respects_existing_checkout() {
        let mut store = store_with_employee();
        checkin(&mut store, "IN", "2024-03-04T09:00:00");
        checkin(&mut store, "OUT", "2024-03-04T18:00:00");

        let created = auto_checkout(&mut store, dt(2024, 3, 4, 23, 0)).unwrap();
        assert!(created.is_empty());
    }
}
