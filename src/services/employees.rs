//! Employee CRUD.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;
use crate::store::{DocKind, DocumentStore, Fields, Filter, get_doc, list_docs, save_doc};

use super::identity::{Identity, linked_employee};
use super::payload::FieldTable;

const EMPLOYEE_FIELDS: FieldTable = FieldTable::new(
    DocKind::Employee,
    &[
        "employee_name",
        "user_id",
        "status",
        "company",
        "holiday_list",
        "date_of_birth",
        "date_of_joining",
        "personal_email",
        "company_email",
        "employee_number",
        "branch",
        "department",
        "designation",
    ],
    &["employee_name"],
);

/// Fields that must be unique across employees when set.
const UNIQUE_FIELDS: &[&str] = &["personal_email", "company_email", "employee_number"];

/// Result of deleting an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedEmployee {
    /// The deleted employee.
    pub employee: String,
    /// The user that was linked to it, now unlinked.
    pub user: Option<String>,
}

/// Creates an employee.
///
/// `date_of_joining` defaults to `today` and `status` to the policy's
/// default status.
pub fn create_employee(
    store: &mut dyn DocumentStore,
    identity: &Identity,
    policy: &LeavePolicy,
    payload: &Fields,
    today: NaiveDate,
) -> EngineResult<Employee> {
    identity.authorize()?;
    reject_duplicates(&*store, payload, None)?;

    let mut base = Fields::new();
    if payload.get("date_of_joining").is_none_or(Value::is_null) {
        base.insert("date_of_joining".to_string(), Value::String(today.to_string()));
    }
    if payload.get("status").is_none_or(Value::is_null) {
        base.insert(
            "status".to_string(),
            Value::String(policy.default_employee_status.clone()),
        );
    }

    let employee: Employee = EMPLOYEE_FIELDS.create(base, payload)?;
    let employee = save_doc(store, &employee)?;
    info!(employee = %employee.name, "Employee created");
    Ok(employee)
}

/// Lists employees. The caller must be linked to an employee; with
/// `only_self` the list holds just that record.
pub fn list_employees(
    store: &dyn DocumentStore,
    identity: &Identity,
    only_self: bool,
) -> EngineResult<Vec<Employee>> {
    let me = linked_employee(store, identity)?;
    if only_self {
        return Ok(vec![me]);
    }
    list_docs(store, &Filter::new())
}

/// Updates an employee's allow-listed fields.
pub fn update_employee(
    store: &mut dyn DocumentStore,
    identity: &Identity,
    name: &str,
    payload: &Fields,
) -> EngineResult<Employee> {
    identity.authorize()?;
    let current: Employee = get_doc(&*store, name)?;
    reject_duplicates(&*store, payload, Some(name))?;

    let updated = EMPLOYEE_FIELDS.update(&current, payload)?;
    let updated = save_doc(store, &updated)?;
    info!(employee = %name, "Employee updated");
    Ok(updated)
}

/// Deletes an employee, returning the user that was linked to it.
pub fn delete_employee(
    store: &mut dyn DocumentStore,
    identity: &Identity,
    name: &str,
) -> EngineResult<DeletedEmployee> {
    identity.authorize()?;
    let employee: Employee = get_doc(&*store, name)?;
    store.delete(DocKind::Employee, name)?;
    info!(employee = %name, user = ?employee.user_id, "Employee deleted");

    Ok(DeletedEmployee {
        employee: employee.name,
        user: employee.user_id,
    })
}

fn reject_duplicates(
    store: &dyn DocumentStore,
    payload: &Fields,
    except: Option<&str>,
) -> EngineResult<()> {
    for field in UNIQUE_FIELDS {
        let Some(value) = payload.get(*field).filter(|v| !v.is_null() && v.as_str() != Some("")) else {
            continue;
        };
        let clash = store
            .list(DocKind::Employee, &Filter::new().with(field, value))?
            .into_iter()
            .any(|record| Some(record.name.as_str()) != except);
        if clash {
            return Err(EngineError::DuplicateEntry {
                message: format!("{} already exists", field),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeStatus;
    use crate::services::payload::into_fields;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn admin() -> Identity {
        Identity::new("admin@example.com")
    }

    fn create(store: &mut InMemoryStore, body: Value) -> EngineResult<Employee> {
        create_employee(
            store,
            &admin(),
            &LeavePolicy::default(),
            &into_fields(body).unwrap(),
            today(),
        )
    }

    #[test]
    fn test_create_applies_defaults() {
        let mut store = InMemoryStore::new();
        let employee = create(&mut store, json!({"employee_name": "Ayesha Rahman"})).unwrap();

        assert!(employee.name.starts_with("HR-EMP-"));
        assert_eq!(employee.date_of_joining, Some(today()));
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert!(get_doc::<Employee>(&store, &employee.name).is_ok());
    }

    #[test]
    fn test_duplicate_personal_email_is_rejected() {
        let mut store = InMemoryStore::new();
        create(
            &mut store,
            json!({"employee_name": "A", "personal_email": "a@example.com"}),
        )
        .unwrap();

        match create(
            &mut store,
            json!({"employee_name": "B", "personal_email": "a@example.com"}),
        ) {
            Err(EngineError::DuplicateEntry { message }) => {
                assert_eq!(message, "personal_email already exists")
            }
            other => panic!("Expected DuplicateEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut store = InMemoryStore::new();
        let result = create(&mut store, json!({"employee_name": "A", "salary": 100}));
        assert!(matches!(result, Err(EngineError::UnknownField { .. })));
    }

    #[test]
    fn test_update_may_keep_its_own_unique_values() {
        let mut store = InMemoryStore::new();
        let employee = create(
            &mut store,
            json!({"employee_name": "A", "employee_number": "007"}),
        )
        .unwrap();

        let updated = update_employee(
            &mut store,
            &admin(),
            &employee.name,
            &into_fields(json!({"employee_number": "007", "designation": "Engineer"})).unwrap(),
        )
        .unwrap();
        assert_eq!(updated.designation.as_deref(), Some("Engineer"));
    }

    #[test]
    fn test_list_requires_linked_employee() {
        let mut store = InMemoryStore::new();
        create(
            &mut store,
            json!({"employee_name": "A", "user_id": "a@example.com"}),
        )
        .unwrap();
        create(&mut store, json!({"employee_name": "B"})).unwrap();

        let all = list_employees(&store, &Identity::new("a@example.com"), false).unwrap();
        assert_eq!(all.len(), 2);
        let mine = list_employees(&store, &Identity::new("a@example.com"), true).unwrap();
        assert_eq!(mine.len(), 1);
        assert!(matches!(
            list_employees(&store, &Identity::new("b@example.com"), false),
            Err(EngineError::NoLinkedEmployee { .. })
        ));
    }

    #[test]
    fn test_delete_returns_unlinked_user() {
        let mut store = InMemoryStore::new();
        let employee = create(
            &mut store,
            json!({"employee_name": "A", "user_id": "a@example.com"}),
        )
        .unwrap();

        let deleted = delete_employee(&mut store, &admin(), &employee.name).unwrap();
        assert_eq!(deleted.user.as_deref(), Some("a@example.com"));
        assert!(matches!(
            get_doc::<Employee>(&store, &employee.name),
            Err(EngineError::DocumentNotFound { .. })
        ));
        assert!(matches!(
            delete_employee(&mut store, &admin(), &employee.name),
            Err(EngineError::DocumentNotFound { .. })
        ));
    }
}
