//! The calling user.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;
use crate::store::{DocumentStore, Fields, Filter, find_doc, get_doc};

const GUEST: &str = "Guest";

/// Who is making a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User id, matched against `Employee.user_id`.
    pub user: String,
    /// The user's role profile, if any.
    #[serde(default)]
    pub role_profile: Option<String>,
}

impl Identity {
    /// An identity without a role profile.
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            role_profile: None,
        }
    }

    /// Sets the role profile.
    pub fn with_role_profile(mut self, role_profile: impl Into<String>) -> Self {
        self.role_profile = Some(role_profile.into());
        self
    }

    /// Fails with `Unauthorized` for anonymous callers.
    pub fn authorize(&self) -> EngineResult<()> {
        if self.user.is_empty() || self.user == GUEST {
            return Err(EngineError::Unauthorized {
                message: "a signed-in user is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Finds the Employee linked to the caller.
pub fn linked_employee(store: &dyn DocumentStore, identity: &Identity) -> EngineResult<Employee> {
    identity.authorize()?;
    find_doc::<Employee>(store, &Filter::new().with("user_id", &identity.user))?.ok_or_else(|| {
        EngineError::NoLinkedEmployee {
            user: identity.user.clone(),
        }
    })
}

/// Resolves whom a create acts for.
///
/// A non-empty `employee` in the payload names the employee directly (the
/// admin variant); otherwise the caller's own record is used. The returned
/// payload no longer carries `employee`.
pub fn target_employee(
    store: &dyn DocumentStore,
    identity: &Identity,
    payload: &Fields,
) -> EngineResult<(Employee, Fields)> {
    let mut payload = payload.clone();
    let employee = match payload.remove("employee") {
        None | Some(Value::Null) => linked_employee(store, identity)?,
        Some(Value::String(name)) if name.trim().is_empty() => linked_employee(store, identity)?,
        Some(Value::String(name)) => {
            identity.authorize()?;
            get_doc::<Employee>(store, name.trim())?
        }
        Some(other) => {
            return Err(EngineError::InvalidField {
                field: "employee".to_string(),
                message: format!("expected an employee id, got {}", other),
            });
        }
    };
    Ok((employee, payload))
}
