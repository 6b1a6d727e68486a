//! Reference data for the demo server.
//!
//! Companies, holiday lists and employees live in the surrounding platform.
//! The demo server has none, so it can preload them from a YAML file:
//!
//! ```text
//! companies:
//!   - name: Acme
//!     default_holiday_list: HL-2024
//! holidays:
//!   - parent: HL-2024
//!     holiday_date: 2024-03-26
//!     description: Independence Day
//! employees:
//!   - name: E1
//!     employee_name: Ayesha Rahman
//!     user_id: ayesha@example.com
//!     company: Acme
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Company, Employee, Holiday};
use crate::store::{DocumentStore, save_doc};

/// Documents to preload into a store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Companies and their default holiday lists.
    #[serde(default)]
    pub companies: Vec<Company>,
    /// Holiday rows, grouped into lists by `parent`.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Employees, usually with `user_id` set so callers can be linked.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

impl SeedData {
    /// Reads seed data from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path_str = path.as_ref().display().to_string();

        let content = fs::read_to_string(path.as_ref()).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Saves every document into `store`.
    pub fn apply(&self, store: &mut dyn DocumentStore) -> EngineResult<()> {
        for company in &self.companies {
            save_doc(store, company)?;
        }
        for holiday in &self.holidays {
            save_doc(store, holiday)?;
        }
        for employee in &self.employees {
            save_doc(store, employee)?;
        }
        info!(
            companies = self.companies.len(),
            holidays = self.holidays.len(),
            employees = self.employees.len(),
            "Seed data loaded"
        );
        Ok(())
    }
}
