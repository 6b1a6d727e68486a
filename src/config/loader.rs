//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, HrConfig, LeavePolicy};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── hr_config.yaml      # Geofence, work-from-home cutoff, permission rows
/// └── leave_policy.yaml   # Leave type names and defaults
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Geofence radius: {}m", loader.hr().geofence.allowed_area_meters);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let hr = Self::load_yaml::<HrConfig>(&path.join("hr_config.yaml"))?;
        let leave_policy = Self::load_yaml::<LeavePolicy>(&path.join("leave_policy.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(hr, leave_policy),
        })
    }

    /// Wraps an already-built configuration, for tests and embedders.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the underlying configuration mutably.
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// Returns the HR Config settings.
    pub fn hr(&self) -> &HrConfig {
        self.config.hr()
    }

    /// Returns the leave policy.
    pub fn leave_policy(&self) -> &LeavePolicy {
        self.config.leave_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn config_path() -> &'static str {
        "./config/default"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert!(loader.hr().geofence.required);
        assert_eq!(loader.hr().geofence.allowed_area_meters, 100.0);
        assert_eq!(
            loader.hr().work_from_home.last_request_time,
            Some(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_leave_policy_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(
            loader.leave_policy().extra_earned_leave_type,
            "Extra Earned Leave"
        );
        assert_eq!(loader.leave_policy().default_employee_status, "Active");
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("hr_config.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let dir = std::env::temp_dir().join(format!("hr-engine-bad-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("hr_config.yaml"), "geofence: [not, a, map").unwrap();

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }
}
