//! Configuration types for the HR engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Geofencing settings for employee check-ins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceConfig {
    /// Whether check-ins must fall inside the allowed area.
    pub required: bool,
    /// Latitude of the office, in degrees.
    pub latitude: f64,
    /// Longitude of the office, in degrees.
    pub longitude: f64,
    /// Radius of the allowed area, in metres.
    pub allowed_area_meters: f64,
}

/// Work-from-home request settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkFromHomeConfig {
    /// Latest time of day a same-day request may be raised.
    #[serde(default)]
    pub last_request_time: Option<NaiveTime>,
    /// Role profile whose requests are subject to the cutoff.
    pub restricted_role_profile: String,
}

/// One check-in/out permission row kept in HR Config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInOutPermissionRow {
    /// Name of the permission document this row mirrors.
    pub doc_link: String,
    /// Whether late/early validation applies.
    #[serde(default)]
    pub late_early_validation: bool,
    /// Whether a check-in image is required.
    #[serde(default)]
    pub image_required: bool,
}

/// The HR Config document: the single shared settings record.
///
/// Operations receive it explicitly instead of reading a global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrConfig {
    /// Check-in geofence.
    pub geofence: GeofenceConfig,
    /// Work-from-home cutoff rules.
    pub work_from_home: WorkFromHomeConfig,
    /// Links appended by submitted Attendance Permission documents.
    #[serde(default)]
    pub attendance_config_data: Vec<String>,
    /// Rows maintained by Check-in/out Permission documents.
    #[serde(default)]
    pub checkinout_permission_config: Vec<CheckInOutPermissionRow>,
}

fn default_extra_earned_leave_type() -> String {
    "Extra Earned Leave".to_string()
}

fn default_employee_status() -> String {
    "Active".to_string()
}

/// Leave policy settings from leave_policy.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Leave type credited for weekend/off-day work.
    #[serde(default = "default_extra_earned_leave_type")]
    pub extra_earned_leave_type: String,
    /// Status given to employees created without one.
    #[serde(default = "default_employee_status")]
    pub default_employee_status: String,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            extra_earned_leave_type: default_extra_earned_leave_type(),
            default_employee_status: default_employee_status(),
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    hr: HrConfig,
    leave_policy: LeavePolicy,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(hr: HrConfig, leave_policy: LeavePolicy) -> Self {
        Self { hr, leave_policy }
    }

    /// Returns the HR Config settings.
    pub fn hr(&self) -> &HrConfig {
        &self.hr
    }

    /// Returns mutable HR Config settings, for the permission hooks.
    pub fn hr_mut(&mut self) -> &mut HrConfig {
        &mut self.hr
    }

    /// Returns the leave policy.
    pub fn leave_policy(&self) -> &LeavePolicy {
        &self.leave_policy
    }
}
