//! Employee check-in model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::store::{DocKind, Document};

/// Direction of a check-in log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogType {
    /// Checking in.
    In,
    /// Checking out.
    Out,
}

/// One check-in or check-out log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCheckin {
    /// Document name.
    #[serde(default)]
    pub name: String,
    /// The employee.
    pub employee: String,
    /// In or out.
    pub log_type: LogType,
    /// When the log was taken.
    pub time: NaiveDateTime,
    /// Reported latitude.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Reported longitude.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Device the log came from.
    #[serde(default)]
    pub device_id: Option<String>,
    /// Excludes the log from automatic attendance marking.
    #[serde(default)]
    pub skip_auto_attendance: bool,
    /// Reference to the stored check-in photo.
    #[serde(default)]
    pub checkin_image: Option<String>,
}

impl Document for EmployeeCheckin {
    const KIND: DocKind = DocKind::EmployeeCheckin;

    fn name(&self) -> &str {
        &self.name
    }
}
