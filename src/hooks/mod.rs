//! Document lifecycle hooks.
//!
//! Each hook runs at a fixed point in a document's life (autoname,
//! before_save, validate, before_submit, on_submit) and either fills in
//! derived fields or propagates the change to related documents.
//!
//! # Modules
//!
//! - [`attendance_request`]: Custom day count for attendance requests
//! - [`work_from_home`]: Naming, day count and cutoff validation
//! - [`leave_application`]: Leave day count and attendance on submit
//! - [`weekend_tracker`]: Extra earned leave allocation sync
//! - [`off_day`]: Off day work entry naming and redemption
//! - [`hr_config`]: Permission rows mirrored into HR Config
//! - [`geofence`]: Check-in distance validation

pub mod attendance_request;
pub mod geofence;
pub mod hr_config;
pub mod leave_application;
pub mod off_day;
pub mod weekend_tracker;
pub mod work_from_home;
