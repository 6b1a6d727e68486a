//! Configuration loading and management for the HR engine.
//!
//! The HR Config settings (geofence, work-from-home cutoff, permission rows)
//! and the leave policy are loaded once from YAML and passed explicitly into
//! the operations that need them.
//!
//! # Example
//!
//! ```no_run
//! use hr_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Extra leave type: {}", config.leave_policy().extra_earned_leave_type);
//! ```

mod loader;
mod seed;
mod types;

pub use loader::ConfigLoader;
pub use seed::SeedData;
pub use types::{
    CheckInOutPermissionRow, EngineConfig, GeofenceConfig, HrConfig, LeavePolicy,
    WorkFromHomeConfig,
};
