//! Day-range reconciliation.
//!
//! Turns a date range, an optional half-day marker and a holiday calendar
//! into a day count, and materializes per-day attendance for leave.
//!
//! # Modules
//!
//! - [`day_range`]: Validated ranges and per-day effects
//! - [`holiday_calendar`]: Holiday list resolution for an employee
//! - [`day_count`]: Working-day counting
//! - [`materialize`]: Attendance upserts for approved leave

pub mod day_count;
pub mod day_range;
pub mod holiday_calendar;
pub mod materialize;

pub use day_count::{DayBreakdown, DayCountResult, count_days};
pub use day_range::{DateRange, DayEffect};
pub use holiday_calendar::{HolidayCalendar, resolve_holiday_calendar, resolve_holiday_list_name};
pub use materialize::materialize_attendance;
