//! HR engine: leave, attendance and work-from-home reconciliation.
//!
//! The core is the day-range reconciler in [`reconcile`]: it counts the
//! chargeable days of a date range against an employee's holiday calendar
//! and writes one attendance record per covered day. Around it sit the
//! document lifecycle [`hooks`], the request [`services`] and an axum
//! [`api`], all working over the [`store::DocumentStore`] seam.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod reconcile;
pub mod services;
pub mod store;
