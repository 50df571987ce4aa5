//! Monthly Payroll Calculation Engine
//!
//! This crate turns one employee's raw timesheet entries, leave requests,
//! business trips, and configured salary items for a calendar month into a
//! fully itemized gross/net payroll result, and freezes whole-month runs
//! into immutable, versioned snapshots with structured diffs.

#![warn(missing_docs)]

pub mod calculation;
pub mod error;
pub mod models;
pub mod records;
pub mod settings;
pub mod snapshot;
