//! Employee master record.
//!
//! The employee subsystem (HR) owns this data; the engine only reads the
//! fields the calculation needs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An employee as seen by the payroll engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, carried through to results and diffs.
    pub name: String,
    /// Monthly base salary in cents.
    pub base_salary_cents: i64,
    /// The date the employee started employment.
    pub hire_date: NaiveDate,
    /// Soft-delete marker; deleted employees are excluded from snapshot runs.
    #[serde(default)]
    pub is_deleted: bool,
}
