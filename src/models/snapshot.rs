//! Versioned payroll snapshot and diff models.
//!
//! A snapshot freezes one full month run of payroll results. Snapshots are
//! append-only: a new finalize for the same month always creates
//! `version = previous + 1` and never mutates an existing version.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayrollResult;

/// The kind of change a diff entry reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Present in the new version only.
    Added,
    /// Present in both versions with a net change or attendance flip.
    Modified,
    /// Present in the previous version only (e.g. terminated employees).
    Removed,
}

/// One employee's change between two snapshot versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    /// The employee the entry refers to.
    pub employee_id: String,
    /// Employee display name at the newer of the two versions.
    pub employee_name: String,
    /// The kind of change.
    pub kind: DiffKind,
    /// Net pay delta in cents: full net for `Added`, negated previous net
    /// for `Removed`.
    pub net_salary_diff_cents: i64,
    /// Human-readable per-field change descriptions.
    pub changes: Vec<String>,
}

/// Structured diff between a snapshot and its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    /// Per-employee change entries.
    pub entries: Vec<DiffEntry>,
    /// Sum of all net deltas, in cents.
    pub total_delta_cents: i64,
}

/// An immutable, versioned record of one month's full payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSnapshot {
    /// Unique identifier for this snapshot row.
    pub snapshot_id: Uuid,
    /// The month the run covers, `YYYY-MM`.
    pub month: String,
    /// Monotonic version per month, starting at 1.
    pub version: u32,
    /// When the snapshot was finalized.
    pub created_at: DateTime<Utc>,
    /// Who finalized the run.
    pub created_by: String,
    /// Optional free-text note recorded at finalize time.
    #[serde(default)]
    pub notes: Option<String>,
    /// The full per-employee results of the run.
    pub employee_results: Vec<PayrollResult>,
    /// Diff against the previous version; absent for version 1.
    #[serde(default)]
    pub changes_summary: Option<SnapshotDiff>,
}
