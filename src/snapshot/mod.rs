//! Snapshot service: whole-month runs, versioning, and diffs.
//!
//! [`SnapshotService`] runs the orchestrator over every employee for a
//! month. `preview` returns the results without persisting; `finalize`
//! freezes them into an immutable, monotonically versioned snapshot and
//! attaches a structured diff against the previous version.
//!
//! The dangerous region is the version counter: `finalize` reads the
//! current maximum and writes `max + 1`, so two concurrent runs for the
//! same month could collide. The store's `(month, version)` uniqueness
//! contract turns that race into a [`PayrollError::VersionConflict`],
//! which `finalize` absorbs by re-reading and retrying a bounded number
//! of times.

mod store;

pub use store::{MemorySnapshotStore, SnapshotStore};

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::PayrollOrchestrator;
use crate::error::{EngineResult, PayrollError};
use crate::models::{
    DiffEntry, DiffKind, PayrollMonth, PayrollResult, PayrollSnapshot, SnapshotDiff,
};
use crate::records::RecordStore;
use crate::settings::SettingsProvider;

/// How many times `finalize` re-reads the version counter after a
/// conflict before giving up.
const MAX_FINALIZE_RETRIES: u32 = 3;

/// Runs, versions, and diffs whole-month payroll calculations.
pub struct SnapshotService<R, P, S> {
    orchestrator: PayrollOrchestrator<R, P>,
    store: S,
}

impl<R, P, S> SnapshotService<R, P, S>
where
    R: RecordStore,
    P: SettingsProvider,
    S: SnapshotStore,
{
    /// Creates a service over an orchestrator and a snapshot store.
    pub fn new(orchestrator: PayrollOrchestrator<R, P>, store: S) -> Self {
        Self {
            orchestrator,
            store,
        }
    }

    /// The underlying snapshot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Calculates the month for every employee without persisting.
    ///
    /// Per-employee failures are logged and skipped; one employee's bad
    /// data never aborts the rest of the run.
    pub async fn preview(&self, month: &str) -> EngineResult<Vec<PayrollResult>> {
        let target: PayrollMonth = month.parse()?;
        self.run_all(&target.to_string()).await
    }

    /// Runs the month for every employee and persists a new snapshot
    /// version, diffed against the previous one.
    ///
    /// Persistence failure is fatal to the call and leaves no partial
    /// snapshot; a version conflict triggers a bounded retry of the
    /// read-max/insert cycle. Results are calculated once — only the
    /// version assignment repeats.
    pub async fn finalize(
        &self,
        month: &str,
        notes: Option<String>,
        actor: &str,
    ) -> EngineResult<PayrollSnapshot> {
        let target: PayrollMonth = month.parse()?;
        let month_key = target.to_string();
        let results = self.run_all(&month_key).await?;

        let mut attempt = 0u32;
        loop {
            let max_version = self.store.max_version(&month_key).await?;
            let version = max_version + 1;
            let previous = if max_version > 0 {
                self.store.get(&month_key, max_version).await?
            } else {
                None
            };
            let changes_summary = previous
                .as_ref()
                .map(|snapshot| diff_results(&snapshot.employee_results, &results));

            let snapshot = PayrollSnapshot {
                snapshot_id: Uuid::new_v4(),
                month: month_key.clone(),
                version,
                created_at: Utc::now(),
                created_by: actor.to_string(),
                notes: notes.clone(),
                employee_results: results.clone(),
                changes_summary,
            };

            match self.store.insert(snapshot.clone()).await {
                Ok(()) => {
                    info!(
                        month = %month_key,
                        version,
                        employees = snapshot.employee_results.len(),
                        "payroll snapshot finalized"
                    );
                    return Ok(snapshot);
                }
                Err(conflict @ PayrollError::VersionConflict { .. }) => {
                    attempt += 1;
                    if attempt >= MAX_FINALIZE_RETRIES {
                        return Err(conflict);
                    }
                    warn!(
                        month = %month_key,
                        version,
                        attempt,
                        "snapshot version conflict, re-reading version counter"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Calculates the month for every non-deleted employee, isolating
    /// per-employee failures.
    async fn run_all(&self, month: &str) -> EngineResult<Vec<PayrollResult>> {
        let employees = self.orchestrator.records().employees().await?;
        let mut results = Vec::with_capacity(employees.len());
        let mut failures = 0usize;

        for employee in &employees {
            match self
                .orchestrator
                .calculate_employee_payroll(&employee.id, month)
                .await
            {
                Ok(result) => results.push(result),
                Err(err) => {
                    failures += 1;
                    warn!(
                        employee_id = %employee.id,
                        month = %month,
                        error = %err,
                        "payroll calculation failed, skipping employee"
                    );
                }
            }
        }

        info!(
            month = %month,
            calculated = results.len(),
            failures,
            "payroll run completed"
        );
        Ok(results)
    }
}

/// Formats integer cents as a currency-unit string for change messages.
fn format_cents(cents: i64) -> String {
    if cents < 0 {
        format!("-{}", format_cents(-cents))
    } else {
        format!("{}.{:02}", cents / 100, cents % 100)
    }
}

/// Diffs two snapshot result sets, indexed by employee id.
///
/// Employees only in `current` are `added` (contributing their full net),
/// employees in both with a net change or a full-attendance flip are
/// `modified` with per-field change strings, and employees only in
/// `previous` — typically terminated — are `removed` (contributing their
/// negated previous net).
pub fn diff_results(previous: &[PayrollResult], current: &[PayrollResult]) -> SnapshotDiff {
    let previous_by_id: HashMap<&str, &PayrollResult> = previous
        .iter()
        .map(|result| (result.employee_id.as_str(), result))
        .collect();

    let mut entries = Vec::new();
    let mut total_delta_cents = 0i64;

    for result in current {
        match previous_by_id.get(result.employee_id.as_str()) {
            None => {
                total_delta_cents += result.net_cents;
                entries.push(DiffEntry {
                    employee_id: result.employee_id.clone(),
                    employee_name: result.employee_name.clone(),
                    kind: DiffKind::Added,
                    net_salary_diff_cents: result.net_cents,
                    changes: vec![format!("net salary: {}", format_cents(result.net_cents))],
                });
            }
            Some(prior) => {
                let delta = result.net_cents - prior.net_cents;
                let attendance_changed = result.is_full_attendance != prior.is_full_attendance;
                if delta == 0 && !attendance_changed {
                    continue;
                }

                let mut changes = Vec::new();
                if result.base_salary_cents != prior.base_salary_cents {
                    changes.push(format!(
                        "base salary: {} -> {}",
                        format_cents(prior.base_salary_cents),
                        format_cents(result.base_salary_cents)
                    ));
                }
                if result.overtime.expired_comp_pay_cents != prior.overtime.expired_comp_pay_cents
                {
                    changes.push(format!(
                        "overtime pay: {} -> {}",
                        format_cents(prior.overtime.expired_comp_pay_cents),
                        format_cents(result.overtime.expired_comp_pay_cents)
                    ));
                }
                if result.leave.leave_deduction_cents != prior.leave.leave_deduction_cents {
                    changes.push(format!(
                        "leave deduction: {} -> {}",
                        format_cents(prior.leave.leave_deduction_cents),
                        format_cents(result.leave.leave_deduction_cents)
                    ));
                }
                if attendance_changed {
                    changes.push(format!(
                        "full attendance: {} -> {}",
                        prior.is_full_attendance, result.is_full_attendance
                    ));
                }

                total_delta_cents += delta;
                entries.push(DiffEntry {
                    employee_id: result.employee_id.clone(),
                    employee_name: result.employee_name.clone(),
                    kind: DiffKind::Modified,
                    net_salary_diff_cents: delta,
                    changes,
                });
            }
        }
    }

    let current_ids: std::collections::HashSet<&str> = current
        .iter()
        .map(|result| result.employee_id.as_str())
        .collect();
    for prior in previous {
        if !current_ids.contains(prior.employee_id.as_str()) {
            total_delta_cents -= prior.net_cents;
            entries.push(DiffEntry {
                employee_id: prior.employee_id.clone(),
                employee_name: prior.employee_name.clone(),
                kind: DiffKind::Removed,
                net_salary_diff_cents: -prior.net_cents,
                changes: vec![format!(
                    "net salary: {} -> 0.00",
                    format_cents(prior.net_cents)
                )],
            });
        }
    }

    SnapshotDiff {
        entries,
        total_delta_cents,
    }
}
