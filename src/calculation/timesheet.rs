//! Timesheet aggregation.
//!
//! Classifies a month of raw time entries by work-type code into hour
//! totals, overtime hours, and multiplier-weighted hours. The aggregate is
//! a pure function of its inputs; since entries are immutable once the
//! month has closed, callers may memoize the output per (employee, month).

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditWarning, TimeEntry, TimesheetSummary, work_type};

/// Eight hours, the credit a fixed-eight-hour (date, code) group adds to
/// the weighted total exactly once.
const FIXED_CREDIT_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The result of aggregating a month of time entries.
#[derive(Debug, Clone)]
pub struct TimesheetAggregation {
    /// Hour totals, rounded for display: one decimal place for hour sums,
    /// two for weighted hours.
    pub summary: TimesheetSummary,
    /// Warnings for entries that were skipped (unknown work-type codes).
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

/// Aggregates raw time entries into hour totals.
///
/// For each entry the work-type definition decides the buckets: all hours
/// count toward `total_hours`; overtime codes also count toward
/// `overtime_hours`; weighted hours are `hours × multiplier`, except that
/// a fixed-eight-hour (date, code) group contributes exactly 8.0 once,
/// however many entries or raw hours it holds.
///
/// Entries with unknown codes are skipped and surfaced as warnings rather
/// than failing the month.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::aggregate_timesheet;
/// use payroll_engine::models::TimeEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let entries = vec![TimeEntry {
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     work_type_code: 2,
///     hours: Decimal::from_str("2.0").unwrap(),
/// }];
/// let aggregation = aggregate_timesheet(&entries, 1);
/// assert_eq!(aggregation.summary.total_hours, Decimal::from_str("2.0").unwrap());
/// assert_eq!(aggregation.summary.weighted_hours, Decimal::from_str("2.68").unwrap());
/// ```
pub fn aggregate_timesheet(entries: &[TimeEntry], step_number: u32) -> TimesheetAggregation {
    let mut total_hours = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;
    let mut weighted_hours = Decimal::ZERO;
    let mut warnings = Vec::new();
    let mut credited_groups: BTreeSet<(NaiveDate, u8)> = BTreeSet::new();
    let mut skipped = 0usize;

    for entry in entries {
        let Some(definition) = work_type(entry.work_type_code) else {
            skipped += 1;
            warnings.push(AuditWarning {
                code: "unknown_work_type".to_string(),
                message: format!(
                    "time entry on {} has unknown work-type code {}",
                    entry.date, entry.work_type_code
                ),
            });
            continue;
        };

        total_hours += entry.hours;
        if definition.is_overtime {
            overtime_hours += entry.hours;
        }

        if definition.fixed_eight_hour {
            // one credit per (date, code) group, not per entry
            if credited_groups.insert((entry.date, entry.work_type_code)) {
                weighted_hours += FIXED_CREDIT_HOURS;
            }
        } else {
            weighted_hours += entry.hours * definition.multiplier;
        }
    }

    let summary = TimesheetSummary {
        total_hours: total_hours.round_dp(1),
        overtime_hours: overtime_hours.round_dp(1),
        weighted_hours: weighted_hours.round_dp(2),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "timesheet_aggregation".to_string(),
        rule_name: "Timesheet Aggregation".to_string(),
        input: serde_json::json!({
            "entry_count": entries.len(),
            "skipped_entries": skipped,
        }),
        output: serde_json::json!({
            "total_hours": summary.total_hours.to_string(),
            "overtime_hours": summary.overtime_hours.to_string(),
            "weighted_hours": summary.weighted_hours.to_string(),
        }),
        reasoning: format!(
            "{} entries aggregated into {} total hours ({} overtime)",
            entries.len() - skipped,
            summary.total_hours.normalize(),
            summary.overtime_hours.normalize()
        ),
    };

    TimesheetAggregation {
        summary,
        warnings,
        audit_step,
    }
}
