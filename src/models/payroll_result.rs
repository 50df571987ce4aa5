//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and its associated
//! structures that capture every intermediate of a monthly calculation,
//! including the day-by-day overtime ledger, leave breakdowns, allowance
//! details, classified salary items, totals, and the audit trace. The
//! result shape is the stable contract presentation layers depend on.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one calculator
/// run, replacing interleaved console tracing with data the caller can
/// store or render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate data issues that don't prevent calculation but may
/// require attention, such as a time entry with an unknown work-type code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// Hour totals produced by the timesheet aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetSummary {
    /// All hours worked, rounded to one decimal place.
    pub total_hours: Decimal,
    /// Hours under overtime work types, rounded to one decimal place.
    pub overtime_hours: Decimal,
    /// Multiplier-adjusted hours, rounded to two decimal places.
    pub weighted_hours: Decimal,
}

/// One row of the day-ordered overtime ledger.
///
/// Rows are produced by an immutable fold; `comp_hours_deducted` and
/// `comp_hours_remaining` record the FIFO consumption outcome without
/// mutating the source entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRecord {
    /// The date the overtime was worked.
    pub date: NaiveDate,
    /// The work-type code of the underlying entry.
    pub work_type_code: u8,
    /// Original hours of the underlying entry.
    pub hours: Decimal,
    /// Pay multiplier of the work type.
    pub multiplier: Decimal,
    /// Whether the fixed-eight-hour rule applied.
    pub fixed_eight_hour: bool,
    /// Compensatory-leave hours this row generated.
    pub comp_hours_generated: Decimal,
    /// Compensatory hours consumed from this row by approved leave.
    pub comp_hours_deducted: Decimal,
    /// Compensatory hours left on this row after consumption.
    pub comp_hours_remaining: Decimal,
}

/// The overtime ledger outcome for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSummary {
    /// Day-ordered ledger rows with FIFO consumption applied.
    pub records: Vec<OvertimeRecord>,
    /// Total compensatory hours generated by overtime.
    pub total_comp_hours_generated: Decimal,
    /// Total compensatory hours consumed by approved leave.
    pub total_comp_hours_used: Decimal,
    /// Generated hours left unconsumed at month end.
    pub unused_comp_hours: Decimal,
    /// Cash value of the unused hours, in cents.
    pub expired_comp_pay_cents: i64,
}

/// Leave totals, deductions, and the menstrual carry split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSummary {
    /// Approved sick-leave hours in the month.
    pub sick_hours: Decimal,
    /// Approved sick-leave days in the month.
    pub sick_days: Decimal,
    /// Approved personal-leave hours in the month.
    pub personal_hours: Decimal,
    /// Approved personal-leave days in the month.
    pub personal_days: Decimal,
    /// Approved menstrual-leave hours in the month.
    pub menstrual_hours: Decimal,
    /// Approved menstrual-leave days in the month.
    pub menstrual_days: Decimal,
    /// Menstrual days inside the yearly three-day quota, kept out of
    /// sick-leave accounting.
    pub menstrual_free_days: Decimal,
    /// Menstrual days beyond the quota, merged into sick-leave accounting.
    pub menstrual_merged_days: Decimal,
    /// Hourly rate used for leave deductions: (base + regular allowance)
    /// over the configured divisor, in cents.
    pub leave_hourly_rate_cents: i64,
    /// Display-only daily salary, in cents.
    pub daily_salary_cents: i64,
    /// Sick-leave deduction in cents.
    pub sick_deduction_cents: i64,
    /// Personal-leave deduction in cents.
    pub personal_deduction_cents: i64,
    /// Menstrual-leave deduction in cents (fixed 50% rate).
    pub menstrual_deduction_cents: i64,
    /// Sum of the three deductions, in cents.
    pub leave_deduction_cents: i64,
}

impl LeaveSummary {
    /// Sick days as accounted for reporting, including merged menstrual days.
    pub fn accounted_sick_days(&self) -> Decimal {
        self.sick_days + self.menstrual_merged_days
    }
}

/// Meal allowance outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealAllowance {
    /// Number of days whose qualifying-code hours met the threshold.
    pub qualifying_days: u32,
    /// Configured per-day amount, in cents.
    pub per_time_cents: i64,
    /// Total allowance, in cents.
    pub amount_cents: i64,
}

/// Transport allowance for a single approved trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripAllowance {
    /// The trip date.
    pub date: NaiveDate,
    /// The trip distance in kilometres.
    pub distance_km: Decimal,
    /// Number of billing intervals, `ceil(distance / km_per_interval)`.
    pub intervals: u32,
    /// Allowance for this trip, in cents.
    pub amount_cents: i64,
}

/// Transport allowance outcome across all approved trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportAllowance {
    /// Per-trip detail rows.
    pub trips: Vec<TripAllowance>,
    /// Total allowance, in cents.
    pub amount_cents: i64,
}

/// One paying salary item line after classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryItemLine {
    /// Identifier of the underlying item type.
    pub item_type_id: String,
    /// Machine-readable item code.
    pub item_code: String,
    /// Display name.
    pub name: String,
    /// Line amount in cents.
    pub amount_cents: i64,
    /// Whether payout is conditional on full attendance.
    pub is_full_attendance_bonus: bool,
    /// Whether the line actually pays this month.
    pub should_pay: bool,
}

/// Salary items bucketed by category for the target month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedItems {
    /// Fixed monthly allowances.
    pub regular_allowances: Vec<SalaryItemLine>,
    /// Conditional allowances paying this month.
    pub irregular_allowances: Vec<SalaryItemLine>,
    /// Monthly bonuses, excluding year-end and performance items.
    pub monthly_bonuses: Vec<SalaryItemLine>,
    /// Year-end bonuses paying this month.
    pub year_end_bonuses: Vec<SalaryItemLine>,
    /// Fixed deductions.
    pub deductions: Vec<SalaryItemLine>,
    /// Performance items, extracted by the reserved item code.
    pub performance_items: Vec<SalaryItemLine>,
}

fn sum_cents(lines: &[SalaryItemLine]) -> i64 {
    lines.iter().map(|line| line.amount_cents).sum()
}

fn sum_payable_cents(lines: &[SalaryItemLine]) -> i64 {
    lines
        .iter()
        .filter(|line| line.should_pay)
        .map(|line| line.amount_cents)
        .sum()
}

impl ClassifiedItems {
    /// Total of fixed monthly allowances, in cents.
    pub fn regular_allowance_cents(&self) -> i64 {
        sum_cents(&self.regular_allowances)
    }

    /// Total of conditional allowances paying this month, in cents.
    pub fn irregular_allowance_cents(&self) -> i64 {
        sum_cents(&self.irregular_allowances)
    }

    /// Total of monthly bonuses whose `should_pay` flag is set, in cents.
    pub fn payable_bonus_cents(&self) -> i64 {
        sum_payable_cents(&self.monthly_bonuses)
    }

    /// Total of year-end bonuses whose `should_pay` flag is set, in cents.
    pub fn payable_year_end_bonus_cents(&self) -> i64 {
        sum_payable_cents(&self.year_end_bonuses)
    }

    /// Total of fixed deductions, in cents.
    pub fn deduction_cents(&self) -> i64 {
        sum_cents(&self.deductions)
    }

    /// Classifier-derived performance bonus default, in cents.
    pub fn performance_default_cents(&self) -> i64 {
        sum_cents(&self.performance_items)
    }

    /// Marks full-attendance-conditional bonus lines as paying or not.
    ///
    /// All other lines keep their default `should_pay = true`.
    pub fn apply_full_attendance(&mut self, is_full_attendance: bool) {
        for line in self
            .monthly_bonuses
            .iter_mut()
            .chain(self.year_end_bonuses.iter_mut())
        {
            if line.is_full_attendance_bonus {
                line.should_pay = is_full_attendance;
            }
        }
    }
}

/// The complete, itemized payroll result for one employee and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// The employee the calculation is for.
    pub employee_id: String,
    /// Employee display name.
    pub employee_name: String,
    /// The target month, `YYYY-MM`.
    pub month: String,
    /// Monthly base salary in cents.
    pub base_salary_cents: i64,
    /// Hourly rate from base salary only, in cents.
    pub hourly_rate_cents: i64,
    /// Hour totals from the timesheet aggregator.
    pub timesheet: TimesheetSummary,
    /// Overtime ledger with FIFO consumption and expired-comp pay.
    pub overtime: OvertimeSummary,
    /// Leave totals, deductions, and menstrual carry split.
    pub leave: LeaveSummary,
    /// Meal allowance detail.
    pub meal_allowance: MealAllowance,
    /// Transport allowance detail with per-trip rows.
    pub transport_allowance: TransportAllowance,
    /// Salary items bucketed by category.
    pub items: ClassifiedItems,
    /// Resolved performance bonus, in cents.
    pub performance_bonus_cents: i64,
    /// Whether a monthly adjustment overrode the assignment-derived default.
    pub performance_overridden: bool,
    /// Whether the employee kept full attendance this month.
    pub is_full_attendance: bool,
    /// Gross pay in cents.
    pub gross_cents: i64,
    /// Total deductions in cents.
    pub total_deduction_cents: i64,
    /// Net pay in cents.
    pub net_cents: i64,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
