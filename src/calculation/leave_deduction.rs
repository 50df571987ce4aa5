//! Leave deduction calculation.
//!
//! Computes pay deductions for sick, personal, and menstrual leave,
//! including the year-to-date menstrual carry rule and the
//! full-attendance eligibility check.
//!
//! Menstrual leave is special on three axes: up to three days per
//! calendar year stay out of sick-leave accounting, every menstrual hour
//! is deducted at a fixed 50% regardless of that split, and menstrual
//! leave never breaks full attendance.

use rust_decimal::Decimal;

use crate::models::{AuditStep, HOURS_PER_DAY, LeaveRequest, LeaveSummary, LeaveType};
use crate::settings::Settings;

use super::{div_round, floor_cents};

/// Menstrual-leave days per calendar year exempt from sick-leave merging.
pub const MENSTRUAL_FREE_DAYS_PER_YEAR: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Fixed deduction rate for menstrual leave.
const MENSTRUAL_DEDUCTION_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// The result of calculating leave deductions, including the audit step.
#[derive(Debug, Clone)]
pub struct LeaveDeductionResult {
    /// Leave totals, the menstrual split, and deduction amounts.
    pub summary: LeaveSummary,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn approved_hours(requests: &[LeaveRequest], leave_type: LeaveType) -> Decimal {
    requests
        .iter()
        .filter(|request| request.is_approved() && request.leave_type == leave_type)
        .map(LeaveRequest::hours)
        .sum()
}

/// Whether the employee kept full attendance for the month.
///
/// Any approved sick or personal leave overlapping the month breaks full
/// attendance; menstrual leave never does.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::is_full_attendance;
///
/// assert!(is_full_attendance(&[]));
/// ```
pub fn is_full_attendance(month_requests: &[LeaveRequest]) -> bool {
    !month_requests.iter().any(|request| {
        request.is_approved()
            && matches!(request.leave_type, LeaveType::Sick | LeaveType::Personal)
    })
}

/// Calculates leave deductions for a month.
///
/// # Arguments
///
/// * `month_requests` - Leave requests overlapping the target month
/// * `year_to_date_menstrual_hours` - Approved menstrual hours for the
///   calendar year up to and including the month
/// * `base_salary_cents` - Monthly base salary
/// * `regular_allowance_cents` - Sum of fixed monthly allowances
/// * `settings` - Resolved calculation parameters
/// * `step_number` - The step number for audit trail sequencing
///
/// The deduction rate is `(base + regular allowance) / divisor` rounded
/// to a cent; per-type deductions floor `hours × rate × type rate`. The
/// menstrual carry works on days: with fewer than three prior-year days
/// used, up to the remainder of this month's menstrual days stay out of
/// sick-leave accounting, the rest merge; the 50% menstrual deduction
/// applies to all of them either way.
pub fn calculate_leave_deduction(
    month_requests: &[LeaveRequest],
    year_to_date_menstrual_hours: Decimal,
    base_salary_cents: i64,
    regular_allowance_cents: i64,
    settings: &Settings,
    step_number: u32,
) -> LeaveDeductionResult {
    let sick_hours = approved_hours(month_requests, LeaveType::Sick);
    let personal_hours = approved_hours(month_requests, LeaveType::Personal);
    let menstrual_hours = approved_hours(month_requests, LeaveType::Menstrual);

    let menstrual_days = menstrual_hours / HOURS_PER_DAY;
    let year_to_date_days = year_to_date_menstrual_hours / HOURS_PER_DAY;
    let previous_year_days = (year_to_date_days - menstrual_days).max(Decimal::ZERO);

    let menstrual_free_days = if previous_year_days < MENSTRUAL_FREE_DAYS_PER_YEAR {
        (MENSTRUAL_FREE_DAYS_PER_YEAR - previous_year_days).min(menstrual_days)
    } else {
        Decimal::ZERO
    };
    let menstrual_merged_days = menstrual_days - menstrual_free_days;

    let numerator = base_salary_cents + regular_allowance_cents;
    let leave_hourly_rate_cents = div_round(numerator, settings.hourly_rate_divisor);
    let daily_salary_cents = div_round(numerator, settings.leave_daily_salary_divisor);

    let rate = Decimal::from(leave_hourly_rate_cents);
    let sick_deduction_cents =
        floor_cents(sick_hours * rate * settings.sick_leave_deduction_rate);
    let personal_deduction_cents =
        floor_cents(personal_hours * rate * settings.personal_leave_deduction_rate);
    let menstrual_deduction_cents =
        floor_cents(menstrual_hours * rate * MENSTRUAL_DEDUCTION_RATE);
    let leave_deduction_cents =
        sick_deduction_cents + personal_deduction_cents + menstrual_deduction_cents;

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_deduction".to_string(),
        rule_name: "Leave Deduction".to_string(),
        input: serde_json::json!({
            "sick_hours": sick_hours.normalize().to_string(),
            "personal_hours": personal_hours.normalize().to_string(),
            "menstrual_hours": menstrual_hours.normalize().to_string(),
            "previous_year_menstrual_days": previous_year_days.normalize().to_string(),
            "leave_hourly_rate_cents": leave_hourly_rate_cents,
        }),
        output: serde_json::json!({
            "menstrual_free_days": menstrual_free_days.normalize().to_string(),
            "menstrual_merged_days": menstrual_merged_days.normalize().to_string(),
            "leave_deduction_cents": leave_deduction_cents,
        }),
        reasoning: format!(
            "deductions: sick {sick_deduction_cents}, personal {personal_deduction_cents}, \
             menstrual {menstrual_deduction_cents} (all cents)"
        ),
    };

    LeaveDeductionResult {
        summary: LeaveSummary {
            sick_hours,
            sick_days: sick_hours / HOURS_PER_DAY,
            personal_hours,
            personal_days: personal_hours / HOURS_PER_DAY,
            menstrual_hours,
            menstrual_days,
            menstrual_free_days,
            menstrual_merged_days,
            leave_hourly_rate_cents,
            daily_salary_cents,
            sick_deduction_cents,
            personal_deduction_cents,
            menstrual_deduction_cents,
            leave_deduction_cents,
        },
        audit_step,
    }
}
