//! Meal allowance calculation.
//!
//! A per-day bonus for days with enough hours logged under the designated
//! "first block of weekday overtime" code.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AuditStep, MealAllowance, TimeEntry, WEEKDAY_OVERTIME_FIRST_CODE};
use crate::settings::Settings;

/// The result of calculating the meal allowance, including the audit step.
#[derive(Debug, Clone)]
pub struct MealAllowanceResult {
    /// The computed allowance.
    pub allowance: MealAllowance,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the meal allowance for a month of time entries.
///
/// Entries under the qualifying code are grouped by date and their hours
/// summed; a date qualifies when its sum reaches the configured minimum
/// (`>=`, so hitting the threshold exactly qualifies). The allowance is
/// `qualifying days × per-day amount`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_meal_allowance;
/// use payroll_engine::models::TimeEntry;
/// use payroll_engine::settings::Settings;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let entries = vec![TimeEntry {
///     date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
///     work_type_code: 2,
///     hours: Decimal::from_str("1.5").unwrap(),
/// }];
/// let result = calculate_meal_allowance(&entries, &Settings::default(), 1);
/// assert_eq!(result.allowance.qualifying_days, 1);
/// assert_eq!(result.allowance.amount_cents, 10_000);
/// ```
pub fn calculate_meal_allowance(
    entries: &[TimeEntry],
    settings: &Settings,
    step_number: u32,
) -> MealAllowanceResult {
    let mut hours_by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for entry in entries {
        if entry.work_type_code == WEEKDAY_OVERTIME_FIRST_CODE {
            *hours_by_date.entry(entry.date).or_insert(Decimal::ZERO) += entry.hours;
        }
    }

    let threshold = settings.meal_allowance_min_overtime_hours;
    let qualifying_days = hours_by_date.values().filter(|hours| **hours >= threshold).count() as u32;

    let per_time_cents = settings.meal_allowance_per_time * 100;
    let amount_cents = i64::from(qualifying_days) * per_time_cents;

    let audit_step = AuditStep {
        step_number,
        rule_id: "meal_allowance".to_string(),
        rule_name: "Meal Allowance".to_string(),
        input: serde_json::json!({
            "overtime_days": hours_by_date.len(),
            "min_hours": threshold.normalize().to_string(),
            "per_time_cents": per_time_cents,
        }),
        output: serde_json::json!({
            "qualifying_days": qualifying_days,
            "amount_cents": amount_cents,
        }),
        reasoning: format!(
            "{qualifying_days} of {} overtime days reached {} qualifying hours",
            hours_by_date.len(),
            threshold.normalize()
        ),
    };

    MealAllowanceResult {
        allowance: MealAllowance {
            qualifying_days,
            per_time_cents,
            amount_cents,
        },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(day: u32, code: u8, hours: &str) -> TimeEntry {
        TimeEntry {
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            work_type_code: code,
            hours: dec(hours),
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let result = calculate_meal_allowance(&[entry(4, 2, "1.5")], &Settings::default(), 1);
        assert_eq!(result.allowance.qualifying_days, 1);
    }

    #[test]
    fn test_just_under_threshold_does_not_qualify() {
        let result = calculate_meal_allowance(&[entry(4, 2, "1.49")], &Settings::default(), 1);
        assert_eq!(result.allowance.qualifying_days, 0);
        assert_eq!(result.allowance.amount_cents, 0);
    }

    #[test]
    fn test_same_day_entries_summed_before_threshold() {
        let result = calculate_meal_allowance(
            &[entry(4, 2, "1"), entry(4, 2, "0.5")],
            &Settings::default(),
            1,
        );
        assert_eq!(result.allowance.qualifying_days, 1);
    }

    #[test]
    fn test_other_codes_do_not_count() {
        let result = calculate_meal_allowance(
            &[entry(4, 3, "3"), entry(5, 7, "8")],
            &Settings::default(),
            1,
        );
        assert_eq!(result.allowance.qualifying_days, 0);
    }

    #[test]
    fn test_amount_is_days_times_configured_amount() {
        let settings = Settings {
            meal_allowance_per_time: 120,
            ..Settings::default()
        };
        let result = calculate_meal_allowance(
            &[entry(4, 2, "2"), entry(11, 2, "1.5"), entry(12, 2, "1")],
            &settings,
            1,
        );
        assert_eq!(result.allowance.qualifying_days, 2);
        assert_eq!(result.allowance.per_time_cents, 12_000);
        assert_eq!(result.allowance.amount_cents, 24_000);
    }

    #[test]
    fn test_audit_step_output() {
        let result = calculate_meal_allowance(&[entry(4, 2, "2")], &Settings::default(), 6);
        assert_eq!(result.audit_step.step_number, 6);
        assert_eq!(result.audit_step.output["qualifying_days"].as_u64().unwrap(), 1);
    }
}
