//! Overtime ledger with FIFO compensatory-leave matching.
//!
//! Overtime earns compensatory-leave hours; approved compensatory leave
//! consumes them, earliest-earned first. Whatever is left at month end is
//! paid out in cash, again walking the same chronological order. Both
//! passes fold into fresh row lists instead of mutating shared records,
//! so the ledger handed to the display layer is exactly the one that was
//! priced.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    AuditStep, AuditWarning, HOURS_PER_DAY, LeaveRequest, LeaveType, OvertimeRecord,
    OvertimeSummary, TimeEntry, work_type,
};

use super::round_cents;

/// The result of building the overtime ledger for a month.
#[derive(Debug, Clone)]
pub struct OvertimeLedgerResult {
    /// The ledger rows and totals.
    pub summary: OvertimeSummary,
    /// Warnings for entries that were skipped (unknown work-type codes).
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Interim row before FIFO consumption is applied.
struct GeneratedRecord {
    date: NaiveDate,
    work_type_code: u8,
    hours: Decimal,
    multiplier: Decimal,
    fixed_eight_hour: bool,
    comp_hours_generated: Decimal,
}

/// Builds the day-ordered overtime ledger and prices unused hours.
///
/// The ledger is assembled in three passes:
///
/// 1. Every overtime-coded entry becomes a record carrying the
///    compensatory hours it generates: `hours × 1` normally, or
///    `8 × share of the day's same-code hours` under the
///    fixed-eight-hour rule. Records are sorted by date ascending with
///    ties broken by input order — that ordering is the FIFO contract.
/// 2. Approved compensatory leave for the month (day units × 8) is
///    consumed against the records in order, earliest first.
/// 3. Hours still unconsumed are converted to cash in the same order, at
///    `hourly_rate × multiplier` per hour, until the unused balance is
///    exhausted.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::build_overtime_ledger;
/// use payroll_engine::models::TimeEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let entries = vec![TimeEntry {
///     date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
///     work_type_code: 2,
///     hours: Decimal::from_str("2").unwrap(),
/// }];
/// // no comp leave taken: both hours expire into cash at 200.00 x 1.34
/// let ledger = build_overtime_ledger(&entries, &[], 20_000, 1);
/// assert_eq!(ledger.summary.unused_comp_hours, Decimal::from_str("2").unwrap());
/// assert_eq!(ledger.summary.expired_comp_pay_cents, 53_600);
/// ```
pub fn build_overtime_ledger(
    entries: &[TimeEntry],
    leave_requests: &[LeaveRequest],
    hourly_rate_cents: i64,
    step_number: u32,
) -> OvertimeLedgerResult {
    let mut warnings = Vec::new();

    // Pass 0: per-(date, code) raw-hour totals for fixed-8h apportioning.
    let mut group_totals: HashMap<(NaiveDate, u8), Decimal> = HashMap::new();
    for entry in entries {
        if let Some(definition) = work_type(entry.work_type_code)
            && definition.is_overtime
            && definition.fixed_eight_hour
        {
            *group_totals.entry((entry.date, entry.work_type_code)).or_insert(Decimal::ZERO) +=
                entry.hours;
        }
    }

    let mut generated: Vec<GeneratedRecord> = Vec::new();
    for entry in entries {
        let Some(definition) = work_type(entry.work_type_code) else {
            warnings.push(AuditWarning {
                code: "unknown_work_type".to_string(),
                message: format!(
                    "overtime entry on {} has unknown work-type code {}",
                    entry.date, entry.work_type_code
                ),
            });
            continue;
        };
        if !definition.is_overtime {
            continue;
        }

        let comp_hours_generated = if definition.fixed_eight_hour {
            let group_total = group_totals
                .get(&(entry.date, entry.work_type_code))
                .copied()
                .unwrap_or(Decimal::ZERO);
            if group_total.is_zero() {
                Decimal::ZERO
            } else {
                HOURS_PER_DAY * (entry.hours / group_total)
            }
        } else {
            entry.hours
        };

        generated.push(GeneratedRecord {
            date: entry.date,
            work_type_code: entry.work_type_code,
            hours: entry.hours,
            multiplier: definition.multiplier,
            fixed_eight_hour: definition.fixed_eight_hour,
            comp_hours_generated,
        });
    }

    // FIFO contract: date ascending, ties in input order (sort is stable).
    generated.sort_by_key(|record| record.date);

    let total_comp_hours_generated: Decimal =
        generated.iter().map(|record| record.comp_hours_generated).sum();

    let total_comp_hours_used: Decimal = leave_requests
        .iter()
        .filter(|request| request.is_approved() && request.leave_type == LeaveType::Compensatory)
        .map(LeaveRequest::hours)
        .sum();

    // Pass 1: consume used hours, earliest-earned first.
    let mut remaining_use = total_comp_hours_used;
    let records: Vec<OvertimeRecord> = generated
        .into_iter()
        .map(|record| {
            let deducted = remaining_use.min(record.comp_hours_generated);
            remaining_use -= deducted;
            OvertimeRecord {
                date: record.date,
                work_type_code: record.work_type_code,
                hours: record.hours,
                multiplier: record.multiplier,
                fixed_eight_hour: record.fixed_eight_hour,
                comp_hours_generated: record.comp_hours_generated,
                comp_hours_deducted: deducted,
                comp_hours_remaining: record.comp_hours_generated - deducted,
            }
        })
        .collect();

    let unused_comp_hours =
        (total_comp_hours_generated - total_comp_hours_used).max(Decimal::ZERO);

    // Pass 2: convert the unused balance to cash in the same order.
    let mut remaining_to_convert = unused_comp_hours;
    let mut expired_comp_pay_cents = 0i64;
    for record in &records {
        if remaining_to_convert.is_zero() {
            break;
        }
        let converted = record.hours.min(remaining_to_convert);
        expired_comp_pay_cents += round_cents(
            converted * Decimal::from(hourly_rate_cents) * record.multiplier,
        );
        remaining_to_convert -= converted;
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_ledger".to_string(),
        rule_name: "Overtime Ledger".to_string(),
        input: serde_json::json!({
            "overtime_records": records.len(),
            "hourly_rate_cents": hourly_rate_cents,
            "total_comp_hours_used": total_comp_hours_used.normalize().to_string(),
        }),
        output: serde_json::json!({
            "total_comp_hours_generated": total_comp_hours_generated.normalize().to_string(),
            "unused_comp_hours": unused_comp_hours.normalize().to_string(),
            "expired_comp_pay_cents": expired_comp_pay_cents,
        }),
        reasoning: format!(
            "{} comp hours generated, {} consumed as leave, {} expired into cash",
            total_comp_hours_generated.normalize(),
            total_comp_hours_used.normalize(),
            unused_comp_hours.normalize()
        ),
    };

    OvertimeLedgerResult {
        summary: OvertimeSummary {
            records,
            total_comp_hours_generated,
            total_comp_hours_used,
            unused_comp_hours,
            expired_comp_pay_cents,
        },
        warnings,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApprovalStatus, LeaveUnit};
    use chrono::Datelike;
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

    fn comp_leave(unit: LeaveUnit, amount: &str) -> LeaveRequest {
        LeaveRequest {
            leave_type: LeaveType::Compensatory,
            unit,
            amount: dec(amount),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
            status: ApprovalStatus::Approved,
        }
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = build_overtime_ledger(&[], &[], 20_000, 1);
        assert!(ledger.summary.records.is_empty());
        assert_eq!(ledger.summary.total_comp_hours_generated, Decimal::ZERO);
        assert_eq!(ledger.summary.expired_comp_pay_cents, 0);
    }

    #[test]
    fn test_regular_work_generates_nothing() {
        let ledger = build_overtime_ledger(&[entry(3, 1, "8")], &[], 20_000, 1);
        assert!(ledger.summary.records.is_empty());
    }

    #[test]
    fn test_records_sorted_by_date_ties_in_input_order() {
        let ledger = build_overtime_ledger(
            &[entry(10, 3, "1"), entry(4, 2, "2"), entry(10, 2, "2")],
            &[],
            20_000,
            1,
        );
        let dates: Vec<u32> = ledger
            .summary
            .records
            .iter()
            .map(|r| r.date.day())
            .collect();
        assert_eq!(dates, vec![4, 10, 10]);
        // same-day ties keep input order: code 3 was recorded before code 2
        assert_eq!(ledger.summary.records[1].work_type_code, 3);
        assert_eq!(ledger.summary.records[2].work_type_code, 2);
    }

    #[test]
    fn test_fixed_eight_hour_group_apportioned_pro_rata() {
        // 6h + 4h logged under code 7 on the same day: the day credits
        // exactly 8 comp hours, split 4.8 / 3.2
        let ledger = build_overtime_ledger(&[entry(7, 7, "6"), entry(7, 7, "4")], &[], 20_000, 1);
        assert_eq!(ledger.summary.records[0].comp_hours_generated, dec("4.8"));
        assert_eq!(ledger.summary.records[1].comp_hours_generated, dec("3.2"));
        assert_eq!(ledger.summary.total_comp_hours_generated, dec("8"));
    }

    #[test]
    fn test_fifo_deduction_earliest_first() {
        let ledger = build_overtime_ledger(
            &[entry(4, 2, "2"), entry(11, 3, "3"), entry(18, 2, "1")],
            &[comp_leave(LeaveUnit::Hour, "4")],
            20_000,
            1,
        );
        let deducted: Vec<Decimal> = ledger
            .summary
            .records
            .iter()
            .map(|r| r.comp_hours_deducted)
            .collect();
        assert_eq!(deducted, vec![dec("2"), dec("2"), dec("0")]);
        assert_eq!(ledger.summary.records[1].comp_hours_remaining, dec("1"));
        assert_eq!(ledger.summary.unused_comp_hours, dec("2"));
    }

    #[test]
    fn test_day_unit_comp_leave_converts_to_hours() {
        let ledger = build_overtime_ledger(
            &[entry(7, 7, "10")],
            &[comp_leave(LeaveUnit::Day, "1")],
            20_000,
            1,
        );
        assert_eq!(ledger.summary.total_comp_hours_used, dec("8"));
        assert_eq!(ledger.summary.unused_comp_hours, dec("0"));
        assert_eq!(ledger.summary.expired_comp_pay_cents, 0);
    }

    #[test]
    fn test_unapproved_comp_leave_ignored() {
        let mut pending = comp_leave(LeaveUnit::Hour, "2");
        pending.status = ApprovalStatus::Pending;
        let ledger = build_overtime_ledger(&[entry(4, 2, "2")], &[pending], 20_000, 1);
        assert_eq!(ledger.summary.total_comp_hours_used, Decimal::ZERO);
    }

    #[test]
    fn test_conservation_generated_equals_deducted_plus_unused() {
        let ledger = build_overtime_ledger(
            &[entry(4, 2, "2"), entry(7, 7, "9"), entry(20, 3, "1.5")],
            &[comp_leave(LeaveUnit::Hour, "5")],
            20_000,
            1,
        );
        let deducted: Decimal = ledger
            .summary
            .records
            .iter()
            .map(|r| r.comp_hours_deducted)
            .sum();
        assert_eq!(deducted, dec("5"));
        assert_eq!(
            ledger.summary.total_comp_hours_generated,
            deducted + ledger.summary.unused_comp_hours
        );
    }

    #[test]
    fn test_overuse_deducts_everything_and_pays_nothing() {
        let ledger = build_overtime_ledger(
            &[entry(4, 2, "2")],
            &[comp_leave(LeaveUnit::Hour, "10")],
            20_000,
            1,
        );
        assert_eq!(ledger.summary.records[0].comp_hours_deducted, dec("2"));
        assert_eq!(ledger.summary.unused_comp_hours, Decimal::ZERO);
        assert_eq!(ledger.summary.expired_comp_pay_cents, 0);
    }

    #[test]
    fn test_expired_pay_uses_per_record_multiplier() {
        // 2h at 1.34 then 1h at 1.67, nothing consumed:
        // 2*20000*1.34 + 1*20000*1.67 = 53600 + 33400
        let ledger = build_overtime_ledger(
            &[entry(4, 2, "2"), entry(5, 3, "1")],
            &[],
            20_000,
            1,
        );
        assert_eq!(ledger.summary.expired_comp_pay_cents, 87_000);
    }

    #[test]
    fn test_expired_pay_stops_at_unused_balance() {
        // 3h generated, 2h consumed: only 1h converts, at the earliest
        // record's multiplier (pure date FIFO, not highest-value-first)
        let ledger = build_overtime_ledger(
            &[entry(4, 2, "2"), entry(5, 3, "1")],
            &[comp_leave(LeaveUnit::Hour, "2")],
            20_000,
            1,
        );
        assert_eq!(ledger.summary.unused_comp_hours, dec("1"));
        assert_eq!(ledger.summary.expired_comp_pay_cents, 26_800);
    }

    #[test]
    fn test_unknown_code_warns_and_skips() {
        let ledger = build_overtime_ledger(&[entry(4, 42, "2")], &[], 20_000, 1);
        assert!(ledger.summary.records.is_empty());
        assert_eq!(ledger.warnings.len(), 1);
    }

    #[test]
    fn test_audit_step_totals() {
        let ledger = build_overtime_ledger(&[entry(4, 2, "2")], &[], 20_000, 4);
        assert_eq!(ledger.audit_step.step_number, 4);
        assert_eq!(ledger.audit_step.rule_id, "overtime_ledger");
        assert_eq!(
            ledger.audit_step.output["expired_comp_pay_cents"].as_i64().unwrap(),
            53_600
        );
    }
}
