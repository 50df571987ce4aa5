//! Property tests for the overtime ledger invariants.
//!
//! For any set of overtime records and any consumption not exceeding the
//! generated total:
//! - the deducted hours across records equal the consumed total,
//! - generated hours are conserved: generated = deducted + unused,
//! - consumption is strictly FIFO: once a record keeps remaining hours,
//!   no later record has been touched.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::build_overtime_ledger;
use payroll_engine::models::{
    ApprovalStatus, LeaveRequest, LeaveType, LeaveUnit, TimeEntry,
};

const HOURLY_RATE_CENTS: i64 = 20_000;

fn overtime_entry() -> impl Strategy<Value = TimeEntry> {
    // overtime codes only; tenths of hours between 0.1 and 12.0
    (1u32..=28, prop_oneof![Just(2u8), Just(3u8), Just(5u8), Just(7u8)], 1i64..=120).prop_map(
        |(day, code, tenths)| TimeEntry {
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            work_type_code: code,
            hours: Decimal::new(tenths, 1),
        },
    )
}

fn comp_leave_hours(hours: Decimal) -> LeaveRequest {
    LeaveRequest {
        leave_type: LeaveType::Compensatory,
        unit: LeaveUnit::Hour,
        amount: hours,
        start_date: NaiveDate::from_ymd_opt(2026, 3, 30).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 30).unwrap(),
        status: ApprovalStatus::Approved,
    }
}

proptest! {
    #[test]
    fn deducted_total_equals_consumption(
        entries in prop::collection::vec(overtime_entry(), 0..20),
        used_percent in 0i64..=100,
    ) {
        let generated = build_overtime_ledger(&entries, &[], HOURLY_RATE_CENTS, 1)
            .summary
            .total_comp_hours_generated;
        let used = generated * Decimal::new(used_percent, 2);

        let ledger = build_overtime_ledger(
            &entries,
            &[comp_leave_hours(used)],
            HOURLY_RATE_CENTS,
            1,
        );

        let deducted: Decimal = ledger
            .summary
            .records
            .iter()
            .map(|r| r.comp_hours_deducted)
            .sum();
        prop_assert_eq!(deducted, used);
    }

    #[test]
    fn generated_hours_are_conserved(
        entries in prop::collection::vec(overtime_entry(), 0..20),
        used_tenths in 0i64..=2000,
    ) {
        // consumption may exceed generation here; conservation must hold anyway
        let ledger = build_overtime_ledger(
            &entries,
            &[comp_leave_hours(Decimal::new(used_tenths, 1))],
            HOURLY_RATE_CENTS,
            1,
        );

        let deducted: Decimal = ledger
            .summary
            .records
            .iter()
            .map(|r| r.comp_hours_deducted)
            .sum();
        prop_assert_eq!(
            ledger.summary.total_comp_hours_generated,
            deducted + ledger.summary.unused_comp_hours
        );
    }

    #[test]
    fn consumption_is_chronological(
        entries in prop::collection::vec(overtime_entry(), 0..20),
        used_tenths in 0i64..=2000,
    ) {
        let ledger = build_overtime_ledger(
            &entries,
            &[comp_leave_hours(Decimal::new(used_tenths, 1))],
            HOURLY_RATE_CENTS,
            1,
        );

        // records are date-ordered
        let dates: Vec<_> = ledger.summary.records.iter().map(|r| r.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        prop_assert_eq!(&dates, &sorted);

        // once a record keeps remaining hours, every later record is untouched
        let mut seen_remaining = false;
        for record in &ledger.summary.records {
            if seen_remaining {
                prop_assert_eq!(record.comp_hours_deducted, Decimal::ZERO);
            }
            if !record.comp_hours_remaining.is_zero() {
                seen_remaining = true;
            }
        }
    }

    #[test]
    fn ledger_is_deterministic(
        entries in prop::collection::vec(overtime_entry(), 0..20),
        used_tenths in 0i64..=2000,
    ) {
        let requests = [comp_leave_hours(Decimal::new(used_tenths, 1))];
        let first = build_overtime_ledger(&entries, &requests, HOURLY_RATE_CENTS, 1);
        let second = build_overtime_ledger(&entries, &requests, HOURLY_RATE_CENTS, 1);
        prop_assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn expired_pay_is_zero_when_everything_is_consumed(
        entries in prop::collection::vec(overtime_entry(), 0..20),
    ) {
        let generated = build_overtime_ledger(&entries, &[], HOURLY_RATE_CENTS, 1)
            .summary
            .total_comp_hours_generated;
        let ledger = build_overtime_ledger(
            &entries,
            &[comp_leave_hours(generated)],
            HOURLY_RATE_CENTS,
            1,
        );
        prop_assert_eq!(ledger.summary.unused_comp_hours, Decimal::ZERO);
        prop_assert_eq!(ledger.summary.expired_comp_pay_cents, 0);
    }
}
