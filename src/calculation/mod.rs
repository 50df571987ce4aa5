//! Calculation logic for the payroll engine.
//!
//! This module contains all the calculation functions for determining pay:
//! timesheet aggregation, the FIFO overtime/compensatory-leave ledger,
//! meal and transport allowances, leave deductions with menstrual-leave
//! carry, salary item classification, and the orchestrator that composes
//! them into one itemized monthly result.
//!
//! Every monetary value is an integer count of cents; rounding is always
//! explicit — [`div_round`] for rates, [`floor_cents`] for deductions —
//! so results are bit-reproducible.

mod leave_deduction;
mod meal_allowance;
mod orchestrator;
mod overtime_ledger;
mod salary_items;
mod timesheet;
mod transport_allowance;

pub use leave_deduction::{
    LeaveDeductionResult, MENSTRUAL_FREE_DAYS_PER_YEAR, calculate_leave_deduction,
    is_full_attendance,
};
pub use meal_allowance::{MealAllowanceResult, calculate_meal_allowance};
pub use orchestrator::PayrollOrchestrator;
pub use overtime_ledger::{OvertimeLedgerResult, build_overtime_ledger};
pub use salary_items::{ClassifiedItemsResult, classify_salary_items};
pub use timesheet::{TimesheetAggregation, aggregate_timesheet};
pub use transport_allowance::{TransportAllowanceResult, calculate_transport_allowance};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Integer division rounded half-up, for turning salaries into rates.
///
/// The divisor must be positive; settings loading guarantees that.
pub(crate) fn div_round(numerator: i64, divisor: i64) -> i64 {
    (numerator + divisor / 2) / divisor
}

/// Floors a decimal cent amount to an integer, for deductions.
pub(crate) fn floor_cents(amount: Decimal) -> i64 {
    amount.floor().to_i64().unwrap_or(0)
}

/// Rounds a decimal cent amount half-up to an integer, for allowances.
pub(crate) fn round_cents(amount: Decimal) -> i64 {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}
