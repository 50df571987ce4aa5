//! Configured salary line items, bonus overrides, and year-end bonuses.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::PayrollMonth;

/// The reserved item code identifying the performance bonus.
///
/// Performance items are extracted from the bonus bucket and resolved
/// separately, because a monthly [`BonusAdjustment`] may override them.
pub const PERFORMANCE_ITEM_CODE: &str = "performance";

/// The category a salary item pays into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryItemCategory {
    /// Fixed monthly allowance, part of the leave hourly-rate numerator.
    RegularAllowance,
    /// Conditional allowance paid only in months the recurrence matches.
    IrregularAllowance,
    /// Monthly bonus.
    Bonus,
    /// Year-end bonus.
    YearEndBonus,
    /// Fixed deduction.
    Deduction,
}

/// How often an assignment pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringType {
    /// Pays every month of the effective window.
    Monthly,
    /// Pays only in the months listed in `recurring_months`.
    Yearly,
    /// Pays only in the month of the effective date.
    Once,
}

/// A salary item assigned to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryItemAssignment {
    /// Identifier of the underlying item type.
    pub item_type_id: String,
    /// Machine-readable item code; `performance` is reserved.
    pub item_code: String,
    /// Display name.
    pub name: String,
    /// Category bucket.
    pub category: SalaryItemCategory,
    /// Amount in cents per payout.
    pub amount_cents: i64,
    /// Payout recurrence.
    pub recurring_type: RecurringType,
    /// Raw JSON array text of payout months (`"[2,7]"`), used only when
    /// `recurring_type` is `Yearly`. Malformed text defaults to paying.
    #[serde(default)]
    pub recurring_months: Option<String>,
    /// First month the assignment can pay in.
    pub effective_date: NaiveDate,
    /// Optional last day the assignment can pay on.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Inactive assignments are ignored entirely.
    pub is_active: bool,
    /// Whether payout is conditional on full attendance.
    ///
    /// This is a required schema field; legacy name-substring detection is
    /// applied once at data migration via
    /// [`full_attendance_flag_from_legacy_name`], never at calculation time.
    #[serde(default)]
    pub is_full_attendance_bonus: bool,
}

impl SalaryItemAssignment {
    /// Whether the assignment's effective window covers the target month.
    ///
    /// Effective iff `effective_date <= lastDayOfMonth` and `expiry_date`
    /// is absent or `>= firstDayOfMonth`.
    pub fn is_effective_in(&self, month: &PayrollMonth) -> bool {
        self.effective_date <= month.last_day()
            && self.expiry_date.is_none_or(|expiry| expiry >= month.first_day())
    }

    /// Whether the effective date falls in the given month.
    pub fn effective_in_month(&self, month: &PayrollMonth) -> bool {
        self.effective_date.year() == month.year() && self.effective_date.month() == month.month()
    }
}

/// Migration helper encoding the legacy "full attendance by display name"
/// rule for one-time backfills of [`SalaryItemAssignment::is_full_attendance_bonus`].
pub fn full_attendance_flag_from_legacy_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    lowered.contains("full attendance") || lowered.contains("full_attendance") || name.contains("全勤")
}

/// Per-employee-per-month override of the performance bonus.
///
/// When present it fully replaces the assignment-derived default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusAdjustment {
    /// The employee the override applies to.
    pub employee_id: String,
    /// The month the override applies to, `YYYY-MM`.
    pub month: String,
    /// Replacement performance bonus amount in cents.
    pub amount_cents: i64,
    /// Optional free-text reason recorded by the reviewer.
    #[serde(default)]
    pub reason: Option<String>,
}

/// A year-end bonus scheduled for payout in a specific month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearEndBonusRecord {
    /// The bonus year.
    pub year: i32,
    /// The numeric month (`1..=12`) the bonus pays out in.
    pub payment_month: u32,
    /// Bonus amount in cents.
    pub amount_cents: i64,
}
