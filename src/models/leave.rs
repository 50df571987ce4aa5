//! Leave request model and related enums.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed day-to-hour conversion factor for day-unit leave amounts.
pub const HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The kind of leave requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Sick leave, deducted at the configured sick rate.
    Sick,
    /// Personal leave, deducted at the configured personal rate.
    Personal,
    /// Menstrual leave, deducted at a fixed 50% and exempt from the
    /// full-attendance check.
    Menstrual,
    /// Compensatory leave consuming overtime-generated hours.
    Compensatory,
    /// Annual leave, paid in full.
    Annual,
    /// Any other leave kind the HR subsystem records.
    #[serde(other)]
    Other,
}

/// The unit a leave amount is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveUnit {
    /// Whole days, converted to hours at [`HOURS_PER_DAY`].
    Day,
    /// Hours.
    Hour,
}

/// Review status of a leave request or business trip.
///
/// Only `Approved` records participate in payroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting review.
    Pending,
    /// Approved; counts toward payroll.
    Approved,
    /// Rejected; ignored everywhere.
    Rejected,
}

/// A leave request as recorded by the HR subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// The unit `amount` is expressed in.
    pub unit: LeaveUnit,
    /// The requested amount, in `unit`s.
    pub amount: Decimal,
    /// First day of the leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the leave (inclusive).
    pub end_date: NaiveDate,
    /// Review status.
    pub status: ApprovalStatus,
}

impl LeaveRequest {
    /// Whether this request has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }

    /// The requested amount expressed in hours.
    pub fn hours(&self) -> Decimal {
        match self.unit {
            LeaveUnit::Day => self.amount * HOURS_PER_DAY,
            LeaveUnit::Hour => self.amount,
        }
    }

    /// The requested amount expressed in days.
    pub fn days(&self) -> Decimal {
        match self.unit {
            LeaveUnit::Day => self.amount,
            LeaveUnit::Hour => self.amount / HOURS_PER_DAY,
        }
    }

    /// Whether the leave window overlaps `[from, to]` (inclusive).
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && self.end_date >= from
    }
}
