//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod leave;
mod month;
mod payroll_result;
mod salary_item;
mod snapshot;
mod time_entry;
mod trip;
mod work_type;

pub use employee::Employee;
pub use leave::{ApprovalStatus, HOURS_PER_DAY, LeaveRequest, LeaveType, LeaveUnit};
pub use month::PayrollMonth;
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, ClassifiedItems, LeaveSummary, MealAllowance,
    OvertimeRecord, OvertimeSummary, PayrollResult, SalaryItemLine, TimesheetSummary,
    TransportAllowance, TripAllowance,
};
pub use salary_item::{
    BonusAdjustment, PERFORMANCE_ITEM_CODE, RecurringType, SalaryItemAssignment,
    SalaryItemCategory, YearEndBonusRecord, full_attendance_flag_from_legacy_name,
};
pub use snapshot::{DiffEntry, DiffKind, PayrollSnapshot, SnapshotDiff};
pub use time_entry::TimeEntry;
pub use trip::BusinessTrip;
pub use work_type::{WEEKDAY_OVERTIME_FIRST_CODE, WorkTypeDefinition, work_type};
