//! Raw timesheet entry.
//!
//! Entries are owned by the timesheet subsystem and immutable once the
//! month has closed, which is what makes aggregation results safe to
//! memoize per (employee, month).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single raw time record.
///
/// Multiple entries per day and work-type are legal and are summed by the
/// aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// The date the hours were worked.
    pub date: NaiveDate,
    /// The work-type code, resolved via [`super::work_type`].
    pub work_type_code: u8,
    /// Hours worked, as a decimal quantity.
    pub hours: Decimal,
}
