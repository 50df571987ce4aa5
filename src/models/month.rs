//! Payroll month value type.
//!
//! This module contains the [`PayrollMonth`] type that identifies the
//! calculation window for a payroll run and provides the date math the
//! calculators need.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineResult, PayrollError};

/// A calendar month in `YYYY-MM` form, the unit every payroll run is keyed by.
///
/// Parsing is strict: four-digit year, a single dash, two-digit month in
/// `01..=12`. Anything else is rejected as [`PayrollError::InvalidMonth`],
/// before any record I/O happens.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollMonth;
/// use chrono::NaiveDate;
///
/// let month: PayrollMonth = "2026-02".parse().unwrap();
/// assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert_eq!(month.to_string(), "2026-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayrollMonth {
    year: i32,
    month: u32,
}

impl PayrollMonth {
    /// Creates a month from numeric parts, rejecting out-of-range months.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PayrollError::InvalidMonth {
                input: format!("{year:04}-{month:02}"),
            });
        }
        Ok(Self { year, month })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The numeric month, `1..=12`.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // new() validated the (year, month) pair
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .unwrap_or(NaiveDate::MAX)
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// January 1 of the same calendar year, the start of year-to-date windows.
    pub fn year_start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Whether a date falls inside this month (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for PayrollMonth {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PayrollError::InvalidMonth {
            input: s.to_string(),
        };

        let (year_part, month_part) = s.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for PayrollMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_month() {
        let month: PayrollMonth = "2026-03".parse().unwrap();
        assert_eq!(month.year(), 2026);
        assert_eq!(month.month(), 3);
    }

    #[test]
    fn test_parse_rejects_out_of_range_month() {
        assert!("2026-00".parse::<PayrollMonth>().is_err());
        assert!("2026-13".parse::<PayrollMonth>().is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        for input in ["2026", "2026-3", "26-03", "2026/03", "2026-03-01", "abcd-ef", ""] {
            assert!(input.parse::<PayrollMonth>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_parse_error_carries_input() {
        let err = "2026-13".parse::<PayrollMonth>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid month '2026-13': expected YYYY-MM");
    }

    #[test]
    fn test_last_day_regular_month() {
        let month: PayrollMonth = "2026-04".parse().unwrap();
        assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2026, 4, 30).unwrap());
    }

    #[test]
    fn test_last_day_december_rolls_year() {
        let month: PayrollMonth = "2026-12".parse().unwrap();
        assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn test_last_day_leap_february() {
        let month: PayrollMonth = "2028-02".parse().unwrap();
        assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let month: PayrollMonth = "2026-02".parse().unwrap();
        assert!(month.contains(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
        assert!(month.contains(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2025, 2, 15).unwrap()));
    }

    #[test]
    fn test_year_start() {
        let month: PayrollMonth = "2026-08".parse().unwrap();
        assert_eq!(month.year_start(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_display_zero_pads() {
        let month = PayrollMonth::new(2026, 7).unwrap();
        assert_eq!(month.to_string(), "2026-07");
    }
}
