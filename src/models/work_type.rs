//! Static work-type definitions.
//!
//! Timesheet entries reference one of twelve work-type codes. Each code
//! carries the pay multiplier applied to weighted hours, whether the hours
//! count as overtime, and whether the fixed-eight-hour rule applies.
//!
//! The fixed-eight-hour rule covers the "first eight hours of a holiday or
//! scheduled day off" codes (7 and 10): however many raw hours are logged
//! under the same code on the same day, the day credits exactly eight
//! compensatory-leave hours, apportioned pro-rata across the underlying
//! entries for display.

use rust_decimal::Decimal;

/// Definition of a single work-type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkTypeDefinition {
    /// The numeric code referenced by timesheet entries.
    pub code: u8,
    /// Human-readable name.
    pub name: &'static str,
    /// Pay multiplier applied when weighting hours.
    pub multiplier: Decimal,
    /// Whether hours under this code count as overtime.
    pub is_overtime: bool,
    /// Whether the fixed-eight-hour compensatory credit rule applies.
    pub fixed_eight_hour: bool,
}

/// The designated "first block of weekday overtime" code.
///
/// The meal allowance qualifies days by the hours logged under this code.
pub const WEEKDAY_OVERTIME_FIRST_CODE: u8 = 2;

const ONE: Decimal = Decimal::from_parts(1, 0, 0, false, 0);
const ONE_THIRTY_FOUR: Decimal = Decimal::from_parts(134, 0, 0, false, 2);
const ONE_SIXTY_SEVEN: Decimal = Decimal::from_parts(167, 0, 0, false, 2);
const TWO: Decimal = Decimal::from_parts(2, 0, 0, false, 0);
const TWO_SIXTY_SEVEN: Decimal = Decimal::from_parts(267, 0, 0, false, 2);

/// The twelve work-type codes, indexed by `code - 1`.
static WORK_TYPES: [WorkTypeDefinition; 12] = [
    WorkTypeDefinition {
        code: 1,
        name: "regular shift",
        multiplier: ONE,
        is_overtime: false,
        fixed_eight_hour: false,
    },
    WorkTypeDefinition {
        code: 2,
        name: "weekday overtime, first 2h",
        multiplier: ONE_THIRTY_FOUR,
        is_overtime: true,
        fixed_eight_hour: false,
    },
    WorkTypeDefinition {
        code: 3,
        name: "weekday overtime, beyond 2h",
        multiplier: ONE_SIXTY_SEVEN,
        is_overtime: true,
        fixed_eight_hour: false,
    },
    WorkTypeDefinition {
        code: 4,
        name: "rest day overtime, first 2h",
        multiplier: ONE_THIRTY_FOUR,
        is_overtime: true,
        fixed_eight_hour: false,
    },
    WorkTypeDefinition {
        code: 5,
        name: "rest day overtime, 2h-8h",
        multiplier: ONE_SIXTY_SEVEN,
        is_overtime: true,
        fixed_eight_hour: false,
    },
    WorkTypeDefinition {
        code: 6,
        name: "rest day overtime, beyond 8h",
        multiplier: TWO_SIXTY_SEVEN,
        is_overtime: true,
        fixed_eight_hour: false,
    },
    WorkTypeDefinition {
        code: 7,
        name: "national holiday, first 8h",
        multiplier: ONE,
        is_overtime: true,
        fixed_eight_hour: true,
    },
    WorkTypeDefinition {
        code: 8,
        name: "national holiday, beyond 8h",
        multiplier: TWO,
        is_overtime: true,
        fixed_eight_hour: false,
    },
    WorkTypeDefinition {
        code: 9,
        name: "makeup workday",
        multiplier: ONE,
        is_overtime: false,
        fixed_eight_hour: false,
    },
    WorkTypeDefinition {
        code: 10,
        name: "scheduled day off, first 8h",
        multiplier: ONE,
        is_overtime: true,
        fixed_eight_hour: true,
    },
    WorkTypeDefinition {
        code: 11,
        name: "night shift",
        multiplier: ONE,
        is_overtime: false,
        fixed_eight_hour: false,
    },
    WorkTypeDefinition {
        code: 12,
        name: "training",
        multiplier: ONE,
        is_overtime: false,
        fixed_eight_hour: false,
    },
];

/// Looks up a work-type definition by code.
///
/// Returns `None` for unknown codes; callers skip the carrying entry and
/// record an audit warning instead of failing the calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::work_type;
///
/// let holiday = work_type(7).unwrap();
/// assert!(holiday.fixed_eight_hour);
/// assert!(work_type(13).is_none());
/// ```
pub fn work_type(code: u8) -> Option<&'static WorkTypeDefinition> {
    WORK_TYPES.iter().find(|wt| wt.code == code)
}
