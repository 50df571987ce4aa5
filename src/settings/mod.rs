//! Tunable calculation parameters.
//!
//! Divisors, rates, and thresholds come from a key/value settings store
//! owned by an external subsystem. The engine consumes them through the
//! injected [`SettingsProvider`] trait, which keeps the calculators pure
//! and testable without a live store. Every key has a stated default that
//! applies whenever the key is missing or malformed.
//!
//! # Example
//!
//! ```
//! use payroll_engine::settings::{Settings, StaticSettings, keys};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let provider = StaticSettings::new().with(keys::TRANSPORT_KM_PER_INTERVAL, "10");
//! let settings = Settings::load(&provider).await;
//! assert_eq!(settings.transport_km_per_interval.to_string(), "10");
//! assert_eq!(settings.hourly_rate_divisor, 240);
//! # });
//! ```

mod loader;

pub use loader::load_settings_file;

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Recognized settings keys.
pub mod keys {
    /// Divisor turning a monthly salary into an hourly rate.
    pub const HOURLY_RATE_DIVISOR: &str = "hourly_rate_divisor";
    /// Divisor turning a monthly salary into a display daily salary.
    pub const LEAVE_DAILY_SALARY_DIVISOR: &str = "leave_daily_salary_divisor";
    /// Fraction of pay deducted per sick-leave hour.
    pub const SICK_LEAVE_DEDUCTION_RATE: &str = "sick_leave_deduction_rate";
    /// Fraction of pay deducted per personal-leave hour.
    pub const PERSONAL_LEAVE_DEDUCTION_RATE: &str = "personal_leave_deduction_rate";
    /// Minimum qualifying-code hours per day for the meal allowance.
    pub const MEAL_ALLOWANCE_MIN_OVERTIME_HOURS: &str = "meal_allowance_min_overtime_hours";
    /// Meal allowance per qualifying day, in currency units.
    pub const MEAL_ALLOWANCE_PER_TIME: &str = "meal_allowance_per_time";
    /// Transport allowance per distance interval, in currency units.
    pub const TRANSPORT_AMOUNT_PER_INTERVAL: &str = "transport_amount_per_interval";
    /// Kilometres per transport billing interval.
    pub const TRANSPORT_KM_PER_INTERVAL: &str = "transport_km_per_interval";
}

/// Read-only key/value source of tunable parameters.
///
/// Reads are async because the backing store is external I/O. The trait is
/// consumed through generics, not trait objects.
#[allow(async_fn_in_trait)]
pub trait SettingsProvider {
    /// Returns the raw value for `key`, or `None` if unset.
    async fn get(&self, key: &str) -> Option<String>;
}

/// The resolved parameter set one calculation runs with.
///
/// Loaded once per calculation so every calculator sees the same values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Divisor for both hourly rates (default 240).
    pub hourly_rate_divisor: i64,
    /// Divisor for the display daily salary (default 30).
    pub leave_daily_salary_divisor: i64,
    /// Sick-leave deduction rate (default 0.5).
    pub sick_leave_deduction_rate: Decimal,
    /// Personal-leave deduction rate (default 1.0).
    pub personal_leave_deduction_rate: Decimal,
    /// Meal allowance qualifying threshold in hours (default 1.5).
    pub meal_allowance_min_overtime_hours: Decimal,
    /// Meal allowance per qualifying day in currency units (default 100).
    pub meal_allowance_per_time: i64,
    /// Transport allowance per interval in currency units (default 60).
    pub transport_amount_per_interval: i64,
    /// Kilometres per transport interval (default 5).
    pub transport_km_per_interval: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hourly_rate_divisor: 240,
            leave_daily_salary_divisor: 30,
            sick_leave_deduction_rate: Decimal::new(5, 1),
            personal_leave_deduction_rate: Decimal::ONE,
            meal_allowance_min_overtime_hours: Decimal::new(15, 1),
            meal_allowance_per_time: 100,
            transport_amount_per_interval: 60,
            transport_km_per_interval: Decimal::new(5, 0),
        }
    }
}

/// Parses an optional raw value, falling back to `default` when the key is
/// missing or the value fails to parse.
fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

/// Like [`parse_or`], additionally rejecting non-positive values, which
/// would be nonsensical divisors or intervals.
fn parse_positive_or(raw: Option<String>, default: i64) -> i64 {
    match parse_or(raw, default) {
        value if value > 0 => value,
        _ => default,
    }
}

impl Settings {
    /// Resolves all recognized keys against `provider`.
    ///
    /// Missing or malformed values fall back to the stated defaults rather
    /// than failing the calculation.
    pub async fn load<P: SettingsProvider>(provider: &P) -> Self {
        let defaults = Self::default();
        Self {
            hourly_rate_divisor: parse_positive_or(
                provider.get(keys::HOURLY_RATE_DIVISOR).await,
                defaults.hourly_rate_divisor,
            ),
            leave_daily_salary_divisor: parse_positive_or(
                provider.get(keys::LEAVE_DAILY_SALARY_DIVISOR).await,
                defaults.leave_daily_salary_divisor,
            ),
            sick_leave_deduction_rate: parse_or(
                provider.get(keys::SICK_LEAVE_DEDUCTION_RATE).await,
                defaults.sick_leave_deduction_rate,
            ),
            personal_leave_deduction_rate: parse_or(
                provider.get(keys::PERSONAL_LEAVE_DEDUCTION_RATE).await,
                defaults.personal_leave_deduction_rate,
            ),
            meal_allowance_min_overtime_hours: parse_or(
                provider.get(keys::MEAL_ALLOWANCE_MIN_OVERTIME_HOURS).await,
                defaults.meal_allowance_min_overtime_hours,
            ),
            meal_allowance_per_time: parse_positive_or(
                provider.get(keys::MEAL_ALLOWANCE_PER_TIME).await,
                defaults.meal_allowance_per_time,
            ),
            transport_amount_per_interval: parse_positive_or(
                provider.get(keys::TRANSPORT_AMOUNT_PER_INTERVAL).await,
                defaults.transport_amount_per_interval,
            ),
            transport_km_per_interval: parse_or(
                provider.get(keys::TRANSPORT_KM_PER_INTERVAL).await,
                defaults.transport_km_per_interval,
            ),
        }
    }
}

/// In-memory settings provider.
///
/// Backs tests and fixtures, and is what the YAML file loader produces.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    values: HashMap<String, String>,
}

impl StaticSettings {
    /// Creates an empty provider; every lookup falls back to defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider over an existing key/value map.
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Sets one key, builder-style.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Returns the raw stored value for `key`, if any.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl SettingsProvider for StaticSettings {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn test_empty_provider_yields_defaults() {
        let settings = Settings::load(&StaticSettings::new()).await;
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.hourly_rate_divisor, 240);
        assert_eq!(settings.leave_daily_salary_divisor, 30);
        assert_eq!(settings.sick_leave_deduction_rate, dec("0.5"));
        assert_eq!(settings.personal_leave_deduction_rate, dec("1"));
        assert_eq!(settings.meal_allowance_min_overtime_hours, dec("1.5"));
        assert_eq!(settings.meal_allowance_per_time, 100);
        assert_eq!(settings.transport_amount_per_interval, 60);
        assert_eq!(settings.transport_km_per_interval, dec("5"));
    }

    #[tokio::test]
    async fn test_overrides_apply() {
        let provider = StaticSettings::new()
            .with(keys::HOURLY_RATE_DIVISOR, "200")
            .with(keys::SICK_LEAVE_DEDUCTION_RATE, "0.6")
            .with(keys::TRANSPORT_KM_PER_INTERVAL, "10");
        let settings = Settings::load(&provider).await;
        assert_eq!(settings.hourly_rate_divisor, 200);
        assert_eq!(settings.sick_leave_deduction_rate, dec("0.6"));
        assert_eq!(settings.transport_km_per_interval, dec("10"));
        assert_eq!(settings.meal_allowance_per_time, 100);
    }

    #[tokio::test]
    async fn test_malformed_value_falls_back_to_default() {
        let provider = StaticSettings::new()
            .with(keys::HOURLY_RATE_DIVISOR, "not a number")
            .with(keys::PERSONAL_LEAVE_DEDUCTION_RATE, "");
        let settings = Settings::load(&provider).await;
        assert_eq!(settings.hourly_rate_divisor, 240);
        assert_eq!(settings.personal_leave_deduction_rate, dec("1"));
    }

    #[tokio::test]
    async fn test_non_positive_divisor_falls_back() {
        let provider = StaticSettings::new()
            .with(keys::HOURLY_RATE_DIVISOR, "0")
            .with(keys::LEAVE_DAILY_SALARY_DIVISOR, "-30");
        let settings = Settings::load(&provider).await;
        assert_eq!(settings.hourly_rate_divisor, 240);
        assert_eq!(settings.leave_daily_salary_divisor, 30);
    }

    #[tokio::test]
    async fn test_values_are_trimmed() {
        let provider = StaticSettings::new().with(keys::MEAL_ALLOWANCE_PER_TIME, " 120 ");
        let settings = Settings::load(&provider).await;
        assert_eq!(settings.meal_allowance_per_time, 120);
    }
}
