//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll calculation and
//! snapshot persistence.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::InvalidMonth {
///     input: "2026-13".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid month '2026-13': expected YYYY-MM");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// The month string was not a valid `YYYY-MM` value.
    #[error("Invalid month '{input}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input.
        input: String,
    },

    /// No employee exists for the given identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// Settings file was not found at the specified path.
    #[error("Settings file not found: {path}")]
    SettingsNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Settings file could not be parsed.
    #[error("Failed to parse settings file '{path}': {message}")]
    SettingsParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A record lookup against the backing store failed.
    #[error("Record store error: {message}")]
    Store {
        /// A description of the store failure.
        message: String,
    },

    /// A snapshot with the same month and version already exists.
    ///
    /// `finalize` treats this as a retryable outcome of the
    /// read-max-version / insert cycle.
    #[error("Snapshot version {version} for month {month} already exists")]
    VersionConflict {
        /// The month being finalized.
        month: String,
        /// The version number that collided.
        version: u32,
    },

    /// A per-employee calculation failed for a reason other than bad input.
    #[error("Calculation error for employee '{employee_id}': {message}")]
    Calculation {
        /// The employee whose calculation failed.
        employee_id: String,
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return [`PayrollError`].
pub type EngineResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_month_displays_input() {
        let error = PayrollError::InvalidMonth {
            input: "garbage".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid month 'garbage': expected YYYY-MM");
    }

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = PayrollError::EmployeeNotFound {
            employee_id: "emp_404".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: emp_404");
    }

    #[test]
    fn test_settings_parse_error_displays_path_and_message() {
        let error = PayrollError::SettingsParseError {
            path: "/config/settings.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse settings file '/config/settings.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_version_conflict_displays_month_and_version() {
        let error = PayrollError::VersionConflict {
            month: "2026-03".to_string(),
            version: 2,
        };
        assert_eq!(
            error.to_string(),
            "Snapshot version 2 for month 2026-03 already exists"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(PayrollError::EmployeeNotFound {
                employee_id: "emp_001".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
