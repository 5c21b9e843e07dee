//! Error types for the payroll and analytics engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while generating payroll or
//! loading configuration. Degenerate statistics and missing overtime
//! attendance are not errors; see the analytics and calculation modules.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was present but out of range.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// An employee id did not resolve in the data provider.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The id that failed to resolve.
        employee_id: String,
    },

    /// The payroll store already holds an active payroll for the month.
    #[error("An active payroll already exists for {month}")]
    PayrollConflict {
        /// The normalized payroll month.
        month: NaiveDate,
    },

    /// The payroll store failed to read or commit.
    #[error("Payroll store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
