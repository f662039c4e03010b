//! Error types for the punch-hours engine.
//!
//! Only caller-input validation and configuration problems are errors.
//! Malformed punch records, orphan exits and dangling entrances are dropped
//! and counted instead (see [`crate::models::ReportDiagnostics`]).

use thiserror::Error;

/// The main error type for the punch-hours engine.
///
/// # Example
///
/// ```
/// use punch_hours::error::EngineError;
///
/// let error = EngineError::InvalidPeriodHalf { half: 3 };
/// assert_eq!(error.to_string(), "Invalid period half 3: expected 1 or 2");
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

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The half-month selector was neither 1 nor 2.
    #[error("Invalid period half {half}: expected 1 or 2")]
    InvalidPeriodHalf {
        /// The rejected value.
        half: u32,
    },

    /// The margin pushes the expanded window outside the supported calendar.
    #[error("Invalid period margin of {margin_days} days: expanded window leaves the supported date range")]
    InvalidPeriodMargin {
        /// The rejected margin in days.
        margin_days: u32,
    },

    /// The year/month pair does not name a representable calendar month.
    #[error("Invalid period month {year}-{month}")]
    InvalidPeriodMonth {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
