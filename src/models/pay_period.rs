//! Half-month pay period models.
//!
//! This module contains the [`PeriodHalf`] selector, the [`PeriodRequest`]
//! describing which half-month to report on, and the resolved
//! [`PayPeriodRange`] window.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Which half of the month a pay period covers.
///
/// # Example
///
/// ```
/// use punch_hours::models::PeriodHalf;
///
/// assert_eq!(PeriodHalf::try_from(2).unwrap(), PeriodHalf::Second);
/// assert!(PeriodHalf::try_from(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodHalf {
    /// Days 1 through 15.
    First,
    /// Day 16 through the last day of the month.
    Second,
}

impl PeriodHalf {
    /// Returns the half that contains the given day of month.
    pub fn for_day(day: u32) -> Self {
        if day <= 15 {
            PeriodHalf::First
        } else {
            PeriodHalf::Second
        }
    }

    /// The numeric selector, 1 or 2.
    pub fn number(self) -> u32 {
        match self {
            PeriodHalf::First => 1,
            PeriodHalf::Second => 2,
        }
    }
}

impl TryFrom<u32> for PeriodHalf {
    type Error = EngineError;

    fn try_from(half: u32) -> Result<Self, Self::Error> {
        match half {
            1 => Ok(PeriodHalf::First),
            2 => Ok(PeriodHalf::Second),
            _ => Err(EngineError::InvalidPeriodHalf { half }),
        }
    }
}

/// A request for one half-month report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
    /// Half selector, 1 or 2. Validated when the range is resolved.
    pub half: u32,
    /// Margin override in days; `None` uses the configured margin.
    #[serde(default)]
    pub margin_days: Option<u32>,
}

impl PeriodRequest {
    /// Creates a request using the configured margin.
    pub fn new(year: i32, month: u32, half: u32) -> Self {
        Self {
            year,
            month,
            half,
            margin_days: None,
        }
    }

    /// Sets an explicit margin.
    pub fn with_margin(mut self, margin_days: u32) -> Self {
        self.margin_days = Some(margin_days);
        self
    }

    /// The request for the half-month containing `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use punch_hours::models::PeriodRequest;
    /// use chrono::NaiveDate;
    ///
    /// let request = PeriodRequest::containing(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    /// assert_eq!((request.year, request.month, request.half), (2024, 3, 2));
    /// ```
    pub fn containing(date: NaiveDate) -> Self {
        Self::new(
            date.year(),
            date.month(),
            PeriodHalf::for_day(date.day()).number(),
        )
    }
}

/// A resolved half-month window.
///
/// The nominal dates bound the pay period itself; the expanded dates widen
/// it by the margin on both sides and are used to filter punches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriodRange {
    /// First day of the pay period.
    pub nominal_start: NaiveDate,
    /// Last day of the pay period.
    pub nominal_end: NaiveDate,
    /// `nominal_start` minus the margin.
    pub expanded_start: NaiveDate,
    /// `nominal_end` plus the margin.
    pub expanded_end: NaiveDate,
    /// Display label, `"<start> a <end>"` in ISO dates.
    pub label: String,
}

impl PayPeriodRange {
    /// Checks if a date falls within the nominal period (inclusive).
    pub fn contains_nominal(&self, date: NaiveDate) -> bool {
        date >= self.nominal_start && date <= self.nominal_end
    }

    /// Checks if a date falls within the margin-expanded window (inclusive).
    pub fn contains_expanded(&self, date: NaiveDate) -> bool {
        date >= self.expanded_start && date <= self.expanded_end
    }
}
