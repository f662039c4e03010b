//! Work interval model.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::hours_between;

/// One continuous work session delimited by a paired entrance and exit.
///
/// `end > start` always holds for intervals built with [`WorkInterval::pair`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkInterval {
    /// Display name of the employee.
    pub employee_name: String,
    /// Entrance timestamp.
    pub start: NaiveDateTime,
    /// Exit timestamp, already corrected for midnight crossing.
    pub end: NaiveDateTime,
}

impl WorkInterval {
    /// Pairs an entrance with an exit.
    ///
    /// An exit at or before the entrance is read as belonging to the next
    /// day, so 24 hours are added to it.
    ///
    /// # Example
    ///
    /// ```
    /// use punch_hours::models::WorkInterval;
    /// use chrono::NaiveDateTime;
    ///
    /// let start = NaiveDateTime::parse_from_str("2024-01-10 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let exit = NaiveDateTime::parse_from_str("2024-01-10 05:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    ///
    /// let interval = WorkInterval::pair("Ana", start, exit);
    /// assert_eq!(interval.end.to_string(), "2024-01-11 05:00:00");
    /// ```
    pub fn pair(
        employee_name: impl Into<String>,
        start: NaiveDateTime,
        exit: NaiveDateTime,
    ) -> Self {
        let end = if exit <= start {
            exit + Duration::days(1)
        } else {
            exit
        };
        Self {
            employee_name: employee_name.into(),
            start,
            end,
        }
    }

    /// Total elapsed hours of the session.
    pub fn total_hours(&self) -> Decimal {
        hours_between(self.start, self.end)
    }
}
