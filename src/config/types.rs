//! Configuration types for hour computation.
//!
//! These structures are deserialized from `hours.yaml`. Every field has a
//! default, so a partial file (or no file at all) yields a usable
//! [`HoursConfig`].

use chrono::{NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Expected ordinary hours per weekday, used as the overtime baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineHours {
    /// Monday baseline.
    pub monday: Decimal,
    /// Tuesday baseline.
    pub tuesday: Decimal,
    /// Wednesday baseline.
    pub wednesday: Decimal,
    /// Thursday baseline.
    pub thursday: Decimal,
    /// Friday baseline.
    pub friday: Decimal,
    /// Saturday baseline.
    pub saturday: Decimal,
    /// Sunday baseline.
    pub sunday: Decimal,
}

impl Default for BaselineHours {
    fn default() -> Self {
        let weekday = Decimal::new(825, 2);
        Self {
            monday: weekday,
            tuesday: weekday,
            wednesday: weekday,
            thursday: weekday,
            friday: weekday,
            saturday: Decimal::new(400, 2),
            sunday: Decimal::ZERO,
        }
    }
}

impl BaselineHours {
    /// Returns the baseline for the given weekday.
    ///
    /// # Example
    ///
    /// ```
    /// use punch_hours::config::BaselineHours;
    /// use chrono::Weekday;
    /// use rust_decimal::Decimal;
    ///
    /// let baseline = BaselineHours::default();
    /// assert_eq!(baseline.for_weekday(Weekday::Mon), Decimal::new(825, 2));
    /// assert_eq!(baseline.for_weekday(Weekday::Sun), Decimal::ZERO);
    /// ```
    pub fn for_weekday(&self, weekday: Weekday) -> Decimal {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    fn entries(&self) -> [(&'static str, Decimal); 7] {
        [
            ("monday", self.monday),
            ("tuesday", self.tuesday),
            ("wednesday", self.wednesday),
            ("thursday", self.thursday),
            ("friday", self.friday),
            ("saturday", self.saturday),
            ("sunday", self.sunday),
        ]
    }
}

/// Daytime window boundaries.
///
/// Daytime is `[daytime_start, daytime_end)`. Nighttime is the rest of the
/// day: `[00:00, daytime_start)` and `[daytime_end, 24:00)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeWindows {
    /// First instant counted as daytime.
    pub daytime_start: NaiveTime,
    /// First instant counted as nighttime again.
    pub daytime_end: NaiveTime,
}

impl Default for TimeWindows {
    fn default() -> Self {
        Self {
            daytime_start: NaiveTime::from_hms_opt(6, 0, 0).expect("Valid daytime start"),
            daytime_end: NaiveTime::from_hms_opt(19, 0, 0).expect("Valid daytime end"),
        }
    }
}

/// The complete hour-computation configuration.
///
/// Passed explicitly into the normalizer, classifier and aggregator.
///
/// # Example
///
/// ```
/// use punch_hours::config::HoursConfig;
///
/// let config = HoursConfig::default();
/// assert_eq!(config.rounding_minutes, 0);
/// assert_eq!(config.margin_days, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoursConfig {
    /// Weekday to expected ordinary hours.
    pub baseline_hours: BaselineHours,
    /// Daytime/nighttime boundaries.
    pub windows: TimeWindows,
    /// Floor punch timestamps to this many minutes; zero disables rounding.
    pub rounding_minutes: u32,
    /// Days of tolerance added to both ends of a nominal pay period.
    pub margin_days: u32,
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            baseline_hours: BaselineHours::default(),
            windows: TimeWindows::default(),
            rounding_minutes: 0,
            margin_days: 3,
        }
    }
}

impl HoursConfig {
    /// Checks the values a YAML schema cannot express.
    pub fn validate(&self) -> EngineResult<()> {
        if self.windows.daytime_start >= self.windows.daytime_end {
            return Err(EngineError::InvalidConfig {
                field: "windows".to_string(),
                message: format!(
                    "daytime_start {} must be before daytime_end {}",
                    self.windows.daytime_start, self.windows.daytime_end
                ),
            });
        }

        if let Some((day, hours)) = self
            .baseline_hours
            .entries()
            .into_iter()
            .find(|(_, hours)| *hours < Decimal::ZERO)
        {
            return Err(EngineError::InvalidConfig {
                field: format!("baseline_hours.{}", day),
                message: format!("must not be negative, got {}", hours),
            });
        }

        if self.rounding_minutes > 24 * 60 {
            return Err(EngineError::InvalidConfig {
                field: "rounding_minutes".to_string(),
                message: format!("must not exceed one day, got {}", self.rounding_minutes),
            });
        }

        Ok(())
    }
}
