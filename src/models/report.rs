//! Hour breakdowns and report rows.
//!
//! This module contains the intermediate accumulators ([`HourSplit`],
//! [`DailyHourBreakdown`], [`PeriodSummary`]) and the rounded output rows
//! handed to spreadsheet writers or the HTTP API.

use std::ops::{Add, AddAssign};

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of decimal places kept in output rows.
pub const OUTPUT_DECIMALS: u32 = 2;

/// Hours of one interval (or part of one) by time class.
///
/// On a Sunday everything lands in `sunday` and the other two stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourSplit {
    /// Hours inside the daytime window.
    pub daytime: Decimal,
    /// Hours outside the daytime window.
    pub nighttime: Decimal,
    /// Hours on a Sunday.
    pub sunday: Decimal,
}

impl HourSplit {
    /// Sum of the three classes.
    pub fn total(&self) -> Decimal {
        self.daytime + self.nighttime + self.sunday
    }
}

impl Add for HourSplit {
    type Output = HourSplit;

    fn add(self, other: HourSplit) -> HourSplit {
        HourSplit {
            daytime: self.daytime + other.daytime,
            nighttime: self.nighttime + other.nighttime,
            sunday: self.sunday + other.sunday,
        }
    }
}

impl AddAssign for HourSplit {
    fn add_assign(&mut self, other: HourSplit) {
        *self = *self + other;
    }
}

/// Unrounded hours attributed to one employee on one calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyHourBreakdown {
    /// Total elapsed hours.
    pub total: Decimal,
    /// Daytime hours.
    pub daytime: Decimal,
    /// Nighttime hours.
    pub nighttime: Decimal,
    /// Sunday hours.
    pub sunday: Decimal,
}

impl DailyHourBreakdown {
    /// Adds one interval's total and class split.
    pub fn record(&mut self, total: Decimal, split: HourSplit) {
        self.total += total;
        self.daytime += split.daytime;
        self.nighttime += split.nighttime;
        self.sunday += split.sunday;
    }
}

/// Unrounded per-employee totals across a pay period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodSummary {
    /// Total elapsed hours.
    pub total: Decimal,
    /// Daytime hours.
    pub daytime: Decimal,
    /// Nighttime hours.
    pub nighttime: Decimal,
    /// Sunday hours.
    pub sunday: Decimal,
    /// Sum of the daily overtime.
    pub overtime: Decimal,
}

impl PeriodSummary {
    /// Folds one day into the summary.
    pub fn record_day(&mut self, day: &DailyHourBreakdown, overtime: Decimal) {
        self.total += day.total;
        self.daytime += day.daytime;
        self.nighttime += day.nighttime;
        self.sunday += day.sunday;
        self.overtime += overtime;
    }
}

/// One employee-day line of the detail sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRow {
    /// Employee display name.
    pub employee: String,
    /// The date hours were attributed to (an interval's start date).
    pub date: NaiveDate,
    /// Short weekday label (`Lun` .. `Dom`).
    pub weekday_label: String,
    /// Total hours.
    pub total: Decimal,
    /// Daytime hours.
    pub daytime: Decimal,
    /// Nighttime hours.
    pub nighttime: Decimal,
    /// Sunday hours.
    pub sunday: Decimal,
    /// Expected ordinary hours for this weekday.
    pub baseline: Decimal,
    /// `max(0, total - baseline)`.
    pub overtime: Decimal,
}

/// One employee line of the period summary sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRow {
    /// Employee display name.
    pub employee: String,
    /// Total hours.
    pub total: Decimal,
    /// Daytime hours.
    pub daytime: Decimal,
    /// Nighttime hours.
    pub nighttime: Decimal,
    /// Sunday hours.
    pub sunday: Decimal,
    /// Overtime hours.
    pub overtime: Decimal,
}

impl PeriodRow {
    /// Builds a rounded row from an unrounded summary.
    pub fn from_summary(employee: impl Into<String>, summary: &PeriodSummary) -> Self {
        Self {
            employee: employee.into(),
            total: round_hours(summary.total),
            daytime: round_hours(summary.daytime),
            nighttime: round_hours(summary.nighttime),
            sunday: round_hours(summary.sunday),
            overtime: round_hours(summary.overtime),
        }
    }
}

/// Counts of punches dropped without raising an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDiagnostics {
    /// Rows with a blank name or a missing date/time.
    pub skipped_records: usize,
    /// Events dated outside the margin-expanded window.
    pub events_outside_range: usize,
    /// Exits with no open entrance.
    pub orphan_exits: usize,
    /// Entrances replaced by a later entrance before any exit.
    pub superseded_entrances: usize,
    /// Entrances still open at the end of the input.
    pub dangling_entrances: usize,
}

/// The full output of one half-month computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursReport {
    /// Nominal range label, e.g. `"2024-02-16 a 2024-02-29"`.
    pub range_label: String,
    /// Per-employee totals, ordered by lower-cased name.
    pub period_rows: Vec<PeriodRow>,
    /// Per-employee-per-day detail, ordered by lower-cased name then date.
    pub daily_rows: Vec<DailyRow>,
    /// Dropped-punch counts.
    pub diagnostics: ReportDiagnostics,
}

/// Rounds an hour quantity for output.
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp(OUTPUT_DECIMALS)
}

/// Short Spanish weekday label used by the detail sheet.
///
/// # Example
///
/// ```
/// use punch_hours::models::weekday_label;
/// use chrono::Weekday;
///
/// assert_eq!(weekday_label(Weekday::Wed), "Mié");
/// assert_eq!(weekday_label(Weekday::Sun), "Dom");
/// ```
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Lun",
        Weekday::Tue => "Mar",
        Weekday::Wed => "Mié",
        Weekday::Thu => "Jue",
        Weekday::Fri => "Vie",
        Weekday::Sat => "Sáb",
        Weekday::Sun => "Dom",
    }
}
