//! Lenient date and time parsing for spreadsheet cells.
//!
//! Every function returns `None` on failure; the normalizer treats that as
//! "skip this row" instead of an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%Y-%m-%d", "%m/%d/%Y"];

const TIME_FORMATS: [&str; 6] = [
    "%H:%M",
    "%H:%M:%S",
    "%I:%M %p",
    "%I:%M:%S %p",
    "%I:%M%p",
    "%I:%M:%S%p",
];

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A spreadsheet cell: either a number or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A numeric cell. For times this is a fraction of a day.
    Number(f64),
    /// A text cell.
    Text(String),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Parses a date cell.
///
/// Accepts `dd/mm/yyyy`, `yyyy-mm-dd` and `mm/dd/yyyy` (tried in that order,
/// so an ambiguous `03/04/2024` is the 3rd of April), and ISO datetimes.
/// Anything after the first space is ignored.
///
/// # Example
///
/// ```
/// use punch_hours::parsing::{CellValue, parse_date};
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 1, 31);
/// assert_eq!(parse_date(&"31/01/2024".into()), expected);
/// assert_eq!(parse_date(&"2024-01-31 08:00:00".into()), expected);
/// assert_eq!(parse_date(&"01/31/2024".into()), expected);
/// assert_eq!(parse_date(&CellValue::Number(45322.0)), None);
/// ```
pub fn parse_date(value: &CellValue) -> Option<NaiveDate> {
    let CellValue::Text(text) = value else {
        return None;
    };
    let token = text.split_whitespace().next()?;

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
        .or_else(|| token.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
}

/// Parses a time-of-day cell.
///
/// Numbers are fractions of a day (`0.5` is noon). Text may be 24-hour
/// `HH:MM[:SS]` or 12-hour with an AM/PM marker, including the dotted forms
/// `a. m.` / `p. m.`. ISO datetimes yield their time part.
///
/// # Example
///
/// ```
/// use punch_hours::parsing::{CellValue, parse_time};
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time(&"19:30".into()), NaiveTime::from_hms_opt(19, 30, 0));
/// assert_eq!(parse_time(&"7:30 p. m.".into()), NaiveTime::from_hms_opt(19, 30, 0));
/// assert_eq!(parse_time(&CellValue::Number(0.25)), NaiveTime::from_hms_opt(6, 0, 0));
/// ```
pub fn parse_time(value: &CellValue) -> Option<NaiveTime> {
    match value {
        CellValue::Number(fraction) => time_from_day_fraction(*fraction),
        CellValue::Text(text) => parse_time_text(text),
    }
}

fn time_from_day_fraction(fraction: f64) -> Option<NaiveTime> {
    if !fraction.is_finite() {
        return None;
    }
    let total_seconds = (fraction * SECONDS_PER_DAY).round().max(0.0) as u64;
    let hours = (total_seconds / 3600) % 24;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    NaiveTime::from_hms_opt(hours as u32, minutes as u32, seconds as u32)
}

fn parse_time_text(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = normalize_meridiem(trimmed);
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
        .or_else(|| trimmed.parse::<NaiveDateTime>().ok().map(|dt| dt.time()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.time())
        })
}

/// Collapses localized meridiem markers (`a. m.`, `p.m.`) to `AM`/`PM`.
fn normalize_meridiem(text: &str) -> String {
    let mut lowered = text.to_lowercase();
    for (from, to) in [
        ("a. m.", "am"),
        ("p. m.", "pm"),
        ("a.m.", "am"),
        ("p.m.", "pm"),
        (" a. m", "am"),
        (" p. m", "pm"),
        (" a.m", "am"),
        (" p.m", "pm"),
    ] {
        lowered = lowered.replace(from, to);
    }
    lowered.replace('.', "").trim().to_uppercase()
}
