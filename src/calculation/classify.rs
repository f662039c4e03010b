//! Daytime / nighttime / Sunday hour classification.
//!
//! A work interval is cut at midnight boundaries and each calendar-day piece
//! is measured against the configured daytime window. Sundays override the
//! window: every hour on a Sunday is a Sunday hour.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TimeWindows;
use crate::models::HourSplit;

const SECONDS_PER_HOUR: i64 = 3600;

/// The classified hours of one calendar day's piece of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySplit {
    /// The calendar day.
    pub date: NaiveDate,
    /// Hours worked on that day by class.
    pub split: HourSplit,
}

/// Elapsed hours from `start` to `end`, or zero if `end <= start`.
///
/// # Example
///
/// ```
/// use punch_hours::calculation::hours_between;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2024-01-10 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2024-01-10 08:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(hours_between(start, end), Decimal::new(5, 1));
/// assert_eq!(hours_between(end, start), Decimal::ZERO);
/// ```
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    if end <= start {
        return Decimal::ZERO;
    }
    Decimal::from((end - start).num_seconds()) / Decimal::from(SECONDS_PER_HOUR)
}

/// Classifies the part of `[start, end)` that falls on `day`.
///
/// The interval is clipped to `[day 00:00, next day 00:00)`. On a Sunday the
/// whole clipped duration is returned as Sunday hours; otherwise it is split
/// into the overlap with the daytime window and the overlap with the two
/// nighttime pieces around it. Empty or inverted intervals yield zeros.
///
/// # Example
///
/// ```
/// use punch_hours::calculation::split_same_day;
/// use punch_hours::config::TimeWindows;
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// // 2024-01-10 is a Wednesday
/// let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let start = NaiveDateTime::parse_from_str("2024-01-10 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2024-01-10 21:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let split = split_same_day(day, start, end, &TimeWindows::default());
/// assert_eq!(split.daytime, Decimal::from(2));
/// assert_eq!(split.nighttime, Decimal::from(2));
/// assert_eq!(split.sunday, Decimal::ZERO);
/// ```
pub fn split_same_day(
    day: NaiveDate,
    start: NaiveDateTime,
    end: NaiveDateTime,
    windows: &TimeWindows,
) -> HourSplit {
    let day_start = day.and_time(NaiveTime::MIN);
    let day_end = day_start + Duration::days(1);

    let start = start.max(day_start);
    let end = end.min(day_end);
    if end <= start {
        return HourSplit::default();
    }

    if day.weekday() == Weekday::Sun {
        return HourSplit {
            daytime: Decimal::ZERO,
            nighttime: Decimal::ZERO,
            sunday: hours_between(start, end),
        };
    }

    let daytime_start = day.and_time(windows.daytime_start);
    let daytime_end = day.and_time(windows.daytime_end);

    let daytime = overlap_hours(start, end, daytime_start, daytime_end);
    let nighttime = overlap_hours(start, end, day_start, daytime_start)
        + overlap_hours(start, end, daytime_end, day_end);

    HourSplit {
        daytime,
        nighttime,
        sunday: Decimal::ZERO,
    }
}

/// Cuts `[start, end)` at every midnight and classifies each day's piece.
///
/// Days the interval only touches at midnight (zero-length pieces) are
/// omitted. Pieces are in chronological order.
pub fn split_by_day(
    start: NaiveDateTime,
    end: NaiveDateTime,
    windows: &TimeWindows,
) -> Vec<DaySplit> {
    if end <= start {
        return Vec::new();
    }

    start
        .date()
        .iter_days()
        .take_while(|day| *day <= end.date())
        .map(|date| DaySplit {
            date,
            split: split_same_day(date, start, end, windows),
        })
        .filter(|piece| piece.split.total() > Decimal::ZERO)
        .collect()
}

/// Classifies an interval of any length, summing across the days it spans.
///
/// This is the path used for real work intervals; [`split_same_day`] is its
/// building block. `daytime + nighttime + sunday` equals the elapsed hours.
///
/// # Example
///
/// ```
/// use punch_hours::calculation::split_any_span;
/// use punch_hours::config::TimeWindows;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// // Saturday 22:00 to Sunday 06:00
/// let start = NaiveDateTime::parse_from_str("2024-01-13 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2024-01-14 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let split = split_any_span(start, end, &TimeWindows::default());
/// assert_eq!(split.nighttime, Decimal::from(2));
/// assert_eq!(split.sunday, Decimal::from(6));
/// ```
pub fn split_any_span(start: NaiveDateTime, end: NaiveDateTime, windows: &TimeWindows) -> HourSplit {
    split_by_day(start, end, windows)
        .into_iter()
        .fold(HourSplit::default(), |acc, piece| acc + piece.split)
}

fn overlap_hours(
    start: NaiveDateTime,
    end: NaiveDateTime,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> Decimal {
    hours_between(start.max(window_start), end.min(window_end))
}
