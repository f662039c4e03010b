//! Raw punch normalization.
//!
//! Turns [`RawPunch`] rows into canonical [`Event`]s sorted by
//! `(lower-cased name, timestamp)`, the order the interval builder relies on.

use chrono::{Duration, NaiveDateTime, Timelike};
use tracing::debug;

use crate::models::{Event, PunchState, RawPunch};

/// Normalizer output: the sorted events plus how many rows were dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedEvents {
    /// Events sorted by `(employee_name.to_lowercase(), timestamp)`.
    pub events: Vec<Event>,
    /// Rows skipped for a blank name or a missing date/time.
    pub skipped_records: usize,
}

/// Floors a timestamp to a multiple of `minutes` within its hour.
///
/// Seconds and sub-seconds are always discarded when rounding is active.
/// Zero leaves the timestamp untouched.
///
/// # Example
///
/// ```
/// use punch_hours::calculation::floor_to_minutes;
/// use chrono::NaiveDateTime;
///
/// let dt = NaiveDateTime::parse_from_str("2024-01-10 08:14:59", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(floor_to_minutes(dt, 15).to_string(), "2024-01-10 08:00:00");
/// assert_eq!(floor_to_minutes(dt, 0), dt);
/// ```
pub fn floor_to_minutes(timestamp: NaiveDateTime, minutes: u32) -> NaiveDateTime {
    if minutes == 0 {
        return timestamp;
    }
    let discard = Duration::minutes(i64::from(timestamp.minute() % minutes))
        + Duration::seconds(i64::from(timestamp.second()))
        + Duration::nanoseconds(i64::from(timestamp.nanosecond()));
    timestamp - discard
}

/// Normalizes raw punch rows into sorted events.
///
/// Rows with an empty or whitespace-only name, or without a date or time,
/// are skipped and counted. Names are trimmed; state labels are mapped with
/// [`PunchState::from_label`]. The sort is stable, so punches with equal
/// timestamps keep their input order.
///
/// # Example
///
/// ```
/// use punch_hours::calculation::normalize_events;
/// use punch_hours::models::{PunchState, RawPunch};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let raw = vec![
///     RawPunch::new("bruno", date, NaiveTime::from_hms_opt(8, 0, 0).unwrap(), "in"),
///     RawPunch::new("Ana", date, NaiveTime::from_hms_opt(17, 0, 0).unwrap(), "out"),
///     RawPunch::new("  ", date, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), "in"),
/// ];
///
/// let normalized = normalize_events(&raw, 0);
/// assert_eq!(normalized.skipped_records, 1);
/// assert_eq!(normalized.events[0].employee_name, "Ana");
/// assert_eq!(normalized.events[0].state, PunchState::Exit);
/// ```
pub fn normalize_events(raw: &[RawPunch], rounding_minutes: u32) -> NormalizedEvents {
    let mut skipped_records = 0;
    let mut keyed: Vec<(String, Event)> = Vec::with_capacity(raw.len());

    for record in raw {
        let name = record.employee_name.trim();
        let (Some(date), Some(time)) = (record.date, record.time) else {
            skipped_records += 1;
            debug!(employee = %name, "Skipping punch without a usable date or time");
            continue;
        };
        if name.is_empty() {
            skipped_records += 1;
            debug!(%date, %time, "Skipping punch without an employee name");
            continue;
        }

        let event = Event {
            employee_name: name.to_string(),
            timestamp: floor_to_minutes(date.and_time(time), rounding_minutes),
            state: PunchState::from_label(&record.state_label),
        };
        keyed.push((event.employee_key(), event));
    }

    keyed.sort_by(|(a_key, a), (b_key, b)| a_key.cmp(b_key).then(a.timestamp.cmp(&b.timestamp)));

    NormalizedEvents {
        events: keyed.into_iter().map(|(_, event)| event).collect(),
        skipped_records,
    }
}
