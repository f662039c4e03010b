//! Punch records before and after normalization.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::parsing::{CellValue, parse_date, parse_time};

/// The meaning of a single clock punch.
///
/// # Example
///
/// ```
/// use punch_hours::models::PunchState;
///
/// assert_eq!(PunchState::from_label(" Entrada "), PunchState::Entrance);
/// assert_eq!(PunchState::from_label("CHECKOUT"), PunchState::Exit);
/// assert_eq!(PunchState::from_label("lunch"), PunchState::Break);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchState {
    /// Start of a work session.
    Entrance,
    /// End of a work session.
    Exit,
    /// Anything else. Does not open or close a session.
    Break,
}

impl PunchState {
    /// Maps a free-text state label, case-insensitively.
    ///
    /// `entrada`, `in`, `checkin` are entrances; `salida`, `out`, `checkout`
    /// are exits; every other label (including an empty one) is a break.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "entrada" | "in" | "checkin" => PunchState::Entrance,
            "salida" | "out" | "checkout" => PunchState::Exit,
            _ => PunchState::Break,
        }
    }

    /// Maps the `(status, punch)` code pair reported by the biometric clock.
    ///
    /// A verified punch (`status == 1`) with punch code 0 is an entrance and
    /// code 1 is an exit. Everything else is treated as a break.
    pub fn from_device_codes(status: i64, punch: i64) -> Self {
        match (status, punch) {
            (1, 0) => PunchState::Entrance,
            (1, 1) => PunchState::Exit,
            _ => PunchState::Break,
        }
    }
}

impl std::fmt::Display for PunchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PunchState::Entrance => write!(f, "Entrance"),
            PunchState::Exit => write!(f, "Exit"),
            PunchState::Break => write!(f, "Break"),
        }
    }
}

/// A raw punch row as delivered by a spreadsheet or the device feed.
///
/// Date and time are optional: a missing or unparseable value makes the
/// normalizer skip the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPunch {
    /// Employee name as typed in the source.
    pub employee_name: String,
    /// Calendar date of the punch.
    pub date: Option<NaiveDate>,
    /// Time of day of the punch.
    pub time: Option<NaiveTime>,
    /// Free-text state label (see [`PunchState::from_label`]).
    pub state_label: String,
}

impl RawPunch {
    /// Builds a raw punch from already-typed values.
    pub fn new(
        employee_name: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        state_label: impl Into<String>,
    ) -> Self {
        Self {
            employee_name: employee_name.into(),
            date: Some(date),
            time: Some(time),
            state_label: state_label.into(),
        }
    }

    /// Builds a raw punch from untyped spreadsheet cells.
    ///
    /// # Example
    ///
    /// ```
    /// use punch_hours::models::RawPunch;
    /// use punch_hours::parsing::CellValue;
    ///
    /// let punch = RawPunch::from_cells(
    ///     "Ana",
    ///     &CellValue::Text("10/01/2024".to_string()),
    ///     &CellValue::Text("8:00 a. m.".to_string()),
    ///     "entrada",
    /// );
    /// assert!(punch.date.is_some());
    /// assert!(punch.time.is_some());
    /// ```
    pub fn from_cells(
        employee_name: impl Into<String>,
        date: &CellValue,
        time: &CellValue,
        state_label: impl Into<String>,
    ) -> Self {
        Self {
            employee_name: employee_name.into(),
            date: parse_date(date),
            time: parse_time(time),
            state_label: state_label.into(),
        }
    }
}

/// A normalized punch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Trimmed employee name, kept verbatim for display.
    pub employee_name: String,
    /// Combined (and possibly floored) date and time.
    pub timestamp: NaiveDateTime,
    /// The punch meaning.
    pub state: PunchState,
}

impl Event {
    /// Case-insensitive identity of the employee.
    pub fn employee_key(&self) -> String {
        self.employee_name.to_lowercase()
    }
}
