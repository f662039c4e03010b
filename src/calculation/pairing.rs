//! Entrance/exit pairing into work intervals.
//!
//! A single pass over normalized events with one open-entrance slot per
//! employee. The slot map lives only for the duration of one call.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::{Event, PunchState, WorkInterval};

/// Interval builder output with counts of the punches it had to drop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PairingOutcome {
    /// Paired intervals in input order.
    pub intervals: Vec<WorkInterval>,
    /// Exits seen while no entrance was open.
    pub orphan_exits: usize,
    /// Open entrances overwritten by a later entrance.
    pub superseded_entrances: usize,
    /// Entrances still open when the input ended.
    pub dangling_entrances: usize,
}

#[derive(Debug, Clone)]
struct OpenEntrance<'a> {
    employee_name: &'a str,
    timestamp: NaiveDateTime,
}

/// Pairs entrance and exit events into work intervals.
///
/// Expects events sorted as produced by
/// [`normalize_events`](super::normalize_events). Per employee (compared
/// case-insensitively):
/// - an entrance opens a session, replacing any entrance still open;
/// - an exit closes the open session, or is dropped if none is open;
/// - a break changes nothing;
/// - an entrance left open at the end is dropped.
///
/// An exit at or before its entrance is treated as next-day (see
/// [`WorkInterval::pair`]).
///
/// # Example
///
/// ```
/// use punch_hours::calculation::build_work_intervals;
/// use punch_hours::models::{Event, PunchState};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let events = vec![
///     Event { employee_name: "Ana".into(), timestamp: at("2024-01-10 08:00"), state: PunchState::Entrance },
///     Event { employee_name: "Ana".into(), timestamp: at("2024-01-10 12:00"), state: PunchState::Break },
///     Event { employee_name: "Ana".into(), timestamp: at("2024-01-10 17:00"), state: PunchState::Exit },
/// ];
///
/// let outcome = build_work_intervals(&events);
/// assert_eq!(outcome.intervals.len(), 1);
/// assert_eq!(outcome.intervals[0].end, at("2024-01-10 17:00"));
/// ```
pub fn build_work_intervals<'a, I>(events: I) -> PairingOutcome
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut open: HashMap<String, Option<OpenEntrance<'a>>> = HashMap::new();
    let mut outcome = PairingOutcome::default();

    for event in events {
        let slot = open.entry(event.employee_key()).or_insert(None);

        match event.state {
            PunchState::Entrance => {
                if let Some(previous) = slot.replace(OpenEntrance {
                    employee_name: &event.employee_name,
                    timestamp: event.timestamp,
                }) {
                    outcome.superseded_entrances += 1;
                    debug!(
                        employee = %event.employee_name,
                        discarded = %previous.timestamp,
                        timestamp = %event.timestamp,
                        "Entrance superseded before any exit"
                    );
                }
            }
            PunchState::Exit => match slot.take() {
                Some(entrance) => {
                    outcome.intervals.push(WorkInterval::pair(
                        entrance.employee_name,
                        entrance.timestamp,
                        event.timestamp,
                    ));
                }
                None => {
                    outcome.orphan_exits += 1;
                    debug!(
                        employee = %event.employee_name,
                        timestamp = %event.timestamp,
                        "Exit without an open entrance"
                    );
                }
            },
            PunchState::Break => {}
        }
    }

    for entrance in open.into_values().flatten() {
        outcome.dangling_entrances += 1;
        debug!(
            employee = %entrance.employee_name,
            timestamp = %entrance.timestamp,
            "Entrance never closed"
        );
    }

    outcome
}
