//! Calculation logic for punch-hour reports.
//!
//! The pipeline runs in this order: normalize raw punches into sorted
//! events, resolve the half-month window, pair entrances with exits,
//! classify each interval into daytime, nighttime and Sunday hours, then
//! aggregate per day and per employee with daily overtime.

mod aggregate;
mod classify;
mod normalize;
mod pairing;
mod period_range;

pub use aggregate::{aggregate_period, attribution_date, compute_period_report, daily_overtime};
pub use classify::{DaySplit, hours_between, split_any_span, split_by_day, split_same_day};
pub use normalize::{NormalizedEvents, floor_to_minutes, normalize_events};
pub use pairing::{PairingOutcome, build_work_intervals};
pub use period_range::resolve_period_range;
