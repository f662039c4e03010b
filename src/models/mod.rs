//! Core data models for the punch-hours engine.
//!
//! Every model is a plain value; nothing here is shared or mutated across
//! computations.

mod event;
mod interval;
mod pay_period;
mod report;

pub use event::{Event, PunchState, RawPunch};
pub use interval::WorkInterval;
pub use pay_period::{PayPeriodRange, PeriodHalf, PeriodRequest};
pub use report::{
    DailyHourBreakdown, DailyRow, HourSplit, HoursReport, OUTPUT_DECIMALS, PeriodRow,
    PeriodSummary, ReportDiagnostics, round_hours, weekday_label,
};
