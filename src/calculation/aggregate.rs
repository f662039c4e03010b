//! Half-month aggregation with daily overtime.
//!
//! Orchestrates one report: resolve the window, filter events, pair them
//! into intervals, classify each interval and roll the hours up per day and
//! per employee.
//!
//! An interval's hours are attributed entirely to the date of its start,
//! even when it runs past midnight. Overnight shifts are therefore not
//! prorated across the two calendar days; downstream sheets rely on this.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use crate::config::HoursConfig;
use crate::error::EngineResult;
use crate::models::{
    DailyHourBreakdown, DailyRow, Event, HoursReport, PeriodRow, PeriodRequest, PeriodSummary,
    RawPunch, ReportDiagnostics, WorkInterval, round_hours, weekday_label,
};

use super::classify::split_any_span;
use super::normalize::normalize_events;
use super::pairing::build_work_intervals;
use super::period_range::resolve_period_range;

/// Overtime for one day: hours above the baseline, never negative.
///
/// # Example
///
/// ```
/// use punch_hours::calculation::daily_overtime;
/// use rust_decimal::Decimal;
///
/// assert_eq!(daily_overtime(Decimal::from(9), Decimal::new(825, 2)), Decimal::new(75, 2));
/// assert_eq!(daily_overtime(Decimal::from(4), Decimal::new(825, 2)), Decimal::ZERO);
/// ```
pub fn daily_overtime(total: Decimal, baseline: Decimal) -> Decimal {
    (total - baseline).max(Decimal::ZERO)
}

/// Normalizes raw punch rows and aggregates them for one half-month.
///
/// Skipped rows are reported in [`ReportDiagnostics::skipped_records`].
///
/// # Example
///
/// ```
/// use punch_hours::calculation::compute_period_report;
/// use punch_hours::config::HoursConfig;
/// use punch_hours::models::{PeriodRequest, RawPunch};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let raw = vec![
///     RawPunch::new("Ana", day, NaiveTime::from_hms_opt(8, 0, 0).unwrap(), "entrada"),
///     RawPunch::new("Ana", day, NaiveTime::from_hms_opt(17, 0, 0).unwrap(), "salida"),
/// ];
///
/// let report = compute_period_report(&raw, &PeriodRequest::new(2024, 1, 1), &HoursConfig::default())?;
/// assert_eq!(report.range_label, "2024-01-01 a 2024-01-15");
/// assert_eq!(report.period_rows[0].total, Decimal::from(9));
/// assert_eq!(report.period_rows[0].overtime, Decimal::new(75, 2));
/// # Ok::<(), punch_hours::error::EngineError>(())
/// ```
pub fn compute_period_report(
    raw: &[RawPunch],
    request: &PeriodRequest,
    config: &HoursConfig,
) -> EngineResult<HoursReport> {
    let normalized = normalize_events(raw, config.rounding_minutes);
    let mut report = aggregate_period(&normalized.events, request, config)?;
    report.diagnostics.skipped_records = normalized.skipped_records;
    Ok(report)
}

/// Aggregates normalized events for one half-month.
///
/// `events` must be sorted as [`normalize_events`] sorts them. Events dated
/// outside the margin-expanded window are ignored. Daily rows are ordered by
/// lower-cased employee name then date; period rows by lower-cased name.
/// All output hours are rounded to two decimals.
///
/// # Errors
///
/// - [`EngineError::InvalidConfig`](crate::error::EngineError::InvalidConfig)
///   if `config` fails [`HoursConfig::validate`]
/// - any error of [`resolve_period_range`] (invalid half, month or margin)
pub fn aggregate_period(
    events: &[Event],
    request: &PeriodRequest,
    config: &HoursConfig,
) -> EngineResult<HoursReport> {
    config.validate()?;

    let margin_days = request.margin_days.unwrap_or(config.margin_days);
    let range = resolve_period_range(request.year, request.month, request.half, margin_days)?;

    let in_range: Vec<&Event> = events
        .iter()
        .filter(|event| range.contains_expanded(event.timestamp.date()))
        .collect();
    let events_outside_range = events.len() - in_range.len();

    let mut display_names: HashMap<String, String> = HashMap::new();
    for event in &in_range {
        display_names
            .entry(event.employee_key())
            .or_insert_with(|| event.employee_name.clone());
    }

    let pairing = build_work_intervals(in_range);

    let mut days: BTreeMap<(String, NaiveDate), DailyHourBreakdown> = BTreeMap::new();
    for interval in &pairing.intervals {
        days.entry((interval.employee_name.to_lowercase(), attribution_date(interval)))
            .or_default()
            .record(
                interval.total_hours(),
                split_any_span(interval.start, interval.end, &config.windows),
            );
    }

    let mut summaries: BTreeMap<String, PeriodSummary> = BTreeMap::new();
    let mut daily_rows = Vec::with_capacity(days.len());
    for ((key, date), day) in &days {
        let baseline = config.baseline_hours.for_weekday(date.weekday());
        let overtime = daily_overtime(day.total, baseline);
        summaries
            .entry(key.clone())
            .or_default()
            .record_day(day, overtime);

        daily_rows.push(DailyRow {
            employee: display_name(&display_names, key),
            date: *date,
            weekday_label: weekday_label(date.weekday()).to_string(),
            total: round_hours(day.total),
            daytime: round_hours(day.daytime),
            nighttime: round_hours(day.nighttime),
            sunday: round_hours(day.sunday),
            baseline: round_hours(baseline),
            overtime: round_hours(overtime),
        });
    }

    let period_rows: Vec<PeriodRow> = summaries
        .iter()
        .map(|(key, summary)| PeriodRow::from_summary(display_name(&display_names, key), summary))
        .collect();

    info!(
        range = %range.label,
        employees = period_rows.len(),
        intervals = pairing.intervals.len(),
        orphan_exits = pairing.orphan_exits,
        dangling_entrances = pairing.dangling_entrances,
        "Aggregated pay period"
    );

    Ok(HoursReport {
        range_label: range.label,
        period_rows,
        daily_rows,
        diagnostics: ReportDiagnostics {
            skipped_records: 0,
            events_outside_range,
            orphan_exits: pairing.orphan_exits,
            superseded_entrances: pairing.superseded_entrances,
            dangling_entrances: pairing.dangling_entrances,
        },
    })
}

/// The calendar date an interval's hours are booked to: its start date.
pub fn attribution_date(interval: &WorkInterval) -> NaiveDate {
    interval.start.date()
}

fn display_name(names: &HashMap<String, String>, key: &str) -> String {
    names.get(key).cloned().unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::PunchState;
    use chrono::{NaiveDateTime, NaiveTime};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn punch(name: &str, date_str: &str, time_str: &str, label: &str) -> RawPunch {
        let dt = make_datetime(date_str, time_str);
        RawPunch::new(name, dt.date(), dt.time(), label)
    }

    fn report(raw: &[RawPunch], request: PeriodRequest) -> HoursReport {
        compute_period_report(raw, &request, &HoursConfig::default()).unwrap()
    }

    // 2024-01-10 is a Wednesday, 2024-01-13 a Saturday, 2024-01-14 a Sunday.

    #[test]
    fn test_single_day_with_overtime() {
        let raw = vec![
            punch("Ana", "2024-01-10", "08:00:00", "entrada"),
            punch("Ana", "2024-01-10", "17:00:00", "salida"),
        ];
        let result = report(&raw, PeriodRequest::new(2024, 1, 1));

        assert_eq!(result.daily_rows.len(), 1);
        let day = &result.daily_rows[0];
        assert_eq!(day.employee, "Ana");
        assert_eq!(day.date, make_date("2024-01-10"));
        assert_eq!(day.weekday_label, "Mié");
        assert_eq!(day.total, dec("9"));
        assert_eq!(day.daytime, dec("9"));
        assert_eq!(day.nighttime, Decimal::ZERO);
        assert_eq!(day.baseline, dec("8.25"));
        assert_eq!(day.overtime, dec("0.75"));

        let period = &result.period_rows[0];
        assert_eq!(period.total, dec("9"));
        assert_eq!(period.overtime, dec("0.75"));
    }

    #[test]
    fn test_overnight_hours_attributed_to_start_date() {
        let raw = vec![
            punch("Ana", "2024-01-10", "20:00:00", "in"),
            punch("Ana", "2024-01-11", "05:00:00", "out"),
        ];
        let result = report(&raw, PeriodRequest::new(2024, 1, 1));

        assert_eq!(result.daily_rows.len(), 1);
        let day = &result.daily_rows[0];
        assert_eq!(day.date, make_date("2024-01-10"));
        assert_eq!(day.total, dec("9"));
        assert_eq!(day.nighttime, dec("9"));
        assert_eq!(day.daytime, Decimal::ZERO);
        assert_eq!(day.overtime, dec("0.75"));
    }

    #[test]
    fn test_saturday_night_into_sunday_stays_on_saturday() {
        let raw = vec![
            punch("Ana", "2024-01-13", "22:00:00", "in"),
            punch("Ana", "2024-01-14", "06:00:00", "out"),
        ];
        let result = report(&raw, PeriodRequest::new(2024, 1, 1));

        let day = &result.daily_rows[0];
        assert_eq!(day.date, make_date("2024-01-13"));
        assert_eq!(day.weekday_label, "Sáb");
        assert_eq!(day.nighttime, dec("2"));
        assert_eq!(day.sunday, dec("6"));
        assert_eq!(day.baseline, dec("4"));
        assert_eq!(day.overtime, dec("4"));
    }

    #[test]
    fn test_sunday_shift_is_all_overtime() {
        let raw = vec![
            punch("Ana", "2024-01-14", "09:00:00", "in"),
            punch("Ana", "2024-01-14", "13:30:00", "out"),
        ];
        let result = report(&raw, PeriodRequest::new(2024, 1, 1));

        let day = &result.daily_rows[0];
        assert_eq!(day.weekday_label, "Dom");
        assert_eq!(day.sunday, dec("4.5"));
        assert_eq!(day.daytime, Decimal::ZERO);
        assert_eq!(day.baseline, Decimal::ZERO);
        assert_eq!(day.overtime, dec("4.5"));
    }

    #[test]
    fn test_split_shift_same_day_sums_before_overtime() {
        let raw = vec![
            punch("Ana", "2024-01-10", "07:00:00", "in"),
            punch("Ana", "2024-01-10", "11:00:00", "out"),
            punch("Ana", "2024-01-10", "12:00:00", "in"),
            punch("Ana", "2024-01-10", "16:00:00", "out"),
        ];
        let result = report(&raw, PeriodRequest::new(2024, 1, 1));

        assert_eq!(result.daily_rows.len(), 1);
        assert_eq!(result.daily_rows[0].total, dec("8"));
        assert_eq!(result.daily_rows[0].overtime, Decimal::ZERO);
    }

    #[test]
    fn test_period_overtime_is_sum_of_daily_overtime() {
        let raw = vec![
            punch("Ana", "2024-01-10", "06:00:00", "in"),
            punch("Ana", "2024-01-10", "16:15:00", "out"),
            punch("Ana", "2024-01-11", "09:00:00", "in"),
            punch("Ana", "2024-01-11", "13:00:00", "out"),
        ];
        let result = report(&raw, PeriodRequest::new(2024, 1, 1));

        // Day one: 10.25h, 2h over. Day two: 4h, no overtime.
        let period = &result.period_rows[0];
        assert_eq!(period.total, dec("14.25"));
        assert_eq!(period.overtime, dec("2"));
    }

    #[test]
    fn test_rows_are_ordered_case_insensitively() {
        let raw = vec![
            punch("carla", "2024-01-11", "08:00:00", "in"),
            punch("carla", "2024-01-11", "10:00:00", "out"),
            punch("Bruno", "2024-01-12", "08:00:00", "in"),
            punch("Bruno", "2024-01-12", "10:00:00", "out"),
            punch("bruno", "2024-01-10", "08:00:00", "in"),
            punch("bruno", "2024-01-10", "10:00:00", "out"),
            punch("Ana", "2024-01-12", "08:00:00", "in"),
            punch("Ana", "2024-01-12", "10:00:00", "out"),
        ];
        let result = report(&raw, PeriodRequest::new(2024, 1, 1));

        let daily: Vec<(&str, NaiveDate)> = result
            .daily_rows
            .iter()
            .map(|row| (row.employee.as_str(), row.date))
            .collect();
        assert_eq!(
            daily,
            vec![
                ("Ana", make_date("2024-01-12")),
                ("bruno", make_date("2024-01-10")),
                ("bruno", make_date("2024-01-12")),
                ("carla", make_date("2024-01-11")),
            ]
        );

        let periods: Vec<&str> = result.period_rows.iter().map(|r| r.employee.as_str()).collect();
        assert_eq!(periods, vec!["Ana", "bruno", "carla"]);
        assert_eq!(result.period_rows[1].total, dec("4"));
    }

    #[test]
    fn test_events_outside_expanded_range_are_ignored() {
        let raw = vec![
            punch("Ana", "2024-01-20", "08:00:00", "in"),
            punch("Ana", "2024-01-20", "12:00:00", "out"),
            punch("Ana", "2024-01-16", "08:00:00", "in"),
            punch("Ana", "2024-01-16", "12:00:00", "out"),
        ];
        let result = report(&raw, PeriodRequest::new(2024, 1, 1).with_margin(2));

        assert_eq!(result.daily_rows.len(), 1);
        assert_eq!(result.daily_rows[0].date, make_date("2024-01-16"));
        assert_eq!(result.diagnostics.events_outside_range, 2);
    }

    #[test]
    fn test_margin_admits_overnight_start_before_period() {
        let raw = vec![
            punch("Ana", "2024-01-15", "22:00:00", "in"),
            punch("Ana", "2024-01-16", "06:00:00", "out"),
        ];
        let with_margin = report(&raw, PeriodRequest::new(2024, 1, 2).with_margin(1));
        assert_eq!(with_margin.daily_rows.len(), 1);
        assert_eq!(with_margin.daily_rows[0].date, make_date("2024-01-15"));

        let without_margin = report(&raw, PeriodRequest::new(2024, 1, 2).with_margin(0));
        assert!(without_margin.daily_rows.is_empty());
        assert_eq!(without_margin.diagnostics.orphan_exits, 1);
    }

    #[test]
    fn test_configured_margin_used_when_request_has_none() {
        let raw = vec![
            punch("Ana", "2024-01-13", "08:00:00", "in"),
            punch("Ana", "2024-01-13", "10:00:00", "out"),
        ];
        let config = HoursConfig {
            margin_days: 3,
            ..HoursConfig::default()
        };
        let result =
            compute_period_report(&raw, &PeriodRequest::new(2024, 1, 2), &config).unwrap();
        assert_eq!(result.daily_rows.len(), 1);
        assert_eq!(result.range_label, "2024-01-16 a 2024-01-31");
    }

    #[test]
    fn test_diagnostics_count_dropped_punches() {
        let date = make_date("2024-01-10");
        let raw = vec![
            punch("Ana", "2024-01-10", "07:00:00", "out"),
            punch("Ana", "2024-01-10", "07:30:00", "in"),
            punch("Ana", "2024-01-10", "08:00:00", "in"),
            punch("Ana", "2024-01-10", "17:00:00", "out"),
            punch("Ana", "2024-01-11", "08:00:00", "in"),
            RawPunch {
                employee_name: "Ana".to_string(),
                date: Some(date),
                time: None,
                state_label: "in".to_string(),
            },
        ];
        let result = report(&raw, PeriodRequest::new(2024, 1, 1));

        assert_eq!(
            result.diagnostics,
            ReportDiagnostics {
                skipped_records: 1,
                events_outside_range: 0,
                orphan_exits: 1,
                superseded_entrances: 1,
                dangling_entrances: 1,
            }
        );
        assert_eq!(result.daily_rows[0].total, dec("9"));
    }

    #[test]
    fn test_custom_baseline_table() {
        let mut config = HoursConfig::default();
        config.baseline_hours.wednesday = dec("10");
        let raw = vec![
            punch("Ana", "2024-01-10", "08:00:00", "in"),
            punch("Ana", "2024-01-10", "17:00:00", "out"),
        ];
        let result =
            compute_period_report(&raw, &PeriodRequest::new(2024, 1, 1), &config).unwrap();
        assert_eq!(result.daily_rows[0].baseline, dec("10"));
        assert_eq!(result.daily_rows[0].overtime, Decimal::ZERO);
    }

    #[test]
    fn test_rounding_granularity_applies_before_pairing() {
        let config = HoursConfig {
            rounding_minutes: 15,
            ..HoursConfig::default()
        };
        let raw = vec![
            punch("Ana", "2024-01-10", "08:07:00", "in"),
            punch("Ana", "2024-01-10", "17:14:00", "out"),
        ];
        let result =
            compute_period_report(&raw, &PeriodRequest::new(2024, 1, 1), &config).unwrap();
        assert_eq!(result.daily_rows[0].total, dec("9"));
    }

    #[test]
    fn test_output_is_rounded_to_two_decimals() {
        let raw = vec![
            punch("Ana", "2024-01-10", "08:00:00", "in"),
            punch("Ana", "2024-01-10", "08:20:00", "out"),
        ];
        let result = report(&raw, PeriodRequest::new(2024, 1, 1));
        assert_eq!(result.daily_rows[0].total, dec("0.33"));
        assert_eq!(result.period_rows[0].total, dec("0.33"));
    }

    #[test]
    fn test_invalid_half_is_an_error() {
        let result = compute_period_report(&[], &PeriodRequest::new(2024, 1, 3), &HoursConfig::default());
        assert!(matches!(result, Err(EngineError::InvalidPeriodHalf { half: 3 })));
    }

    #[test]
    fn test_inverted_daytime_window_is_rejected() {
        let mut config = HoursConfig::default();
        config.windows.daytime_start = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
        config.windows.daytime_end = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        let raw = vec![
            punch("Ana", "2024-01-10", "08:00:00", "in"),
            punch("Ana", "2024-01-10", "17:00:00", "out"),
        ];

        let result = compute_period_report(&raw, &PeriodRequest::new(2024, 1, 1), &config);
        match result {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "windows"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_baseline_is_rejected() {
        let mut config = HoursConfig::default();
        config.baseline_hours.monday = dec("-1");
        let result = aggregate_period(&[], &PeriodRequest::new(2024, 1, 1), &config);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let result = report(&[], PeriodRequest::new(2024, 2, 2).with_margin(2));
        assert_eq!(result.range_label, "2024-02-16 a 2024-02-29");
        assert!(result.period_rows.is_empty());
        assert!(result.daily_rows.is_empty());
        assert_eq!(result.diagnostics, ReportDiagnostics::default());
    }

    #[test]
    fn test_aggregate_period_accepts_prebuilt_events() {
        let events = vec![
            Event {
                employee_name: "Ana".to_string(),
                timestamp: make_datetime("2024-01-10", "08:00:00"),
                state: PunchState::Entrance,
            },
            Event {
                employee_name: "Ana".to_string(),
                timestamp: make_datetime("2024-01-10", "12:00:00"),
                state: PunchState::Exit,
            },
        ];
        let result =
            aggregate_period(&events, &PeriodRequest::new(2024, 1, 1), &HoursConfig::default())
                .unwrap();
        assert_eq!(result.period_rows[0].total, dec("4"));
    }

    proptest! {
        #[test]
        fn prop_report_is_idempotent(
            shifts in proptest::collection::vec((0u32..15, 0u32..24, 1u32..14), 0..12)
        ) {
            let mut raw = Vec::new();
            for (day_offset, start_hour, length) in shifts {
                let start = make_datetime("2024-03-01", "00:00:00")
                    + chrono::Duration::days(i64::from(day_offset))
                    + chrono::Duration::hours(i64::from(start_hour));
                let end = start + chrono::Duration::hours(i64::from(length));
                raw.push(RawPunch::new("Ana", start.date(), start.time(), "in"));
                raw.push(RawPunch::new("Ana", end.date(), end.time(), "out"));
            }

            let request = PeriodRequest::new(2024, 3, 1);
            let first = compute_period_report(&raw, &request, &HoursConfig::default()).unwrap();
            let second = compute_period_report(&raw, &request, &HoursConfig::default()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
