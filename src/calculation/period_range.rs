//! Half-month pay period range resolution.

use chrono::{Days, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriodRange, PeriodHalf};

/// Resolves the nominal and margin-expanded window of a half-month.
///
/// Half 1 covers days 1 to 15; half 2 covers day 16 to the last day of the
/// month. The expanded window adds `margin_days` on both sides so that
/// punches just outside the period (an overnight shift starting the day
/// before, for instance) are still seen.
///
/// # Errors
///
/// - [`EngineError::InvalidPeriodHalf`] if `half` is not 1 or 2
/// - [`EngineError::InvalidPeriodMonth`] if the month does not exist
/// - [`EngineError::InvalidPeriodMargin`] if the margin leaves chrono's date range
///
/// # Example
///
/// ```
/// use punch_hours::calculation::resolve_period_range;
/// use chrono::NaiveDate;
///
/// let range = resolve_period_range(2024, 2, 2, 2).unwrap();
/// assert_eq!(range.nominal_start, NaiveDate::from_ymd_opt(2024, 2, 16).unwrap());
/// assert_eq!(range.nominal_end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(range.expanded_start, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
/// assert_eq!(range.expanded_end, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
/// assert_eq!(range.label, "2024-02-16 a 2024-02-29");
/// ```
pub fn resolve_period_range(
    year: i32,
    month: u32,
    half: u32,
    margin_days: u32,
) -> EngineResult<PayPeriodRange> {
    let half = PeriodHalf::try_from(half)?;
    let invalid_month = || EngineError::InvalidPeriodMonth { year, month };

    let (nominal_start, nominal_end) = match half {
        PeriodHalf::First => (
            NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid_month)?,
            NaiveDate::from_ymd_opt(year, month, 15).ok_or_else(invalid_month)?,
        ),
        PeriodHalf::Second => (
            NaiveDate::from_ymd_opt(year, month, 16).ok_or_else(invalid_month)?,
            last_day_of_month(year, month).ok_or_else(invalid_month)?,
        ),
    };

    let invalid_margin = || EngineError::InvalidPeriodMargin { margin_days };
    let margin = Days::new(u64::from(margin_days));
    let expanded_start = nominal_start
        .checked_sub_days(margin)
        .ok_or_else(invalid_margin)?;
    let expanded_end = nominal_end
        .checked_add_days(margin)
        .ok_or_else(invalid_margin)?;

    Ok(PayPeriodRange {
        nominal_start,
        nominal_end,
        expanded_start,
        expanded_end,
        label: format!("{} a {}", nominal_start, nominal_end),
    })
}

/// The day before the first day of the following month.
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
