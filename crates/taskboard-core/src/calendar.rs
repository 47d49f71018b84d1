//! Calendar primitives used by the recurrence engine.
//!
//! All functions operate on [`NaiveDate`] values: there is no time-of-day and
//! no timezone. Weekdays are indexed from Sunday (`0`) to Saturday (`6`),
//! matching the indices stored in a [`RecurrenceRule`](crate::models::RecurrenceRule).

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::error::CoreError;

/// Storage format for calendar dates (`yyyy-MM-dd`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Weekday index of `date`, Sunday = 0 ... Saturday = 6.
#[inline]
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Monday through Friday.
#[inline]
pub fn is_business_day(date: NaiveDate) -> bool {
    (1..=5).contains(&weekday_index(date))
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = start_of_month(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        // Only reachable in December of chrono's maximum year.
        None => 31,
    }
}

pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

pub fn add_weeks(date: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    add_days(date, weeks * 7)
}

/// Adds calendar months, clamping the day to the last day of the
/// destination month (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Adds calendar years. Feb 29 lands on Feb 28 in non-leap years.
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    add_months(date, years.checked_mul(12)?)
}

/// Re-points `date` to `day` of its month without clamping: days past the
/// end of the month roll over into the following month (April 31 is May 1)
/// and day 0 is the last day of the previous month.
pub fn with_day_overflowing(date: NaiveDate, day: u32) -> Option<NaiveDate> {
    add_days(start_of_month(date), i64::from(day) - 1)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the quarter containing `date` (Jan 1, Apr 1, Jul 1 or Oct 1).
pub fn start_of_quarter(date: NaiveDate) -> NaiveDate {
    let quarter_month = date.month0() / 3 * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), quarter_month, 1).unwrap_or(date)
}

pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

/// January, April, July or October.
#[inline]
pub fn is_quarter_start_month(date: NaiveDate) -> bool {
    date.month0() % 3 == 0
}

/// Last Monday-Friday day of the month containing `date`, found by walking
/// backward from the month's final calendar day.
pub fn last_business_day_of_month(date: NaiveDate) -> NaiveDate {
    let mut day = start_of_month(date)
        .with_day(days_in_month(date))
        .unwrap_or(date);
    while !is_business_day(day) {
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    day
}

/// Parses a `yyyy-MM-dd` date.
pub fn parse_iso(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDate(value.to_string()))
}

/// Formats a date as the 10-character `yyyy-MM-dd` storage string.
pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(value: &str) -> NaiveDate {
        parse_iso(value).unwrap()
    }

    #[rstest]
    #[case("2026-03-01", 0)] // Sunday
    #[case("2026-03-02", 1)]
    #[case("2026-03-06", 5)]
    #[case("2026-03-07", 6)]
    fn test_weekday_index_starts_on_sunday(#[case] value: &str, #[case] expected: u32) {
        assert_eq!(weekday_index(date(value)), expected);
    }

    #[rstest]
    #[case("2026-01-15", 31)]
    #[case("2026-02-01", 28)]
    #[case("2024-02-29", 29)]
    #[case("2026-04-30", 30)]
    #[case("2026-12-31", 31)]
    fn test_days_in_month(#[case] value: &str, #[case] expected: u32) {
        assert_eq!(days_in_month(date(value)), expected);
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(date("2026-01-31"), 1), Some(date("2026-02-28")));
        assert_eq!(add_months(date("2024-01-31"), 1), Some(date("2024-02-29")));
        assert_eq!(add_months(date("2026-11-30"), 3), Some(date("2027-02-28")));
    }

    #[test]
    fn test_add_years_handles_leap_day() {
        assert_eq!(add_years(date("2024-02-29"), 1), Some(date("2025-02-28")));
        assert_eq!(add_years(date("2026-06-15"), 1), Some(date("2027-06-15")));
    }

    #[test]
    fn test_with_day_overflowing_rolls_into_next_month() {
        assert_eq!(with_day_overflowing(date("2026-04-10"), 31), Some(date("2026-05-01")));
        assert_eq!(with_day_overflowing(date("2026-02-10"), 30), Some(date("2026-03-02")));
        assert_eq!(with_day_overflowing(date("2026-04-10"), 15), Some(date("2026-04-15")));
        assert_eq!(with_day_overflowing(date("2026-04-10"), 0), Some(date("2026-03-31")));
    }

    #[rstest]
    #[case("2026-02-17", "2026-01-01")]
    #[case("2026-04-01", "2026-04-01")]
    #[case("2026-09-30", "2026-07-01")]
    #[case("2026-12-31", "2026-10-01")]
    fn test_start_of_quarter(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(start_of_quarter(date(value)), date(expected));
    }

    #[test]
    fn test_period_starts() {
        assert_eq!(start_of_month(date("2026-08-19")), date("2026-08-01"));
        assert_eq!(start_of_year(date("2026-08-19")), date("2026-01-01"));
        assert!(is_quarter_start_month(date("2026-10-31")));
        assert!(!is_quarter_start_month(date("2026-11-01")));
    }

    #[rstest]
    #[case("2026-04-10", "2026-04-30")] // Thursday
    #[case("2026-05-10", "2026-05-29")] // May 31 is a Sunday
    #[case("2026-02-10", "2026-02-27")] // Feb 28 is a Saturday
    fn test_last_business_day_of_month(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(last_business_day_of_month(date(value)), date(expected));
    }

    #[test]
    fn test_parse_and_format_iso() {
        let parsed = parse_iso("2026-01-05").unwrap();
        assert_eq!(format_iso(parsed), "2026-01-05");
        assert!(matches!(parse_iso("05/01/2026"), Err(CoreError::InvalidDate(_))));
        assert!(matches!(parse_iso("2026-02-30"), Err(CoreError::InvalidDate(_))));
    }
}
