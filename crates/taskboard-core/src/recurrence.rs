//! Recurrence evaluation: "does this rule fall on this date" and "when is
//! the next occurrence".
//!
//! Everything here is a pure function of its arguments. Malformed or
//! incomplete rules never fail: predicates answer `false` and next-date
//! computations answer `None`.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{
    self, add_days, add_months, add_weeks, add_years, days_in_month, is_business_day,
    is_quarter_start_month, last_business_day_of_month, start_of_month, start_of_quarter,
    start_of_year, weekday_index, with_day_overflowing,
};
use crate::models::{Pattern, RecurrenceRule, Scope};

/// How far ahead [`initial_due_date`] looks for a matching day.
const SEED_SEARCH_DAYS: usize = 366;

/// Decides whether `rule` falls on `date`.
///
/// # Arguments
/// * `rule` - The recurrence rule to evaluate
/// * `date` - Calendar day to test
///
/// # Returns
/// * `bool` - `true` if the rule occurs on `date`
///
/// # Behavior
/// - `weekly` / `biweekly`: the weekday is listed, or no weekdays are listed.
///   The biweekly cadence is only enforced by [`next_occurrence`].
/// - `monthly`: the day-of-month matches; when the target day does not exist
///   in `date`'s month, only that month's last business day matches.
/// - `quarterly`: as `monthly`, restricted to Jan/Apr/Jul/Oct.
/// - `yearly`: never. The annual anchor is not part of the rule, so a yearly
///   series is tracked through its stored due date alone.
/// - `business-days`: Monday to Friday, regardless of interval.
/// - `nth-weekday`: the date is the nth occurrence of the target weekday,
///   counted from the first day of a month that is valid for the scope.
pub fn applies_to_date(rule: &RecurrenceRule, date: NaiveDate) -> bool {
    match rule.pattern {
        Pattern::Weekly | Pattern::Biweekly => {
            rule.weekdays.is_empty() || rule.weekdays.contains(&weekday_index(date))
        }
        Pattern::Monthly => matches_day_of_month(rule, date),
        Pattern::Quarterly => is_quarter_start_month(date) && matches_day_of_month(rule, date),
        Pattern::Yearly => false,
        Pattern::BusinessDays => is_business_day(date),
        Pattern::NthWeekday => matches_nth_weekday(rule, date),
        Pattern::Unrecognized(_) => false,
    }
}

fn matches_day_of_month(rule: &RecurrenceRule, date: NaiveDate) -> bool {
    let Some(target) = rule.day_of_month else {
        return false;
    };

    if target > days_in_month(date) {
        date == last_business_day_of_month(date)
    } else {
        date.day() == target
    }
}

fn matches_nth_weekday(rule: &RecurrenceRule, date: NaiveDate) -> bool {
    let (Some(nth), Some(&target)) = (rule.nth_week, rule.weekdays.first()) else {
        return false;
    };

    if weekday_index(date) != target {
        return false;
    }

    let in_scope = match rule.scope_or_default() {
        Scope::Month => true,
        Scope::Quarter => is_quarter_start_month(date),
        Scope::Year => date.month() == 1,
    };
    if !in_scope {
        return false;
    }

    let occurrences = start_of_month(date)
        .iter_days()
        .take_while(|day| *day <= date)
        .filter(|day| weekday_index(*day) == target)
        .count();

    occurrences == nth as usize
}

/// Computes the next scheduled date strictly after `from`.
///
/// # Arguments
/// * `rule` - The recurrence rule to step
/// * `from` - The date of the current occurrence (usually the completed
///   instance's due date, or today)
///
/// # Returns
/// * `Option<NaiveDate>` - The next occurrence, or `None` for unrecognized
///   or incomplete rules
///
/// # Behavior
/// - `weekly`: next listed weekday later this week, else the earliest listed
///   weekday next week; exactly 7 days later without weekdays.
/// - `biweekly`: the weekly result plus 7 days. There is no fixed parity
///   anchor, so the cadence follows whatever date it is stepped from.
/// - `monthly`: one calendar month later, on `day_of_month` (or `from`'s
///   day), clamped to the destination month's last day.
/// - `quarterly`: three calendar months later, re-pointed to `day_of_month`
///   without clamping (a missing day rolls into the following month).
/// - `yearly`: one calendar year later.
/// - `business-days`: `interval` Monday-Friday days after `from`.
/// - `nth-weekday`: the nth target weekday counted from the start of the
///   next month, quarter or year.
pub fn next_occurrence(rule: &RecurrenceRule, from: NaiveDate) -> Option<NaiveDate> {
    match rule.pattern {
        Pattern::Weekly => next_weekly(rule, from),
        Pattern::Biweekly => next_weekly(rule, from).and_then(|date| add_weeks(date, 1)),
        Pattern::Monthly => {
            let destination = add_months(from, 1)?;
            let target = rule.day_of_month.unwrap_or_else(|| from.day());
            destination.with_day(target.min(days_in_month(destination)))
        }
        Pattern::Quarterly => {
            let destination = add_months(from, 3)?;
            match rule.day_of_month {
                Some(day) => with_day_overflowing(destination, day),
                None => Some(destination),
            }
        }
        Pattern::Yearly => add_years(from, 1),
        Pattern::BusinessDays => next_business_day(from, rule.interval_or_default()),
        Pattern::NthWeekday => next_nth_weekday(rule, from),
        Pattern::Unrecognized(_) => None,
    }
}

fn next_weekly(rule: &RecurrenceRule, from: NaiveDate) -> Option<NaiveDate> {
    let mut weekdays: Vec<u32> = rule.weekdays.iter().copied().filter(|day| *day <= 6).collect();
    if weekdays.is_empty() {
        return add_weeks(from, 1);
    }
    weekdays.sort_unstable();
    weekdays.dedup();

    let current = weekday_index(from);
    let offset = match weekdays.iter().find(|day| **day > current) {
        Some(day) => day - current,
        None => 7 - current + weekdays[0],
    };
    add_days(from, i64::from(offset))
}

fn next_business_day(from: NaiveDate, interval: u32) -> Option<NaiveDate> {
    let mut current = add_days(from, 1)?;
    let mut counted = 0;
    loop {
        if is_business_day(current) {
            counted += 1;
            if counted >= interval {
                return Some(current);
            }
        }
        current = add_days(current, 1)?;
    }
}

fn next_nth_weekday(rule: &RecurrenceRule, from: NaiveDate) -> Option<NaiveDate> {
    let nth = rule.nth_week.filter(|nth| *nth > 0)?;
    let target = rule.weekdays.first().copied().filter(|day| *day <= 6)?;

    let scope_start = match rule.scope_or_default() {
        Scope::Month => add_months(start_of_month(from), 1)?,
        Scope::Quarter => add_months(start_of_quarter(from), 3)?,
        Scope::Year => add_years(start_of_year(from), 1)?,
    };

    let first = scope_start
        .iter_days()
        .take(7)
        .find(|day| weekday_index(*day) == target)?;
    add_weeks(first, i64::from(nth - 1))
}

/// [`next_occurrence`] in storage form, stepping from `from` or, when absent,
/// from `today`.
pub fn next_due_date(
    rule: &RecurrenceRule,
    from: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<String> {
    next_occurrence(rule, from.unwrap_or(today)).map(calendar::format_iso)
}

/// Due date for the first instance of a new series.
///
/// The first day from `today` on that the rule applies to; yearly rules
/// anchor on `today` itself. Falls back to [`next_occurrence`] when nothing
/// matches within a year.
pub fn initial_due_date(rule: &RecurrenceRule, today: NaiveDate) -> Option<NaiveDate> {
    if rule.pattern == Pattern::Yearly {
        return Some(today);
    }

    today
        .iter_days()
        .take(SEED_SEARCH_DAYS)
        .find(|day| applies_to_date(rule, *day))
        .or_else(|| next_occurrence(rule, today))
}

/// Up to `count` successive occurrences after `from`.
pub fn preview_occurrences(rule: &RecurrenceRule, from: NaiveDate, count: usize) -> Vec<NaiveDate> {
    std::iter::successors(next_occurrence(rule, from), |date| next_occurrence(rule, *date))
        .take(count)
        .collect()
}
