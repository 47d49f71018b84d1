//! Short human-readable labels for recurrence rules.

use crate::models::{Pattern, RecurrenceRule};

const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// `1` -> `"1st"`, `12` -> `"12th"`, `53` -> `"53rd"`.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Abbreviated weekday name for a Sunday-based index.
pub fn weekday_abbreviation(index: u32) -> Option<&'static str> {
    WEEKDAY_ABBREVIATIONS.get(index as usize).copied()
}

/// Renders `rule` as a label such as "Weekly on Mon, Wed" or
/// "3rd Tuesday of quarter". Malformed rules get a generic label.
pub fn format_recurrence(rule: &RecurrenceRule) -> String {
    match rule.pattern {
        Pattern::Weekly => with_weekdays("Weekly", rule),
        Pattern::Biweekly => with_weekdays("Every 2 weeks", rule),
        Pattern::Monthly => with_day_of_month("Monthly", rule),
        Pattern::Quarterly => with_day_of_month("Quarterly", rule),
        Pattern::Yearly => "Yearly".to_string(),
        Pattern::BusinessDays => match rule.interval_or_default() {
            0 | 1 => "Every business day".to_string(),
            n => format!("Every {} business days", n),
        },
        Pattern::NthWeekday => {
            let weekday = rule
                .weekdays
                .first()
                .and_then(|index| WEEKDAY_NAMES.get(*index as usize));
            match (rule.nth_week, weekday) {
                (Some(nth), Some(name)) if nth > 0 => {
                    format!("{} {} of {}", ordinal(nth), name, rule.scope_or_default())
                }
                _ => "Nth weekday".to_string(),
            }
        }
        Pattern::Unrecognized(_) => "Custom recurrence".to_string(),
    }
}

fn with_weekdays(prefix: &str, rule: &RecurrenceRule) -> String {
    let mut indices = rule.weekdays.clone();
    indices.sort_unstable();
    indices.dedup();
    let names: Vec<&str> = indices
        .into_iter()
        .filter_map(weekday_abbreviation)
        .collect();

    if names.is_empty() {
        prefix.to_string()
    } else {
        format!("{} on {}", prefix, names.join(", "))
    }
}

fn with_day_of_month(prefix: &str, rule: &RecurrenceRule) -> String {
    match rule.day_of_month {
        Some(day) if day > 0 => format!("{} on the {}", prefix, ordinal(day)),
        _ => prefix.to_string(),
    }
}
