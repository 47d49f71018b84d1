use chrono::{Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};
use taskboard_core::calendar::parse_iso;
use taskboard_core::models::{Pattern, RecurrenceRule};
use thiserror::Error;

use crate::cli::RecurrenceArgs;

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Failed to parse date '{0}': {1}")]
    InvalidDate(String, String),

    #[error("Unknown weekday '{0}' (use sun, mon, tue, wed, thu, fri, sat)")]
    InvalidWeekday(String),

    #[error("{0} rules need --{1}")]
    MissingOption(Pattern, &'static str),

    #[error("Recurrence pattern '{0}' is not supported")]
    UnsupportedPattern(Pattern),
}

/// Parses `YYYY-MM-DD`, falling back to natural language ("tomorrow",
/// "next friday") relative to the local date.
pub fn parse_date(input: &str) -> Result<NaiveDate, InputError> {
    let input = input.trim();
    if let Ok(date) = parse_iso(input) {
        return Ok(date);
    }

    parse_date_string(input, Local::now(), Dialect::Us)
        .map(|datetime| datetime.date_naive())
        .map_err(|e| InputError::InvalidDate(input.to_string(), e.to_string()))
}

/// Sunday-based weekday index from a name, abbreviation or digit.
pub fn parse_weekday(input: &str) -> Result<u32, InputError> {
    let index = match input.trim().to_lowercase().as_str() {
        "sun" | "sunday" | "0" => 0,
        "mon" | "monday" | "1" => 1,
        "tue" | "tues" | "tuesday" | "2" => 2,
        "wed" | "wednesday" | "3" => 3,
        "thu" | "thurs" | "thursday" | "4" => 4,
        "fri" | "friday" | "5" => 5,
        "sat" | "saturday" | "6" => 6,
        _ => return Err(InputError::InvalidWeekday(input.to_string())),
    };
    Ok(index)
}

/// Builds a rule from `--every` and its companion options.
///
/// Options that do not apply to the chosen pattern are ignored.
pub fn build_rule(args: &RecurrenceArgs) -> Result<Option<RecurrenceRule>, InputError> {
    let Some(pattern) = &args.every else {
        return Ok(None);
    };

    let weekdays = args
        .on
        .iter()
        .map(|day| parse_weekday(day))
        .collect::<Result<Vec<_>, _>>()?;

    let rule = match pattern {
        Pattern::Weekly => RecurrenceRule::weekly(weekdays),
        Pattern::Biweekly => RecurrenceRule::biweekly(weekdays),
        Pattern::Monthly => RecurrenceRule::monthly(args.day),
        Pattern::Quarterly => RecurrenceRule::quarterly(args.day),
        Pattern::Yearly => RecurrenceRule::yearly(),
        Pattern::BusinessDays => RecurrenceRule::business_days(args.interval.unwrap_or(1)),
        Pattern::NthWeekday => {
            let nth = args
                .nth
                .ok_or_else(|| InputError::MissingOption(pattern.clone(), "nth"))?;
            let weekday = weekdays
                .first()
                .copied()
                .ok_or_else(|| InputError::MissingOption(pattern.clone(), "on"))?;
            RecurrenceRule::nth_weekday(nth, weekday, args.scope.unwrap_or_default())
        }
        Pattern::Unrecognized(_) => return Err(InputError::UnsupportedPattern(pattern.clone())),
    };

    Ok(Some(rule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use taskboard_core::models::Scope;

    fn args(every: Pattern) -> RecurrenceArgs {
        RecurrenceArgs {
            every: Some(every),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_date(" 2026-03-14 "),
            Ok(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
        );
    }

    #[test]
    fn test_parse_natural_language_date() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date("today"), Ok(today));
        assert_eq!(parse_date("tomorrow"), Ok(today.succ_opt().unwrap()));
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(matches!(
            parse_date("not a date at all"),
            Err(InputError::InvalidDate(_, _))
        ));
    }

    #[rstest]
    #[case("sun", 0)]
    #[case("Monday", 1)]
    #[case("TUE", 2)]
    #[case("wed", 3)]
    #[case("thurs", 4)]
    #[case("fri", 5)]
    #[case("6", 6)]
    fn test_parse_weekday(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(parse_weekday(input), Ok(expected));
    }

    #[test]
    fn test_parse_invalid_weekday() {
        assert!(matches!(
            parse_weekday("someday"),
            Err(InputError::InvalidWeekday(_))
        ));
    }

    #[test]
    fn test_build_rule_without_every() {
        assert_eq!(build_rule(&RecurrenceArgs::default()), Ok(None));
    }

    #[test]
    fn test_build_weekly_rule() {
        let args = RecurrenceArgs {
            on: vec!["mon".to_string(), "wed".to_string()],
            day: Some(12),
            ..args(Pattern::Weekly)
        };
        assert_eq!(build_rule(&args), Ok(Some(RecurrenceRule::weekly([1, 3]))));
    }

    #[test]
    fn test_build_nth_weekday_rule() {
        let args = RecurrenceArgs {
            on: vec!["tue".to_string()],
            nth: Some(3),
            scope: Some(Scope::Quarter),
            ..args(Pattern::NthWeekday)
        };
        assert_eq!(
            build_rule(&args),
            Ok(Some(RecurrenceRule::nth_weekday(3, 2, Scope::Quarter)))
        );
    }

    #[test]
    fn test_build_nth_weekday_rule_requires_options() {
        assert_eq!(
            build_rule(&args(Pattern::NthWeekday)),
            Err(InputError::MissingOption(Pattern::NthWeekday, "nth"))
        );
        let without_day = RecurrenceArgs {
            nth: Some(2),
            ..args(Pattern::NthWeekday)
        };
        assert_eq!(
            build_rule(&without_day),
            Err(InputError::MissingOption(Pattern::NthWeekday, "on"))
        );
    }

    #[test]
    fn test_build_business_days_defaults_interval() {
        assert_eq!(
            build_rule(&args(Pattern::BusinessDays)),
            Ok(Some(RecurrenceRule::business_days(1)))
        );
    }
}
