use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::error::CoreError;

// ============================================================================
// Task enums
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    #[default]
    OneOff,
    Recurring,
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskType::OneOff => write!(f, "one-off"),
            TaskType::Recurring => write!(f, "recurring"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Waiting,
    Review,
    Blocked,
    /// Backlog: parked without a commitment.
    Someday,
    Done,
}

impl TaskStatus {
    /// Sort rank: active work first, parked and finished work last.
    pub fn rank(self) -> u8 {
        match self {
            TaskStatus::InProgress => 0,
            TaskStatus::Todo => 1,
            TaskStatus::Waiting | TaskStatus::Review | TaskStatus::Blocked => 2,
            TaskStatus::Someday | TaskStatus::Done => 3,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "todo"),
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Waiting => write!(f, "waiting"),
            TaskStatus::Review => write!(f, "review"),
            TaskStatus::Blocked => write!(f, "blocked"),
            TaskStatus::Someday => write!(f, "someday"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task status: {0}")]
pub struct ParseTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" | "not-started" => Ok(TaskStatus::Todo),
            "in-progress" | "active" => Ok(TaskStatus::InProgress),
            "waiting" => Ok(TaskStatus::Waiting),
            "review" => Ok(TaskStatus::Review),
            "blocked" => Ok(TaskStatus::Blocked),
            "someday" | "backlog" => Ok(TaskStatus::Someday),
            "done" => Ok(TaskStatus::Done),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Critical,
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl TaskPriority {
    /// Sort rank, most urgent first.
    pub fn rank(self) -> u8 {
        match self {
            TaskPriority::Critical => 0,
            TaskPriority::High => 1,
            TaskPriority::Medium => 2,
            TaskPriority::Low => 3,
            TaskPriority::None => 4,
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::Critical => write!(f, "critical"),
            TaskPriority::High => write!(f, "high"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::None => write!(f, "none"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0}")]
pub struct ParseTaskPriorityError(String);

impl FromStr for TaskPriority {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(TaskPriority::Critical),
            "high" => Ok(TaskPriority::High),
            "medium" => Ok(TaskPriority::Medium),
            "low" => Ok(TaskPriority::Low),
            "none" => Ok(TaskPriority::None),
            _ => Err(ParseTaskPriorityError(s.to_string())),
        }
    }
}

// ============================================================================
// Recurrence rules
// ============================================================================

/// Recurrence pattern kinds.
///
/// A pattern string the engine does not know is kept verbatim in
/// [`Pattern::Unrecognized`] and written back unchanged; such rules never
/// apply and have no next date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pattern {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
    BusinessDays,
    NthWeekday,
    Unrecognized(String),
}

impl Pattern {
    /// The known pattern stored under `name`, matched exactly.
    fn from_stored_name(name: &str) -> Option<Self> {
        match name {
            "weekly" => Some(Pattern::Weekly),
            "biweekly" => Some(Pattern::Biweekly),
            "monthly" => Some(Pattern::Monthly),
            "quarterly" => Some(Pattern::Quarterly),
            "yearly" => Some(Pattern::Yearly),
            "business-days" => Some(Pattern::BusinessDays),
            "nth-weekday" => Some(Pattern::NthWeekday),
            _ => None,
        }
    }
}

impl From<String> for Pattern {
    fn from(name: String) -> Self {
        Pattern::from_stored_name(&name).unwrap_or(Pattern::Unrecognized(name))
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        match pattern {
            Pattern::Unrecognized(name) => name,
            known => known.to_string(),
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Weekly => write!(f, "weekly"),
            Pattern::Biweekly => write!(f, "biweekly"),
            Pattern::Monthly => write!(f, "monthly"),
            Pattern::Quarterly => write!(f, "quarterly"),
            Pattern::Yearly => write!(f, "yearly"),
            Pattern::BusinessDays => write!(f, "business-days"),
            Pattern::NthWeekday => write!(f, "nth-weekday"),
            Pattern::Unrecognized(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid recurrence pattern: {0}")]
pub struct ParsePatternError(String);

impl FromStr for Pattern {
    type Err = ParsePatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Pattern::Weekly),
            "biweekly" => Ok(Pattern::Biweekly),
            "monthly" => Ok(Pattern::Monthly),
            "quarterly" => Ok(Pattern::Quarterly),
            "yearly" | "annually" => Ok(Pattern::Yearly),
            "business-days" | "weekdays" => Ok(Pattern::BusinessDays),
            "nth-weekday" => Ok(Pattern::NthWeekday),
            _ => Err(ParsePatternError(s.to_string())),
        }
    }
}

/// Counting window for `nth-weekday` rules.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Month,
    Quarter,
    Year,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Month => write!(f, "month"),
            Scope::Quarter => write!(f, "quarter"),
            Scope::Year => write!(f, "year"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid scope: {0}")]
pub struct ParseScopeError(String);

impl FromStr for Scope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" => Ok(Scope::Month),
            "quarter" => Ok(Scope::Quarter),
            "year" => Ok(Scope::Year),
            _ => Err(ParseScopeError(s.to_string())),
        }
    }
}

/// A repeating pattern attached to a recurring task.
///
/// Which fields matter depends on `pattern`:
/// - `weekly` / `biweekly`: `weekdays` (Sunday = 0 ... Saturday = 6)
/// - `monthly` / `quarterly`: `day_of_month`
/// - `business-days`: `interval` (defaults to 1)
/// - `nth-weekday`: `nth_week`, `weekdays[0]` and `scope` (defaults to month)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub pattern: Pattern,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekdays: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nth_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

impl RecurrenceRule {
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            weekdays: Vec::new(),
            interval: None,
            nth_week: None,
            day_of_month: None,
            scope: None,
        }
    }

    pub fn weekly(weekdays: impl Into<Vec<u32>>) -> Self {
        Self {
            weekdays: weekdays.into(),
            ..Self::new(Pattern::Weekly)
        }
    }

    pub fn biweekly(weekdays: impl Into<Vec<u32>>) -> Self {
        Self {
            weekdays: weekdays.into(),
            ..Self::new(Pattern::Biweekly)
        }
    }

    pub fn monthly(day_of_month: Option<u32>) -> Self {
        Self {
            day_of_month,
            ..Self::new(Pattern::Monthly)
        }
    }

    pub fn quarterly(day_of_month: Option<u32>) -> Self {
        Self {
            day_of_month,
            ..Self::new(Pattern::Quarterly)
        }
    }

    pub fn yearly() -> Self {
        Self::new(Pattern::Yearly)
    }

    pub fn business_days(interval: u32) -> Self {
        Self {
            interval: Some(interval),
            ..Self::new(Pattern::BusinessDays)
        }
    }

    pub fn nth_weekday(nth_week: u32, weekday: u32, scope: Scope) -> Self {
        Self {
            weekdays: vec![weekday],
            nth_week: Some(nth_week),
            scope: Some(scope),
            ..Self::new(Pattern::NthWeekday)
        }
    }

    /// Counting window, `month` when unset.
    pub fn scope_or_default(&self) -> Scope {
        self.scope.unwrap_or_default()
    }

    /// Business-day step, 1 when unset.
    pub fn interval_or_default(&self) -> u32 {
        self.interval.unwrap_or(1)
    }

    /// Strict well-formedness check for rules entering the store.
    ///
    /// The evaluator never calls this: it answers `false`/`None` for
    /// malformed rules instead of failing.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(day) = self.weekdays.iter().find(|day| **day > 6) {
            return Err(CoreError::InvalidRule(format!(
                "weekday index {} is outside 0 (Sunday) to 6 (Saturday)",
                day
            )));
        }

        match &self.pattern {
            Pattern::Weekly | Pattern::Biweekly | Pattern::Yearly => Ok(()),
            Pattern::Monthly | Pattern::Quarterly => match self.day_of_month {
                Some(day) if !(1..=31).contains(&day) => Err(CoreError::InvalidRule(format!(
                    "day of month {} is outside 1-31",
                    day
                ))),
                _ => Ok(()),
            },
            Pattern::BusinessDays => match self.interval {
                Some(0) => Err(CoreError::InvalidRule(
                    "business-day interval must be at least 1".to_string(),
                )),
                _ => Ok(()),
            },
            Pattern::NthWeekday => {
                match self.nth_week {
                    None => {
                        return Err(CoreError::InvalidRule(
                            "nth-weekday rules need an nth week".to_string(),
                        ))
                    }
                    Some(nth) if !(1..=53).contains(&nth) => {
                        return Err(CoreError::InvalidRule(format!(
                            "nth week {} is outside 1-53",
                            nth
                        )))
                    }
                    Some(_) => {}
                }
                if self.weekdays.is_empty() {
                    return Err(CoreError::InvalidRule(
                        "nth-weekday rules need a target weekday".to_string(),
                    ));
                }
                Ok(())
            }
            Pattern::Unrecognized(name) => Err(CoreError::InvalidRule(format!(
                "unrecognized recurrence pattern '{}'",
                name
            ))),
        }
    }
}

// ============================================================================
// Tasks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    /// One-off: the due date. Recurring: the date of this instance, advanced
    /// by creating a successor each time an instance is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// The series stops matching any date strictly after this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
    /// Id of the task that started the series. Display grouping only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_recurring_id: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stakeholders: Vec<String>,
    /// Absent on tasks written before creation stamps were recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_recurring(&self) -> bool {
        self.task_type == TaskType::Recurring
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Id shared by every instance of this task's series.
    pub fn series_id(&self) -> &str {
        self.parent_recurring_id.as_deref().unwrap_or(&self.id)
    }
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: "".to_string(),
            description: None,
            task_type: TaskType::OneOff,
            status: TaskStatus::Todo,
            priority: TaskPriority::None,
            due_date: None,
            ended_at: None,
            recurrence: None,
            parent_recurring_id: None,
            sort_order: 0,
            labels: Vec::new(),
            stakeholders: Vec::new(),
            created_at: None,
            completed_at: None,
        }
    }
}

/// The persisted board document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardData {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub stakeholders: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    /// When present the task becomes the first instance of a recurring series.
    pub recurrence: Option<RecurrenceRule>,
    pub labels: Vec<String>,
    pub stakeholders: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    /// Replaces the rule of a recurring task.
    pub recurrence: Option<RecurrenceRule>,
    pub add_labels: Vec<String>,
    pub remove_labels: Vec<String>,
}

#[derive(Debug)]
pub enum CompletionResult {
    Single(Task),
    /// `next` is `None` when the rule yields no further date or the series
    /// ended before it.
    Recurring { completed: Task, next: Option<Task> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("todo", TaskStatus::Todo)]
    #[case("In-Progress", TaskStatus::InProgress)]
    #[case("backlog", TaskStatus::Someday)]
    #[case("done", TaskStatus::Done)]
    fn test_parse_status(#[case] input: &str, #[case] expected: TaskStatus) {
        assert_eq!(input.parse::<TaskStatus>(), Ok(expected));
    }

    #[test]
    fn test_parse_invalid_values() {
        assert!("later".parse::<TaskStatus>().is_err());
        assert!("urgent".parse::<TaskPriority>().is_err());
        assert!("daily".parse::<Pattern>().is_err());
        assert!("week".parse::<Scope>().is_err());
    }

    #[test]
    fn test_status_rank_groups() {
        assert!(TaskStatus::InProgress.rank() < TaskStatus::Todo.rank());
        assert!(TaskStatus::Todo.rank() < TaskStatus::Waiting.rank());
        assert_eq!(TaskStatus::Review.rank(), TaskStatus::Blocked.rank());
        assert_eq!(TaskStatus::Someday.rank(), TaskStatus::Done.rank());
    }

    #[test]
    fn test_rule_serializes_camel_case_without_absent_fields() {
        let rule = RecurrenceRule::nth_weekday(2, 1, Scope::Quarter);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pattern": "nth-weekday",
                "weekdays": [1],
                "nthWeek": 2,
                "scope": "quarter"
            })
        );
    }

    #[test]
    fn test_unknown_pattern_deserializes_as_unrecognized() {
        let rule: RecurrenceRule =
            serde_json::from_str(r#"{"pattern": "fortnightly", "weekdays": [2]}"#).unwrap();
        assert_eq!(rule.pattern, Pattern::Unrecognized("fortnightly".to_string()));
        assert_eq!(rule.weekdays, vec![2]);

        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["pattern"], "fortnightly");
    }

    #[test]
    fn test_task_without_created_at_stays_unstamped() {
        let task: Task =
            serde_json::from_str(r#"{"id": "old-1", "title": "From an older board"}"#).unwrap();
        assert_eq!(task.created_at, None);

        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("createdAt").is_none());
    }

    #[rstest]
    #[case("weekly", Pattern::Weekly)]
    #[case("business-days", Pattern::BusinessDays)]
    #[case("nth-weekday", Pattern::NthWeekday)]
    #[case("Weekly", Pattern::Unrecognized("Weekly".to_string()))]
    #[case("annually", Pattern::Unrecognized("annually".to_string()))]
    fn test_stored_pattern_names(#[case] name: &str, #[case] expected: Pattern) {
        let pattern: Pattern = serde_json::from_value(serde_json::json!(name)).unwrap();
        assert_eq!(pattern, expected);
        assert_eq!(serde_json::to_value(&pattern).unwrap(), name);
    }

    #[test]
    fn test_task_round_trips_through_json() {
        let json = r#"{
            "id": "t-1",
            "title": "Pay rent",
            "type": "recurring",
            "status": "todo",
            "priority": "high",
            "dueDate": "2026-02-01",
            "endedAt": "2026-12-31",
            "recurrence": {"pattern": "monthly", "dayOfMonth": 1},
            "parentRecurringId": "t-0",
            "sortOrder": 4,
            "labels": ["home"],
            "createdAt": "2026-01-01T09:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.is_recurring());
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 2, 1));
        assert_eq!(task.series_id(), "t-0");

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["dueDate"], "2026-02-01");
        assert_eq!(value["type"], "recurring");
        assert!(value.get("description").is_none());
        assert!(value.get("completedAt").is_none());
        assert!(value.get("stakeholders").is_none());

        let again: Task = serde_json::from_value(value).unwrap();
        assert_eq!(again, task);
    }

    #[rstest]
    #[case(RecurrenceRule::weekly([1, 3]))]
    #[case(RecurrenceRule::monthly(Some(31)))]
    #[case(RecurrenceRule::monthly(None))]
    #[case(RecurrenceRule::business_days(3))]
    #[case(RecurrenceRule::nth_weekday(53, 0, Scope::Year))]
    #[case(RecurrenceRule::yearly())]
    fn test_validate_accepts_well_formed_rules(#[case] rule: RecurrenceRule) {
        assert!(rule.validate().is_ok());
    }

    #[rstest]
    #[case(RecurrenceRule::weekly([7]))]
    #[case(RecurrenceRule::quarterly(Some(0)))]
    #[case(RecurrenceRule::business_days(0))]
    #[case(RecurrenceRule::nth_weekday(54, 1, Scope::Month))]
    #[case(RecurrenceRule { nth_week: None, ..RecurrenceRule::nth_weekday(1, 1, Scope::Month) })]
    #[case(RecurrenceRule { weekdays: vec![], ..RecurrenceRule::nth_weekday(1, 1, Scope::Month) })]
    #[case(RecurrenceRule::new(Pattern::Unrecognized("hourly".to_string())))]
    fn test_validate_rejects_malformed_rules(#[case] rule: RecurrenceRule) {
        assert!(matches!(rule.validate(), Err(CoreError::InvalidRule(_))));
    }
}
