//! Task visibility: which tasks show up on a given day, which board section
//! they belong to, and in what order.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{Pattern, Task, TaskStatus};
use crate::recurrence::applies_to_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Overdue,
    Today,
    Future,
    Backlog,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Overdue => write!(f, "Overdue"),
            Section::Today => write!(f, "Today"),
            Section::Future => write!(f, "Future"),
            Section::Backlog => write!(f, "Backlog"),
        }
    }
}

/// Decides whether `task` should be shown on `date`.
///
/// - One-off tasks, and completed recurring instances, only on their due date.
/// - Open recurring instances wherever their rule applies, but never before
///   their stored due date and never after the series' `ended_at`.
pub fn is_relevant_on_date(task: &Task, date: NaiveDate) -> bool {
    if !task.is_recurring() || task.is_done() {
        return task.due_date == Some(date);
    }

    let Some(rule) = &task.recurrence else {
        return false;
    };

    applies_to_date(rule, date)
        && task.due_date.map_or(true, |due| due <= date)
        && task.ended_at.map_or(true, |ended| date <= ended)
}

/// Date-based section of a task relative to `today`.
///
/// Done and `someday` tasks are backlog. Tasks without a due date need
/// attention now and land in today.
pub fn section_for(task: &Task, today: NaiveDate) -> Section {
    if task.is_done() || task.status == TaskStatus::Someday {
        return Section::Backlog;
    }

    match task.due_date {
        None => Section::Today,
        Some(due) => match due.cmp(&today) {
            Ordering::Less => Section::Overdue,
            Ordering::Equal => Section::Today,
            Ordering::Greater => Section::Future,
        },
    }
}

/// Section used by the board view.
///
/// Open recurring instances are `Today` whenever they are relevant today and
/// `Backlog` once their series ended before today; everything else falls
/// back to [`section_for`].
pub fn board_section(task: &Task, today: NaiveDate) -> Section {
    if !task.is_recurring() || task.is_done() || task.status == TaskStatus::Someday {
        return section_for(task, today);
    }

    if task.ended_at.is_some_and(|ended| ended < today) {
        return Section::Backlog;
    }

    if is_relevant_on_date(task, today) {
        return Section::Today;
    }

    section_for(task, today)
}

/// Board ordering: priority, then status, then the manual sort index.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.priority
        .rank()
        .cmp(&b.priority.rank())
        .then_with(|| a.status.rank().cmp(&b.status.rank()))
        .then_with(|| a.sort_order.cmp(&b.sort_order))
}

/// Stable sort by [`compare_tasks`]; ties keep their input order.
pub fn sort_tasks(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(compare_tasks);
    tasks
}

/// Tasks to show on `date`, sorted.
///
/// Yearly rules never match through the rule predicate, so open yearly
/// instances are shown on their stored due date instead.
pub fn tasks_for_date(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    let relevant = tasks
        .iter()
        .filter(|task| is_relevant_on_date(task, date) || is_yearly_due_on(task, date))
        .cloned()
        .collect();
    sort_tasks(relevant)
}

fn is_yearly_due_on(task: &Task, date: NaiveDate) -> bool {
    task.is_recurring()
        && task
            .recurrence
            .as_ref()
            .is_some_and(|rule| rule.pattern == Pattern::Yearly)
        && task.due_date == Some(date)
        && task.ended_at.map_or(true, |ended| date <= ended)
}

/// Groups tasks by [`board_section`], each group sorted.
pub fn group_by_section(tasks: &[Task], today: NaiveDate) -> BTreeMap<Section, Vec<Task>> {
    let mut groups: BTreeMap<Section, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        groups
            .entry(board_section(task, today))
            .or_default()
            .push(task.clone());
    }
    groups
        .into_iter()
        .map(|(section, tasks)| (section, sort_tasks(tasks)))
        .collect()
}
