use chrono::NaiveDate;
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use taskboard_core::calendar::format_iso;
use taskboard_core::format::format_recurrence;
use taskboard_core::models::{Task, TaskPriority, TaskStatus};

use crate::util::short_id;

pub fn display_tasks(tasks: &[Task], today: NaiveDate) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Title", "Status", "Priority", "Due", "Repeats", "Labels",
    ]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(&task.id)));

        let mut display_title = String::new();
        if task.is_recurring() {
            display_title.push('↻');
            display_title.push(' ');
        }
        display_title.push_str(&task.title);

        let mut title_cell = Cell::new(display_title);
        title_cell = match task.status {
            TaskStatus::Done => title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey),
            TaskStatus::Someday => title_cell.fg(Color::DarkGrey),
            _ => match task.priority {
                TaskPriority::Critical => title_cell
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                TaskPriority::High => title_cell.fg(Color::Red),
                TaskPriority::Medium => title_cell.fg(Color::Yellow),
                TaskPriority::Low => title_cell.fg(Color::Green),
                TaskPriority::None => title_cell,
            },
        };
        row.add_cell(title_cell);

        let status_cell = Cell::new(task.status.to_string());
        row.add_cell(match task.status {
            TaskStatus::Done => status_cell.fg(Color::Green),
            TaskStatus::InProgress => status_cell.fg(Color::Cyan),
            TaskStatus::Blocked => status_cell.fg(Color::Red),
            _ => status_cell,
        });

        row.add_cell(Cell::new(task.priority.to_string()));
        row.add_cell(due_cell(task, today));
        row.add_cell(Cell::new(
            task.recurrence
                .as_ref()
                .map(format_recurrence)
                .unwrap_or_default(),
        ));
        row.add_cell(Cell::new(task.labels.join(", ")));
        table.add_row(row);
    }

    println!("{table}");
}

fn due_cell(task: &Task, today: NaiveDate) -> Cell {
    let Some(due) = task.due_date else {
        return Cell::new("");
    };

    let text = format!("{} ({})", format_iso(due), relative_day(due, today));
    if task.is_done() {
        Cell::new(text)
    } else if due < today {
        Cell::new(text).fg(Color::Red)
    } else if due == today {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text)
    }
}

/// "today", "in 3 days", "a week ago".
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "today".to_string()
    } else {
        HumanTime::from(date - today).to_string()
    }
}

pub fn display_names(header: &str, names: &[(String, usize)]) {
    if names.is_empty() {
        println!("No {} found.", header.to_lowercase());
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![header, "Open tasks"]);
    for (name, count) in names {
        table.add_row(vec![Cell::new(name), Cell::new(count)]);
    }
    println!("{table}");
}
