use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use taskboard_core::calendar::format_iso;
use taskboard_core::error::CoreError;
use taskboard_core::format::format_recurrence;
use taskboard_core::recurrence::preview_occurrences;
use taskboard_core::repository::TaskRepository;

use crate::cli::PreviewCommand;
use crate::util::resolve_task;

pub async fn preview_task(
    repo: &impl TaskRepository,
    command: PreviewCommand,
    today: NaiveDate,
) -> Result<()> {
    let task = resolve_task(repo, &command.id).await?;
    let rule = task.recurrence.as_ref().ok_or_else(|| {
        anyhow!(CoreError::InvalidInput(format!(
            "Task '{}' is not recurring",
            task.title
        )))
    })?;

    println!("{}: {}", task.title.bold(), format_recurrence(rule));
    if let Some(due) = task.due_date {
        println!("  current  {} ({})", format_iso(due).cyan(), due.format("%a"));
    }

    let from = task.due_date.unwrap_or(today);
    let upcoming: Vec<NaiveDate> = preview_occurrences(rule, from, command.count)
        .into_iter()
        .take_while(|date| task.ended_at.map_or(true, |ended| *date <= ended))
        .collect();

    if upcoming.is_empty() {
        println!("  No upcoming occurrences.");
        return Ok(());
    }

    for (index, date) in upcoming.iter().enumerate() {
        println!("  {:>7}  {} ({})", index + 1, format_iso(*date), date.format("%a"));
    }

    Ok(())
}
