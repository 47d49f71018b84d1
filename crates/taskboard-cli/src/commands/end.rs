use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use taskboard_core::calendar::format_iso;
use taskboard_core::repository::TaskRepository;

use crate::cli::EndCommand;
use crate::parser::parse_date;
use crate::util::resolve_task;

pub async fn end_series(repo: &impl TaskRepository, command: EndCommand, today: NaiveDate) -> Result<()> {
    let ended_at = match command.on.as_deref() {
        Some(input) => parse_date(input)?,
        None => today,
    };
    let task = resolve_task(repo, &command.id).await?;
    let updated = repo.end_series(&task.id, ended_at).await?;

    println!(
        "{} Ended series '{}' after {} ({} open instance(s) updated)",
        "■".yellow().bold(),
        task.title,
        format_iso(ended_at).cyan(),
        updated.len()
    );

    Ok(())
}
