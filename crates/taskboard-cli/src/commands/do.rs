use anyhow::Result;
use owo_colors::OwoColorize;
use taskboard_core::calendar::format_iso;
use taskboard_core::models::CompletionResult;
use taskboard_core::repository::TaskRepository;

use crate::cli::DoCommand;
use crate::util::{resolve_task, short_id};

pub async fn do_task(repo: &impl TaskRepository, command: DoCommand) -> Result<()> {
    let task = resolve_task(repo, &command.id).await?;

    match repo.complete_task(&task.id).await? {
        CompletionResult::Single(task) => {
            println!("{} Completed task: '{}'", "✓".green().bold(), task.title);
        }
        CompletionResult::Recurring { completed, next } => {
            println!("{} Completed task: '{}'", "✓".green().bold(), completed.title);
            match next {
                Some(next) => println!(
                    "  {} Next '{}' due {} ({})",
                    "↻".blue(),
                    next.title,
                    next.due_date.map(format_iso).unwrap_or_default().cyan(),
                    short_id(&next.id).yellow()
                ),
                None => println!(
                    "  {} Series has no further occurrences",
                    "■".bright_black()
                ),
            }
        }
    }

    Ok(())
}
