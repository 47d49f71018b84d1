use anyhow::Result;
use owo_colors::OwoColorize;
use taskboard_core::models::UpdateTaskData;
use taskboard_core::repository::TaskRepository;

use crate::cli::EditCommand;
use crate::parser::{build_rule, parse_date};
use crate::util::{resolve_task, short_id};

pub async fn edit_task(repo: &impl TaskRepository, command: EditCommand) -> Result<()> {
    let task = resolve_task(repo, &command.id).await?;

    let description = if command.description_clear {
        Some(None)
    } else {
        command.description.map(Some)
    };

    let due_date = if command.due_clear {
        Some(None)
    } else {
        command.due.as_deref().map(parse_date).transpose()?.map(Some)
    };

    let update_data = UpdateTaskData {
        title: command.title,
        description,
        due_date,
        priority: command.priority,
        status: command.status,
        recurrence: build_rule(&command.recurrence)?,
        add_labels: command.add_label,
        remove_labels: command.remove_label,
    };

    let updated = repo.update_task(&task.id, update_data).await?;
    println!(
        "{} Updated task {}: {}",
        "✓".green().bold(),
        short_id(&updated.id).yellow(),
        updated.title
    );

    Ok(())
}
