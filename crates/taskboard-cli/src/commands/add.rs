use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use taskboard_core::calendar::format_iso;
use taskboard_core::format::format_recurrence;
use taskboard_core::models::NewTaskData;
use taskboard_core::repository::TaskRepository;

use crate::cli::AddCommand;
use crate::parser::{build_rule, parse_date};
use crate::util::short_id;

pub async fn add_task(repo: &impl TaskRepository, command: AddCommand) -> Result<()> {
    let due_date = command.due.as_deref().map(parse_date).transpose()?;
    let recurrence = build_rule(&command.recurrence)?;

    let new_task_data = NewTaskData {
        title: command.title,
        description: command.description,
        due_date,
        priority: command.priority,
        status: command.status,
        recurrence,
        labels: command.label,
        stakeholders: command.stakeholder,
    };

    let added_task = repo.add_task(new_task_data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    let kind = if added_task.is_recurring() {
        "Created recurring task"
    } else {
        "Created task"
    };
    println!(
        "{} {}: {}",
        "✓".style(success_style),
        kind,
        added_task.title.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        short_id(&added_task.id).yellow()
    );
    if let Some(due) = added_task.due_date {
        println!("  {} Due: {}", "→".style(info_style), format_iso(due).cyan());
    }
    if let Some(rule) = &added_task.recurrence {
        println!(
            "  {} Repeats: {}",
            "→".style(info_style),
            format_recurrence(rule)
        );
    }

    Ok(())
}
