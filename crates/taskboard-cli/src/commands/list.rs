use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::{OwoColorize, Style};
use taskboard_core::classify::{group_by_section, Section};
use taskboard_core::models::Task;
use taskboard_core::repository::TaskRepository;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::views::table::display_tasks;

pub async fn list_tasks(
    repo: &impl TaskRepository,
    command: ListCommand,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    let board = repo.load_board().await?;
    let tasks: Vec<Task> = board
        .tasks
        .into_iter()
        .filter(|task| command.all || !task.is_done())
        .collect();

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    for (section, tasks) in group_by_section(&tasks, today) {
        if section == Section::Backlog && !config.show_backlog {
            continue;
        }

        let style = match section {
            Section::Overdue => Style::new().red().bold(),
            Section::Today => Style::new().yellow().bold(),
            Section::Future => Style::new().blue().bold(),
            Section::Backlog => Style::new().bright_black().bold(),
        };
        println!("\n{} ({})", section.to_string().style(style), tasks.len());
        display_tasks(&tasks, today);
    }

    Ok(())
}
