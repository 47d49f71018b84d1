use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use taskboard_core::classify::tasks_for_date;
use taskboard_core::repository::TaskRepository;

use crate::cli::DayCommand;
use crate::parser::parse_date;
use crate::views::table::{display_tasks, relative_day};

pub async fn show_day(repo: &impl TaskRepository, command: DayCommand, today: NaiveDate) -> Result<()> {
    let date = match command.date.as_deref() {
        Some(input) => parse_date(input)?,
        None => today,
    };

    let board = repo.load_board().await?;
    let tasks = tasks_for_date(&board.tasks, date);

    println!(
        "{} ({})",
        date.format("%A, %B %-d, %Y").to_string().bold(),
        relative_day(date, today)
    );
    display_tasks(&tasks, today);

    Ok(())
}
