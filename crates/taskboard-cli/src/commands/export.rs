use anyhow::Result;
use owo_colors::OwoColorize;
use taskboard_core::repository::TaskRepository;

use crate::cli::ExportCommand;

pub async fn export_board(repo: &impl TaskRepository, command: ExportCommand) -> Result<()> {
    repo.export(&command.path).await?;
    println!(
        "{} Exported board to {}",
        "✓".green().bold(),
        command.path.display()
    );
    Ok(())
}
