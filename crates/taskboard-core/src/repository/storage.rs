//! Reading and writing the board document, plus backup rotation.

use crate::error::CoreError;
use crate::models::BoardData;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

pub const BACKUP_PREFIX: &str = "tasks_backup_";
const BACKUP_EXTENSION: &str = ".json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Loads the board at `path`. A missing or blank file is an empty board.
pub async fn read_board(path: &Path) -> Result<BoardData, CoreError> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No data file yet, starting with an empty board");
            return Ok(BoardData::default());
        }
        Err(err) => return Err(err.into()),
    };

    if contents.trim().is_empty() {
        return Ok(BoardData::default());
    }

    let board: BoardData = serde_json::from_str(&contents)?;
    debug!(path = %path.display(), tasks = board.tasks.len(), "Loaded board");
    Ok(board)
}

/// Writes `board` as pretty-printed JSON, creating parent directories.
pub async fn write_board(path: &Path, board: &BoardData) -> Result<(), CoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(board)?;
    fs::write(path, json).await?;
    debug!(path = %path.display(), tasks = board.tasks.len(), "Saved board");
    Ok(())
}

pub fn backup_file_name(stamp: DateTime<Utc>) -> String {
    format!(
        "{}{}{}",
        BACKUP_PREFIX,
        stamp.format(BACKUP_TIMESTAMP_FORMAT),
        BACKUP_EXTENSION
    )
}

/// Copies the current data file into `backup_dir`.
///
/// Returns `None` when there is no data file to back up.
pub async fn create_backup(
    data_path: &Path,
    backup_dir: &Path,
    stamp: DateTime<Utc>,
) -> Result<Option<PathBuf>, CoreError> {
    if !fs::try_exists(data_path).await? {
        return Ok(None);
    }

    fs::create_dir_all(backup_dir).await?;
    let target = backup_dir.join(backup_file_name(stamp));
    fs::copy(data_path, &target).await?;
    debug!(backup = %target.display(), "Created backup");
    Ok(Some(target))
}

/// Backup files in `backup_dir`, oldest first.
pub async fn list_backups(backup_dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
    let mut entries = match fs::read_dir(backup_dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut backups = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_EXTENSION) {
            backups.push(entry.path());
        }
    }

    // Timestamps are zero-padded, so name order is age order.
    backups.sort();
    Ok(backups)
}

/// Deletes all but the newest `keep` backups. Returns how many were removed.
pub async fn prune_backups(backup_dir: &Path, keep: usize) -> Result<usize, CoreError> {
    let backups = list_backups(backup_dir).await?;
    let excess = backups.len().saturating_sub(keep);

    for path in backups.iter().take(excess) {
        fs::remove_file(path).await?;
    }

    if excess > 0 {
        info!(removed = excess, kept = keep, "Pruned old backups");
    }
    Ok(excess)
}
