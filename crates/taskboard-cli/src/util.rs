use anyhow::{anyhow, Result};
use taskboard_core::error::CoreError;
use taskboard_core::models::Task;
use taskboard_core::repository::TaskRepository;

/// Characters of an id shown in tables and messages.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// Resolves a full id or a unique id prefix to the matching task.
pub async fn resolve_task(repo: &impl TaskRepository, short_id: &str) -> Result<Task> {
    let short_id = short_id.trim();
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }

    let mut tasks = repo.find_tasks_by_short_id_prefix(short_id).await?;
    if let Some(exact) = tasks.iter().position(|t| t.id == short_id) {
        return Ok(tasks.swap_remove(exact));
    }

    match tasks.len() {
        1 => Ok(tasks.remove(0)),
        0 => Err(anyhow!(CoreError::NotFound(format!(
            "No task found with ID prefix '{}'",
            short_id
        )))),
        _ => {
            let task_info: Vec<(String, String)> =
                tasks.into_iter().map(|t| (t.id, t.title)).collect();
            Err(anyhow!(CoreError::AmbiguousId(task_info)))
        }
    }
}
