use crate::error::CoreError;
use crate::models::{
    BoardData, CompletionResult, NewTaskData, Task, TaskPriority, TaskStatus, TaskType,
    UpdateTaskData,
};
use crate::recurrence::{initial_due_date, next_occurrence};
use crate::repository::{JsonRepository, TaskRepository};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

#[async_trait]
impl TaskRepository for JsonRepository {
    async fn load_board(&self) -> Result<BoardData, CoreError> {
        let _guard = self.lock().lock().await;
        self.read().await
    }

    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let title = data.title.trim().to_string();
        if title.is_empty() {
            return Err(CoreError::InvalidInput(
                "Task title cannot be empty".to_string(),
            ));
        }
        if let Some(rule) = &data.recurrence {
            rule.validate()?;
        }

        let _guard = self.lock().lock().await;
        let mut board = self.read().await?;

        let now = self.clock().now();
        let status = data.status.unwrap_or(TaskStatus::Todo);
        let due_date = match (&data.recurrence, data.due_date) {
            (_, Some(due)) => Some(due),
            (Some(rule), None) => initial_due_date(rule, self.clock().today()),
            (None, None) => None,
        };

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title,
            description: data.description.filter(|d| !d.trim().is_empty()),
            task_type: if data.recurrence.is_some() {
                TaskType::Recurring
            } else {
                TaskType::OneOff
            },
            status,
            priority: data.priority.unwrap_or(TaskPriority::None),
            due_date,
            ended_at: None,
            recurrence: data.recurrence,
            parent_recurring_id: None,
            sort_order: next_sort_order(&board),
            labels: normalize(&data.labels),
            stakeholders: normalize(&data.stakeholders),
            created_at: Some(now),
            completed_at: (status == TaskStatus::Done).then_some(now),
        };

        register(&mut board.labels, &task.labels);
        register(&mut board.stakeholders, &task.stakeholders);
        board.tasks.push(task.clone());
        self.write(&board).await?;

        debug!(id = %task.id, task_type = %task.task_type, "Added task");
        Ok(task)
    }

    async fn find_task_by_id(&self, id: &str) -> Result<Option<Task>, CoreError> {
        let board = self.load_board().await?;
        Ok(board.tasks.into_iter().find(|task| task.id == id))
    }

    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError> {
        let board = self.load_board().await?;
        Ok(board
            .tasks
            .into_iter()
            .filter(|task| task.id.starts_with(short_id))
            .collect())
    }

    async fn update_task(&self, id: &str, data: UpdateTaskData) -> Result<Task, CoreError> {
        if let Some(rule) = &data.recurrence {
            rule.validate()?;
        }

        let _guard = self.lock().lock().await;
        let mut board = self.read().await?;
        let index = position(&board, id)?;
        let now = self.clock().now();
        let today = self.clock().today();

        let task = &mut board.tasks[index];
        if let Some(title) = data.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(CoreError::InvalidInput(
                    "Task title cannot be empty".to_string(),
                ));
            }
            task.title = title;
        }
        if let Some(description) = data.description {
            task.description = description.filter(|d| !d.trim().is_empty());
        }
        if let Some(due_date) = data.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = data.priority {
            task.priority = priority;
        }
        if let Some(status) = data.status {
            task.completed_at = match status {
                TaskStatus::Done => task.completed_at.or(Some(now)),
                _ => None,
            };
            task.status = status;
        }
        if let Some(rule) = data.recurrence {
            if !task.is_recurring() {
                task.task_type = TaskType::Recurring;
                if task.due_date.is_none() {
                    task.due_date = initial_due_date(&rule, today);
                }
            }
            task.recurrence = Some(rule);
        }

        task.labels.retain(|label| !data.remove_labels.contains(label));
        for label in normalize(&data.add_labels) {
            if !task.labels.contains(&label) {
                task.labels.push(label);
            }
        }

        let updated = task.clone();
        register(&mut board.labels, &updated.labels);
        self.write(&board).await?;

        debug!(id = %updated.id, "Updated task");
        Ok(updated)
    }

    async fn delete_task(&self, id: &str) -> Result<(), CoreError> {
        let _guard = self.lock().lock().await;
        let mut board = self.read().await?;
        let index = position(&board, id)?;
        let removed = board.tasks.remove(index);
        self.write(&board).await?;

        debug!(id = %removed.id, "Deleted task");
        Ok(())
    }

    async fn complete_task(&self, id: &str) -> Result<CompletionResult, CoreError> {
        let _guard = self.lock().lock().await;
        let mut board = self.read().await?;
        let index = position(&board, id)?;

        if board.tasks[index].is_done() {
            return Err(CoreError::InvalidInput(format!(
                "Task '{}' is already done",
                board.tasks[index].title
            )));
        }

        let now = self.clock().now();
        let sort_order = next_sort_order(&board);
        let task = &mut board.tasks[index];
        task.status = TaskStatus::Done;
        task.completed_at = Some(now);
        let completed = task.clone();

        if !completed.is_recurring() {
            self.write(&board).await?;
            return Ok(CompletionResult::Single(completed));
        }

        let from = completed.due_date.unwrap_or_else(|| self.clock().today());
        let next_date = completed
            .recurrence
            .as_ref()
            .and_then(|rule| next_occurrence(rule, from))
            .filter(|date| completed.ended_at.map_or(true, |ended| *date <= ended));

        let next = match next_date {
            Some(due_date) => {
                let successor = Task {
                    id: Uuid::new_v4().to_string(),
                    title: completed.title.clone(),
                    description: completed.description.clone(),
                    task_type: TaskType::Recurring,
                    status: TaskStatus::Todo,
                    priority: completed.priority,
                    due_date: Some(due_date),
                    ended_at: completed.ended_at,
                    recurrence: completed.recurrence.clone(),
                    parent_recurring_id: Some(completed.series_id().to_string()),
                    sort_order,
                    labels: completed.labels.clone(),
                    stakeholders: completed.stakeholders.clone(),
                    created_at: Some(now),
                    completed_at: None,
                };
                board.tasks.push(successor.clone());
                debug!(
                    series = %completed.series_id(),
                    due = %due_date,
                    "Created next recurring instance"
                );
                Some(successor)
            }
            None => {
                info!(
                    id = %completed.id,
                    series = %completed.series_id(),
                    "No further occurrence for recurring task"
                );
                None
            }
        };

        self.write(&board).await?;
        Ok(CompletionResult::Recurring { completed, next })
    }

    async fn end_series(&self, id: &str, ended_at: NaiveDate) -> Result<Vec<Task>, CoreError> {
        let _guard = self.lock().lock().await;
        let mut board = self.read().await?;
        let index = position(&board, id)?;

        let task = &board.tasks[index];
        if !task.is_recurring() {
            return Err(CoreError::InvalidInput(format!(
                "Task '{}' is not recurring",
                task.title
            )));
        }
        let series = task.series_id().to_string();

        let mut ended = Vec::new();
        for task in board
            .tasks
            .iter_mut()
            .filter(|t| t.is_recurring() && !t.is_done() && t.series_id() == series)
        {
            task.ended_at = Some(ended_at);
            ended.push(task.clone());
        }

        self.write(&board).await?;
        info!(series = %series, ended_at = %ended_at, instances = ended.len(), "Ended series");
        Ok(ended)
    }

    async fn export(&self, destination: &Path) -> Result<(), CoreError> {
        let _guard = self.lock().lock().await;
        if !fs::try_exists(self.data_path()).await? {
            return Err(CoreError::NotFound("No data file to export".to_string()));
        }

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::copy(self.data_path(), destination).await?;
        info!(destination = %destination.display(), "Exported board");
        Ok(())
    }
}

fn position(board: &BoardData, id: &str) -> Result<usize, CoreError> {
    board
        .tasks
        .iter()
        .position(|task| task.id == id)
        .ok_or_else(|| CoreError::NotFound(id.to_string()))
}

fn next_sort_order(board: &BoardData) -> i64 {
    board
        .tasks
        .iter()
        .map(|task| task.sort_order)
        .max()
        .map_or(0, |max| max + 1)
}

/// Trimmed, non-empty, deduplicated, in input order.
fn normalize(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        if !out.iter().any(|existing| existing == value) {
            out.push(value.to_string());
        }
    }
    out
}

fn register(registry: &mut Vec<String>, values: &[String]) {
    for value in values {
        if !registry.contains(value) {
            registry.push(value.clone());
        }
    }
}
