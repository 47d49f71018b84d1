use crate::clock::{Clock, SystemClock};
use crate::error::CoreError;
use crate::models::{BoardData, CompletionResult, NewTaskData, Task, UpdateTaskData};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod storage;
pub mod tasks;

/// Default number of backups kept beside the data file.
pub const DEFAULT_MAX_BACKUPS: usize = 5;

/// Name of the backup directory created next to the data file.
pub const BACKUP_DIR_NAME: &str = "backups";

/// Task lifecycle operations over a persisted board.
#[async_trait]
pub trait TaskRepository {
    async fn load_board(&self) -> Result<BoardData, CoreError>;
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: &str) -> Result<Option<Task>, CoreError>;
    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError>;
    async fn update_task(&self, id: &str, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: &str) -> Result<(), CoreError>;
    async fn complete_task(&self, id: &str) -> Result<CompletionResult, CoreError>;
    async fn end_series(&self, id: &str, ended_at: NaiveDate) -> Result<Vec<Task>, CoreError>;
    async fn export(&self, destination: &Path) -> Result<(), CoreError>;
}

/// Board stored as a single pretty-printed JSON document.
///
/// Every operation loads the document, applies its change in memory and
/// writes the whole document back, rotating a timestamped backup first.
/// Operations are serialized through an async mutex, so a load-modify-save
/// cycle never interleaves with another one on the same repository.
pub struct JsonRepository {
    data_path: PathBuf,
    max_backups: usize,
    clock: Arc<dyn Clock>,
    lock: Mutex<()>,
}

impl JsonRepository {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            max_backups: DEFAULT_MAX_BACKUPS,
            clock: Arc::new(SystemClock),
            lock: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// `backups/` beside the data file.
    pub fn backup_dir(&self) -> PathBuf {
        self.data_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(BACKUP_DIR_NAME)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn lock(&self) -> &Mutex<()> {
        &self.lock
    }

    pub(crate) async fn read(&self) -> Result<BoardData, CoreError> {
        storage::read_board(&self.data_path).await
    }

    pub(crate) async fn write(&self, board: &BoardData) -> Result<(), CoreError> {
        if self.max_backups > 0 {
            let stamp = self.clock.now();
            if storage::create_backup(&self.data_path, &self.backup_dir(), stamp)
                .await?
                .is_some()
            {
                storage::prune_backups(&self.backup_dir(), self.max_backups).await?;
            }
        }
        storage::write_board(&self.data_path, board).await
    }
}
