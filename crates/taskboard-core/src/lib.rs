//! # Taskboard Core Library
//!
//! Date-based task board with recurring tasks stored in a single JSON
//! document.
//!
//! ## Features
//!
//! - **Recurrence Engine**: weekly, biweekly, monthly, quarterly, yearly,
//!   business-day and nth-weekday rules, evaluated as pure functions of a
//!   calendar date
//! - **Board Classification**: overdue / today / future / backlog sections
//!   and a stable priority ordering
//! - **Series Lifecycle**: completing a recurring instance spawns the next
//!   one; ending a series stops it after a given day
//! - **JSON Persistence**: pretty-printed document with rotating backups
//!
//! ## Core Modules
//!
//! - [`calendar`]: Date arithmetic on `NaiveDate`
//! - [`recurrence`]: Rule evaluation and next-occurrence computation
//! - [`format`]: Human-readable rule labels
//! - [`classify`]: Task relevance, board sections and sorting
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: JSON-backed task store and lifecycle operations
//! - [`clock`]: Injectable source of the current date
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use taskboard_core::{
//!     models::{NewTaskData, RecurrenceRule},
//!     repository::{JsonRepository, TaskRepository},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = JsonRepository::new("tasks.json");
//!
//!     let task = repo
//!         .add_task(NewTaskData {
//!             title: "Team sync".to_string(),
//!             recurrence: Some(RecurrenceRule::weekly([1, 3])),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created task: {} due {:?}", task.title, task.due_date);
//!
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod classify;
pub mod clock;
pub mod error;
pub mod format;
pub mod models;
pub mod recurrence;
pub mod repository;
