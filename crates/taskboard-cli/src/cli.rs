use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskboard_core::models::{Pattern, Scope, TaskPriority, TaskStatus};

/// A date-based personal task board with recurring tasks
#[derive(Parser, Debug)]
#[command(name = "taskboard", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// Show the board: overdue, today, future and backlog
    List(ListCommand),
    /// Show the tasks for one day
    Day(DayCommand),
    /// Mark a task as done (recurring tasks roll over to their next date)
    Do(DoCommand),
    /// Stop a recurring series after a given day
    End(EndCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Show upcoming occurrences of a recurring task
    Preview(PreviewCommand),
    /// Copy the board data file to another location
    Export(ExportCommand),
    /// List known labels and stakeholders
    Labels,
}

/// Options describing a recurrence rule
#[derive(Args, Debug, Clone, Default)]
pub struct RecurrenceArgs {
    /// Recurrence pattern (weekly, biweekly, monthly, quarterly, yearly, business-days, nth-weekday)
    #[arg(long)]
    pub every: Option<Pattern>,
    /// Weekdays for weekly/biweekly rules, or the target weekday for nth-weekday (e.g. mon,wed)
    #[arg(long, value_delimiter = ',', requires = "every")]
    pub on: Vec<String>,
    /// Day of month for monthly/quarterly rules
    #[arg(long, requires = "every")]
    pub day: Option<u32>,
    /// Which occurrence of the weekday for nth-weekday rules (1-53)
    #[arg(long, requires = "every")]
    pub nth: Option<u32>,
    /// Counting window for nth-weekday rules (month, quarter, year)
    #[arg(long, requires = "every")]
    pub scope: Option<Scope>,
    /// Step in business days for business-days rules
    #[arg(long, requires = "every")]
    pub interval: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The description of the task
    #[clap(short, long)]
    pub description: Option<String>,
    /// The due date (YYYY-MM-DD or e.g. "next friday")
    #[clap(long)]
    pub due: Option<String>,
    /// The priority of the task (critical, high, medium, low, none)
    #[clap(short, long)]
    pub priority: Option<TaskPriority>,
    /// The initial status of the task
    #[clap(short, long)]
    pub status: Option<TaskStatus>,
    /// Labels to attach to the task
    #[clap(short, long)]
    pub label: Vec<String>,
    /// People involved in the task
    #[clap(long)]
    pub stakeholder: Vec<String>,
    #[command(flatten)]
    pub recurrence: RecurrenceArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Include completed tasks in the backlog
    #[clap(short, long)]
    pub all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DayCommand {
    /// The day to show (defaults to today)
    pub date: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DoCommand {
    /// The ID of the task to mark as done
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct EndCommand {
    /// The ID of any instance of the series
    pub id: String,
    /// Last day the series occurs on (defaults to today)
    #[clap(long)]
    pub on: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,

    #[arg(long)]
    pub due: Option<String>,
    #[arg(long, conflicts_with = "due")]
    pub due_clear: bool,

    #[arg(long)]
    pub priority: Option<TaskPriority>,

    #[arg(long)]
    pub status: Option<TaskStatus>,

    #[command(flatten)]
    pub recurrence: RecurrenceArgs,

    /// Add labels to the task
    #[arg(long)]
    pub add_label: Vec<String>,

    /// Remove labels from the task
    #[arg(long)]
    pub remove_label: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewCommand {
    /// The ID of a recurring task
    pub id: String,
    /// Number of occurrences to show
    #[clap(long, short, default_value = "5")]
    pub count: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportCommand {
    /// Destination file
    pub path: PathBuf,
}
