use agenda_core::models::{EditScope, Repetition};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// A local-first personal organizer: calendars, recurring events, and tasks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new event
    Add(AddCommand),
    /// List events
    List(ListCommand),
    /// Edit an event
    Edit(EditCommand),
    /// Delete an event
    Delete(DeleteCommand),
    /// Manage tasks
    Task(TaskCommand),
    /// Manage calendars
    Calendar(CalendarCommand),
    /// Write the data snapshot to a file or stdout
    Export(ExportCommand),
    /// Replace the data snapshot from a file
    Import(ImportCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The name of the event
    pub name: String,
    /// The date of the event (e.g., '2026-08-10', 'tomorrow', 'next friday')
    #[clap(short, long, default_value = "today")]
    pub date: String,
    /// Start time (e.g., '9:00', '2:30 PM')
    #[clap(long, default_value = "09:00")]
    pub from: String,
    /// End time; defaults to one hour after the start
    #[clap(long)]
    pub to: Option<String>,
    /// The calendar to add the event to (defaults to the configured one)
    #[clap(short, long)]
    pub calendar: Option<String>,
    /// Repeat the event
    #[clap(short, long, value_enum)]
    pub repeat: Option<RepeatArg>,
    /// The description of the event
    #[clap(long)]
    pub description: Option<String>,
    /// Display color (defaults to the calendar's color)
    #[clap(long)]
    pub color: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Only events from this calendar
    #[clap(short, long)]
    pub calendar: Option<String>,
    /// Only events on this date
    #[clap(long, conflicts_with_all = ["from", "to"])]
    pub on: Option<String>,
    /// Start of the date range
    #[clap(long)]
    pub from: Option<String>,
    /// End of the date range
    #[clap(long)]
    pub to: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the event to edit
    pub id: String,

    /// Force scope without interactive prompting (for scripting)
    #[arg(long)]
    pub force_scope: bool,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,

    /// Move the event to a different date (applies to the target only)
    #[arg(long)]
    pub date: Option<String>,

    /// New start time
    #[arg(long)]
    pub from: Option<String>,

    /// New end time
    #[arg(long)]
    pub to: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    /// Move the event to a different calendar (applies to the target only)
    #[arg(long)]
    pub calendar: Option<String>,

    /// How to apply changes to recurring events
    #[arg(long, value_enum, help = "How to apply changes to recurring events")]
    pub scope: Option<ScopeArg>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the event to delete
    pub id: String,
    /// How much of a recurring series to delete
    #[clap(long, value_enum)]
    pub scope: Option<ScopeArg>,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub command: TaskSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TaskSubcommand {
    /// Add a new task
    Add(TaskAddCommand),
    /// List tasks
    List(TaskListCommand),
    /// Mark a task as done
    Done(TaskDoneCommand),
    /// Delete a task
    Delete(TaskDeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct TaskAddCommand {
    /// The name of the task
    pub name: String,
    /// The due date of the task
    #[clap(short, long)]
    pub due: Option<String>,
    /// The description of the task
    #[clap(long)]
    pub description: Option<String>,
    /// The ID of an event to link the task to
    #[clap(short, long)]
    pub event: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TaskListCommand {
    /// Only show tasks that are not done yet
    #[clap(short, long)]
    pub pending: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TaskDoneCommand {
    /// The ID of the task to mark as done
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct TaskDeleteCommand {
    /// The ID of the task to delete
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CalendarCommand {
    #[command(subcommand)]
    pub command: CalendarSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CalendarSubcommand {
    /// Add a new calendar
    Add(CalendarAddCommand),
    /// List calendars
    List,
    /// Delete a calendar and every event it contains
    Delete(CalendarDeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct CalendarAddCommand {
    /// The name of the calendar
    pub name: String,
    /// Display color for the calendar and its events
    #[arg(long, default_value = "teal")]
    pub color: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CalendarDeleteCommand {
    /// The name of the calendar to delete
    pub name: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportCommand {
    /// File to write to; prints to stdout when omitted
    pub path: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportCommand {
    /// File to read the snapshot from
    pub path: PathBuf,
    /// Force import without confirmation
    #[clap(short, long)]
    pub force: bool,
}

/// How widely an edit or delete applies to a recurring series
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeArg {
    /// Only the selected occurrence
    Single,
    /// The selected occurrence and all future ones
    Future,
    /// The entire series
    All,
}

impl From<ScopeArg> for EditScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Single => EditScope::Single,
            ScopeArg::Future => EditScope::Future,
            ScopeArg::All => EditScope::All,
        }
    }
}

/// Repetition kinds selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatArg {
    /// Every day
    Daily,
    /// Every week (same weekday)
    Weekly,
    /// Every month (same date; short months are skipped)
    Monthly,
    /// Every year (same date)
    Yearly,
}

impl From<RepeatArg> for Repetition {
    fn from(repeat: RepeatArg) -> Self {
        match repeat {
            RepeatArg::Daily => Repetition::Daily,
            RepeatArg::Weekly => Repetition::Weekly,
            RepeatArg::Monthly => Repetition::Monthly,
            RepeatArg::Yearly => Repetition::Yearly,
        }
    }
}
