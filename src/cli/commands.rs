use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tally",
    about = concat!("tally v", env!("CARGO_PKG_VERSION"), " - tasks and tracked time, locally"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory (default: the per-user data dir)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add(AddArgs),
    /// List tasks
    List(ListArgs),
    /// Show one task in full
    Show(IdArg),
    /// Edit a task's fields
    Edit(EditArgs),
    /// Toggle a task's completion
    Done(IdArg),
    /// Delete a task
    Rm(IdArg),
    /// Delete all completed tasks
    ClearDone,
    /// Move a task row to a new position
    Mv(MvArgs),
    /// Sort tasks by due date or priority
    Sort(SortArgs),
    /// Manage categories
    Category(CategoryCmd),
    /// Manage time-tracking projects
    Project(ProjectCmd),
    /// Start, stop, or inspect the timer
    Timer(TimerCmd),
    /// Manage recorded time entries
    Entry(EntryCmd),
    /// Time report over a date range
    Report(ReportArgs),
    /// Show tasks due soon or overdue
    Remind,
    /// Export tasks or categories to a file
    Export(TransferArgs),
    /// Import tasks or categories from a file
    Import(TransferArgs),
    /// Show or change settings
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Category (name or id; default: the configured default category)
    #[arg(long)]
    pub category: Option<String>,
    /// Longer description
    #[arg(long)]
    pub desc: Option<String>,
    /// Due date: "YYYY-MM-DD" or "YYYY-MM-DD HH:MM"
    #[arg(long)]
    pub due: Option<String>,
    /// Priority 1-5 (default 3)
    #[arg(long)]
    pub priority: Option<i32>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only tasks in this category (name or id)
    #[arg(long)]
    pub category: Option<String>,
    /// Only incomplete tasks
    #[arg(long)]
    pub pending: bool,
    /// Only completed tasks
    #[arg(long)]
    pub completed: bool,
}

#[derive(Args)]
pub struct IdArg {
    /// Record id (a unique prefix is enough)
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id (a unique prefix is enough)
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(long)]
    pub desc: Option<String>,
    /// New category (name or id)
    #[arg(long)]
    pub category: Option<String>,
    /// New due date ("YYYY-MM-DD", "YYYY-MM-DD HH:MM", or "none" to clear)
    #[arg(long)]
    pub due: Option<String>,
    /// New priority 1-5
    #[arg(long)]
    pub priority: Option<i32>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Row to move (0-indexed)
    pub from: usize,
    /// Destination row (row count means "to the end")
    pub to: usize,
    /// Reorder within this category's view instead of the full list
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct SortArgs {
    /// Sort key: "due" or "priority"
    pub field: String,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

// ---------------------------------------------------------------------------
// Category / project management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct CategoryCmd {
    #[command(subcommand)]
    pub action: CategoryAction,
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create a category
    Add(CategoryAddArgs),
    /// List categories
    List,
    /// Change a category's name or color
    Update(CategoryUpdateArgs),
    /// Delete a category (tasks keep their reference)
    Rm(NameOrIdArg),
}

#[derive(Args)]
pub struct CategoryAddArgs {
    /// Category name
    pub name: String,
    /// Hex color
    #[arg(long, default_value = "#808080")]
    pub color: String,
}

#[derive(Args)]
pub struct CategoryUpdateArgs {
    /// Category (name or id)
    pub category: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct NameOrIdArg {
    /// Name or id
    pub name_or_id: String,
}

#[derive(Args)]
pub struct ProjectCmd {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project
    Add(ProjectAddArgs),
    /// List projects (active only by default)
    List(ProjectListArgs),
    /// Change a project's fields
    Update(ProjectUpdateArgs),
    /// Deactivate a project, keeping its entries
    Archive(NameOrIdArg),
    /// Reactivate a project
    Restore(NameOrIdArg),
    /// Delete a project
    Rm(NameOrIdArg),
}

#[derive(Args)]
pub struct ProjectAddArgs {
    /// Project name
    pub name: String,
    /// Hex color
    #[arg(long, default_value = "#808080")]
    pub color: String,
    /// Description
    #[arg(long, default_value = "")]
    pub desc: String,
}

#[derive(Args)]
pub struct ProjectListArgs {
    /// Include archived projects
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct ProjectUpdateArgs {
    /// Project (name or id)
    pub project: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub desc: Option<String>,
}

// ---------------------------------------------------------------------------
// Time tracking
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TimerCmd {
    #[command(subcommand)]
    pub action: TimerAction,
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start tracking a project (stops any running timer first)
    Start(NameOrIdArg),
    /// Stop the running timer
    Stop,
    /// Show the running timer, if any
    Status,
}

#[derive(Args)]
pub struct EntryCmd {
    #[command(subcommand)]
    pub action: EntryAction,
}

#[derive(Subcommand)]
pub enum EntryAction {
    /// Record a completed entry
    Add(EntryAddArgs),
    /// List entries
    List(EntryListArgs),
    /// Delete an entry
    Rm(IdArg),
}

#[derive(Args)]
pub struct EntryAddArgs {
    /// Project (name or id)
    pub project: String,
    /// Start: "YYYY-MM-DD HH:MM"
    pub start: String,
    /// End: "YYYY-MM-DD HH:MM"
    pub end: String,
    /// Notes
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Args)]
pub struct EntryListArgs {
    /// First date (default: Monday of the current week)
    #[arg(long)]
    pub from: Option<String>,
    /// Last date (default: today)
    #[arg(long)]
    pub to: Option<String>,
    /// Only entries for this project (name or id)
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Args)]
pub struct ReportArgs {
    /// First date (default: Monday of the current week)
    #[arg(long)]
    pub from: Option<String>,
    /// Last date (default: today)
    #[arg(long)]
    pub to: Option<String>,
}

// ---------------------------------------------------------------------------
// Interchange / settings
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TransferArgs {
    /// What to transfer: "tasks" or "categories"
    pub kind: String,
    /// File path; format follows the extension (.json, or .csv for tasks)
    pub file: String,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print current settings (default)
    Show,
    /// Change a setting: notifications, notify-due-soon, notify-overdue
    /// (true/false), or default-category (name, id, or "none")
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigSetArgs {
    pub key: String,
    pub value: String,
}
