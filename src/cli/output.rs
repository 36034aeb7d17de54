use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use crate::model::category::Category;
use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::time_entry::TimeEntry;
use crate::ops::category_ops::find_category;
use crate::ops::reminders::{Reminder, ReminderKind};
use crate::ops::time_stats::format_duration;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskRowJson {
    pub row: usize,
    #[serde(flatten)]
    pub task: Task,
    /// Resolved category name, when the category still exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Serialize)]
pub struct TimerStatusJson {
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started: Option<DateTime<Local>>,
    pub elapsed_seconds: i64,
    pub elapsed: String,
}

#[derive(Serialize)]
pub struct ReportJson {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_seconds: i64,
    pub total: String,
    pub by_project: Vec<ProjectTotalJson>,
    pub by_day: Vec<DayTotalJson>,
}

#[derive(Serialize)]
pub struct ProjectTotalJson {
    pub project_id: String,
    pub name: String,
    pub seconds: i64,
    pub duration: String,
}

#[derive(Serialize)]
pub struct DayTotalJson {
    pub date: NaiveDate,
    pub seconds: i64,
    pub duration: String,
}

#[derive(Serialize)]
pub struct ReminderJson {
    pub task_id: String,
    pub title: String,
    pub kind: &'static str,
    pub minutes: i64,
}

pub fn task_row_json(row: usize, task: &Task, categories: &[Category]) -> TaskRowJson {
    TaskRowJson {
        row,
        category: find_category(categories, &task.category_id).map(|c| c.name.clone()),
        task: task.clone(),
    }
}

pub fn reminder_json(reminder: &Reminder) -> ReminderJson {
    match reminder.kind {
        ReminderKind::DueSoon { minutes_left } => ReminderJson {
            task_id: reminder.task_id.clone(),
            title: reminder.title.clone(),
            kind: "due_soon",
            minutes: minutes_left,
        },
        ReminderKind::Overdue { hours_over } => ReminderJson {
            task_id: reminder.task_id.clone(),
            title: reminder.title.clone(),
            kind: "overdue",
            minutes: hours_over * 60,
        },
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// First block of a UUID, plenty for interactive disambiguation.
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

pub fn format_date(time: DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

/// One task as a list row.
pub fn format_task_line(row: usize, task: &Task, categories: &[Category]) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let due = task
        .due_date
        .map(|d| format!("  due {}", format_date(d)))
        .unwrap_or_default();
    let category = find_category(categories, &task.category_id)
        .map(|c| format!("  #{}", c.name))
        .unwrap_or_default();
    format!(
        "{row:>3}  [{check}] {}  !{}  {}{due}{category}",
        short_id(&task.id),
        task.priority,
        task.title
    )
}

/// Full detail view for `show`.
pub fn format_task_detail(task: &Task, categories: &[Category]) -> Vec<String> {
    let check = if task.completed { 'x' } else { ' ' };
    let mut lines = vec![
        format!("[{check}] {}", task.title),
        format!("id:       {}", task.id),
        format!("priority: {}", task.priority),
        format!("created:  {}", format_date(task.created_date)),
    ];
    match task.due_date {
        Some(due) => lines.push(format!("due:      {}", format_date(due))),
        None => lines.push("due:      -".to_string()),
    }
    let category = find_category(categories, &task.category_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| task.category_id.clone());
    if !category.is_empty() {
        lines.push(format!("category: {category}"));
    }
    if !task.description.is_empty() {
        lines.push("notes:".to_string());
        for line in task.description.lines() {
            lines.push(format!("  {line}"));
        }
    }
    lines
}

pub fn format_category_line(category: &Category) -> String {
    let default_marker = if category.is_default { "  (default set)" } else { "" };
    format!(
        "{}  {}  {}{default_marker}",
        short_id(&category.id),
        category.color,
        category.name
    )
}

pub fn format_project_line(project: &Project) -> String {
    let state = if project.is_active { "" } else { "  [archived]" };
    let desc = if project.description.is_empty() {
        String::new()
    } else {
        format!("  - {}", project.description)
    };
    format!(
        "{}  {}  {}{state}{desc}",
        short_id(&project.id),
        project.color,
        project.name
    )
}

pub fn format_entry_line(entry: &TimeEntry, projects: &[Project], now: DateTime<Local>) -> String {
    let project = projects
        .iter()
        .find(|p| p.id == entry.project_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| entry.project_id.clone());
    let end = entry
        .end_time
        .map(format_date)
        .unwrap_or_else(|| "running".to_string());
    let duration = format_duration(entry.seconds(now), "hh:mm:ss");
    let notes = if entry.notes.is_empty() {
        String::new()
    } else {
        format!("  {}", entry.notes)
    };
    format!(
        "{}  {}  {} .. {end}  {duration}{notes}",
        short_id(&entry.id),
        project,
        format_date(entry.start_time)
    )
}

pub fn format_reminder(reminder: &Reminder) -> String {
    match reminder.kind {
        ReminderKind::DueSoon { minutes_left } => format!(
            "due soon: \"{}\" is due in {} minutes",
            reminder.title, minutes_left
        ),
        ReminderKind::Overdue { hours_over } => format!(
            "overdue: \"{}\" is overdue by {} hours",
            reminder.title, hours_over
        ),
    }
}
