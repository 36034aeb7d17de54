use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Priority bounds; the default sits in the middle.
pub const MIN_PRIORITY: i32 = 1;
pub const MAX_PRIORITY: i32 = 5;
pub const DEFAULT_PRIORITY: i32 = 3;

/// Display order value for a task that has not been placed in a list yet.
pub const UNORDERED: i32 = -1;

/// A single to-do item.
///
/// `due_date` being `None` means "no due date", a distinct state rather
/// than a zero timestamp. `display_order` holds the task's position in the
/// task list; it is `UNORDERED` only between construction and insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "isCompleted", default)]
    pub completed: bool,
    #[serde(rename = "createdDate")]
    pub created_date: DateTime<Local>,
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Local>>,
    #[serde(rename = "categoryId", default)]
    pub category_id: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(rename = "displayOrder", default = "unordered")]
    pub display_order: i32,
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

fn unordered() -> i32 {
    UNORDERED
}

impl Task {
    /// Create a new task with a fresh id, created now, medium priority,
    /// and no position in any list yet.
    pub fn new(title: impl Into<String>, category_id: impl Into<String>) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            completed: false,
            created_date: Local::now(),
            due_date: None,
            category_id: category_id.into(),
            priority: DEFAULT_PRIORITY,
            display_order: UNORDERED,
        }
    }

    /// Whether the task is past its due date at `now`. Tasks without a due
    /// date are never overdue.
    pub fn is_overdue(&self, now: DateTime<Local>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }
}
