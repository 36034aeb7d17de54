use chrono::{DateTime, Local};
use tracing::debug;

use crate::model::task::{Task, MAX_PRIORITY, MIN_PRIORITY};
use crate::model::task_list::{ListError, TaskList};

/// Error type for task operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("priority must be between {MIN_PRIORITY} and {MAX_PRIORITY}, got {0}")]
    InvalidPriority(i32),
    #[error(transparent)]
    List(#[from] ListError),
}

/// Fields for a new task. Unset fields take the record defaults.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub category_id: String,
    pub description: String,
    pub due_date: Option<DateTime<Local>>,
    pub priority: Option<i32>,
}

/// A partial update: `None` leaves the field alone. The due date is doubly
/// wrapped so "clear the due date" is expressible.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub due_date: Option<Option<DateTime<Local>>>,
    pub priority: Option<i32>,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Create a task and append it to the list. Returns a copy of the stored
/// task (with its assigned id and display order).
pub fn add_task(list: &mut TaskList, new: NewTask) -> Result<Task, TaskError> {
    if new.title.trim().is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    let mut task = Task::new(new.title, new.category_id);
    task.description = new.description;
    task.due_date = new.due_date;
    if let Some(p) = new.priority {
        check_priority(p)?;
        task.priority = p;
    }

    let id = task.id.clone();
    list.add(task);
    debug!(%id, "added task");
    // add() assigned the display order; hand back the stored copy.
    Ok(list.get(&id).cloned().expect("task was just added"))
}

/// Apply a patch to an existing task. Returns a copy of the updated task.
pub fn update_task(list: &mut TaskList, id: &str, patch: TaskPatch) -> Result<Task, TaskError> {
    if let Some(title) = &patch.title {
        if title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
    }
    if let Some(p) = patch.priority {
        check_priority(p)?;
    }

    let task = list
        .get_mut(id)
        .ok_or_else(|| ListError::NotFound(id.to_string()))?;
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(category_id) = patch.category_id {
        task.category_id = category_id;
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = due_date;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    Ok(task.clone())
}

/// Flip a task's completion flag. Returns the new state.
pub fn toggle_completion(list: &mut TaskList, id: &str) -> Result<bool, TaskError> {
    let task = list
        .get_mut(id)
        .ok_or_else(|| ListError::NotFound(id.to_string()))?;
    task.completed = !task.completed;
    debug!(%id, completed = task.completed, "toggled task");
    Ok(task.completed)
}

/// Delete a task by id.
pub fn delete_task(list: &mut TaskList, id: &str) -> Result<(), TaskError> {
    list.remove(id)?;
    debug!(%id, "deleted task");
    Ok(())
}

/// Delete every completed task; returns the removed ids for persistence.
pub fn delete_completed(list: &mut TaskList) -> Vec<String> {
    let ids: Vec<String> = list
        .tasks()
        .iter()
        .filter(|t| t.completed)
        .map(|t| t.id.clone())
        .collect();
    list.remove_completed();
    ids
}

fn check_priority(p: i32) -> Result<(), TaskError> {
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&p) {
        return Ok(());
    }
    Err(TaskError::InvalidPriority(p))
}
