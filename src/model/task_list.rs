use std::cmp::Ordering;

use super::task::Task;

/// Error type for task list operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ListError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("invalid move: from {from} to {to} (list has {len} rows)")]
    InvalidRange { from: usize, to: usize, len: usize },
}

/// The ordered collection of all tasks, plus the active category filter.
///
/// The task vector is the single source of truth. When a filter is set, the
/// visible rows are a projection computed from it on demand; there is no
/// second copy to keep in sync. Every task's `display_order` equals its
/// position in the authoritative sequence after any structural change;
/// callers may rely on the orders forming a dense 0..N-1 permutation.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    filter: Option<String>,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList::default()
    }

    /// Install a loaded task set, replacing everything and clearing any
    /// active filter. Tasks carrying the legacy "unordered" marker trigger
    /// a renumber so older data picks up positional orders.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.filter = None;
        if self.tasks.iter().any(|t| t.display_order < 0) {
            self.renumber();
        }
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut list = TaskList::new();
        list.set_tasks(tasks);
        list
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// All tasks in authoritative order, ignoring any filter.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Find a task by id. Always searches the full collection, filtered
    /// or not.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    /// The rows currently visible: all tasks, or the filtered subsequence,
    /// in authoritative order.
    pub fn visible(&self) -> Vec<&Task> {
        match &self.filter {
            None => self.tasks.iter().collect(),
            Some(cat) => self.tasks.iter().filter(|t| t.category_id == *cat).collect(),
        }
    }

    pub fn visible_len(&self) -> usize {
        match &self.filter {
            None => self.tasks.len(),
            Some(cat) => self.tasks.iter().filter(|t| t.category_id == *cat).count(),
        }
    }

    /// Positions in the authoritative vector occupied by visible rows.
    fn visible_positions(&self) -> Vec<usize> {
        match &self.filter {
            None => (0..self.tasks.len()).collect(),
            Some(cat) => self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| t.category_id == *cat)
                .map(|(i, _)| i)
                .collect(),
        }
    }

    // -----------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------

    /// Append a task, assigning it the next display order (one past the
    /// current maximum, or 0 in an empty list). Whether the task shows up
    /// in a filtered view follows from its category alone.
    pub fn add(&mut self, mut task: Task) {
        task.display_order = self.next_display_order();
        self.tasks.push(task);
    }

    /// Remove a task by id and renumber the remainder.
    pub fn remove(&mut self, id: &str) -> Result<(), ListError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ListError::NotFound(id.to_string()))?;
        self.tasks.remove(pos);
        self.renumber();
        Ok(())
    }

    /// Remove every completed task. Returns the number removed.
    pub fn remove_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            self.renumber();
        }
        removed
    }

    /// Move the visible row at `from` so it lands at row `to`.
    ///
    /// `to` may equal the row count, meaning "move to the end". A move onto
    /// its own index succeeds without changes. Out-of-range indices are an
    /// error and leave the list untouched. Under an active filter the
    /// matching tasks are permuted within the authoritative slots they
    /// already occupy, so unmatched tasks keep their positions.
    pub fn move_row(&mut self, from: usize, to: usize) -> Result<(), ListError> {
        let len = self.visible_len();
        if from >= len || to > len {
            return Err(ListError::InvalidRange { from, to, len });
        }
        if from == to {
            return Ok(());
        }

        if self.filter.is_none() {
            let task = self.tasks.remove(from);
            let idx = to.min(self.tasks.len());
            self.tasks.insert(idx, task);
        } else {
            self.permute_visible(|window| {
                let task = window.remove(from);
                let idx = to.min(window.len());
                window.insert(idx, task);
            });
        }

        self.renumber();
        Ok(())
    }

    /// Set the active category filter. An empty id clears it.
    pub fn filter_by_category(&mut self, category_id: &str) {
        if category_id.is_empty() {
            self.filter = None;
        } else {
            self.filter = Some(category_id.to_string());
        }
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// Sort by due date. Tasks without a due date always sort after tasks
    /// that have one, whichever direction was asked for; two dateless
    /// tasks keep their relative order (the sort is stable).
    pub fn sort_by_due_date(&mut self, ascending: bool) {
        self.sort_visible(move |a, b| match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                if ascending {
                    x.cmp(&y)
                } else {
                    y.cmp(&x)
                }
            }
        });
    }

    /// Sort by the priority field alone.
    pub fn sort_by_priority(&mut self, ascending: bool) {
        self.sort_visible(move |a, b| {
            if ascending {
                a.priority.cmp(&b.priority)
            } else {
                b.priority.cmp(&a.priority)
            }
        });
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn next_display_order(&self) -> i32 {
        self.tasks.iter().map(|t| t.display_order).max().map_or(0, |m| m + 1)
    }

    /// Reassign display orders from authoritative positions: a dense
    /// 0..N-1 permutation.
    fn renumber(&mut self) {
        for (i, task) in self.tasks.iter_mut().enumerate() {
            task.display_order = i as i32;
        }
    }

    /// Apply a reordering to the visible rows, writing the result back
    /// into the slots those rows occupy.
    fn permute_visible<F>(&mut self, reorder: F)
    where
        F: FnOnce(&mut Vec<Task>),
    {
        let slots = self.visible_positions();
        let mut window: Vec<Task> = slots.iter().map(|&i| self.tasks[i].clone()).collect();
        reorder(&mut window);
        for (&slot, task) in slots.iter().zip(window) {
            self.tasks[slot] = task;
        }
    }

    fn sort_visible<F>(&mut self, cmp: F)
    where
        F: Fn(&Task, &Task) -> Ordering,
    {
        if self.filter.is_none() {
            self.tasks.sort_by(|a, b| cmp(a, b));
        } else {
            self.permute_visible(|window| window.sort_by(|a, b| cmp(a, b)));
        }
        self.renumber();
    }
}
