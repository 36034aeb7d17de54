use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::warn;

use crate::model::category::Category;
use crate::model::task::{Task, DEFAULT_PRIORITY, UNORDERED};

/// Error type for import/export operations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

const CSV_HEADER: &str = "ID,Title,Description,Completed,CreatedDate,DueDate,CategoryID,Priority";

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

pub fn export_tasks_json(path: &Path, tasks: &[Task]) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(tasks)?;
    write_file(path, &json)
}

pub fn import_tasks_json(path: &Path) -> Result<Vec<Task>, ExportError> {
    let text = read_file(path)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn export_categories_json(path: &Path, categories: &[Category]) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(categories)?;
    write_file(path, &json)
}

pub fn import_categories_json(path: &Path) -> Result<Vec<Category>, ExportError> {
    let text = read_file(path)?;
    Ok(serde_json::from_str(&text)?)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Write tasks as CSV with a header row. Display order is not part of the
/// interchange format; importers assign fresh positions.
pub fn export_tasks_csv(path: &Path, tasks: &[Task]) -> Result<(), ExportError> {
    let mut out = String::with_capacity(tasks.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for task in tasks {
        out.push_str(&task_to_csv_line(task));
        out.push('\n');
    }
    write_file(path, &out)
}

/// Read tasks from CSV. Malformed lines are skipped with a warning rather
/// than failing the whole import.
pub fn import_tasks_csv(path: &Path) -> Result<Vec<Task>, ExportError> {
    let text = read_file(path)?;
    let mut tasks = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if line.is_empty() || line == CSV_HEADER {
            continue;
        }
        match task_from_csv_line(line) {
            Some(task) => tasks.push(task),
            None => warn!("skipping malformed CSV line {}", number + 1),
        }
    }
    Ok(tasks)
}

fn task_to_csv_line(task: &Task) -> String {
    let fields = [
        task.id.clone(),
        csv_escape(&task.title),
        csv_escape(&task.description),
        if task.completed { "1" } else { "0" }.to_string(),
        task.created_date.to_rfc3339(),
        task.due_date.map(|d| d.to_rfc3339()).unwrap_or_default(),
        task.category_id.clone(),
        task.priority.to_string(),
    ];
    fields.join(",")
}

fn task_from_csv_line(line: &str) -> Option<Task> {
    let fields = split_csv_line(line);
    if fields.len() != 8 {
        return None;
    }
    let created = parse_time(&fields[4])?;
    let due = if fields[5].is_empty() {
        None
    } else {
        Some(parse_time(&fields[5])?)
    };
    Some(Task {
        id: fields[0].clone(),
        title: fields[1].clone(),
        description: fields[2].clone(),
        completed: fields[3] == "1",
        created_date: created,
        due_date: due,
        category_id: fields[6].clone(),
        priority: fields[7].parse().unwrap_or(DEFAULT_PRIORITY),
        display_order: UNORDERED,
    })
}

fn parse_time(text: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Local))
        .ok()
}

/// Quote a field when it contains a comma or quote; embedded quotes are
/// doubled.
fn csv_escape(field: &str) -> String {
    let escaped = field.replace('"', "\"\"");
    if escaped.contains(',') || escaped.contains('"') {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Split a CSV line honoring quoted fields and doubled quotes.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

fn read_file(path: &Path) -> Result<String, ExportError> {
    fs::read_to_string(path).map_err(|e| ExportError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), ExportError> {
    fs::write(path, content).map_err(|e| ExportError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}
