use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::model::category::Category;
use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::time_entry::TimeEntry;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// The SQLite-backed persistence port.
///
/// Construction opens the connection and applies the schema; a `Store`
/// value therefore always refers to an initialized database. Bulk saves
/// are delete-all-then-insert-all in a single transaction; single-record
/// saves are upserts by id.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Store, StoreError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| StoreError::CreateDir {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }
        let conn = Connection::open(path)?;
        apply_schema(&conn)?;
        debug!(path = %path.display(), "opened database");
        Ok(Store { conn })
    }

    /// An in-memory database, for tests.
    pub fn in_memory() -> Result<Store, StoreError> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Store { conn })
    }

    // -----------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------

    /// Replace the stored task set with exactly `tasks`, atomically.
    pub fn save_tasks(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (id, title, description, completed, created_date, \
                 due_date, category_id, priority, display_order) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for task in tasks {
                stmt.execute(params![
                    task.id,
                    task.title,
                    task.description,
                    task.completed as i32,
                    task.created_date.to_rfc3339(),
                    optional_time(task.due_date),
                    task.category_id,
                    task.priority,
                    task.display_order,
                ])?;
            }
        }
        tx.commit()?;
        debug!(count = tasks.len(), "saved tasks");
        Ok(())
    }

    /// All stored tasks in display order. An empty (or fresh) store yields
    /// an empty list.
    pub fn load_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, completed, created_date, due_date, \
             category_id, priority, display_order FROM tasks ORDER BY display_order",
        )?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Insert or overwrite a single task.
    pub fn save_task(&self, task: &Task) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO tasks (id, title, description, completed, created_date, \
             due_date, category_id, priority, display_order) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.id,
                task.title,
                task.description,
                task.completed as i32,
                task.created_date.to_rfc3339(),
                optional_time(task.due_date),
                task.category_id,
                task.priority,
                task.display_order,
            ],
        )?;
        Ok(())
    }

    /// Delete by id. Deleting an id that is not stored still succeeds.
    pub fn delete_task(&self, id: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------

    pub fn save_categories(&mut self, categories: &[Category]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM categories", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO categories (id, name, color, is_default) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for category in categories {
                stmt.execute(params![
                    category.id,
                    category.name,
                    category.color,
                    category.is_default as i32,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn load_categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color, is_default FROM categories")?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    color: row.get("color")?,
                    is_default: row.get::<_, i32>("is_default")? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn save_category(&self, category: &Category) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO categories (id, name, color, is_default) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                category.id,
                category.name,
                category.color,
                category.is_default as i32
            ],
        )?;
        Ok(())
    }

    pub fn delete_category(&self, id: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------

    pub fn save_projects(&mut self, projects: &[Project]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM projects", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO projects (id, name, color, description, is_active) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for project in projects {
                stmt.execute(params![
                    project.id,
                    project.name,
                    project.color,
                    project.description,
                    project.is_active as i32,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn load_projects(&self) -> Result<Vec<Project>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color, description, is_active FROM projects")?;
        let projects = stmt
            .query_map([], |row| {
                Ok(Project {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    color: row.get("color")?,
                    description: row.get("description")?,
                    is_active: row.get::<_, i32>("is_active")? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(projects)
    }

    pub fn save_project(&self, project: &Project) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO projects (id, name, color, description, is_active) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                project.id,
                project.name,
                project.color,
                project.description,
                project.is_active as i32,
            ],
        )?;
        Ok(())
    }

    pub fn delete_project(&self, id: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Time entries
    // -----------------------------------------------------------------

    pub fn save_time_entries(&mut self, entries: &[TimeEntry]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM time_entries", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO time_entries (id, project_id, start_time, end_time, duration, notes) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for entry in entries {
                stmt.execute(params![
                    entry.id,
                    entry.project_id,
                    entry.start_time.to_rfc3339(),
                    optional_time(entry.end_time),
                    entry.duration,
                    entry.notes,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn load_time_entries(&self) -> Result<Vec<TimeEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, project_id, start_time, end_time, duration, notes \
             FROM time_entries ORDER BY start_time",
        )?;
        let entries = stmt
            .query_map([], row_to_time_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn save_time_entry(&self, entry: &TimeEntry) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO time_entries (id, project_id, start_time, end_time, \
             duration, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.id,
                entry.project_id,
                entry.start_time.to_rfc3339(),
                optional_time(entry.end_time),
                entry.duration,
                entry.notes,
            ],
        )?;
        Ok(())
    }

    pub fn delete_time_entry(&self, id: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM time_entries WHERE id = ?1", params![id])?;
        Ok(())
    }
}

fn apply_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tasks (
             id TEXT PRIMARY KEY,
             title TEXT NOT NULL,
             description TEXT,
             completed INTEGER,
             created_date TEXT,
             due_date TEXT,
             category_id TEXT,
             priority INTEGER,
             display_order INTEGER
         );
         CREATE TABLE IF NOT EXISTS categories (
             id TEXT PRIMARY KEY,
             name TEXT NOT NULL,
             color TEXT,
             is_default INTEGER
         );
         CREATE TABLE IF NOT EXISTS projects (
             id TEXT PRIMARY KEY,
             name TEXT NOT NULL,
             color TEXT,
             description TEXT,
             is_active INTEGER
         );
         CREATE TABLE IF NOT EXISTS time_entries (
             id TEXT PRIMARY KEY,
             project_id TEXT,
             start_time TEXT,
             end_time TEXT,
             duration INTEGER,
             notes TEXT
         );",
    )
}

/// Optional timestamps persist as an empty string, not NULL or an epoch
/// value, and round-trip back to "unset".
fn optional_time(time: Option<DateTime<Local>>) -> String {
    time.map(|t| t.to_rfc3339()).unwrap_or_default()
}

fn parse_time(column: usize, text: &str) -> rusqlite::Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Local))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

fn parse_optional_time(column: usize, text: &str) -> rusqlite::Result<Option<DateTime<Local>>> {
    if text.is_empty() {
        return Ok(None);
    }
    parse_time(column, text).map(Some)
}

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    let created: String = row.get("created_date")?;
    let due: String = row.get("due_date")?;
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed: row.get::<_, i32>("completed")? != 0,
        created_date: parse_time(4, &created)?,
        due_date: parse_optional_time(5, &due)?,
        category_id: row.get("category_id")?,
        priority: row.get("priority")?,
        display_order: row.get("display_order")?,
    })
}

fn row_to_time_entry(row: &Row) -> rusqlite::Result<TimeEntry> {
    let start: String = row.get("start_time")?;
    let end: String = row.get("end_time")?;
    Ok(TimeEntry {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        start_time: parse_time(2, &start)?,
        end_time: parse_optional_time(3, &end)?,
        duration: row.get("duration")?,
        notes: row.get("notes")?,
    })
}

/// The default database location under the given data directory.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("tally.db")
}
