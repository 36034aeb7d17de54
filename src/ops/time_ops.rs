use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::model::entry_log::EntryLog;
use crate::model::project::Project;
use crate::model::time_entry::TimeEntry;

use super::project_ops::find_project;

/// Error type for time tracking operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimeError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error("no timer is running")]
    NoRunningTimer,
    #[error("time entry not found: {0}")]
    EntryNotFound(String),
    #[error("end time must not be before start time")]
    EndBeforeStart,
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

/// Start tracking time against a project. Any entry already running is
/// stopped first, so at most one entry runs at a time. Returns a copy of
/// the new running entry.
pub fn start_timer(
    log: &mut EntryLog,
    projects: &[Project],
    project_id: &str,
    now: DateTime<Local>,
) -> Result<TimeEntry, TimeError> {
    if find_project(projects, project_id).is_none() {
        warn!(%project_id, "cannot start timer: unknown project");
        return Err(TimeError::ProjectNotFound(project_id.to_string()));
    }

    if let Some(running) = log.running_mut() {
        running.stop(now);
        debug!(project = %running.project_id, "stopped previous timer");
    }

    let entry = TimeEntry::start(project_id, now);
    log.push(entry.clone());
    debug!(%project_id, "started timer");
    Ok(entry)
}

/// Stop the running entry, recording its measured duration. Returns a copy
/// of the completed entry.
pub fn stop_timer(log: &mut EntryLog, now: DateTime<Local>) -> Result<TimeEntry, TimeError> {
    let running = log.running_mut().ok_or(TimeError::NoRunningTimer)?;
    running.stop(now);
    let stopped = running.clone();
    debug!(
        project = %stopped.project_id,
        seconds = stopped.duration,
        "stopped timer"
    );
    Ok(stopped)
}

// ---------------------------------------------------------------------------
// Manual entries
// ---------------------------------------------------------------------------

/// Record a completed entry with explicit bounds.
pub fn add_entry(
    log: &mut EntryLog,
    projects: &[Project],
    project_id: &str,
    start: DateTime<Local>,
    end: DateTime<Local>,
    notes: &str,
) -> Result<TimeEntry, TimeError> {
    if find_project(projects, project_id).is_none() {
        return Err(TimeError::ProjectNotFound(project_id.to_string()));
    }
    if end < start {
        return Err(TimeError::EndBeforeStart);
    }
    let mut entry = TimeEntry::completed(project_id, start, end);
    entry.notes = notes.to_string();
    log.push(entry.clone());
    Ok(entry)
}

pub fn remove_entry(log: &mut EntryLog, id: &str) -> Result<(), TimeError> {
    if !log.remove(id) {
        return Err(TimeError::EntryNotFound(id.to_string()));
    }
    Ok(())
}

/// Update the notes on an entry.
pub fn set_entry_notes(log: &mut EntryLog, id: &str, notes: &str) -> Result<(), TimeError> {
    let entry = log
        .get_mut(id)
        .ok_or_else(|| TimeError::EntryNotFound(id.to_string()))?;
    entry.notes = notes.to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
    }

    fn one_project() -> Vec<Project> {
        vec![Project::new("Deep Work", "#123")]
    }

    #[test]
    fn test_start_timer_unknown_project() {
        let mut log = EntryLog::new();
        let err = start_timer(&mut log, &[], "nope", at(9, 0)).unwrap_err();
        assert_eq!(err, TimeError::ProjectNotFound("nope".to_string()));
        assert!(log.is_empty());
    }

    #[test]
    fn test_start_then_stop() {
        let projects = one_project();
        let id = projects[0].id.clone();
        let mut log = EntryLog::new();

        start_timer(&mut log, &projects, &id, at(9, 0)).unwrap();
        assert!(log.has_running());

        let stopped = stop_timer(&mut log, at(9, 45)).unwrap();
        assert_eq!(stopped.duration, 45 * 60);
        assert!(!log.has_running());
    }

    #[test]
    fn test_start_stops_previous_timer() {
        let mut projects = one_project();
        projects.push(Project::new("Other", "#456"));
        let first = projects[0].id.clone();
        let second = projects[1].id.clone();
        let mut log = EntryLog::new();

        start_timer(&mut log, &projects, &first, at(9, 0)).unwrap();
        start_timer(&mut log, &projects, &second, at(10, 0)).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.running().unwrap().project_id, second);
        // The first entry was closed at the handover point.
        let closed = log.for_project(&first)[0];
        assert_eq!(closed.duration, 3600);
    }

    #[test]
    fn test_stop_without_running_timer() {
        let mut log = EntryLog::new();
        assert_eq!(stop_timer(&mut log, at(9, 0)).unwrap_err(), TimeError::NoRunningTimer);
    }

    #[test]
    fn test_add_entry_validates_bounds() {
        let projects = one_project();
        let id = projects[0].id.clone();
        let mut log = EntryLog::new();

        let err = add_entry(&mut log, &projects, &id, at(10, 0), at(9, 0), "").unwrap_err();
        assert_eq!(err, TimeError::EndBeforeStart);

        let entry = add_entry(&mut log, &projects, &id, at(9, 0), at(10, 0), "standup").unwrap();
        assert_eq!(entry.notes, "standup");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_remove_entry() {
        let projects = one_project();
        let pid = projects[0].id.clone();
        let mut log = EntryLog::new();
        let entry = add_entry(&mut log, &projects, &pid, at(9, 0), at(10, 0), "").unwrap();

        remove_entry(&mut log, &entry.id).unwrap();
        assert_eq!(
            remove_entry(&mut log, &entry.id).unwrap_err(),
            TimeError::EntryNotFound(entry.id)
        );
    }
}
