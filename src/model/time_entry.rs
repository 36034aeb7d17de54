use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Duration value meaning "derive from start/end times".
pub const DURATION_UNSET: i64 = -1;

/// One span of tracked time booked against a project.
///
/// An entry with no `end_time` is still running; its duration grows until
/// it is stopped. A stored `duration` overrides the derived one (manual
/// entries may be edited without touching the timestamps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Local>,
    #[serde(rename = "endTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Local>>,
    #[serde(default = "duration_unset")]
    pub duration: i64,
    #[serde(default)]
    pub notes: String,
}

fn duration_unset() -> i64 {
    DURATION_UNSET
}

impl TimeEntry {
    /// Start a new, running entry.
    pub fn start(project_id: impl Into<String>, start_time: DateTime<Local>) -> Self {
        TimeEntry {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            start_time,
            end_time: None,
            duration: DURATION_UNSET,
            notes: String::new(),
        }
    }

    /// A completed entry with explicit bounds.
    pub fn completed(
        project_id: impl Into<String>,
        start_time: DateTime<Local>,
        end_time: DateTime<Local>,
    ) -> Self {
        TimeEntry {
            end_time: Some(end_time),
            ..TimeEntry::start(project_id, start_time)
        }
    }

    pub fn is_running(&self) -> bool {
        self.end_time.is_none()
    }

    /// Stop a running entry at `now`, recording the measured duration.
    /// Returns false if the entry was already stopped.
    pub fn stop(&mut self, now: DateTime<Local>) -> bool {
        if !self.is_running() {
            return false;
        }
        self.end_time = Some(now);
        self.duration = (now - self.start_time).num_seconds();
        true
    }

    /// Seconds covered by this entry. Uses the stored duration when one was
    /// set, the start/end span for stopped entries, and start..`now` for
    /// running ones.
    pub fn seconds(&self, now: DateTime<Local>) -> i64 {
        if self.duration >= 0 {
            return self.duration;
        }
        let end = self.end_time.unwrap_or(now);
        (end - self.start_time).num_seconds().max(0)
    }

    /// Seconds elapsed so far for a running entry; 0 once stopped.
    pub fn elapsed(&self, now: DateTime<Local>) -> i64 {
        if self.is_running() {
            (now - self.start_time).num_seconds().max(0)
        } else {
            0
        }
    }
}
