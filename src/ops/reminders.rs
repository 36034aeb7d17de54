use std::collections::HashSet;

use chrono::{DateTime, Local};

use crate::model::settings::Settings;
use crate::model::task::Task;

/// How long before a due date a task counts as "due soon".
const DUE_SOON_WINDOW_SECS: i64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderKind {
    /// Due within the next hour.
    DueSoon { minutes_left: i64 },
    /// Past its due date.
    Overdue { hours_over: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub task_id: String,
    pub title: String,
    pub kind: ReminderKind,
}

/// Computes due reminders and remembers which ones already fired, so a
/// task reminds at most once per edge (once approaching, once overdue).
#[derive(Debug, Default)]
pub struct ReminderTracker {
    notified: HashSet<String>,
}

impl ReminderTracker {
    pub fn new() -> Self {
        ReminderTracker::default()
    }

    /// Scan `tasks` at `now` and return the reminders that should fire.
    /// Completed tasks and tasks without a due date never remind.
    pub fn check(
        &mut self,
        tasks: &[Task],
        settings: &Settings,
        now: DateTime<Local>,
    ) -> Vec<Reminder> {
        let mut reminders = Vec::new();
        if !settings.enable_notifications {
            return reminders;
        }

        for task in tasks {
            if task.completed {
                continue;
            }
            let Some(due) = task.due_date else {
                continue;
            };
            let secs_until_due = (due - now).num_seconds();

            if (0..=DUE_SOON_WINDOW_SECS).contains(&secs_until_due) {
                if settings.notify_due_soon && self.notified.insert(task.id.clone()) {
                    reminders.push(Reminder {
                        task_id: task.id.clone(),
                        title: task.title.clone(),
                        kind: ReminderKind::DueSoon {
                            minutes_left: secs_until_due / 60,
                        },
                    });
                }
            } else if secs_until_due < 0 {
                // The overdue edge is tracked separately from due-soon, so
                // a task that slipped past its date still reminds once more.
                let key = format!("{}_overdue", task.id);
                if settings.notify_overdue && self.notified.insert(key) {
                    reminders.push(Reminder {
                        task_id: task.id.clone(),
                        title: task.title.clone(),
                        kind: ReminderKind::Overdue {
                            hours_over: -secs_until_due / 3600,
                        },
                    });
                }
            }
        }
        reminders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
    }

    fn task_due_in(minutes: i64) -> Task {
        let mut t = Task::new(format!("due in {minutes}m"), "");
        t.due_date = Some(now() + Duration::minutes(minutes));
        t
    }

    #[test]
    fn test_due_soon_fires_within_the_hour() {
        let mut tracker = ReminderTracker::new();
        let tasks = vec![task_due_in(30), task_due_in(90)];
        let reminders = tracker.check(&tasks, &Settings::default(), now());

        assert_eq!(reminders.len(), 1);
        assert_eq!(
            reminders[0].kind,
            ReminderKind::DueSoon { minutes_left: 30 }
        );
    }

    #[test]
    fn test_overdue_fires_once() {
        let mut tracker = ReminderTracker::new();
        let tasks = vec![task_due_in(-120)];

        let first = tracker.check(&tasks, &Settings::default(), now());
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].kind, ReminderKind::Overdue { hours_over: 2 });

        // Same scan again: already notified.
        let second = tracker.check(&tasks, &Settings::default(), now());
        assert!(second.is_empty());
    }

    #[test]
    fn test_due_soon_then_overdue_both_fire() {
        let mut tracker = ReminderTracker::new();
        let task = task_due_in(10);
        let tasks = vec![task];

        assert_eq!(tracker.check(&tasks, &Settings::default(), now()).len(), 1);
        // An hour later the same task is overdue; the overdue edge is new.
        let later = now() + Duration::hours(2);
        let reminders = tracker.check(&tasks, &Settings::default(), later);
        assert_eq!(reminders.len(), 1);
        assert!(matches!(reminders[0].kind, ReminderKind::Overdue { .. }));
    }

    #[test]
    fn test_completed_and_dateless_tasks_never_remind() {
        let mut tracker = ReminderTracker::new();
        let mut done = task_due_in(-60);
        done.completed = true;
        let tasks = vec![done, Task::new("no date", "")];
        assert!(tracker.check(&tasks, &Settings::default(), now()).is_empty());
    }

    #[test]
    fn test_settings_gate_reminders() {
        let mut tracker = ReminderTracker::new();
        let tasks = vec![task_due_in(5), task_due_in(-300)];

        let muted = Settings {
            enable_notifications: false,
            ..Settings::default()
        };
        assert!(tracker.check(&tasks, &muted, now()).is_empty());

        let no_overdue = Settings {
            notify_overdue: false,
            ..Settings::default()
        };
        let reminders = tracker.check(&tasks, &no_overdue, now());
        assert_eq!(reminders.len(), 1);
        assert!(matches!(reminders[0].kind, ReminderKind::DueSoon { .. }));
    }
}
