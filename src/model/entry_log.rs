use chrono::NaiveDate;

use super::time_entry::TimeEntry;

/// The collection of recorded time entries.
///
/// At most one entry is expected to be running at a time; the timer
/// operations in `ops::time_ops` maintain that by stopping the previous
/// entry before starting a new one.
#[derive(Debug, Clone, Default)]
pub struct EntryLog {
    entries: Vec<TimeEntry>,
}

impl EntryLog {
    pub fn new() -> Self {
        EntryLog::default()
    }

    pub fn set_entries(&mut self, entries: Vec<TimeEntry>) {
        self.entries = entries;
    }

    pub fn from_entries(entries: Vec<TimeEntry>) -> Self {
        EntryLog { entries }
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TimeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut TimeEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn push(&mut self, entry: TimeEntry) {
        self.entries.push(entry);
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// The entry still being tracked, if any.
    pub fn running(&self) -> Option<&TimeEntry> {
        self.entries.iter().find(|e| e.is_running())
    }

    pub fn running_mut(&mut self) -> Option<&mut TimeEntry> {
        self.entries.iter_mut().find(|e| e.is_running())
    }

    pub fn has_running(&self) -> bool {
        self.running().is_some()
    }

    pub fn for_project(&self, project_id: &str) -> Vec<&TimeEntry> {
        self.entries
            .iter()
            .filter(|e| e.project_id == project_id)
            .collect()
    }

    /// Entries whose start or end falls on a date within `from..=to`.
    pub fn in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&TimeEntry> {
        self.entries
            .iter()
            .filter(|e| {
                let starts = e.start_time.date_naive();
                let ends = e.end_time.map(|t| t.date_naive());
                (starts >= from && starts <= to)
                    || ends.is_some_and(|d| d >= from && d <= to)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn entry(project: &str, day: u32, start_h: u32, end_h: u32) -> TimeEntry {
        TimeEntry::completed(
            project,
            Local.with_ymd_and_hms(2025, 6, day, start_h, 0, 0).unwrap(),
            Local.with_ymd_and_hms(2025, 6, day, end_h, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_running_lookup() {
        let mut log = EntryLog::new();
        log.push(entry("a", 1, 9, 10));
        assert!(!log.has_running());

        log.push(TimeEntry::start(
            "b",
            Local.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap(),
        ));
        assert_eq!(log.running().unwrap().project_id, "b");
    }

    #[test]
    fn test_remove_by_id() {
        let mut log = EntryLog::new();
        let e = entry("a", 1, 9, 10);
        let id = e.id.clone();
        log.push(e);
        assert!(log.remove(&id));
        assert!(!log.remove(&id));
        assert!(log.is_empty());
    }

    #[test]
    fn test_in_range_filters_by_date() {
        let mut log = EntryLog::new();
        log.push(entry("a", 1, 9, 10));
        log.push(entry("a", 3, 9, 10));
        log.push(entry("b", 10, 9, 10));

        let from = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        assert_eq!(log.in_range(from, to).len(), 2);
    }

    #[test]
    fn test_for_project() {
        let mut log = EntryLog::new();
        log.push(entry("a", 1, 9, 10));
        log.push(entry("b", 1, 10, 11));
        log.push(entry("a", 2, 9, 10));
        assert_eq!(log.for_project("a").len(), 2);
        assert_eq!(log.for_project("missing").len(), 0);
    }
}
