use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::time_entry::TimeEntry;

/// Duration reporting over time entries.
///
/// All functions take `now` from the caller so running entries can be
/// clamped deterministically (and tested without a wall clock). An entry
/// counts toward a day or range when its start or recorded end falls
/// inside it; the counted portion is clamped to the bounds, and a running
/// entry's open end is treated as `now`.

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Exclusive upper bound: midnight of the following day.
fn next_day_start(date: NaiveDate) -> NaiveDateTime {
    date.checked_add_days(Days::new(1))
        .map(day_start)
        .unwrap_or(NaiveDateTime::MAX)
}

/// Seconds of `entry` falling within `[range_start, range_end)`, or 0 when
/// the entry does not count toward the range.
fn clamped_seconds(
    entry: &TimeEntry,
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
    now: DateTime<Local>,
) -> i64 {
    let start = entry.start_time.naive_local();
    let starts_inside = start >= range_start && start < range_end;
    let ends_inside = entry
        .end_time
        .is_some_and(|e| e.naive_local() >= range_start && e.naive_local() < range_end);
    if !starts_inside && !ends_inside {
        return 0;
    }

    let end = entry
        .end_time
        .unwrap_or(now)
        .naive_local()
        .min(range_end);
    let start = start.max(range_start);
    (end - start).num_seconds().max(0)
}

/// Total tracked seconds on a single day.
pub fn total_for_day(entries: &[TimeEntry], date: NaiveDate, now: DateTime<Local>) -> i64 {
    let (lo, hi) = (day_start(date), next_day_start(date));
    entries.iter().map(|e| clamped_seconds(e, lo, hi, now)).sum()
}

/// Tracked seconds per project over `from..=to`, keyed by project id.
/// Projects with no overlapping entries are absent.
pub fn totals_by_project(
    entries: &[TimeEntry],
    from: NaiveDate,
    to: NaiveDate,
    now: DateTime<Local>,
) -> BTreeMap<String, i64> {
    let (lo, hi) = (day_start(from), next_day_start(to));
    let mut totals = BTreeMap::new();
    for entry in entries {
        let secs = clamped_seconds(entry, lo, hi, now);
        if secs > 0 {
            *totals.entry(entry.project_id.clone()).or_insert(0) += secs;
        }
    }
    totals
}

/// Tracked seconds per day over `from..=to`. Every day in the range is
/// present, zero-filled when nothing was tracked.
pub fn totals_by_day(
    entries: &[TimeEntry],
    from: NaiveDate,
    to: NaiveDate,
    now: DateTime<Local>,
) -> BTreeMap<NaiveDate, i64> {
    let mut totals = BTreeMap::new();
    let mut date = from;
    while date <= to {
        totals.insert(date, total_for_day(entries, date, now));
        let Some(next) = date.checked_add_days(Days::new(1)) else {
            break;
        };
        date = next;
    }
    totals
}

/// The project with the most tracked time in the range, if any time was
/// tracked at all. Ties go to the first project id in order.
pub fn most_tracked_project(
    entries: &[TimeEntry],
    from: NaiveDate,
    to: NaiveDate,
    now: DateTime<Local>,
) -> Option<String> {
    let mut best: Option<(String, i64)> = None;
    for (project, secs) in totals_by_project(entries, from, to, now) {
        if secs > best.as_ref().map_or(0, |(_, s)| *s) {
            best = Some((project, secs));
        }
    }
    best.map(|(project, _)| project)
}

/// Total for the Monday-based week containing `today`.
pub fn week_total(entries: &[TimeEntry], today: NaiveDate, now: DateTime<Local>) -> i64 {
    let week_start = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
        .unwrap_or(today);
    (0..7)
        .filter_map(|offset| week_start.checked_add_days(Days::new(offset)))
        .map(|date| total_for_day(entries, date, now))
        .sum()
}

/// Expand `hh`/`h`/`mm`/`m`/`ss`/`s` placeholders in `format` with the
/// components of a duration, e.g. `format_duration(3725, "h:mm:ss")` is
/// `"1:02:05"`.
pub fn format_duration(seconds: i64, format: &str) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format
        .replace("hh", &format!("{hours:02}"))
        .replace('h', &hours.to_string())
        .replace("mm", &format!("{minutes:02}"))
        .replace('m', &minutes.to_string())
        .replace("ss", &format!("{secs:02}"))
        .replace('s', &secs.to_string())
}
