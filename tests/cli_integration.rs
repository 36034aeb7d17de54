//! Integration tests for the `tally` CLI.
//!
//! Each test points `tally` at a fresh temp data directory via `--data-dir`,
//! runs it as a subprocess, and verifies stdout and/or stored state.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `tally` binary.
fn tally_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tally");
    path
}

/// Run `tally` against the given data dir, returning (stdout, stderr, success).
fn run_tally(data_dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(tally_bin())
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .expect("failed to run tally");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tally` expecting success, return stdout.
fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tally(data_dir, args);
    if !success {
        panic!(
            "tally {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Order in which the given needles appear in `haystack`; panics when one
/// is missing.
fn appearance_order(haystack: &str, needles: &[&str]) -> Vec<usize> {
    needles
        .iter()
        .map(|n| {
            haystack
                .find(n)
                .unwrap_or_else(|| panic!("'{}' not found in:\n{}", n, haystack))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Task lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_add_and_list() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = run_ok(tmp.path(), &["add", "Water the plants"]);
    assert!(out.contains("added"));

    let out = run_ok(tmp.path(), &["list"]);
    assert!(out.contains("Water the plants"));
    assert!(out.contains("[ ]"));
}

#[test]
fn test_done_toggles_completion() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "Finish slides"]);

    let list = run_ok(tmp.path(), &["list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&list).unwrap();
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    let out = run_ok(tmp.path(), &["done", &id]);
    assert!(out.contains("completed"));
    let out = run_ok(tmp.path(), &["list"]);
    assert!(out.contains("[x]"));

    let out = run_ok(tmp.path(), &["done", &id]);
    assert!(out.contains("reopened"));
}

#[test]
fn test_rm_by_id_prefix() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "Ephemeral"]);

    let list = run_ok(tmp.path(), &["list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&list).unwrap();
    let id = tasks[0]["id"].as_str().unwrap();
    let prefix = &id[..8];

    run_ok(tmp.path(), &["rm", prefix]);
    let out = run_ok(tmp.path(), &["list"]);
    assert!(out.contains("no tasks"));
}

#[test]
fn test_clear_done() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "keep me"]);
    run_ok(tmp.path(), &["add", "done with this"]);

    let list = run_ok(tmp.path(), &["list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&list).unwrap();
    let done_id = tasks[1]["id"].as_str().unwrap().to_string();
    run_ok(tmp.path(), &["done", &done_id]);

    let out = run_ok(tmp.path(), &["clear-done"]);
    assert!(out.contains("removed 1"));
    let out = run_ok(tmp.path(), &["list"]);
    assert!(out.contains("keep me"));
    assert!(!out.contains("done with this"));
}

#[test]
fn test_edit_fields() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "Old name"]);

    let list = run_ok(tmp.path(), &["list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&list).unwrap();
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    run_ok(
        tmp.path(),
        &[
            "edit", &id, "--title", "New name", "--priority", "5", "--due", "2030-01-15 09:00",
        ],
    );
    let out = run_ok(tmp.path(), &["show", &id]);
    assert!(out.contains("New name"));
    assert!(out.contains("priority: 5"));
    assert!(out.contains("due:      2030-01-15 09:00"));

    // Clearing the due date round-trips back to "unset".
    run_ok(tmp.path(), &["edit", &id, "--due", "none"]);
    let out = run_ok(tmp.path(), &["show", &id]);
    assert!(out.contains("due:      -"));
}

#[test]
fn test_add_rejects_empty_title() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_tally(tmp.path(), &["add", "   "]);
    assert!(!success);
    assert!(stderr.contains("title"));
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn test_mv_reorders_rows() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "first"]);
    run_ok(tmp.path(), &["add", "second"]);
    run_ok(tmp.path(), &["add", "third"]);

    run_ok(tmp.path(), &["mv", "0", "2"]);

    let out = run_ok(tmp.path(), &["list"]);
    let positions = appearance_order(&out, &["second", "third", "first"]);
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "order wrong:\n{out}");
}

#[test]
fn test_mv_within_category_view_writes_through() {
    let tmp = tempfile::TempDir::new().unwrap();
    // Default categories are seeded on first use; Work and Personal exist.
    run_ok(tmp.path(), &["add", "w-one", "--category", "Work"]);
    run_ok(tmp.path(), &["add", "p-between", "--category", "Personal"]);
    run_ok(tmp.path(), &["add", "w-two", "--category", "Work"]);

    let out = run_ok(tmp.path(), &["list", "--category", "Work"]);
    assert!(out.contains("w-one"));
    assert!(!out.contains("p-between"));

    run_ok(tmp.path(), &["mv", "0", "1", "--category", "Work"]);

    // The two Work tasks swapped; the Personal task kept its slot.
    let out = run_ok(tmp.path(), &["list"]);
    let positions = appearance_order(&out, &["w-two", "p-between", "w-one"]);
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "order wrong:\n{out}");
}

#[test]
fn test_mv_out_of_range_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "only"]);
    let (_, stderr, success) = run_tally(tmp.path(), &["mv", "5", "0"]);
    assert!(!success);
    assert!(stderr.contains("invalid move"));
}

#[test]
fn test_sort_by_priority_desc() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "low", "--priority", "1"]);
    run_ok(tmp.path(), &["add", "high", "--priority", "5"]);
    run_ok(tmp.path(), &["add", "mid", "--priority", "3"]);

    run_ok(tmp.path(), &["sort", "priority", "--desc"]);

    let out = run_ok(tmp.path(), &["list"]);
    let positions = appearance_order(&out, &["high", "mid", "low"]);
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "order wrong:\n{out}");
}

#[test]
fn test_sort_by_due_puts_dateless_last() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "no-date"]);
    run_ok(tmp.path(), &["add", "dated", "--due", "2030-05-01"]);

    run_ok(tmp.path(), &["sort", "due"]);

    let out = run_ok(tmp.path(), &["list"]);
    let positions = appearance_order(&out, &["dated", "no-date"]);
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "order wrong:\n{out}");
}

// ---------------------------------------------------------------------------
// Categories and filtering
// ---------------------------------------------------------------------------

#[test]
fn test_default_categories_seeded() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_ok(tmp.path(), &["category", "list"]);
    assert!(out.contains("Work"));
    assert!(out.contains("Personal"));
}

#[test]
fn test_category_crud() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["category", "add", "Errands", "--color", "#123456"]);

    let out = run_ok(tmp.path(), &["category", "list"]);
    assert!(out.contains("Errands"));
    assert!(out.contains("#123456"));

    run_ok(
        tmp.path(),
        &["category", "update", "Errands", "--name", "Chores"],
    );
    run_ok(tmp.path(), &["category", "rm", "Chores"]);
    let out = run_ok(tmp.path(), &["category", "list"]);
    assert!(!out.contains("Chores"));
}

#[test]
fn test_list_filtered_by_category() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "work-task", "--category", "Work"]);
    run_ok(tmp.path(), &["add", "home-task", "--category", "Personal"]);

    let out = run_ok(tmp.path(), &["list", "--category", "Personal"]);
    assert!(out.contains("home-task"));
    assert!(!out.contains("work-task"));
}

// ---------------------------------------------------------------------------
// Time tracking
// ---------------------------------------------------------------------------

#[test]
fn test_timer_start_status_stop() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = run_ok(tmp.path(), &["timer", "start", "Work"]);
    assert!(out.contains("timer started for Work"));

    let out = run_ok(tmp.path(), &["timer", "status"]);
    assert!(out.contains("tracking Work"));

    let out = run_ok(tmp.path(), &["timer", "stop"]);
    assert!(out.contains("timer stopped"));

    let out = run_ok(tmp.path(), &["timer", "status"]);
    assert!(out.contains("no timer running"));
}

#[test]
fn test_timer_handover_keeps_one_running() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["timer", "start", "Work"]);
    run_ok(tmp.path(), &["timer", "start", "Learning"]);

    let out = run_ok(tmp.path(), &["timer", "status", "--json"]);
    let status: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(status["running"], true);
    assert_eq!(status["project"], "Learning");
}

#[test]
fn test_timer_stop_without_running_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_tally(tmp.path(), &["timer", "stop"]);
    assert!(!success);
    assert!(stderr.contains("no timer is running"));
}

#[test]
fn test_entry_and_report() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(
        tmp.path(),
        &[
            "entry", "add", "Work", "2025-06-02 09:00", "2025-06-02 10:30",
            "--notes", "sprint planning",
        ],
    );

    let out = run_ok(
        tmp.path(),
        &["entry", "list", "--from", "2025-06-02", "--to", "2025-06-02"],
    );
    assert!(out.contains("Work"));
    assert!(out.contains("01:30:00"));
    assert!(out.contains("sprint planning"));

    let out = run_ok(
        tmp.path(),
        &["report", "--from", "2025-06-02", "--to", "2025-06-02"],
    );
    assert!(out.contains("total: 1:30:00"));
    assert!(out.contains("Work"));
}

#[test]
fn test_report_json_shape() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(
        tmp.path(),
        &["entry", "add", "Work", "2025-06-02 09:00", "2025-06-02 10:00"],
    );

    let out = run_ok(
        tmp.path(),
        &[
            "report", "--from", "2025-06-01", "--to", "2025-06-03", "--json",
        ],
    );
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["total_seconds"], 3600);
    // Every day in the range appears, zero-filled.
    assert_eq!(report["by_day"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Reminders
// ---------------------------------------------------------------------------

#[test]
fn test_remind_reports_overdue() {
    let tmp = tempfile::TempDir::new().unwrap();
    let yesterday = (chrono::Local::now() - chrono::Duration::days(1))
        .format("%Y-%m-%d %H:%M")
        .to_string();
    run_ok(tmp.path(), &["add", "Pay invoice", "--due", &yesterday]);

    let out = run_ok(tmp.path(), &["remind"]);
    assert!(out.contains("overdue"));
    assert!(out.contains("Pay invoice"));
}

#[test]
fn test_remind_respects_settings() {
    let tmp = tempfile::TempDir::new().unwrap();
    let yesterday = (chrono::Local::now() - chrono::Duration::days(1))
        .format("%Y-%m-%d %H:%M")
        .to_string();
    run_ok(tmp.path(), &["add", "Quiet task", "--due", &yesterday]);
    run_ok(tmp.path(), &["config", "set", "notifications", "false"]);

    let out = run_ok(tmp.path(), &["remind"]);
    assert!(out.contains("nothing due"));
}

// ---------------------------------------------------------------------------
// Import / export
// ---------------------------------------------------------------------------

#[test]
fn test_export_import_json_round_trip() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "task one"]);
    run_ok(tmp.path(), &["add", "task two"]);

    let file = tmp.path().join("backup.json");
    let file_str = file.to_str().unwrap();
    run_ok(tmp.path(), &["export", "tasks", file_str]);

    // A second data dir imports the backup.
    let other = tempfile::TempDir::new().unwrap();
    let out = run_ok(other.path(), &["import", "tasks", file_str]);
    assert!(out.contains("imported 2 task(s)"));

    let out = run_ok(other.path(), &["list"]);
    assert!(out.contains("task one"));
    assert!(out.contains("task two"));

    // Importing the same file again adds nothing.
    let out = run_ok(other.path(), &["import", "tasks", file_str]);
    assert!(out.contains("imported 0 task(s)"));
}

#[test]
fn test_export_import_csv() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["add", "commas, everywhere"]);

    let file = tmp.path().join("tasks.csv");
    let file_str = file.to_str().unwrap();
    run_ok(tmp.path(), &["export", "tasks", file_str]);

    let other = tempfile::TempDir::new().unwrap();
    run_ok(other.path(), &["import", "tasks", file_str]);
    let out = run_ok(other.path(), &["list"]);
    assert!(out.contains("commas, everywhere"));
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_and_show() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["config", "set", "notify-overdue", "false"]);

    let out = run_ok(tmp.path(), &["config", "show"]);
    assert!(out.contains("notify-overdue:    false"));

    let out = run_ok(tmp.path(), &["config", "show", "--json"]);
    let settings: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(settings["notify_overdue"], false);
}

#[test]
fn test_default_category_applies_to_new_tasks() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["config", "set", "default-category", "Health"]);
    run_ok(tmp.path(), &["add", "morning run"]);

    let out = run_ok(tmp.path(), &["list"]);
    assert!(out.contains("#Health"));
}
