use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::export;
use crate::io::store::{database_path, Store};
use crate::model::category::Category;
use crate::model::entry_log::EntryLog;
use crate::model::project::Project;
use crate::model::settings::Settings;
use crate::model::task_list::TaskList;
use crate::ops::{category_ops, project_ops, reminders, task_ops, time_ops, time_stats};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let json = cli.json;
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Add(args) => cmd_add(&data_dir, args),
        Commands::List(args) => cmd_list(&data_dir, args, json),
        Commands::Show(args) => cmd_show(&data_dir, args, json),
        Commands::Edit(args) => cmd_edit(&data_dir, args),
        Commands::Done(args) => cmd_done(&data_dir, args),
        Commands::Rm(args) => cmd_rm(&data_dir, args),
        Commands::ClearDone => cmd_clear_done(&data_dir),
        Commands::Mv(args) => cmd_mv(&data_dir, args),
        Commands::Sort(args) => cmd_sort(&data_dir, args),
        Commands::Category(args) => cmd_category(&data_dir, args, json),
        Commands::Project(args) => cmd_project(&data_dir, args, json),
        Commands::Timer(args) => cmd_timer(&data_dir, args, json),
        Commands::Entry(args) => cmd_entry(&data_dir, args, json),
        Commands::Report(args) => cmd_report(&data_dir, args, json),
        Commands::Remind => cmd_remind(&data_dir, json),
        Commands::Export(args) => cmd_export(&data_dir, args),
        Commands::Import(args) => cmd_import(&data_dir, args),
        Commands::Config(args) => cmd_config(&data_dir, args, json),
    }
}

// ---------------------------------------------------------------------------
// Context helpers
// ---------------------------------------------------------------------------

fn resolve_data_dir(flag: Option<&str>) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(dir) = flag {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|d| d.join("tally"))
        .ok_or_else(|| "could not determine the user data directory (use --data-dir)".into())
}

fn open_store(data_dir: &Path) -> Result<Store, Box<dyn Error>> {
    Ok(Store::open(&database_path(data_dir))?)
}

fn load_list(store: &Store) -> Result<TaskList, Box<dyn Error>> {
    Ok(TaskList::from_tasks(store.load_tasks()?))
}

fn load_log(store: &Store) -> Result<EntryLog, Box<dyn Error>> {
    Ok(EntryLog::from_entries(store.load_time_entries()?))
}

/// Load categories, seeding the defaults on first use.
fn load_categories(store: &mut Store) -> Result<Vec<Category>, Box<dyn Error>> {
    let mut categories = store.load_categories()?;
    if category_ops::ensure_default_categories(&mut categories) {
        store.save_categories(&categories)?;
    }
    Ok(categories)
}

/// Load projects, seeding the defaults on first use.
fn load_projects(store: &mut Store) -> Result<Vec<Project>, Box<dyn Error>> {
    let mut projects = store.load_projects()?;
    if project_ops::ensure_default_projects(&mut projects) {
        store.save_projects(&projects)?;
    }
    Ok(projects)
}

fn load_settings(data_dir: &Path) -> Settings {
    config_io::load_settings(&config_io::settings_path(data_dir))
}

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

/// Resolve a category given by name, full id, or unique id prefix.
fn resolve_category_id(categories: &[Category], input: &str) -> Result<String, Box<dyn Error>> {
    if let Some(category) = category_ops::find_category_by_name(categories, input) {
        return Ok(category.id.clone());
    }
    resolve_by_id_prefix(categories.iter().map(|c| c.id.as_str()), input)
        .ok_or_else(|| format!("no category uniquely matches '{input}'").into())
}

fn resolve_project_id(projects: &[Project], input: &str) -> Result<String, Box<dyn Error>> {
    if let Some(project) = project_ops::find_project_by_name(projects, input) {
        return Ok(project.id.clone());
    }
    resolve_by_id_prefix(projects.iter().map(|p| p.id.as_str()), input)
        .ok_or_else(|| format!("no project uniquely matches '{input}'").into())
}

fn resolve_task_id(list: &TaskList, input: &str) -> Result<String, Box<dyn Error>> {
    resolve_by_id_prefix(list.tasks().iter().map(|t| t.id.as_str()), input)
        .ok_or_else(|| format!("no task uniquely matches '{input}'").into())
}

fn resolve_entry_id(log: &EntryLog, input: &str) -> Result<String, Box<dyn Error>> {
    resolve_by_id_prefix(log.entries().iter().map(|e| e.id.as_str()), input)
        .ok_or_else(|| format!("no time entry uniquely matches '{input}'").into())
}

/// Match an id exactly, or by prefix when the prefix is unambiguous.
fn resolve_by_id_prefix<'a>(
    ids: impl Iterator<Item = &'a str>,
    input: &str,
) -> Option<String> {
    let mut matched = None;
    for id in ids {
        if id == input {
            return Some(id.to_string());
        }
        if id.starts_with(input) {
            if matched.is_some() {
                return None; // ambiguous
            }
            matched = Some(id.to_string());
        }
    }
    matched
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

fn parse_datetime(input: &str) -> Result<DateTime<Local>, Box<dyn Error>> {
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|_| format!("could not parse '{input}' (expected YYYY-MM-DD [HH:MM])"))?;
    naive
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| format!("'{input}' is not a valid local time").into())
}

fn parse_date(input: &str) -> Result<NaiveDate, Box<dyn Error>> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| format!("could not parse date '{input}' (expected YYYY-MM-DD)").into())
}

/// `--from`/`--to` defaults: Monday of the current week through today.
fn parse_range(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(NaiveDate, NaiveDate), Box<dyn Error>> {
    let today = Local::now().date_naive();
    let week_start = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
        .unwrap_or(today);
    let from = from.map(parse_date).transpose()?.unwrap_or(week_start);
    let to = to.map(parse_date).transpose()?.unwrap_or(today);
    Ok((from, to))
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

fn cmd_add(data_dir: &Path, args: AddArgs) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let categories = load_categories(&mut store)?;
    let settings = load_settings(data_dir);

    let category_id = match &args.category {
        Some(input) => resolve_category_id(&categories, input)?,
        None => settings.default_category_id.clone().unwrap_or_default(),
    };

    let mut list = load_list(&store)?;
    let task = task_ops::add_task(
        &mut list,
        task_ops::NewTask {
            title: args.title,
            category_id,
            description: args.desc.unwrap_or_default(),
            due_date: args.due.as_deref().map(parse_datetime).transpose()?,
            priority: args.priority,
        },
    )?;
    store.save_task(&task)?;

    println!("added {} \"{}\"", short_id(&task.id), task.title);
    Ok(())
}

fn cmd_list(data_dir: &Path, args: ListArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let categories = load_categories(&mut store)?;
    let mut list = load_list(&store)?;

    if let Some(input) = &args.category {
        let id = resolve_category_id(&categories, input)?;
        list.filter_by_category(&id);
    }

    let rows: Vec<(usize, &crate::model::task::Task)> = list
        .visible()
        .into_iter()
        .enumerate()
        .filter(|(_, t)| {
            if args.pending && t.completed {
                return false;
            }
            if args.completed && !t.completed {
                return false;
            }
            true
        })
        .collect();

    if json {
        let out: Vec<TaskRowJson> = rows
            .iter()
            .map(|(row, task)| task_row_json(*row, task, &categories))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("no tasks");
        return Ok(());
    }
    for (row, task) in rows {
        println!("{}", format_task_line(row, task, &categories));
    }
    Ok(())
}

fn cmd_show(data_dir: &Path, args: IdArg, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let categories = load_categories(&mut store)?;
    let list = load_list(&store)?;
    let id = resolve_task_id(&list, &args.id)?;
    let task = list
        .get(&id)
        .ok_or_else(|| format!("no task matches '{}'", args.id))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&task_row_json(
                task.display_order.max(0) as usize,
                task,
                &categories
            ))?
        );
        return Ok(());
    }
    for line in format_task_detail(task, &categories) {
        println!("{line}");
    }
    Ok(())
}

fn cmd_edit(data_dir: &Path, args: EditArgs) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let categories = load_categories(&mut store)?;
    let mut list = load_list(&store)?;
    let id = resolve_task_id(&list, &args.id)?;

    let category_id = args
        .category
        .as_deref()
        .map(|input| resolve_category_id(&categories, input))
        .transpose()?;
    let due_date = match args.due.as_deref() {
        None => None,
        Some("none") => Some(None),
        Some(text) => Some(Some(parse_datetime(text)?)),
    };

    let task = task_ops::update_task(
        &mut list,
        &id,
        task_ops::TaskPatch {
            title: args.title,
            description: args.desc,
            category_id,
            due_date,
            priority: args.priority,
        },
    )?;
    store.save_task(&task)?;
    println!("updated {}", short_id(&task.id));
    Ok(())
}

fn cmd_done(data_dir: &Path, args: IdArg) -> Result<(), Box<dyn Error>> {
    let store = open_store(data_dir)?;
    let mut list = load_list(&store)?;
    let id = resolve_task_id(&list, &args.id)?;

    let completed = task_ops::toggle_completion(&mut list, &id)?;
    let task = list.get(&id).ok_or("task disappeared mid-update")?;
    store.save_task(task)?;

    if completed {
        println!("completed \"{}\"", task.title);
    } else {
        println!("reopened \"{}\"", task.title);
    }
    Ok(())
}

fn cmd_rm(data_dir: &Path, args: IdArg) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let mut list = load_list(&store)?;
    let id = resolve_task_id(&list, &args.id)?;

    task_ops::delete_task(&mut list, &id)?;
    // Removal renumbered the survivors, so persist the whole list.
    store.save_tasks(list.tasks())?;
    println!("removed {}", short_id(&id));
    Ok(())
}

fn cmd_clear_done(data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let mut list = load_list(&store)?;
    let removed = task_ops::delete_completed(&mut list);
    store.save_tasks(list.tasks())?;
    println!("removed {} completed task(s)", removed.len());
    Ok(())
}

fn cmd_mv(data_dir: &Path, args: MvArgs) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let categories = load_categories(&mut store)?;
    let mut list = load_list(&store)?;

    if let Some(input) = &args.category {
        let id = resolve_category_id(&categories, input)?;
        list.filter_by_category(&id);
    }

    list.move_row(args.from, args.to)?;
    // Display orders shifted for every row between the two positions.
    store.save_tasks(list.tasks())?;
    println!("moved row {} to {}", args.from, args.to);
    Ok(())
}

fn cmd_sort(data_dir: &Path, args: SortArgs) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let mut list = load_list(&store)?;
    let ascending = !args.desc;

    match args.field.as_str() {
        "due" => list.sort_by_due_date(ascending),
        "priority" => list.sort_by_priority(ascending),
        other => return Err(format!("unknown sort key '{other}' (expected: due, priority)").into()),
    }
    store.save_tasks(list.tasks())?;
    println!("sorted by {}", args.field);
    Ok(())
}

// ---------------------------------------------------------------------------
// Category commands
// ---------------------------------------------------------------------------

fn cmd_category(data_dir: &Path, cmd: CategoryCmd, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let mut categories = load_categories(&mut store)?;

    match cmd.action {
        CategoryAction::Add(args) => {
            let category = category_ops::add_category(&mut categories, &args.name, &args.color)?;
            store.save_category(&category)?;
            println!("added category {} \"{}\"", short_id(&category.id), category.name);
        }
        CategoryAction::List => {
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for category in &categories {
                    println!("{}", format_category_line(category));
                }
            }
        }
        CategoryAction::Update(args) => {
            let id = resolve_category_id(&categories, &args.category)?;
            let category = category_ops::update_category(
                &mut categories,
                &id,
                args.name.as_deref(),
                args.color.as_deref(),
            )?;
            store.save_category(&category)?;
            println!("updated category {}", category.name);
        }
        CategoryAction::Rm(args) => {
            let id = resolve_category_id(&categories, &args.name_or_id)?;
            category_ops::delete_category(&mut categories, &id)?;
            store.delete_category(&id)?;
            println!("removed category {}", short_id(&id));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Project commands
// ---------------------------------------------------------------------------

fn cmd_project(data_dir: &Path, cmd: ProjectCmd, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let mut projects = load_projects(&mut store)?;

    match cmd.action {
        ProjectAction::Add(args) => {
            let project =
                project_ops::add_project(&mut projects, &args.name, &args.color, &args.desc)?;
            store.save_project(&project)?;
            println!("added project {} \"{}\"", short_id(&project.id), project.name);
        }
        ProjectAction::List(args) => {
            let shown: Vec<&Project> = if args.all {
                projects.iter().collect()
            } else {
                project_ops::active_projects(&projects)
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                for project in shown {
                    println!("{}", format_project_line(project));
                }
            }
        }
        ProjectAction::Update(args) => {
            let id = resolve_project_id(&projects, &args.project)?;
            let project = project_ops::update_project(
                &mut projects,
                &id,
                args.name.as_deref(),
                args.color.as_deref(),
                args.desc.as_deref(),
                None,
            )?;
            store.save_project(&project)?;
            println!("updated project {}", project.name);
        }
        ProjectAction::Archive(args) => {
            let id = resolve_project_id(&projects, &args.name_or_id)?;
            let project =
                project_ops::update_project(&mut projects, &id, None, None, None, Some(false))?;
            store.save_project(&project)?;
            println!("archived project {}", project.name);
        }
        ProjectAction::Restore(args) => {
            let id = resolve_project_id(&projects, &args.name_or_id)?;
            let project =
                project_ops::update_project(&mut projects, &id, None, None, None, Some(true))?;
            store.save_project(&project)?;
            println!("restored project {}", project.name);
        }
        ProjectAction::Rm(args) => {
            let id = resolve_project_id(&projects, &args.name_or_id)?;
            project_ops::delete_project(&mut projects, &id)?;
            store.delete_project(&id)?;
            println!("removed project {}", short_id(&id));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Timer commands
// ---------------------------------------------------------------------------

fn cmd_timer(data_dir: &Path, cmd: TimerCmd, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let now = Local::now();

    match cmd.action {
        TimerAction::Start(args) => {
            let projects = load_projects(&mut store)?;
            let id = resolve_project_id(&projects, &args.name_or_id)?;
            let mut log = load_log(&store)?;
            let entry = time_ops::start_timer(&mut log, &projects, &id, now)?;
            store.save_time_entries(log.entries())?;
            let name = project_ops::find_project(&projects, &entry.project_id)
                .map(|p| p.name.clone())
                .unwrap_or(entry.project_id);
            println!("timer started for {name}");
        }
        TimerAction::Stop => {
            let mut log = load_log(&store)?;
            let stopped = time_ops::stop_timer(&mut log, now)?;
            store.save_time_entry(&stopped)?;
            println!(
                "timer stopped after {}",
                time_stats::format_duration(stopped.duration, "h:mm:ss")
            );
        }
        TimerAction::Status => {
            let projects = load_projects(&mut store)?;
            let log = load_log(&store)?;
            let status = match log.running() {
                Some(entry) => {
                    let name = project_ops::find_project(&projects, &entry.project_id)
                        .map(|p| p.name.clone());
                    TimerStatusJson {
                        running: true,
                        project_id: Some(entry.project_id.clone()),
                        project: name,
                        started: Some(entry.start_time),
                        elapsed_seconds: entry.elapsed(now),
                        elapsed: time_stats::format_duration(entry.elapsed(now), "h:mm:ss"),
                    }
                }
                None => TimerStatusJson {
                    running: false,
                    project_id: None,
                    project: None,
                    started: None,
                    elapsed_seconds: 0,
                    elapsed: "0:00:00".to_string(),
                },
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else if status.running {
                println!(
                    "tracking {} for {}",
                    status.project.as_deref().unwrap_or("unknown project"),
                    status.elapsed
                );
            } else {
                println!("no timer running");
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry commands
// ---------------------------------------------------------------------------

fn cmd_entry(data_dir: &Path, cmd: EntryCmd, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let now = Local::now();

    match cmd.action {
        EntryAction::Add(args) => {
            let projects = load_projects(&mut store)?;
            let id = resolve_project_id(&projects, &args.project)?;
            let mut log = load_log(&store)?;
            let entry = time_ops::add_entry(
                &mut log,
                &projects,
                &id,
                parse_datetime(&args.start)?,
                parse_datetime(&args.end)?,
                &args.notes,
            )?;
            store.save_time_entry(&entry)?;
            println!(
                "recorded {} for {}",
                time_stats::format_duration(entry.seconds(now), "h:mm:ss"),
                args.project
            );
        }
        EntryAction::List(args) => {
            let projects = load_projects(&mut store)?;
            let log = load_log(&store)?;
            let (from, to) = parse_range(args.from.as_deref(), args.to.as_deref())?;

            let project_id = args
                .project
                .as_deref()
                .map(|input| resolve_project_id(&projects, input))
                .transpose()?;
            let entries: Vec<_> = log
                .in_range(from, to)
                .into_iter()
                .filter(|e| project_id.as_deref().is_none_or(|p| e.project_id == p))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("no entries between {from} and {to}");
            } else {
                for entry in entries {
                    println!("{}", format_entry_line(entry, &projects, now));
                }
            }
        }
        EntryAction::Rm(args) => {
            let mut log = load_log(&store)?;
            let id = resolve_entry_id(&log, &args.id)?;
            time_ops::remove_entry(&mut log, &id)?;
            store.delete_time_entry(&id)?;
            println!("removed entry {}", short_id(&id));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Report / reminders
// ---------------------------------------------------------------------------

fn cmd_report(data_dir: &Path, args: ReportArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let projects = load_projects(&mut store)?;
    let log = load_log(&store)?;
    let now = Local::now();
    let (from, to) = parse_range(args.from.as_deref(), args.to.as_deref())?;

    let by_day = time_stats::totals_by_day(log.entries(), from, to, now);
    let by_project = time_stats::totals_by_project(log.entries(), from, to, now);
    let total: i64 = by_day.values().sum();

    let report = ReportJson {
        from,
        to,
        total_seconds: total,
        total: time_stats::format_duration(total, "h:mm:ss"),
        by_project: by_project
            .iter()
            .map(|(id, secs)| ProjectTotalJson {
                project_id: id.clone(),
                name: project_ops::find_project(&projects, id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| id.clone()),
                seconds: *secs,
                duration: time_stats::format_duration(*secs, "h:mm:ss"),
            })
            .collect(),
        by_day: by_day
            .iter()
            .map(|(date, secs)| DayTotalJson {
                date: *date,
                seconds: *secs,
                duration: time_stats::format_duration(*secs, "h:mm:ss"),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("time report {from} .. {to}");
    println!("total: {}", report.total);
    if !report.by_project.is_empty() {
        println!();
        println!("by project:");
        for row in &report.by_project {
            println!("  {:<24} {}", row.name, row.duration);
        }
    }
    println!();
    println!("by day:");
    for row in &report.by_day {
        println!("  {}  {}", row.date, row.duration);
    }
    Ok(())
}

fn cmd_remind(data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let store = open_store(data_dir)?;
    let list = load_list(&store)?;
    let settings = load_settings(data_dir);

    let mut tracker = reminders::ReminderTracker::new();
    let due = tracker.check(list.tasks(), &settings, Local::now());

    if json {
        let out: Vec<ReminderJson> = due.iter().map(reminder_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    if due.is_empty() {
        println!("nothing due");
        return Ok(());
    }
    for reminder in &due {
        println!("{}", format_reminder(reminder));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Import / export
// ---------------------------------------------------------------------------

fn cmd_export(data_dir: &Path, args: TransferArgs) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let path = PathBuf::from(&args.file);

    match (args.kind.as_str(), extension(&path)) {
        ("tasks", "json") => {
            let list = load_list(&store)?;
            export::export_tasks_json(&path, list.tasks())?;
            println!("exported {} task(s) to {}", list.len(), path.display());
        }
        ("tasks", "csv") => {
            let list = load_list(&store)?;
            export::export_tasks_csv(&path, list.tasks())?;
            println!("exported {} task(s) to {}", list.len(), path.display());
        }
        ("categories", "json") => {
            let categories = load_categories(&mut store)?;
            export::export_categories_json(&path, &categories)?;
            println!(
                "exported {} categories to {}",
                categories.len(),
                path.display()
            );
        }
        (kind, ext) => {
            return Err(format!("cannot export '{kind}' as '.{ext}'").into());
        }
    }
    Ok(())
}

fn cmd_import(data_dir: &Path, args: TransferArgs) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let path = PathBuf::from(&args.file);

    match (args.kind.as_str(), extension(&path)) {
        ("tasks", "json") | ("tasks", "csv") => {
            let imported = if extension(&path) == "json" {
                export::import_tasks_json(&path)?
            } else {
                export::import_tasks_csv(&path)?
            };
            let mut list = load_list(&store)?;
            let mut added = 0;
            for task in imported {
                // Keep existing records; an import never overwrites.
                if list.get(&task.id).is_some() {
                    debug!(id = %task.id, "skipping duplicate import");
                    continue;
                }
                list.add(task);
                added += 1;
            }
            store.save_tasks(list.tasks())?;
            println!("imported {added} task(s) from {}", path.display());
        }
        ("categories", "json") => {
            let imported = export::import_categories_json(&path)?;
            let mut categories = load_categories(&mut store)?;
            let mut added = 0;
            for category in imported {
                if category_ops::find_category(&categories, &category.id).is_none() {
                    categories.push(category);
                    added += 1;
                }
            }
            store.save_categories(&categories)?;
            println!("imported {added} categories from {}", path.display());
        }
        (kind, ext) => {
            return Err(format!("cannot import '{kind}' from '.{ext}'").into());
        }
    }
    Ok(())
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config(data_dir: &Path, cmd: ConfigCmd, json: bool) -> Result<(), Box<dyn Error>> {
    let mut settings = load_settings(data_dir);

    match cmd.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
                return Ok(());
            }
            println!("data dir:          {}", data_dir.display());
            println!("notifications:     {}", settings.enable_notifications);
            println!("notify-due-soon:   {}", settings.notify_due_soon);
            println!("notify-overdue:    {}", settings.notify_overdue);
            println!(
                "default-category:  {}",
                settings.default_category_id.as_deref().unwrap_or("-")
            );
        }
        ConfigAction::Set(args) => {
            match args.key.as_str() {
                "notifications" => settings.enable_notifications = parse_bool(&args.value)?,
                "notify-due-soon" => settings.notify_due_soon = parse_bool(&args.value)?,
                "notify-overdue" => settings.notify_overdue = parse_bool(&args.value)?,
                "default-category" => {
                    if args.value == "none" {
                        settings.default_category_id = None;
                    } else {
                        let mut store = open_store(data_dir)?;
                        let categories = load_categories(&mut store)?;
                        settings.default_category_id =
                            Some(resolve_category_id(&categories, &args.value)?);
                    }
                }
                other => {
                    return Err(format!(
                        "unknown setting '{other}' (expected: notifications, \
                         notify-due-soon, notify-overdue, default-category)"
                    )
                    .into());
                }
            }
            config_io::save_settings(&config_io::settings_path(data_dir), &settings)?;
            println!("set {}", args.key);
        }
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool, Box<dyn Error>> {
    match value {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(format!("expected true/false, got '{other}'").into()),
    }
}
