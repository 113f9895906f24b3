use anyhow::{Context, Result};
use chrono::NaiveDate;
use crewboard_core::task::{DateTab, Task, sort_tasks, tasks_for};
use std::fs;
use std::path::Path;

/// Reads a JSON array of tasks from `path`.
pub fn load(path: &Path) -> Result<Vec<Task>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as a task list", path.display()))
}

/// Rows shown for `tab`, or every task when `tab` is `None`.
pub fn select(tasks: &[Task], tab: Option<DateTab>, today: NaiveDate) -> Vec<Task> {
    match tab {
        Some(tab) => tasks_for(tasks, tab, today),
        None => sort_tasks(tasks),
    }
}

pub fn list(path: &Path, tab: Option<DateTab>, today: NaiveDate) -> Result<()> {
    let tasks = load(path)?;
    for task in select(&tasks, tab, today) {
        let date = task.date.map_or_else(|| "-".to_string(), |d| d.to_string());
        let priority = task.priority.map_or_else(|| "-".to_string(), |p| p.to_string());
        let time = match task.sort_time() {
            "" => "-",
            time => time,
        };
        println!("{}  {:<9} {:<5}  {}  {}", date, priority, time, task.id, task.title);
    }
    Ok(())
}
