//! Task rows and the ordering used by the task list pages.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use strum::{Display, EnumString};

/// Task urgency, by colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum Priority {
    #[serde(rename = "Красный")]
    #[strum(serialize = "Красный")]
    Red,
    #[serde(rename = "Оранжевый")]
    #[strum(serialize = "Оранжевый")]
    Orange,
    #[serde(rename = "Зелёный")]
    #[strum(serialize = "Зелёный")]
    Green,
}

impl Priority {
    /// Higher sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Red => 3,
            Priority::Orange => 2,
            Priority::Green => 1,
        }
    }
}

/// Blank date inputs arrive as `""`; those mean "no date".
fn blank_as_no_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Blank or unrecognised priorities rank like a missing one.
fn lenient_priority<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Priority>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| Priority::from_str(s.trim()).ok()))
}

/// A row of a task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "blank_as_no_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: Option<Priority>,
    /// `HH:MM`
    #[serde(default)]
    pub time: Option<String>,
    /// `HH:MM`, used when `time` is absent
    #[serde(default)]
    pub shoot_start: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl Task {
    /// `time`, else `shoot_start`, else `""`. A blank `time` counts as missing.
    pub fn sort_time(&self) -> &str {
        self.time
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.shoot_start.as_deref())
            .filter(|t| !t.is_empty())
            .unwrap_or("")
    }

    fn rank(&self) -> u8 {
        self.priority.map_or(0, Priority::rank)
    }
}

/// Date, then priority (red first), then time. Missing values sort first
/// except priority, where a missing one sorts last.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| b.rank().cmp(&a.rank()))
        .then_with(|| a.sort_time().cmp(b.sort_time()))
}

/// Returns the tasks in list order. Stable for equal keys.
pub fn sort_tasks(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(compare_tasks);
    sorted
}

/// The date tabs above each task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTab {
    /// Сегодня
    Today,
    /// Завтра
    Tomorrow,
    /// Дата
    On(NaiveDate),
}

impl DateTab {
    /// The concrete date this tab shows, relative to `today`.
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            DateTab::Today => today,
            DateTab::Tomorrow => today.checked_add_days(Days::new(1)).unwrap_or(today),
            DateTab::On(date) => date,
        }
    }
}

/// Tasks scheduled on `tab`'s date, sorted.
pub fn tasks_for(tasks: &[Task], tab: DateTab, today: NaiveDate) -> Vec<Task> {
    let date = tab.resolve(today);
    let mut selected: Vec<Task> = tasks.iter().filter(|t| t.date == Some(date)).cloned().collect();
    selected.sort_by(compare_tasks);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, date: Option<&str>, priority: Option<Priority>, time: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: String::new(),
            date: date.map(|d| d.parse().unwrap()),
            priority,
            time: time.map(str::to_string),
            shoot_start: None,
            status: None,
            assignee: None,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date_then_priority_then_time() {
        let tasks = vec![
            task("late", Some("2024-05-02"), Some(Priority::Red), Some("09:00")),
            task("green", Some("2024-05-01"), Some(Priority::Green), Some("08:00")),
            task("red-noon", Some("2024-05-01"), Some(Priority::Red), Some("12:00")),
            task("red-morning", Some("2024-05-01"), Some(Priority::Red), Some("07:30")),
            task("orange", Some("2024-05-01"), Some(Priority::Orange), None),
            task("undated", None, None, None),
        ];

        assert_eq!(
            ids(&sort_tasks(&tasks)),
            vec!["undated", "red-morning", "red-noon", "orange", "green", "late"]
        );
    }

    #[test]
    fn test_shoot_start_used_without_time() {
        let mut shoot = task("shoot", Some("2024-05-01"), Some(Priority::Green), None);
        shoot.shoot_start = Some("06:00".to_string());
        let timed = task("timed", Some("2024-05-01"), Some(Priority::Green), Some("10:00"));

        assert_eq!(ids(&sort_tasks(&[timed, shoot])), vec!["shoot", "timed"]);
    }

    #[test]
    fn test_date_tabs() {
        let today: NaiveDate = "2024-12-31".parse().unwrap();
        assert_eq!(DateTab::Today.resolve(today), today);
        assert_eq!(DateTab::Tomorrow.resolve(today).to_string(), "2025-01-01");

        let tasks = vec![
            task("a", Some("2025-01-01"), Some(Priority::Green), None),
            task("b", Some("2024-12-31"), None, None),
            task("c", Some("2025-01-01"), Some(Priority::Red), None),
        ];
        assert_eq!(ids(&tasks_for(&tasks, DateTab::Tomorrow, today)), vec!["c", "a"]);
    }

    #[test]
    fn test_blank_inputs_read_as_missing() {
        let tasks: Vec<Task> = serde_json::from_str(
            r#"[
                {"id":"a","date":"","priority":"Красный","time":""},
                {"id":"b","date":"2024-05-01","priority":""},
                {"id":"c","date":null,"priority":"Синий","time":"","shootStart":"07:00"}
            ]"#,
        )
        .unwrap();

        assert_eq!(tasks[0].date, None);
        assert_eq!(tasks[1].priority, None);
        assert_eq!(tasks[2].priority, None);
        assert_eq!(tasks[2].sort_time(), "07:00");
        assert_eq!(ids(&sort_tasks(&tasks)), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_malformed_date_is_an_error() {
        assert!(serde_json::from_str::<Task>(r#"{"id":"a","date":"вчера"}"#).is_err());
    }

    #[test]
    fn test_priority_json_labels() {
        let t: Task = serde_json::from_str(r#"{"id":"1","priority":"Оранжевый","shootStart":"10:00"}"#).unwrap();
        assert_eq!(t.priority, Some(Priority::Orange));
        assert_eq!(t.shoot_start.as_deref(), Some("10:00"));
    }
}
