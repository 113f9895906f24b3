//! Catalog domain models.
//!
//! Engineers, social-media managers and publication accounts share one
//! shape: a stable id plus a rename [`History`]. Leadership is a separate
//! role table that is never part of the worker roster.

use super::history::{History, HistoryRecord, resolve_latest_name, resolve_name_as_of};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString};

/// A rename-tracked catalog member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identifier, never reassigned after creation
    pub id: String,
    /// Rename history, never empty
    pub history: History,
}

impl Entity {
    pub fn new(id: impl Into<String>, initial: HistoryRecord) -> Self {
        Self {
            id: id.into(),
            history: History::new(initial),
        }
    }

    /// A default-dataset entry: id equals the name, one epoch-dated record.
    pub fn seeded(name: &str) -> Self {
        Self {
            id: name.to_string(),
            history: History::seeded(name),
        }
    }

    /// Name in force on `date`.
    pub fn name_as_of(&self, date: NaiveDate) -> &str {
        resolve_name_as_of(&self.history, date)
    }

    /// Most recent name.
    pub fn latest_name(&self) -> &str {
        resolve_latest_name(&self.history)
    }
}

/// Which catalog collection an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    /// Video engineer
    Engineer,
    /// Social-media manager
    Smm,
    /// Publication account
    Account,
}

impl EntityKind {
    /// Entity type label used in `NotFound` errors.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Engineer => "engineer",
            EntityKind::Smm => "smm",
            EntityKind::Account => "account",
        }
    }
}

/// Leadership roles, in seniority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum Role {
    /// Head of the team; the admin identity
    #[serde(rename = "Руководитель")]
    #[strum(serialize = "Руководитель")]
    Head,
    #[serde(rename = "Заместитель")]
    #[strum(serialize = "Заместитель")]
    Deputy,
    #[serde(rename = "Цензор")]
    #[strum(serialize = "Цензор")]
    Censor,
    #[serde(rename = "Сценарист")]
    #[strum(serialize = "Сценарист")]
    Scriptwriter,
    #[serde(rename = "Исполнитель")]
    #[strum(serialize = "Исполнитель")]
    Performer,
}

/// One row of the leadership table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadershipRole {
    pub role: Role,
    /// Current holder's display name
    pub name: String,
    /// Locked rows reject reassignment through normal edit flows
    #[serde(default)]
    pub locked: bool,
}

impl LeadershipRole {
    pub fn new(role: Role, name: impl Into<String>, locked: bool) -> Self {
        Self {
            role,
            name: name.into(),
            locked,
        }
    }
}

/// Kind of a worker that can log in without a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WorkerKind {
    /// Video engineer
    Ve,
    /// Social-media manager
    Smm,
}

impl From<WorkerKind> for EntityKind {
    fn from(kind: WorkerKind) -> Self {
        match kind {
            WorkerKind::Ve => EntityKind::Engineer,
            WorkerKind::Smm => EntityKind::Smm,
        }
    }
}

/// An entry of the worker-login picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub kind: WorkerKind,
}

/// SMM id to the ordered account ids it manages.
pub type SmmLinks = BTreeMap<String, Vec<String>>;

/// A resolved row of the directory view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub kind: EntityKind,
    pub id: String,
    /// Name in force on the requested date
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_labels_round_trip() {
        assert_eq!(Role::Head.to_string(), "Руководитель");
        assert_eq!(Role::from_str("Цензор").unwrap(), Role::Censor);
        assert_eq!(serde_json::to_string(&Role::Head).unwrap(), "\"Руководитель\"");
    }

    #[test]
    fn test_worker_kind_json() {
        assert_eq!(serde_json::to_string(&WorkerKind::Ve).unwrap(), "\"ve\"");
        assert_eq!(WorkerKind::from_str("smm").unwrap(), WorkerKind::Smm);
        assert_eq!(EntityKind::from(WorkerKind::Ve), EntityKind::Engineer);
    }

    #[test]
    fn test_seeded_entity() {
        let entity = Entity::seeded("Максим");
        assert_eq!(entity.id, "Максим");
        assert_eq!(entity.history.len(), 1);
        assert_eq!(entity.latest_name(), "Максим");
    }

    #[test]
    fn test_leadership_json_shape() {
        let row: LeadershipRole =
            serde_json::from_str(r#"{"role":"Руководитель","name":"Тихон","locked":true}"#).unwrap();
        assert_eq!(row, LeadershipRole::new(Role::Head, "Тихон", true));

        let row: LeadershipRole = serde_json::from_str(r#"{"role":"Сценарист","name":"Жангир"}"#).unwrap();
        assert!(!row.locked);
    }
}
