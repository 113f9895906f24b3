//! Session domain models.

use crate::catalog::WorkerKind;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The authenticated actor.
///
/// Persisted as `{"kind":"admin","id":..}` or
/// `{"kind":"worker","id":..,"workerKind":"ve"|"smm"}`; no identity is `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Identity {
    /// The head, authenticated with the shared password
    Admin { id: String },
    /// A worker who picked themselves from the roster
    Worker {
        id: String,
        #[serde(rename = "workerKind")]
        worker_kind: WorkerKind,
    },
}

impl Identity {
    pub fn id(&self) -> &str {
        match self {
            Identity::Admin { id } | Identity::Worker { id, .. } => id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::Admin { .. })
    }
}

/// Named pages of the dashboard, keyed as in its navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Page {
    #[default]
    Engineers,
    Smm,
    #[strum(serialize = "mytasks")]
    MyTasks,
    #[strum(serialize = "mywork")]
    MyWork,
    Completed,
    Posts,
    Accounts,
    Directory,
}

impl Page {
    /// Navigation label.
    pub fn title(self) -> &'static str {
        match self {
            Page::Engineers => "Видеоинженеры",
            Page::Smm => "СММ",
            Page::MyTasks => "Мои задачи",
            Page::MyWork => "Моя работа",
            Page::Completed => "Выполненные задачи",
            Page::Posts => "Отчёт о выкладке",
            Page::Accounts => "Аккаунты",
            Page::Directory => "Справочник",
        }
    }

    /// Only the directory is restricted to the head.
    pub fn requires_admin(self) -> bool {
        matches!(self, Page::Directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_identity_json_shape() {
        let admin = Identity::Admin {
            id: "Тихон".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&admin).unwrap(),
            serde_json::json!({"kind": "admin", "id": "Тихон"})
        );

        let worker: Identity =
            serde_json::from_str(r#"{"id":"Усен","kind":"worker","workerKind":"ve"}"#).unwrap();
        assert_eq!(
            worker,
            Identity::Worker {
                id: "Усен".to_string(),
                worker_kind: WorkerKind::Ve
            }
        );
        assert_eq!(worker.id(), "Усен");
        assert!(!worker.is_admin());
    }

    #[test]
    fn test_no_identity_is_null() {
        let none: Option<Identity> = serde_json::from_str("null").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_page_keys() {
        assert_eq!(Page::from_str("mytasks").unwrap(), Page::MyTasks);
        assert_eq!(Page::Directory.to_string(), "directory");
        let admin_only: Vec<Page> = Page::iter().filter(|p| p.requires_admin()).collect();
        assert_eq!(admin_only, vec![Page::Directory]);
    }
}
