//! Default datasets, used when a key is missing or its value is unreadable.

use super::history::{HistoryRecord, epoch};
use super::model::{Entity, LeadershipRole, Role, SmmLinks};

/// Holder name used when the leadership table has no `Руководитель` entry.
pub const DEFAULT_HEAD_NAME: &str = "Тихон";

/// Admin password seeded on first start.
pub const DEFAULT_ADMIN_PASSWORD: &str = "230ew124";

const ENGINEERS: [&str; 4] = ["Усен", "Максим", "Вася", "Владимир"];

const SMM: [&str; 7] = ["Адель", "Алибек", "Азамат", "Катя", "Ваня", "Отец Иван", "Ян"];

const ACCOUNTS: [&str; 17] = [
    "Прообраз",
    "Антиаборт",
    "Суворов",
    "Вознесенский",
    "Семинария",
    "КазПросто",
    "Солнышко",
    "Радиовера",
    "Lucy инст",
    "Lucy АЛМ",
    "Lucy Жез",
    "Lucy Балх",
    "ПЦК",
    "Казанский",
    "Никольский",
    "Золотое Кольцо",
    "АПН",
];

const LINKS: [(&str, &[&str]); 7] = [
    ("Алибек", &["Прообраз", "Антиаборт"]),
    ("Адель", &["Суворов", "Вознесенский", "Семинария"]),
    ("Азамат", &["КазПросто", "Солнышко", "Радиовера"]),
    ("Катя", &["Lucy инст", "Lucy АЛМ", "Lucy Жез", "Lucy Балх"]),
    ("Ваня", &["ПЦК", "Казанский"]),
    ("Отец Иван", &["Никольский", "Золотое Кольцо"]),
    ("Ян", &["АПН"]),
];

pub fn engineers() -> Vec<Entity> {
    ENGINEERS.iter().map(|n| Entity::seeded(n)).collect()
}

pub fn smm() -> Vec<Entity> {
    SMM.iter().map(|n| Entity::seeded(n)).collect()
}

/// Accounts carry an empty `project` attribute from the start.
pub fn accounts() -> Vec<Entity> {
    ACCOUNTS
        .iter()
        .map(|n| Entity::new(*n, HistoryRecord::new(epoch(), *n).with_attribute("project", "")))
        .collect()
}

/// Only the head role is locked.
pub fn leadership() -> Vec<LeadershipRole> {
    vec![
        LeadershipRole::new(Role::Head, DEFAULT_HEAD_NAME, true),
        LeadershipRole::new(Role::Deputy, "Николай", false),
        LeadershipRole::new(Role::Censor, "о. Иван", false),
        LeadershipRole::new(Role::Scriptwriter, "Жангир", false),
    ]
}

pub fn smm_links() -> SmmLinks {
    LINKS
        .iter()
        .map(|(smm, accounts)| {
            (
                smm.to_string(),
                accounts.iter().map(|a| a.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engineers_are_epoch_seeded() {
        let engineers = engineers();
        assert_eq!(engineers.len(), 4);
        for e in &engineers {
            assert_eq!(e.history.len(), 1);
            assert_eq!(e.history.latest().from, epoch());
            assert_eq!(e.latest_name(), e.id);
        }
    }

    #[test]
    fn test_default_links_reference_default_accounts() {
        let accounts = accounts();
        let smm = smm();
        for (smm_id, linked) in smm_links() {
            assert!(smm.iter().any(|s| s.id == smm_id), "unknown smm {}", smm_id);
            for account in linked {
                assert!(accounts.iter().any(|a| a.id == account), "unknown account {}", account);
            }
        }
    }

    #[test]
    fn test_only_head_is_locked() {
        let locked: Vec<Role> = leadership().iter().filter(|r| r.locked).map(|r| r.role).collect();
        assert_eq!(locked, vec![Role::Head]);
    }
}
