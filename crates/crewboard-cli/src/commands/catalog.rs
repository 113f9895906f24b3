use crate::app::App;
use anyhow::Result;
use chrono::NaiveDate;
use crewboard_core::CrewError;
use crewboard_core::catalog::{EntityKind, HistoryRecord, Role};
use crewboard_core::session::Page;
use strum::IntoEnumIterator;

fn kinds(kind: Option<EntityKind>) -> Vec<EntityKind> {
    kind.map_or_else(|| EntityKind::iter().collect(), |k| vec![k])
}

pub fn roster(app: &App, kind: Option<EntityKind>) {
    for kind in kinds(kind) {
        println!("{}:", kind);
        for entity in app.catalog.entities(kind) {
            match entity.history.latest().attribute_str("project") {
                Some(project) if !project.is_empty() => {
                    println!("  {:<38} {} [{}]", entity.id, entity.latest_name(), project)
                }
                _ => println!("  {:<38} {}", entity.id, entity.latest_name()),
            }
        }
    }
}

pub fn history(app: &App, kind: EntityKind, id: &str) -> Result<()> {
    let entity = app
        .catalog
        .entity(kind, id)
        .ok_or_else(|| CrewError::not_found(kind.label(), id))?;

    for record in entity.history.chronological() {
        println!("{}  {}", record.from, record.name);
    }
    Ok(())
}

pub fn workers(app: &App) {
    for worker in app.catalog.list_workers() {
        let name = app
            .catalog
            .entity(worker.kind.into(), &worker.id)
            .map_or(worker.id.as_str(), |e| e.latest_name());
        println!("{:<4} {:<38} {}", worker.kind, worker.id, name);
    }
}

pub fn directory(app: &mut App, date: NaiveDate) -> Result<()> {
    app.session.open_page(Page::Directory)?;

    println!("{} ({})", Page::Directory.title(), date);
    for entry in app.catalog.directory(date) {
        println!("{:<9} {:<38} {}", entry.kind, entry.id, entry.name);
    }
    Ok(())
}

pub fn add(
    app: &mut App,
    kind: EntityKind,
    name: String,
    from: NaiveDate,
    project: Option<String>,
) -> Result<()> {
    app.require_admin("add")?;

    let mut record = HistoryRecord::new(from, name);
    if let Some(project) = project {
        record = record.with_attribute("project", project);
    }
    let id = app.catalog.add_entity(kind, record)?;
    println!("{}", id);
    Ok(())
}

pub fn remove(app: &mut App, kind: EntityKind, id: &str) -> Result<()> {
    app.require_admin("remove")?;

    let removed = app.catalog.remove_entity(kind, id)?;
    println!("removed {} {}", kind, removed.latest_name());
    Ok(())
}

/// Appends a record that keeps the latest record's attributes.
pub fn rename(
    app: &mut App,
    kind: EntityKind,
    id: &str,
    name: String,
    from: NaiveDate,
    project: Option<String>,
) -> Result<()> {
    app.require_admin("rename")?;

    let mut record = app
        .catalog
        .entity(kind, id)
        .ok_or_else(|| CrewError::not_found(kind.label(), id))?
        .history
        .latest()
        .clone();
    record.from = from;
    record.name = name;
    if let Some(project) = project {
        record = record.with_attribute("project", project);
    }

    app.catalog.append_history(kind, id, record)?;
    Ok(())
}

pub fn leadership(app: &App) {
    for row in app.catalog.leadership() {
        let lock = if row.locked { " (locked)" } else { "" };
        println!("{:<14} {}{}", row.role, row.name, lock);
    }
}

pub fn assign_role(app: &mut App, role: Role, name: String) -> Result<()> {
    app.require_admin("assign-role")?;
    app.catalog.assign_role(role, name)?;
    Ok(())
}

pub fn links(app: &App, smm_id: Option<&str>) {
    match smm_id {
        Some(smm_id) => {
            for account in app.catalog.accounts_for(smm_id) {
                println!("{}", account);
            }
        }
        None => {
            for (smm_id, accounts) in app.catalog.smm_links() {
                println!("{}: {}", smm_id, accounts.join(", "));
            }
        }
    }
}

pub fn link(app: &mut App, smm_id: &str, account_id: &str) -> Result<()> {
    app.require_admin("link")?;
    if !app.catalog.assign_account(smm_id, account_id)? {
        println!("{} already manages {}", smm_id, account_id);
    }
    Ok(())
}

pub fn unlink(app: &mut App, smm_id: &str, account_id: &str) -> Result<()> {
    app.require_admin("unlink")?;
    if !app.catalog.unassign_account(smm_id, account_id)? {
        println!("{} does not manage {}", smm_id, account_id);
    }
    Ok(())
}
