use super::defaults::{self, DEFAULT_HEAD_NAME};
use super::history::HistoryRecord;
use super::model::{DirectoryEntry, Entity, EntityKind, LeadershipRole, Role, SmmLinks, Worker, WorkerKind};
use crate::error::{CrewError, Result};
use crate::storage::{self, KeyValueStore, keys};
use chrono::NaiveDate;
use std::sync::Arc;
use strum::IntoEnumIterator;
use uuid::Uuid;

/// Owns the roster, the leadership table and the SMM account assignments.
///
/// `CatalogStore` is responsible for:
/// - Loading every collection from its own key, falling back to defaults
/// - Answering "what was this entity called as of date D"
/// - Writing the affected collection through on every mutation
///
/// There is no ambient instance: build one at start-up with [`CatalogStore::load`],
/// pass it by reference to whatever needs it, and call [`CatalogStore::flush`]
/// on teardown.
pub struct CatalogStore {
    store: Arc<dyn KeyValueStore>,
    engineers: Vec<Entity>,
    smm: Vec<Entity>,
    leadership: Vec<LeadershipRole>,
    accounts: Vec<Entity>,
    smm_links: SmmLinks,
}

impl CatalogStore {
    /// Loads the catalog. Each key is read independently; a missing or
    /// malformed value yields that key's default dataset.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let engineers = storage::load_or_default(store.as_ref(), keys::ENGINEERS, defaults::engineers);
        let smm = storage::load_or_default(store.as_ref(), keys::SMM, defaults::smm);
        let leadership = storage::load_or_default(store.as_ref(), keys::LEADERSHIP, defaults::leadership);
        let accounts = storage::load_or_default(store.as_ref(), keys::ACCOUNTS, defaults::accounts);
        let smm_links = storage::load_or_default(store.as_ref(), keys::SMM_LINKS, defaults::smm_links);

        tracing::debug!(
            engineers = engineers.len(),
            smm = smm.len(),
            accounts = accounts.len(),
            "catalog loaded"
        );

        Self {
            store,
            engineers,
            smm,
            leadership,
            accounts,
            smm_links,
        }
    }

    pub fn engineers(&self) -> &[Entity] {
        &self.engineers
    }

    pub fn smm(&self) -> &[Entity] {
        &self.smm
    }

    pub fn accounts(&self) -> &[Entity] {
        &self.accounts
    }

    pub fn leadership(&self) -> &[LeadershipRole] {
        &self.leadership
    }

    pub fn smm_links(&self) -> &SmmLinks {
        &self.smm_links
    }

    /// All entities of one kind, in stored order.
    pub fn entities(&self, kind: EntityKind) -> &[Entity] {
        match kind {
            EntityKind::Engineer => &self.engineers,
            EntityKind::Smm => &self.smm,
            EntityKind::Account => &self.accounts,
        }
    }

    pub fn entity(&self, kind: EntityKind, id: &str) -> Option<&Entity> {
        self.entities(kind).iter().find(|e| e.id == id)
    }

    /// Appends a rename record to an entity's history and persists the
    /// collection. No deduplication of `from` dates.
    ///
    /// # Errors
    ///
    /// `InvalidRecord` if an attribute shadows `from` or `name`; `NotFound`
    /// if no entity of `kind` has `id`; storage errors from the write-through
    /// (the in-memory change is kept).
    pub fn append_history(&mut self, kind: EntityKind, id: &str, record: HistoryRecord) -> Result<()> {
        check_record(&record)?;
        let entity = self
            .entities_mut(kind)
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CrewError::not_found(kind.label(), id))?;

        tracing::info!(%kind, id, from = %record.from, name = %record.name, "appending history record");
        entity.history.push(record);
        self.persist(kind)
    }

    /// Creates an entity with a generated id and `initial` as its only record.
    ///
    /// Accounts get an empty `project` attribute unless one is given.
    pub fn add_entity(&mut self, kind: EntityKind, mut initial: HistoryRecord) -> Result<String> {
        check_record(&initial)?;
        if kind == EntityKind::Account {
            initial
                .attributes
                .entry("project".to_string())
                .or_insert_with(|| serde_json::Value::String(String::new()));
        }

        let id = Uuid::new_v4().to_string();
        tracing::info!(%kind, id = %id, name = %initial.name, "adding entity");
        self.entities_mut(kind).push(Entity::new(id.clone(), initial));
        self.persist(kind)?;
        Ok(id)
    }

    /// Removes an entity. Assignment-map references to it are left untouched.
    pub fn remove_entity(&mut self, kind: EntityKind, id: &str) -> Result<Entity> {
        let entities = self.entities_mut(kind);
        let index = entities
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CrewError::not_found(kind.label(), id))?;
        let removed = entities.remove(index);

        tracing::info!(%kind, id, "removed entity");
        self.persist(kind)?;
        Ok(removed)
    }

    /// The authoritative (first) holder of `role`, if the table has one.
    pub fn role_holder(&self, role: Role) -> Option<&str> {
        self.leadership
            .iter()
            .find(|l| l.role == role)
            .map(|l| l.name.as_str())
    }

    /// The head's display name, falling back to the built-in default when
    /// the leadership table has no head entry.
    pub fn head_name(&self) -> &str {
        self.role_holder(Role::Head).unwrap_or(DEFAULT_HEAD_NAME)
    }

    /// Sets the holder of `role`. A role missing from the table gets a new
    /// unlocked entry.
    ///
    /// # Errors
    ///
    /// `RoleLocked` if the authoritative entry is locked.
    pub fn assign_role(&mut self, role: Role, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        match self.leadership.iter_mut().find(|l| l.role == role) {
            Some(entry) if entry.locked => {
                tracing::warn!(%role, "rejected reassignment of locked role");
                return Err(CrewError::RoleLocked {
                    role: role.to_string(),
                });
            }
            Some(entry) => entry.name = name,
            None => self.leadership.push(LeadershipRole::new(role, name, false)),
        }

        tracing::info!(%role, "role reassigned");
        storage::save(self.store.as_ref(), keys::LEADERSHIP, &self.leadership)
    }

    /// Workers eligible for password-less login: every SMM, then every
    /// engineer.
    ///
    /// Leadership is never listed. An entity whose id or current name matches
    /// the head is dropped too, so the head can only enter through the
    /// password flow.
    pub fn list_workers(&self) -> Vec<Worker> {
        let head = self.head_name();
        let tagged = self
            .smm
            .iter()
            .map(|e| (e, WorkerKind::Smm))
            .chain(self.engineers.iter().map(|e| (e, WorkerKind::Ve)));

        tagged
            .filter(|(e, _)| {
                let is_head = e.id == head || e.latest_name() == head;
                if is_head {
                    tracing::debug!(id = %e.id, "excluding head from worker list");
                }
                !is_head
            })
            .map(|(e, kind)| Worker {
                id: e.id.clone(),
                kind,
            })
            .collect()
    }

    /// Account ids assigned to an SMM, empty when it has none.
    pub fn accounts_for(&self, smm_id: &str) -> &[String] {
        self.smm_links.get(smm_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Assigns an account to an SMM. Returns `false` if it was already
    /// assigned. Neither id is checked against the roster.
    pub fn assign_account(&mut self, smm_id: &str, account_id: &str) -> Result<bool> {
        let linked = self.smm_links.entry(smm_id.to_string()).or_default();
        if linked.iter().any(|a| a == account_id) {
            return Ok(false);
        }
        linked.push(account_id.to_string());

        tracing::info!(smm_id, account_id, "account assigned");
        storage::save(self.store.as_ref(), keys::SMM_LINKS, &self.smm_links)?;
        Ok(true)
    }

    /// Removes an account from an SMM. Returns `false` if it was not assigned.
    pub fn unassign_account(&mut self, smm_id: &str, account_id: &str) -> Result<bool> {
        let Some(linked) = self.smm_links.get_mut(smm_id) else {
            return Ok(false);
        };
        let before = linked.len();
        linked.retain(|a| a != account_id);
        if linked.len() == before {
            return Ok(false);
        }

        tracing::info!(smm_id, account_id, "account unassigned");
        storage::save(self.store.as_ref(), keys::SMM_LINKS, &self.smm_links)?;
        Ok(true)
    }

    /// Every entity resolved to the name it carried on `date`.
    pub fn directory(&self, date: NaiveDate) -> Vec<DirectoryEntry> {
        EntityKind::iter()
            .flat_map(|kind| {
                self.entities(kind).iter().map(move |e| DirectoryEntry {
                    kind,
                    id: e.id.clone(),
                    name: e.name_as_of(date).to_string(),
                })
            })
            .collect()
    }

    /// Writes every collection back to the store.
    pub fn flush(&self) -> Result<()> {
        for kind in EntityKind::iter() {
            self.persist(kind)?;
        }
        storage::save(self.store.as_ref(), keys::LEADERSHIP, &self.leadership)?;
        storage::save(self.store.as_ref(), keys::SMM_LINKS, &self.smm_links)?;
        tracing::debug!("catalog flushed");
        Ok(())
    }

    fn entities_mut(&mut self, kind: EntityKind) -> &mut Vec<Entity> {
        match kind {
            EntityKind::Engineer => &mut self.engineers,
            EntityKind::Smm => &mut self.smm,
            EntityKind::Account => &mut self.accounts,
        }
    }

    fn persist(&self, kind: EntityKind) -> Result<()> {
        let key = match kind {
            EntityKind::Engineer => keys::ENGINEERS,
            EntityKind::Smm => keys::SMM,
            EntityKind::Account => keys::ACCOUNTS,
        };
        storage::save(self.store.as_ref(), key, self.entities(kind))
    }
}

/// Rejects records whose flattened attributes would duplicate a field and
/// make the whole collection unreadable on the next load.
fn check_record(record: &HistoryRecord) -> Result<()> {
    match record.reserved_attribute() {
        Some(key) => Err(CrewError::InvalidRecord(format!(
            "attribute '{}' shadows a history field",
            key
        ))),
        None => Ok(()),
    }
}
