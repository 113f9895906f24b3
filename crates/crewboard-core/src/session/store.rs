use super::model::{Identity, Page};
use crate::catalog::{CatalogStore, WorkerKind, defaults::DEFAULT_ADMIN_PASSWORD};
use crate::error::{CrewError, Result};
use crate::storage::{self, KeyValueStore, keys};
use std::sync::Arc;

/// Owns the current identity and gates admin-only pages.
///
/// States: logged out (`None`), logged in as a worker, logged in as the head
/// (admin). Every transition is written through to the store. There is no
/// expiry; the machine cycles until `logout`.
///
/// The admin password is a single shared plaintext secret. That is an
/// accepted limitation for a small trusted team, not a security model.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    current: Option<Identity>,
    password: String,
    page: Page,
}

impl SessionStore {
    /// Restores the persisted identity and password, or starts logged out
    /// with the default password.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let current: Option<Identity> = storage::load_or_default(store.as_ref(), keys::AUTH_USER, || None);
        let password = storage::load_or_default(store.as_ref(), keys::AUTH_PASS, || {
            DEFAULT_ADMIN_PASSWORD.to_string()
        });

        match &current {
            Some(identity) => tracing::info!(id = identity.id(), admin = identity.is_admin(), "session restored"),
            None => tracing::debug!("no persisted session"),
        }

        Self {
            store,
            current,
            password,
            page: Page::default(),
        }
    }

    pub fn current_user(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// True iff the current identity is the admin.
    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(Identity::is_admin)
    }

    /// The page last opened successfully.
    pub fn current_page(&self) -> Page {
        self.page
    }

    /// Logs in as the head.
    ///
    /// The identity id is the catalog's current `Руководитель` holder.
    ///
    /// # Errors
    ///
    /// `AuthenticationFailed` on a wrong password; the session is unchanged.
    pub fn login_admin(&mut self, password: &str, catalog: &CatalogStore) -> Result<&Identity> {
        if password != self.password {
            tracing::warn!("admin login rejected");
            return Err(CrewError::AuthenticationFailed);
        }

        let identity = Identity::Admin {
            id: catalog.head_name().to_string(),
        };
        tracing::info!(id = identity.id(), "admin logged in");
        self.set_current(Some(identity))?;
        self.current
            .as_ref()
            .ok_or_else(|| CrewError::internal("identity missing right after login"))
    }

    /// Logs in as a worker. Workers identify themselves without a password.
    pub fn login_worker(&mut self, id: impl Into<String>, worker_kind: WorkerKind) -> Result<&Identity> {
        let identity = Identity::Worker {
            id: id.into(),
            worker_kind,
        };
        tracing::info!(id = identity.id(), %worker_kind, "worker logged in");
        self.set_current(Some(identity))?;
        self.current
            .as_ref()
            .ok_or_else(|| CrewError::internal("identity missing right after login"))
    }

    /// Clears the identity. Always succeeds apart from the write-through.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(identity) = &self.current {
            tracing::info!(id = identity.id(), "logged out");
        }
        self.page = Page::default();
        self.set_current(None)
    }

    /// Navigates to `page`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when a non-admin asks for an admin-only page; the
    /// current page is unchanged.
    pub fn open_page(&mut self, page: Page) -> Result<Page> {
        if page.requires_admin() && !self.is_admin() {
            tracing::warn!(%page, "navigation rejected");
            return Err(CrewError::Unauthorized {
                action: page.to_string(),
            });
        }
        self.page = page;
        Ok(page)
    }

    /// Replaces the admin password. Only the logged-in head may do this.
    ///
    /// # Errors
    ///
    /// `Unauthorized` outside an admin session, `AuthenticationFailed` when
    /// `current` does not match.
    pub fn change_password(&mut self, current: &str, new: &str) -> Result<()> {
        if !self.is_admin() {
            return Err(CrewError::Unauthorized {
                action: "password".to_string(),
            });
        }
        if current != self.password {
            return Err(CrewError::AuthenticationFailed);
        }

        self.password = new.to_string();
        tracing::info!("admin password changed");
        storage::save(self.store.as_ref(), keys::AUTH_PASS, &self.password)
    }

    /// Writes identity and password back to the store.
    pub fn flush(&self) -> Result<()> {
        storage::save(self.store.as_ref(), keys::AUTH_USER, &self.current)?;
        storage::save(self.store.as_ref(), keys::AUTH_PASS, &self.password)
    }

    fn set_current(&mut self, identity: Option<Identity>) -> Result<()> {
        self.current = identity;
        storage::save(self.store.as_ref(), keys::AUTH_USER, &self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Role;
    use crate::storage::MemoryStore;

    fn setup() -> (Arc<MemoryStore>, CatalogStore, SessionStore) {
        let memory = Arc::new(MemoryStore::new());
        let catalog = CatalogStore::load(memory.clone());
        let session = SessionStore::load(memory.clone());
        (memory, catalog, session)
    }

    #[test]
    fn test_initial_state_logged_out() {
        let (_, _, session) = setup();
        assert!(session.current_user().is_none());
        assert!(!session.is_admin());
        assert_eq!(session.current_page(), Page::Engineers);
    }

    #[test]
    fn test_login_admin_uses_head_holder() {
        let (_, catalog, mut session) = setup();
        let identity = session.login_admin(DEFAULT_ADMIN_PASSWORD, &catalog).unwrap().clone();

        assert_eq!(identity.id(), catalog.role_holder(Role::Head).unwrap());
        assert_eq!(identity.id(), "Тихон");
        assert!(session.is_admin());
    }

    #[test]
    fn test_login_admin_wrong_password_keeps_state() {
        let (_, catalog, mut session) = setup();
        session.login_worker("Катя", WorkerKind::Smm).unwrap();
        let before = session.current_user().cloned();

        let err = session.login_admin("wrong", &catalog).unwrap_err();
        assert_eq!(err, CrewError::AuthenticationFailed);
        assert_eq!(session.current_user().cloned(), before);
        assert!(!session.is_admin());
    }

    #[test]
    fn test_login_worker_is_unconditional() {
        let (_, _, mut session) = setup();
        let identity = session.login_worker("Усен", WorkerKind::Ve).unwrap();
        assert_eq!(
            identity,
            &Identity::Worker {
                id: "Усен".to_string(),
                worker_kind: WorkerKind::Ve
            }
        );
        assert!(!session.is_admin());
    }

    #[test]
    fn test_logout_from_any_state() {
        let (_, catalog, mut session) = setup();
        session.logout().unwrap();
        assert!(session.current_user().is_none());

        session.login_admin(DEFAULT_ADMIN_PASSWORD, &catalog).unwrap();
        session.logout().unwrap();
        assert!(session.current_user().is_none());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_session_restored_after_restart() {
        let (memory, catalog, mut session) = setup();
        session.login_admin(DEFAULT_ADMIN_PASSWORD, &catalog).unwrap();

        let restored = SessionStore::load(memory.clone());
        assert!(restored.is_admin());
        assert_eq!(restored.current_user().map(Identity::id), Some("Тихон"));

        session.logout().unwrap();
        let restored = SessionStore::load(memory);
        assert!(restored.current_user().is_none());
    }

    #[test]
    fn test_directory_is_admin_only() {
        let (_, catalog, mut session) = setup();

        let err = session.open_page(Page::Directory).unwrap_err();
        assert!(err.is_access_denied());

        session.login_worker("Ян", WorkerKind::Smm).unwrap();
        session.open_page(Page::Posts).unwrap();
        assert!(session.open_page(Page::Directory).is_err());
        assert_eq!(session.current_page(), Page::Posts);

        session.login_admin(DEFAULT_ADMIN_PASSWORD, &catalog).unwrap();
        assert_eq!(session.open_page(Page::Directory).unwrap(), Page::Directory);
    }

    #[test]
    fn test_change_password() {
        let (memory, catalog, mut session) = setup();

        let err = session.change_password(DEFAULT_ADMIN_PASSWORD, "new").unwrap_err();
        assert!(matches!(err, CrewError::Unauthorized { .. }));

        session.login_admin(DEFAULT_ADMIN_PASSWORD, &catalog).unwrap();
        assert_eq!(
            session.change_password("nope", "new").unwrap_err(),
            CrewError::AuthenticationFailed
        );
        session.change_password(DEFAULT_ADMIN_PASSWORD, "new").unwrap();
        session.logout().unwrap();

        let mut restored = SessionStore::load(memory);
        assert!(restored.login_admin(DEFAULT_ADMIN_PASSWORD, &catalog).is_err());
        assert!(restored.login_admin("new", &catalog).is_ok());
    }

    #[test]
    fn test_flush_writes_every_key() {
        let (memory, catalog, session) = setup();
        catalog.flush().unwrap();
        session.flush().unwrap();

        assert_eq!(memory.len(), keys::ALL.len());
        for key in keys::ALL {
            assert!(memory.get(key).unwrap().is_some(), "{key}");
        }
    }

    #[test]
    fn test_malformed_identity_starts_logged_out() {
        let memory = Arc::new(MemoryStore::new());
        memory.set(keys::AUTH_USER, r#"{"kind":"ghost"}"#).unwrap();
        let session = SessionStore::load(memory);
        assert!(session.current_user().is_none());
    }
}
