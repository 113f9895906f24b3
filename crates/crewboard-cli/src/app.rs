use crewboard_core::{CatalogStore, CrewError, KeyValueStore, Result, SessionStore};
use std::sync::Arc;

/// Both stores over one backend, for the lifetime of a command.
pub struct App {
    pub catalog: CatalogStore,
    pub session: SessionStore,
}

impl App {
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog: CatalogStore::load(store.clone()),
            session: SessionStore::load(store),
        }
    }

    /// Catalog edits live on the head's directory page.
    pub fn require_admin(&self, action: &str) -> Result<()> {
        if self.session.is_admin() {
            Ok(())
        } else {
            Err(CrewError::Unauthorized {
                action: action.to_string(),
            })
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.catalog.flush()?;
        self.session.flush()
    }
}
