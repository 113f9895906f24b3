//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` in the crewboard config
//! directory and caches it.

use crate::paths::CrewPaths;
use crate::storage::{FileLock, write_atomic};
use crewboard_core::{CrewConfig, CrewError, Result};
use std::fs;
use std::io::ErrorKind;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: CrewPaths,
    /// Cached configuration, filled on first access.
    config: Arc<RwLock<Option<CrewConfig>>>,
}

impl ConfigService {
    pub fn new(paths: CrewPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn paths(&self) -> &CrewPaths {
        &self.paths
    }

    /// Gets the configuration, loading it from file if not cached.
    ///
    /// A missing or empty file yields the defaults.
    ///
    /// # Errors
    ///
    /// `Config` when the file exists but is not valid TOML for `CrewConfig`.
    pub fn get_config(&self) -> Result<CrewConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|e| CrewError::internal(format!("config cache poisoned: {}", e)))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|e| CrewError::internal(format!("config cache poisoned: {}", e)))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Writes `config` to `config.toml` and refreshes the cache.
    pub fn save_config(&self, config: &CrewConfig) -> Result<()> {
        let path = self.paths.config_file();
        let toml_string = toml::to_string_pretty(config).map_err(|e| CrewError::Serialization {
            format: "TOML".to_string(),
            message: e.to_string(),
        })?;

        {
            let _lock = FileLock::acquire(&path)?;
            write_atomic(&path, toml_string.as_bytes())?;
        }
        tracing::info!(path = %path.display(), "saved configuration");

        let mut write_lock = self
            .config
            .write()
            .map_err(|e| CrewError::internal(format!("config cache poisoned: {}", e)))?;
        *write_lock = Some(config.clone());
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_config(&self) -> Result<CrewConfig> {
        let path = self.paths.config_file();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(CrewConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(CrewConfig::default());
        }

        toml::from_str(&content)
            .map_err(|e| CrewError::config(format!("{}: {}", path.display(), e)))
    }
}
