//! Unified path management for crewboard files.
//!
//! Config and data locations follow the platform conventions reported by
//! the `dirs` crate, with explicit overrides for tests and the CLI flags.

use crewboard_core::{CrewConfig, CrewError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "crewboard";

/// Resolved locations of crewboard files.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/crewboard/         # Config directory
/// └── config.toml              # data_dir, log_level
///
/// ~/.local/share/crewboard/    # Data directory (default)
/// ├── cat_people_ve.json       # One JSON document per key
/// ├── cat_people_smm.json
/// ├── ...
/// └── auth_pass.json
/// ```
#[derive(Debug, Clone)]
pub struct CrewPaths {
    config_dir: PathBuf,
}

impl CrewPaths {
    /// Creates the path set, using `config_dir` instead of the platform
    /// config directory when given.
    ///
    /// # Errors
    ///
    /// `Config` when no override is given and the platform has no config
    /// directory (no home directory).
    pub fn new(config_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => dirs::config_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or_else(|| CrewError::config("Cannot find config directory"))?,
        };
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path to `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// `<platform data dir>/crewboard`.
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or_else(|| CrewError::config("Cannot find data directory"))
    }

    /// Picks the data directory: the explicit flag, else the configured one,
    /// else the platform default.
    pub fn resolve_data_dir(&self, flag: Option<PathBuf>, config: &CrewConfig) -> Result<PathBuf> {
        if let Some(dir) = flag.or_else(|| config.data_dir.clone()) {
            return Ok(dir);
        }
        Self::default_data_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_config_dir() {
        let paths = CrewPaths::new(Some(PathBuf::from("/tmp/crew-config"))).unwrap();
        assert_eq!(paths.config_dir(), Path::new("/tmp/crew-config"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/crew-config/config.toml"));
    }

    #[test]
    fn test_data_dir_precedence() {
        let paths = CrewPaths::new(Some(PathBuf::from("/tmp/crew-config"))).unwrap();
        let config = CrewConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..CrewConfig::default()
        };

        let flagged = paths
            .resolve_data_dir(Some(PathBuf::from("/from/flag")), &config)
            .unwrap();
        assert_eq!(flagged, PathBuf::from("/from/flag"));

        let configured = paths.resolve_data_dir(None, &config).unwrap();
        assert_eq!(configured, PathBuf::from("/from/config"));
    }
}
