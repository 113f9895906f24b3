//! Filesystem adapters for the Crewboard core: the per-key JSON file store,
//! path resolution and the TOML configuration service.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::CrewPaths;
pub use crate::storage::FileKeyValueStore;
