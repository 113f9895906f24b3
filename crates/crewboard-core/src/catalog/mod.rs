//! Catalog domain module.
//!
//! # Module Structure
//!
//! - `history`: rename history and temporal name resolution
//! - `model`: entities, leadership roles, workers
//! - `defaults`: built-in datasets used when persisted data is missing
//! - `store`: the `CatalogStore` that owns and persists all of the above

pub mod defaults;
mod history;
mod model;
mod store;

// Re-export public API
pub use history::{
    EmptyHistoryError, History, HistoryRecord, RESERVED_ATTRIBUTES, epoch, resolve_latest_name,
    resolve_name_as_of,
};
pub use model::{DirectoryEntry, Entity, EntityKind, LeadershipRole, Role, SmmLinks, Worker, WorkerKind};
pub use store::CatalogStore;
