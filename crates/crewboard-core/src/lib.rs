//! Core domain of the Crewboard team dashboard.
//!
//! The catalog keeps people and accounts as dated name histories so that old
//! records render under the name that was current at the time. The session
//! store tracks who is logged in and gates the head-only pages. Both sit on a
//! [`KeyValueStore`] handed in by the caller.

pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod task;

// Re-export common types
pub use catalog::CatalogStore;
pub use config::CrewConfig;
pub use error::{CrewError, Result};
pub use session::SessionStore;
pub use storage::{KeyValueStore, MemoryStore};
