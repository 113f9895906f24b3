//! Storage layer for atomic file operations.

mod atomic_file;
mod file_store;

pub use atomic_file::{FileLock, write_atomic};
pub use file_store::FileKeyValueStore;
