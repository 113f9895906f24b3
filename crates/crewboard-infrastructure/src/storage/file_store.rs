//! Directory-backed key-value store.

use super::atomic_file::{FileLock, write_atomic};
use crewboard_core::{CrewError, KeyValueStore, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Keeps each key as `<dir>/<key>.json`.
///
/// Writes take an exclusive lock on the key and go through a temp file plus
/// rename. A zero-length or whitespace-only file reads as an absent key.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Opens the store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "opened file store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maps a key to its file, rejecting keys that would escape the directory.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CrewError::storage(format!("invalid key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _lock = FileLock::acquire(&path)?;
        write_atomic(&path, value.as_bytes())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _lock = FileLock::acquire(&path)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.get("auth_user").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(temp_dir.path()).unwrap();

        store.set("auth_pass", "\"secret\"").unwrap();
        assert!(temp_dir.path().join("auth_pass.json").exists());
        assert_eq!(store.get("auth_pass").unwrap().as_deref(), Some("\"secret\""));

        store.remove("auth_pass").unwrap();
        assert_eq!(store.get("auth_pass").unwrap(), None);
        store.remove("auth_pass").unwrap();
    }

    #[test]
    fn test_empty_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("smm_links.json"), "  \n").unwrap();

        let store = FileKeyValueStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.get("smm_links").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(temp_dir.path()).unwrap();

        for key in ["", "../escape", "a/b", "dot.key"] {
            assert!(matches!(store.set(key, "1"), Err(CrewError::Storage(_))), "{key}");
        }
    }

    #[test]
    fn test_open_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("data").join("crewboard");
        let store = FileKeyValueStore::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.dir(), dir.as_path());
    }
}
