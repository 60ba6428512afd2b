//! Key-value persistence media.
//!
//! The consent store only needs something that behaves like a browser's
//! `localStorage`: string keys, string values, scoped to one origin and
//! surviving restarts. Two media are provided:
//! - [`MemoryStorage`] for tests and throwaway sessions
//! - [`FileStorage`] which keeps one JSON file per key on disk

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not replace {}: {source}", path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A string-keyed, string-valued persistence medium.
///
/// Writes must be all-or-nothing: a reader either sees the previous value or
/// the complete new one.
pub trait KeyValueStore {
    /// Fetch the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Store `value` under `key`, replacing anything already there.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), PersistError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        (**self).remove(key)
    }
}

// ============================================================================
// In-memory medium
// ============================================================================

/// In-memory medium. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a medium pre-seeded with one raw value.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over stored keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// File-backed medium
// ============================================================================

/// File-backed medium scoped to one origin.
///
/// Each key lives in `<base>/<origin>/<key>.json`. Values are replaced by
/// writing a temporary file next to the target and renaming it over the
/// target, so an interrupted write leaves the old value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (lazily) the medium for `origin` under `base_dir`.
    ///
    /// The directory is created on the first write.
    pub fn open(base_dir: impl AsRef<Path>, origin: &str) -> Self {
        Self {
            dir: base_dir.as_ref().join(sanitize(origin)),
        }
    }

    /// Directory holding this origin's values.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(key)))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(value.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&target).map_err(|e| PersistError::Replace {
            path: target.clone(),
            source: e.error,
        })?;

        tracing::debug!(path = %target.display(), bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Replace anything that is not alphanumeric, `-` or `_` with `_`.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);

        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("cookie-consent"), "cookie-consent");
        assert_eq!(sanitize("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize("https://example.com"), "https___example_com");
    }

    #[test]
    fn test_file_storage_paths_are_origin_scoped() {
        let a = FileStorage::open("/data", "site-a");
        let b = FileStorage::open("/data", "site-b");
        assert_ne!(a.path_for("cookie-consent"), b.path_for("cookie-consent"));
        assert!(a
            .path_for("cookie-consent")
            .to_string_lossy()
            .ends_with("cookie-consent.json"));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = FileStorage::open(temp_dir.path(), "arc");

        assert_eq!(storage.get("cookie-consent").unwrap(), None);

        storage.set("cookie-consent", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.get("cookie-consent").unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        // A fresh handle on the same directory sees the value.
        let reopened = FileStorage::open(temp_dir.path(), "arc");
        assert_eq!(
            reopened.get("cookie-consent").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn test_file_storage_overwrite_leaves_no_staging_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = FileStorage::open(temp_dir.path(), "arc");

        storage.set("cookie-consent", "first").unwrap();
        storage.set("cookie-consent", "second").unwrap();

        let files: Vec<_> = fs::read_dir(storage.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(files.len(), 1);
        assert_eq!(
            storage.get("cookie-consent").unwrap().as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_file_storage_remove_missing_key() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = FileStorage::open(temp_dir.path(), "arc");
        storage.remove("cookie-consent").unwrap();
    }
}
