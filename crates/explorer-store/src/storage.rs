//! Durable client key-value storage.
//!
//! The browser exposes a string-to-string store that survives reloads;
//! this module abstracts it behind [`DurableStorage`] so the state
//! containers can be exercised against an in-memory map in tests and a
//! directory of files from the CLI.
//!
//! # Key Patterns
//!
//! | Key | Value | Owner |
//! |-----|-------|-------|
//! | `experience-storage` | JSON envelope | [`ExperienceStore`](crate::store::ExperienceStore) |
//! | `theme` | Plain theme identifier | [`ThemeContext`](crate::theme::ThemeContext) |

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

/// A durable string key-value store.
///
/// Methods take `&self` so a single backend handle can be cloned and
/// shared between the experience store and the theme context, exactly
/// as both share one origin's storage in the browser.
pub trait DurableStorage {
    /// Read the value stored at `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` at `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryInner {
    items: BTreeMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryInner {
    fn used_bytes_with(&self, key: &str, value: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len().saturating_add(v.len()))
            .fold(key.len().saturating_add(value.len()), usize::saturating_add)
    }
}

/// In-memory storage shared between clones.
///
/// Clones observe the same map, so dropping a store and building a new
/// one over a clone behaves like a page reload. The backend can also be
/// configured with a byte quota or disabled outright to reproduce
/// browser storage failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    /// Create an empty, unlimited storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty storage that rejects writes beyond `quota` bytes
    /// (keys plus values).
    pub fn with_quota(quota: usize) -> Self {
        let inner = MemoryInner {
            quota: Some(quota),
            ..MemoryInner::default()
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Create a storage on which every operation fails, as when the
    /// user has disabled site data.
    pub fn disabled() -> Self {
        let inner = MemoryInner {
            disabled: true,
            ..MemoryInner::default()
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Enable or disable the storage at runtime.
    pub fn set_disabled(&self, disabled: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.disabled = disabled;
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.lock().map_or(0, |inner| inner.items.len())
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>, StorageError> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::Unavailable(format!("storage lock poisoned: {e}")))?;
        if inner.disabled {
            return Err(StorageError::Unavailable(String::from("storage is disabled")));
        }
        Ok(inner)
    }
}

impl DurableStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.lock()?;
        if let Some(quota) = inner.quota {
            let needed = inner.used_bytes_with(key, value);
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    quota,
                });
            }
        }
        inner.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.items.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed backend
// ---------------------------------------------------------------------------

/// Storage backed by a directory, one file per key.
///
/// Used by the `explorer` CLI so favorites and theme survive between
/// invocations. Writes go to a temporary sibling file that is then
/// renamed over the target.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "File storage opened");
        Ok(Self { dir })
    }

    /// The directory holding the stored keys.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(self.dir.join(key))
        } else {
            Err(StorageError::InvalidKey(key.to_owned()))
        }
    }
}

impl DurableStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn memory_clones_share_items() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set_item("theme", "dark").unwrap();
        assert_eq!(other.get_item("theme").unwrap().as_deref(), Some("dark"));
        other.remove_item("theme").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn memory_quota_rejects_oversized_writes() {
        let storage = MemoryStorage::with_quota(12);
        storage.set_item("theme", "dark").unwrap();
        let err = storage.set_item("experience-storage", "{}").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 12, .. }));
        // Overwriting an existing key only counts the new value.
        storage.set_item("theme", "light").unwrap();
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn disabled_memory_fails_every_operation() {
        let storage = MemoryStorage::disabled();
        assert!(matches!(storage.get_item("theme"), Err(StorageError::Unavailable(_))));
        assert!(storage.set_item("theme", "dark").is_err());
        storage.set_disabled(false);
        assert!(storage.set_item("theme", "dark").is_ok());
    }

    #[test]
    fn file_storage_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("prefs")).unwrap();
        assert_eq!(storage.get_item("theme").unwrap(), None);
        storage.set_item("theme", "green").unwrap();

        let reopened = FileStorage::open(storage.dir()).unwrap();
        assert_eq!(reopened.get_item("theme").unwrap().as_deref(), Some("green"));

        reopened.remove_item("theme").unwrap();
        reopened.remove_item("theme").unwrap();
        assert_eq!(storage.get_item("theme").unwrap(), None);
    }

    #[test]
    fn file_storage_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(matches!(
            storage.set_item("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
