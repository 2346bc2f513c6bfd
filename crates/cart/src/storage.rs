//! Pluggable persistence for the cart mirror.
//!
//! The cart is persisted as one JSON string under a fixed key. The store
//! only needs a get/set-by-key capability, so persistence is a trait and
//! the backend is injected: a file per key for the real application, an
//! in-memory map for tests.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// Errors that can occur reading or writing the persisted mirror.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// In-memory slot lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Get/set-by-key persistence capability.
pub trait CartStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory storage backend.
///
/// Nothing survives the process; intended for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.lock().map_err(|_| StorageError::Poisoned)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: one JSON file per key under a directory.
///
/// The durable local-storage analog. Writes go through a temp file and a
/// rename so a crash mid-write never leaves a torn mirror.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a file-backed storage rooted at `dir`.
    ///
    /// The directory is created lazily on first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Map a storage key to a file path.
    ///
    /// Keys may contain characters that are hostile to filesystems
    /// (the default key is `@RocketShoes:cart`), so everything outside
    /// `[A-Za-z0-9._-]` is replaced.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("rocket-shoes-{tag}-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.get("@RocketShoes:cart").unwrap().is_none());

        storage.set("@RocketShoes:cart", "[]").unwrap();
        assert_eq!(
            storage.get("@RocketShoes:cart").unwrap().as_deref(),
            Some("[]")
        );

        storage.set("@RocketShoes:cart", "[1]").unwrap();
        assert_eq!(
            storage.get("@RocketShoes:cart").unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = temp_dir("file-roundtrip");
        let storage = FileStorage::new(&dir);

        assert!(storage.get("@RocketShoes:cart").unwrap().is_none());
        storage.set("@RocketShoes:cart", r#"[{"id":1}]"#).unwrap();
        assert_eq!(
            storage.get("@RocketShoes:cart").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_storage_sanitizes_keys() {
        let storage = FileStorage::new("/tmp/whatever");
        let path = storage.path_for("@RocketShoes:cart");
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "_RocketShoes_cart.json"
        );
    }

    #[test]
    fn test_file_storage_overwrites_wholesale() {
        let dir = temp_dir("file-overwrite");
        let storage = FileStorage::new(&dir);

        storage.set("cart", "first").unwrap();
        storage.set("cart", "second").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("second"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
