//! Durable key-value storage for the cart.
//!
//! The cart keeps a single key, [`CART_STORAGE_KEY`](super::CART_STORAGE_KEY),
//! holding the JSON item list. [`CartPersister`] sits between the reducer's
//! effects and the storage backend: it orders writes by cart revision and
//! swallows failures, which are logged and never reach the caller.

use super::types::{CartItem, parse_items};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur in a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The key cannot be mapped to a storage location
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory map was poisoned by a panicking writer
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Key-value storage abstraction
///
/// Uses explicit boxed-future returns so it can be shared as
/// `Arc<dyn CartStorage>` inside reducer effects.
pub trait CartStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if never written
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>>;

    /// Overwrite the value stored under `key`
    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StorageError>>;
}

/// File-backed storage: one `<key>.json` file per key inside a directory
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `dir`; the directory is created on first write
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the stored files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => Ok(Some(contents)),
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(error) => Err(error.into()),
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            tokio::fs::create_dir_all(&self.dir).await?;
            let tmp = path.with_extension("json.tmp");
            tokio::fs::write(&tmp, value).await?;
            tokio::fs::rename(&tmp, &path).await?;
            Ok(())
        })
    }
}

/// In-process storage, for tests and demos
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: Arc<RwLock<HashMap<String, String>>>,
    writes: Arc<std::sync::atomic::AtomicUsize>,
}

impl MemoryStorage {
    /// Creates empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-seeded with one value
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut values) = storage.values.write() {
            values.insert(key.into(), value.into());
        }
        storage
    }

    /// Current value under `key`
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    /// Number of successful `set` calls
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl CartStorage for MemoryStorage {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move {
            let values = self.values.read().map_err(|_| StorageError::Poisoned)?;
            Ok(values.get(key).cloned())
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.values
                .write()
                .map_err(|_| StorageError::Poisoned)?
                .insert(key.to_string(), value);
            self.writes
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        })
    }
}

/// Best-effort, revision-ordered persistence of the cart item list
pub struct CartPersister {
    storage: Arc<dyn CartStorage>,
    key: String,
    last_written: Mutex<Option<u64>>,
}

impl std::fmt::Debug for CartPersister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartPersister")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl CartPersister {
    /// Creates a persister writing under `key`
    #[must_use]
    pub fn new(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            last_written: Mutex::new(None),
        }
    }

    /// Storage key in use
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the saved item list
    ///
    /// Returns `None` when nothing was saved, when the payload does not parse,
    /// or when storage cannot be read. Failures are logged, never returned.
    pub async fn restore(&self) -> Option<Vec<CartItem>> {
        let payload = match self.storage.get(&self.key).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No saved cart");
                return None;
            },
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "Failed to read saved cart");
                return None;
            },
        };

        match parse_items(&payload) {
            Ok(items) => {
                tracing::debug!(key = %self.key, items = items.len(), "Restored saved cart");
                Some(items)
            },
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "Ignoring malformed saved cart");
                None
            },
        }
    }

    /// Writes the snapshot taken at `revision`
    ///
    /// Snapshots older than the last one written are dropped, so concurrent
    /// write tasks finishing out of order cannot leave a stale cart behind.
    pub async fn save(&self, revision: u64, payload: String) {
        let mut last = self.last_written.lock().await;
        if last.is_some_and(|written| written >= revision) {
            tracing::trace!(revision, "Skipping stale cart snapshot");
            return;
        }

        match self.storage.set(&self.key, payload).await {
            Ok(()) => {
                tracing::trace!(revision, "Cart snapshot written");
                *last = Some(revision);
            },
            Err(error) => {
                tracing::warn!(key = %self.key, revision, %error, "Failed to persist cart");
            },
        }
    }
}
