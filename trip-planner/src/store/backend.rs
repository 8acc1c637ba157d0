//! Durable key-value storage for persisted collections.
//!
//! Values are plain strings grouped into namespaces, mirroring a platform
//! preference store. [`FileStore`] keeps one JSON file per namespace on
//! disk; [`MemoryStore`] is a process-local stand-in.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use super::error::StoreError;

/// Location of one persisted value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub namespace: String,
    pub key: String,
}

impl Slot {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.key)
    }
}

/// Synchronous string storage, durable for the lifetime of the backend.
///
/// Calls block; callers on an async runtime should move them off the
/// reactor if the backend does real I/O.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Returns `None` if nothing was ever written.
    fn read(&self, namespace: &str, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn write(&self, namespace: &str, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores each namespace as a JSON object in `{root}/{namespace}.json`.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    // Serializes read-modify-write of namespace files within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lock: Mutex::new(()),
        }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn namespace_path(&self, namespace: &str) -> Result<PathBuf, StoreError> {
        let valid = !namespace.is_empty()
            && namespace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidNamespace(namespace.to_string()));
        }
        Ok(self.root.join(format!("{namespace}.json")))
    }

    /// Load a namespace file. A missing file is an empty namespace.
    fn load_namespace(&self, path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
            location: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.namespace_path(namespace)?;
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.load_namespace(&path)?;
        Ok(values.remove(key))
    }

    fn write(&self, namespace: &str, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.namespace_path(namespace)?;
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        // A corrupt namespace must not block new writes.
        let mut values = match self.load_namespace(&path) {
            Ok(values) => values,
            Err(e @ StoreError::Corrupt { .. }) => {
                warn!(error = %e, "Discarding corrupt namespace file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());

        if !self.root.as_os_str().is_empty() && !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| StoreError::Io {
                path: self.root.clone(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        // Replace the file whole so a failed write leaves the old contents.
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, json).map_err(|e| StoreError::Io {
            path: staging.clone(),
            source: e,
        })?;
        std::fs::rename(&staging, &path).map_err(|e| StoreError::Io { path, source: e })
    }
}

/// In-memory store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<(String, String), String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }

    fn write(&self, namespace: &str, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(
            (namespace.to_string(), key.to_string()),
            value.to_string(),
        );
        Ok(())
    }
}
