//! Persistence and root-attribute backends for the theme runtime
//!
//! The runtime talks to its environment through two small traits so the same
//! state holder can run against browser storage, a desktop config file, or
//! in-memory fakes in tests.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::warn;

use crate::error::StorageError;

/// Key/value slot holding the persisted scheme preference
pub trait PreferenceStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The theme attribute on the document root
pub trait RootAttribute: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, value: &str);
}

#[derive(Default)]
struct MemoryStoreInner {
    values: RwLock<FxHashMap<String, String>>,
    unavailable: AtomicBool,
    writes: AtomicUsize,
}

/// In-memory [`PreferenceStore`]
///
/// Clones share the same slots, so a test can keep one handle while the
/// runtime owns another. [`set_available(false)`](Self::set_available)
/// simulates storage that throws, as in private browsing.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.inner
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_available(&self, available: bool) {
        self.inner.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Current value, bypassing availability
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Number of successful saves
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.inner.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store disabled".to_string()));
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.inner
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// [`PreferenceStore`] backed by a JSON object file
///
/// Used by desktop hosts. A missing file reads as empty; saving creates
/// parent directories and keeps unrelated keys. Saves go through a sibling
/// temp file and a rename, and a corrupt document is replaced on save.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_all(&self) -> Result<IndexMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(IndexMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.shift_remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(err @ StorageError::Corrupt { .. }) => {
                warn!(error = %err, "discarding corrupt preference file");
                IndexMap::new()
            }
            Err(err) => return Err(err),
        };
        values.insert(key.to_string(), value.to_string());

        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(&values).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

#[derive(Default)]
struct MemoryAttributeInner {
    value: RwLock<Option<String>>,
    writes: AtomicUsize,
}

/// In-memory [`RootAttribute`]; clones share the same value
#[derive(Clone, Default)]
pub struct MemoryAttribute {
    inner: Arc<MemoryAttributeInner>,
}

impl MemoryAttribute {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute as left by a blocking init script
    pub fn with_value(value: &str) -> Self {
        let attr = Self::new();
        *attr.inner.value.write().unwrap_or_else(PoisonError::into_inner) = Some(value.to_string());
        attr
    }

    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }
}

impl RootAttribute for MemoryAttribute {
    fn get(&self) -> Option<String> {
        self.inner
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, value: &str) {
        *self.inner.value.write().unwrap_or_else(PoisonError::into_inner) = Some(value.to_string());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
    }
}
