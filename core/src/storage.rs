//! Persisted client-side key-value state.
//!
//! # Design
//! `MemoryStore` lives as long as the process. `FileStore` mirrors the map
//! into a single JSON file, rewritten on every mutation, so a restarted shell
//! picks up the session token and preferences where it left off.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::NamedTempFile;

use crate::error::ApiError;

/// String key-value storage shared by the session and preference accessors.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;
    fn remove(&self, key: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.entries
            .write()
            .map_err(|e| ApiError::Storage(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        self.entries
            .write()
            .map_err(|e| ApiError::Storage(e.to_string()))?
            .remove(key);
        Ok(())
    }
}

/// Key-value storage backed by a JSON object on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open `path`, loading existing entries. A missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| ApiError::Storage(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(ApiError::Storage(e.to_string())),
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `apply` to a copy of the entries, persist the copy, and only
    /// then swap it in. A failed write leaves memory and disk unchanged.
    fn mutate(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), ApiError> {
        let mut entries = self.entries.write().map_err(|e| ApiError::Storage(e.to_string()))?;
        let mut next = entries.clone();
        apply(&mut next);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    /// Write to a temporary file next to the target and rename it over the
    /// target, so readers never see a half-written file.
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), ApiError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir).map_err(|e| ApiError::Storage(e.to_string()))?;
        serde_json::to_writer_pretty(&mut file, entries).map_err(|e| ApiError::Storage(e.to_string()))?;
        file.as_file()
            .sync_all()
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        file.persist(&self.path)
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }
}
