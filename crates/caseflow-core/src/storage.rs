use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::BaseDirs;
use thiserror::Error;

use crate::config::CaseflowConfig;

/// Persisted key for the serialized [`crate::selection::Selection`].
pub const SELECTION_KEY: &str = "selection";
/// Persisted key for the serialized current step.
pub const STEP_KEY: &str = "step";
/// Append-only log of brand searches with no results.
pub const MISSING_BRAND_KEY: &str = "no-results-brand";
/// Append-only log of model searches with no results.
pub const MISSING_MODEL_KEY: &str = "no-results-model";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read state at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write state at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage mutex poisoned")]
    Poisoned,
}

/// Durable key-value storage for JSON values. Values are opaque
/// strings at this layer; callers own (de)serialization.
pub trait Storage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key under a state directory. Writes go
/// through a temp file and rename so a crash never leaves a
/// half-written value behind.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(Some(raw))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.key_path(key);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value).map_err(|source| StorageError::Write {
            path: temp_path.clone(),
            source,
        })?;

        fs::rename(&temp_path, &path).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(())
    }
}

/// Session-only storage: keeps values in memory and forgets them when
/// dropped. Also the no-op fallback when no durable location can be
/// resolved.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Resolves the default state directory, honoring a config override.
/// Returns `None` when no home directory exists in this context.
pub fn default_state_dir(config: Option<&CaseflowConfig>) -> Option<PathBuf> {
    if let Some(dir) = config.and_then(CaseflowConfig::storage_dir) {
        return Some(PathBuf::from(dir));
    }

    let base_dirs = BaseDirs::new()?;
    Some(base_dirs.data_local_dir().join("caseflow"))
}

/// Durable storage when a state directory can be resolved, otherwise
/// an in-memory store for this session. Never fatal.
pub fn open_default_storage(config: Option<&CaseflowConfig>) -> Box<dyn Storage> {
    match default_state_dir(config) {
        Some(dir) => Box::new(FileStorage::new(dir)),
        None => Box::new(MemoryStorage::new()),
    }
}
