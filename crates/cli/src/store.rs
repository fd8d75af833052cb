//! File-backed implementation of the engine's store capability.
//!
//! State lives in one flat JSON object (`key -> string value`) on disk. A
//! missing file reads as an empty store, so the first run needs no setup.

use std::{collections::HashMap, fs, io, path::PathBuf};

use async_trait::async_trait;
use engine::{ExpenseStore, StoreError};

#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(HashMap::new());
            }
            Err(err) => return Err(StoreError::Unavailable(err.to_string())),
        };
        serde_json::from_str(&content).map_err(|err| StoreError::Backend(err.to_string()))
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| StoreError::Unavailable(err.to_string()))?;
        }
        let payload = serde_json::to_string_pretty(entries)
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        fs::write(&self.path, payload).map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}

#[async_trait]
impl ExpenseStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    // One disk pass per batch instead of the default per-key loop.
    async fn multi_get(&self, keys: &[&str]) -> Result<Vec<(String, Option<String>)>, StoreError> {
        let mut entries = self.read_entries()?;
        Ok(keys
            .iter()
            .map(|key| ((*key).to_string(), entries.remove(*key)))
            .collect())
    }

    async fn multi_set(&self, pairs: Vec<(String, String)>) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.extend(pairs);
        self.write_entries(&entries)
    }
}
