//! The durable key-value store capability.
//!
//! The engine does not own a storage medium; it consumes one through
//! [`ExpenseStore`]: asynchronous get/set of string-valued keys, batchable.
//! Implementations decide where the strings live (a JSON file, a real
//! database, memory). All operations may fail with a [`StoreError`]; the
//! session treats those failures as degraded durability, never as a crash.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use thiserror::Error;

/// Failure of the underlying storage medium.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Asynchronous string key-value storage.
///
/// The batched operations default to per-key loops, which also fixes the
/// crash semantics: a batch interrupted midway leaves every key written so
/// far intact. No cross-key transaction is assumed or required.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn multi_get(&self, keys: &[&str]) -> Result<Vec<(String, Option<String>)>, StoreError> {
        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            entries.push(((*key).to_string(), self.get(key).await?));
        }
        Ok(entries)
    }

    async fn multi_set(&self, pairs: Vec<(String, String)>) -> Result<(), StoreError> {
        for (key, value) in &pairs {
            self.set(key, value).await?;
        }
        Ok(())
    }
}

/// In-memory store. Backs ephemeral sessions and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
