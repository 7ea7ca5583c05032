//! In-memory settings store for tests and embedded use.

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::error::{Result, SchemaError};
use crate::store::SettingsStore;

/// A settings store backed by a process-local map
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<FxHashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| SchemaError::Storage("settings map poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| SchemaError::Storage("settings map poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
