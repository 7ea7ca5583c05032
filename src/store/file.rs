//! File-backed settings store.
//!
//! All blobs live in one JSON object file. Writes land in a temporary
//! file in the same directory and are renamed over the original, so a
//! reader never observes a partially written file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::store::SettingsStore;

/// A settings store persisted as a single JSON file
pub struct JsonFileStore {
    path: PathBuf,
    // serializes in-process read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let value: Value = serde_json::from_str(&raw)?;
                match value {
                    Value::Object(map) => Ok(map),
                    other => Err(SchemaError::Storage(format!(
                        "settings file {} holds {} instead of an object",
                        self.path.display(),
                        type_name(&other)
                    ))),
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(SchemaError::Storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn persist(&self, map: &Map<String, Value>) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        let encoded = serde_json::to_vec_pretty(map)?;
        let mut file = fs::File::create(&tmp)
            .map_err(|e| SchemaError::Storage(format!("failed to create {}: {e}", tmp.display())))?;
        file.write_all(&encoded)
            .and_then(|()| file.sync_all())
            .map_err(|e| SchemaError::Storage(format!("failed to write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            SchemaError::Storage(format!("failed to replace {}: {e}", self.path.display()))
        })
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.load()?;
        match map.get(key) {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(SchemaError::Storage(format!(
                "blob {key} holds {} instead of a string",
                type_name(other)
            ))),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| SchemaError::Storage("settings file lock poisoned".to_string()))?;
        let mut map = self.load()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.persist(&map)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
