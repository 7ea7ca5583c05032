//! Schema persistence.
//!
//! The engine treats storage as a key-value settings store holding three
//! named JSON blobs: the field definition list, the group definition list
//! and the custom decode mapping table. Collections are read in full and
//! rewritten in full on every mutation; they are expected to stay small
//! (tens to low hundreds of entries), so the simplicity wins over partial
//! updates.
//!
//! Every component receives the store by construction; there is no
//! ambient global state.

pub mod file;
pub mod memory;

use std::collections::BTreeMap;
use std::sync::Arc;

use log::info;

use crate::error::Result;
use crate::schema::defaults;
use crate::schema::field::FieldDefinition;
use crate::schema::group::GroupDefinition;

/// Blob name for the field definition list
pub const FIELDS_KEY: &str = "listing_field_definitions";
/// Blob name for the group definition list
pub const GROUPS_KEY: &str = "listing_field_groups";
/// Blob name for the custom decode mapping table
pub const MAPPINGS_KEY: &str = "listing_decode_mappings";

/// Abstract key-value settings storage.
///
/// A `set` must be a single atomic write of one named blob: a concurrent
/// reader observes either the previous value or the new one, never a
/// partially written blob. Concurrent writers are last-write-wins by
/// design.
pub trait SettingsStore: Send + Sync {
    /// Read a named blob, `None` when it has never been written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Atomically replace a named blob
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Typed access to the persisted schema collections.
///
/// The first read of an empty collection bootstraps the built-in defaults
/// and persists them before returning.
#[derive(Clone)]
pub struct SchemaStore {
    backend: Arc<dyn SettingsStore>,
}

impl SchemaStore {
    pub fn new(backend: Arc<dyn SettingsStore>) -> Self {
        Self { backend }
    }

    /// All field definitions in stored (position) order
    pub fn fields(&self) -> Result<Vec<FieldDefinition>> {
        if let Some(fields) = self.read_list::<FieldDefinition>(FIELDS_KEY)? {
            return Ok(fields);
        }
        let fields = defaults::default_fields();
        info!("bootstrapping {} default field definitions", fields.len());
        self.replace_fields(&fields)?;
        Ok(fields)
    }

    /// All group definitions in stored (position) order
    pub fn groups(&self) -> Result<Vec<GroupDefinition>> {
        if let Some(groups) = self.read_list::<GroupDefinition>(GROUPS_KEY)? {
            return Ok(groups);
        }
        let groups = defaults::default_groups();
        info!("bootstrapping {} default field groups", groups.len());
        self.replace_groups(&groups)?;
        Ok(groups)
    }

    /// Rewrite the whole field definition list
    pub fn replace_fields(&self, fields: &[FieldDefinition]) -> Result<()> {
        self.backend.set(FIELDS_KEY, &serde_json::to_string(fields)?)
    }

    /// Rewrite the whole group definition list
    pub fn replace_groups(&self, groups: &[GroupDefinition]) -> Result<()> {
        self.backend.set(GROUPS_KEY, &serde_json::to_string(groups)?)
    }

    /// The stored custom mapping table, `None` when never configured
    pub fn custom_mapping(&self) -> Result<Option<BTreeMap<String, String>>> {
        match self.backend.get(MAPPINGS_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Replace the custom mapping table wholesale
    pub fn set_custom_mapping(&self, table: &BTreeMap<String, String>) -> Result<()> {
        self.backend.set(MAPPINGS_KEY, &serde_json::to_string(table)?)
    }

    /// Reads a stored list, treating a missing blob or an empty list as
    /// absent so bootstrap kicks in either way.
    fn read_list<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>> {
        match self.backend.get(key)? {
            Some(raw) => {
                let list: Vec<T> = serde_json::from_str(&raw)?;
                if list.is_empty() { Ok(None) } else { Ok(Some(list)) }
            }
            None => Ok(None),
        }
    }
}

pub use file::JsonFileStore;
pub use memory::MemoryStore;
