//! Mapping engine: external decode attributes to internal field keys.
//!
//! An external decode source delivers an order-preserving flat list of
//! `{Variable, Value}` pairs. The engine translates the pairs the active
//! mapping table knows about into a persistable key-value set and
//! renders every non-empty pair into a human-readable dump for the
//! catch-all field, mapped or not.

use std::collections::BTreeMap;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::schema::sanitize::sanitize_text;

/// External variable name to internal field key
pub type MappingTable = BTreeMap<String, String>;

/// One attribute from an external decode source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedAttribute {
    #[serde(rename = "Variable")]
    pub variable: String,
    /// External sources deliver null for attributes they could not decode
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

impl DecodedAttribute {
    pub fn new(variable: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            value: Some(value.into()),
        }
    }

    /// The trimmed value, empty when the source had nothing
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.value.as_deref().unwrap_or("").trim()
    }
}

/// Result of running a decode dataset through the mapping table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOutcome {
    /// Internal field key to sanitized value; a later duplicate external
    /// name overwrites an earlier one
    pub updates: BTreeMap<String, String>,
    /// Every non-empty pair as `"Variable: Value"` lines, in source order
    pub raw_dump: String,
}

/// Translate external records into internal updates plus a raw dump.
///
/// A name absent from the table is not an error: it is skipped for
/// `updates` but still recorded in the dump.
#[must_use]
pub fn apply_mapping(table: &MappingTable, records: &[DecodedAttribute]) -> MappingOutcome {
    let mut updates = BTreeMap::new();
    for record in records {
        let value = record.trimmed();
        if value.is_empty() {
            continue;
        }
        match table.get(&record.variable) {
            Some(key) => {
                updates.insert(key.clone(), sanitize_text(value));
            }
            None => debug!("no mapping for decode variable '{}'", record.variable),
        }
    }
    let raw_dump = records
        .iter()
        .filter(|r| !r.trimmed().is_empty())
        .map(|r| format!("{}: {}", r.variable, r.trimmed()))
        .join("\n");
    MappingOutcome { updates, raw_dump }
}
