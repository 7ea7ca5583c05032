//! Field and group definition engines.
//!
//! `FieldManager` owns every mutation of the stored schema: it sanitizes
//! and validates raw inputs, rebuilds records from scratch (so a type
//! change never leaves stale attributes), keeps both collections sorted
//! by position and rewrites them through the schema store.

pub mod input;

use std::collections::BTreeMap;
use std::str::FromStr;

use log::{debug, warn};
use rustc_hash::FxHashSet;

use crate::error::{Result, SchemaError};
use crate::mapping::{self, DecodedAttribute, MappingOutcome};
use crate::schema::field::{FieldDefinition, NumericBounds, SelectOption, TypeSettings};
use crate::schema::group::{GroupContext, GroupDefinition, GroupPriority};
use crate::schema::sanitize::{parse_number, sanitize_key, sanitize_text};
use crate::schema::{defaults, field::DEFAULT_POSITION};
use crate::store::SchemaStore;

pub use input::{FieldInput, GroupInput};

/// Validation, upsert and deletion for field and group definitions
#[derive(Clone)]
pub struct FieldManager {
    store: SchemaStore,
}

impl FieldManager {
    pub fn new(store: SchemaStore) -> Self {
        Self { store }
    }

    /// The underlying schema store
    #[must_use]
    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    /// All field definitions in position order
    pub fn fields(&self) -> Result<Vec<FieldDefinition>> {
        self.store.fields()
    }

    /// All group definitions in position order
    pub fn groups(&self) -> Result<Vec<GroupDefinition>> {
        self.store.groups()
    }

    /// A single field definition by key
    pub fn field(&self, key: &str) -> Result<FieldDefinition> {
        self.fields()?
            .into_iter()
            .find(|f| f.key == key)
            .ok_or_else(|| SchemaError::not_found(format!("field '{key}'")))
    }

    /// Fields belonging to one group, preserving stored order
    pub fn fields_by_group(&self, group_id: &str) -> Result<Vec<FieldDefinition>> {
        Ok(self
            .fields()?
            .into_iter()
            .filter(|f| f.group == group_id)
            .collect())
    }

    /// Create or update a field definition.
    ///
    /// The record is rebuilt from the sanitized input with only the
    /// attributes valid for its type. An update without an explicit
    /// position keeps the stored one.
    ///
    /// # Errors
    /// `Validation` when the key or label is empty after sanitization or
    /// the type is unknown; storage failures propagate unchanged. A
    /// failed save never mutates the stored collection.
    pub fn save_field(&self, input: FieldInput) -> Result<FieldDefinition> {
        let key = sanitize_key(&input.key);
        let label = sanitize_text(&input.label);
        if key.is_empty() {
            return Err(SchemaError::validation("field key must not be empty"));
        }
        if label.is_empty() {
            return Err(SchemaError::validation("field label must not be empty"));
        }
        let settings = self.build_settings(&input)?;

        let mut clean = FieldDefinition {
            key: key.clone(),
            label,
            group: sanitize_key(&input.group),
            description: sanitize_text(&input.description),
            required: input.required,
            show_in_admin: input.show_in_admin.unwrap_or(true),
            ai_fillable: input.ai_fillable,
            position: input.position.unwrap_or(DEFAULT_POSITION),
            settings,
        };

        let mut fields = self.fields()?;
        if let Some(existing) = fields.iter_mut().find(|f| f.key == key) {
            if input.position.is_none() {
                clean.position = existing.position;
            }
            *existing = clean.clone();
            debug!("updated field '{key}'");
        } else {
            fields.push(clean.clone());
            debug!("added field '{key}'");
        }
        fields.sort_by_key(|f| f.position);
        self.store.replace_fields(&fields)?;
        Ok(clean)
    }

    /// Delete a field definition.
    ///
    /// Returns whether a record was removed; deleting a missing key is a
    /// successful no-op.
    pub fn delete_field(&self, key: &str) -> Result<bool> {
        let mut fields = self.fields()?;
        let before = fields.len();
        fields.retain(|f| f.key != key);
        if fields.len() == before {
            debug!("delete of missing field '{key}' ignored");
            return Ok(false);
        }
        self.store.replace_fields(&fields)?;
        debug!("deleted field '{key}'");
        Ok(true)
    }

    /// Create or update a group definition
    ///
    /// # Errors
    /// `Validation` when the id or label is empty after sanitization or
    /// the context/priority value is not one of the closed sets.
    pub fn save_group(&self, input: GroupInput) -> Result<GroupDefinition> {
        let id = sanitize_key(&input.id);
        let label = sanitize_text(&input.label);
        if id.is_empty() {
            return Err(SchemaError::validation("group id must not be empty"));
        }
        if label.is_empty() {
            return Err(SchemaError::validation("group label must not be empty"));
        }
        let context = parse_enum::<GroupContext>(&input.context, GroupContext::Normal, "context")?;
        let priority =
            parse_enum::<GroupPriority>(&input.priority, GroupPriority::High, "priority")?;

        let mut clean = GroupDefinition {
            id: id.clone(),
            label,
            position: input.position.unwrap_or(DEFAULT_POSITION),
            context,
            priority,
        };

        let mut groups = self.groups()?;
        if let Some(existing) = groups.iter_mut().find(|g| g.id == id) {
            if input.position.is_none() {
                clean.position = existing.position;
            }
            *existing = clean.clone();
            debug!("updated group '{id}'");
        } else {
            groups.push(clean.clone());
            debug!("added group '{id}'");
        }
        groups.sort_by_key(|g| g.position);
        self.store.replace_groups(&groups)?;
        Ok(clean)
    }

    /// Delete a group and every field assigned to it.
    ///
    /// The field list is written before the group list: if the second
    /// write fails, the observable leftover is orphaned fields, never a
    /// group whose members were half-removed. Deleting a missing id is a
    /// successful no-op.
    pub fn delete_group(&self, id: &str) -> Result<bool> {
        let mut groups = self.groups()?;
        let before = groups.len();
        groups.retain(|g| g.id != id);
        let removed = groups.len() != before;

        let mut fields = self.fields()?;
        let member_keys: FxHashSet<String> = fields
            .iter()
            .filter(|f| f.group == id)
            .map(|f| f.key.clone())
            .collect();
        if !member_keys.is_empty() {
            fields.retain(|f| f.group != id);
            self.store.replace_fields(&fields)?;
            debug!("cascade removed {} fields of group '{id}'", member_keys.len());
        }
        if removed {
            self.store.replace_groups(&groups)?;
            debug!("deleted group '{id}'");
        }
        Ok(removed)
    }

    /// The active decode mapping table: the custom table when one is
    /// stored and non-empty, otherwise the built-in default in its
    /// entirety (no merge).
    pub fn decode_mapping(&self) -> Result<BTreeMap<String, String>> {
        match self.store.custom_mapping()? {
            Some(table) if !table.is_empty() => Ok(table),
            _ => Ok(defaults::default_decode_mapping()),
        }
    }

    /// Replace the custom decode mapping table wholesale
    pub fn set_decode_mapping(&self, table: &BTreeMap<String, String>) -> Result<()> {
        self.store.set_custom_mapping(table)
    }

    /// Run an external decode dataset through the active mapping table
    pub fn apply_mapping(&self, records: &[DecodedAttribute]) -> Result<MappingOutcome> {
        let table = self.decode_mapping()?;
        Ok(mapping::apply_mapping(&table, records))
    }

    /// Builds the type-conditional settings from raw input, discarding
    /// anything that does not belong to the requested type.
    fn build_settings(&self, input: &FieldInput) -> Result<TypeSettings> {
        let settings = match input.field_type.as_str() {
            "text" => TypeSettings::Text,
            "textarea" => TypeSettings::Textarea,
            "checkbox" => TypeSettings::Checkbox,
            "number" => TypeSettings::Number(NumericBounds {
                min: coerce_bound(input.min.as_deref()).unwrap_or(0.0),
                max: coerce_bound(input.max.as_deref()),
                step: coerce_bound(input.step.as_deref()).unwrap_or(1.0),
            }),
            "select" => TypeSettings::Select {
                options: sanitize_options(&input.options),
            },
            "radio" => TypeSettings::Radio {
                options: sanitize_options(&input.options),
            },
            "checkbox_array" => TypeSettings::CheckboxArray {
                options: sanitize_options(&input.options),
            },
            other => {
                return Err(SchemaError::validation(format!(
                    "unknown field type '{other}'"
                )));
            }
        };
        Ok(settings)
    }
}

fn coerce_bound(raw: Option<&str>) -> Option<f64> {
    raw.and_then(parse_number)
}

/// Slugs option keys and drops entries whose key sanitizes to nothing
fn sanitize_options(raw: &[(String, String)]) -> Vec<SelectOption> {
    let mut seen = FxHashSet::default();
    let mut options = Vec::with_capacity(raw.len());
    for (key, label) in raw {
        let value = sanitize_key(key);
        if value.is_empty() {
            warn!("dropping option with empty key (label '{label}')");
            continue;
        }
        if seen.insert(value.clone()) {
            options.push(SelectOption::new(value, sanitize_text(label)));
        }
    }
    options
}

fn parse_enum<T: FromStr<Err = ()>>(raw: &str, default: T, what: &str) -> Result<T> {
    let cleaned = sanitize_text(raw);
    if cleaned.is_empty() {
        return Ok(default);
    }
    cleaned
        .parse()
        .map_err(|()| SchemaError::validation(format!("unknown group {what} '{cleaned}'")))
}
