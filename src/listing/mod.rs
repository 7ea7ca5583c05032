//! Per-listing field values.
//!
//! The host application stores one value per field key on each listing.
//! This module defines the stored value shape, the coercion of raw form
//! submissions into typed values, and the normalization of mapped decode
//! values against their field definitions.

use std::collections::BTreeMap;

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::schema::field::{FieldDefinition, TypeSettings};
use crate::schema::sanitize::{parse_number, sanitize_multiline, sanitize_text};

/// The stored value of one field on one listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    /// Flag set for `checkbox_array` fields, typically `yes` and/or `no`
    Flags(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Whether the value counts as absent for display purposes.
    ///
    /// A number is never absent; zero is a legitimate stored value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
            Self::Flags(flags) => flags.is_empty(),
        }
    }

    /// Plain-text rendering without any formatting rules
    #[must_use]
    pub fn as_plain(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_plain_number(*n),
            Self::Flags(flags) => flags.join(", "),
        }
    }
}

pub(crate) fn format_plain_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// One raw value from a collected form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Single(String),
    Multi(Vec<String>),
}

impl RawInput {
    fn single(&self) -> &str {
        match self {
            Self::Single(s) => s,
            Self::Multi(values) => values.first().map_or("", String::as_str),
        }
    }
}

/// Typed updates coerced from one form submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    pub updates: BTreeMap<String, FieldValue>,
    /// Keys whose stored value should be removed (unchecked flag sets)
    pub cleared: Vec<String>,
}

/// Coerce a raw form submission into typed per-field values.
///
/// Fields hidden from the admin surface are skipped. A `checkbox_array`
/// field with no submitted flags is reported as cleared, matching
/// unchecked-checkbox form semantics. Unparsable numbers are skipped.
#[must_use]
pub fn collect_submission(
    fields: &[FieldDefinition],
    raw: &FxHashMap<String, RawInput>,
) -> Submission {
    let mut submission = Submission::default();
    for field in fields {
        if !field.show_in_admin {
            continue;
        }
        let input = raw.get(&field.key);
        match &field.settings {
            TypeSettings::CheckboxArray { .. } => match input {
                Some(RawInput::Multi(values)) => {
                    let flags: Vec<String> = values
                        .iter()
                        .map(|v| sanitize_text(v))
                        .filter(|v| !v.is_empty())
                        .collect();
                    submission
                        .updates
                        .insert(field.key.clone(), FieldValue::Flags(flags));
                }
                Some(RawInput::Single(value)) => {
                    let flag = sanitize_text(value);
                    let flags = if flag.is_empty() { Vec::new() } else { vec![flag] };
                    submission
                        .updates
                        .insert(field.key.clone(), FieldValue::Flags(flags));
                }
                None => submission.cleared.push(field.key.clone()),
            },
            TypeSettings::Number(_) => {
                if let Some(input) = input {
                    match parse_number(input.single()) {
                        Some(n) => {
                            submission.updates.insert(field.key.clone(), FieldValue::Number(n));
                        }
                        None => debug!("skipping unparsable number for '{}'", field.key),
                    }
                }
            }
            TypeSettings::Textarea => {
                if let Some(input) = input {
                    submission.updates.insert(
                        field.key.clone(),
                        FieldValue::text(sanitize_multiline(input.single())),
                    );
                }
            }
            TypeSettings::Checkbox => {
                let checked = input.is_some_and(|i| !i.single().is_empty());
                submission.updates.insert(
                    field.key.clone(),
                    FieldValue::text(if checked { "1" } else { "0" }),
                );
            }
            _ => {
                if let Some(input) = input {
                    submission.updates.insert(
                        field.key.clone(),
                        FieldValue::text(sanitize_text(input.single())),
                    );
                }
            }
        }
    }
    submission
}

/// Normalize mapped decode values against their field definitions.
///
/// Mapped values arrive as sanitized text; this routes them through
/// per-type coercion so what gets persisted matches what a manual save
/// would have produced: numbers parse leniently or are dropped, choice
/// values resolve a matching option label (case-insensitive) to its
/// stored option value, everything else stays text. Keys without a
/// field definition pass through untouched.
#[must_use]
pub fn normalize_mapped_values(
    fields: &[FieldDefinition],
    updates: &BTreeMap<String, String>,
) -> BTreeMap<String, FieldValue> {
    let by_key: FxHashMap<&str, &FieldDefinition> =
        fields.iter().map(|f| (f.key.as_str(), f)).collect();
    let mut normalized = BTreeMap::new();
    for (key, value) in updates {
        let Some(field) = by_key.get(key.as_str()) else {
            normalized.insert(key.clone(), FieldValue::text(value.clone()));
            continue;
        };
        match &field.settings {
            TypeSettings::Number(_) => match parse_number(value) {
                Some(n) => {
                    normalized.insert(key.clone(), FieldValue::Number(n));
                }
                None => debug!("dropping unparsable mapped number for '{key}': '{value}'"),
            },
            settings if settings.is_choice() => {
                let resolved = resolve_option(field, value);
                normalized.insert(key.clone(), FieldValue::text(resolved));
            }
            _ => {
                normalized.insert(key.clone(), FieldValue::text(value.clone()));
            }
        }
    }
    normalized
}

/// Feature labels split by their stored yes/no flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturePartition {
    pub equipped: Vec<String>,
    pub not_equipped: Vec<String>,
}

/// Partition `checkbox_array` fields into equipped and not-equipped
/// label lists, optionally restricted to one group. A field whose flag
/// set carries both `yes` and `no` counts as equipped.
#[must_use]
pub fn partition_features(
    fields: &[FieldDefinition],
    values: &BTreeMap<String, FieldValue>,
    group: Option<&str>,
) -> FeaturePartition {
    let mut partition = FeaturePartition::default();
    for field in fields {
        if !matches!(field.settings, TypeSettings::CheckboxArray { .. }) {
            continue;
        }
        if group.is_some_and(|g| field.group != g) {
            continue;
        }
        let Some(FieldValue::Flags(flags)) = values.get(&field.key) else {
            continue;
        };
        if flags.iter().any(|f| f == "yes") {
            partition.equipped.push(field.label.clone());
        } else if flags.iter().any(|f| f == "no") {
            partition.not_equipped.push(field.label.clone());
        }
    }
    partition
}

/// Match a decode value against a choice field's options by stored value
/// or by label; fall back to the raw text when nothing matches.
fn resolve_option(field: &FieldDefinition, value: &str) -> String {
    let lowered = value.to_lowercase();
    for option in field.settings.options() {
        if option.value == lowered || option.label.to_lowercase() == lowered {
            return option.value.clone();
        }
    }
    value.to_string()
}
