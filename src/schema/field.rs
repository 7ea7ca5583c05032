//! Field definitions for the listing schema.
//!
//! A field definition describes one piece of per-listing data: its key,
//! display label, owning group and a type-tagged settings variant. The
//! settings variant carries exactly the attributes that are valid for the
//! field's type, so an update can never leave stale attributes from a
//! previous type behind.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry in an option list for a choice field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored value, always a `[a-z0-9_]` slug
    pub value: String,
    /// Display label
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Numeric bounds for a `number` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericBounds {
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default = "default_step")]
    pub step: f64,
}

impl Default for NumericBounds {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: None,
            step: 1.0,
        }
    }
}

fn default_step() -> f64 {
    1.0
}

/// Type-conditional settings, one variant per field type.
///
/// The serde tag keeps the persisted JSON flat: a number field serializes
/// as `{"key": ..., "type": "number", "min": 0.0, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeSettings {
    Text,
    Number(NumericBounds),
    Textarea,
    Select {
        #[serde(default)]
        options: Vec<SelectOption>,
    },
    Radio {
        #[serde(default)]
        options: Vec<SelectOption>,
    },
    Checkbox,
    CheckboxArray {
        #[serde(default)]
        options: Vec<SelectOption>,
    },
}

impl TypeSettings {
    /// The wire/display name of the field type
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number(_) => "number",
            Self::Textarea => "textarea",
            Self::Select { .. } => "select",
            Self::Radio { .. } => "radio",
            Self::Checkbox => "checkbox",
            Self::CheckboxArray { .. } => "checkbox_array",
        }
    }

    /// Whether the type constrains values to a predefined option set
    #[must_use]
    pub const fn is_choice(&self) -> bool {
        matches!(
            self,
            Self::Select { .. } | Self::Radio { .. } | Self::CheckboxArray { .. }
        )
    }

    /// The ordered option list, empty for non-choice types
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        match self {
            Self::Select { options } | Self::Radio { options } | Self::CheckboxArray { options } => {
                options
            }
            _ => &[],
        }
    }

    /// Numeric bounds, present only for `number`
    #[must_use]
    pub const fn bounds(&self) -> Option<&NumericBounds> {
        match self {
            Self::Number(bounds) => Some(bounds),
            _ => None,
        }
    }
}

impl fmt::Display for TypeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A single field definition in the listing schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Unique `[a-z0-9_]` identifier
    pub key: String,
    /// Display label
    pub label: String,
    /// Owning group id. Advisory reference: a field whose group no longer
    /// exists is orphaned but not deleted.
    #[serde(default)]
    pub group: String,
    /// Optional help text
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_true")]
    pub show_in_admin: bool,
    #[serde(default)]
    pub ai_fillable: bool,
    /// Sort key, 999 pushes to the end
    #[serde(default = "default_position")]
    pub position: i64,
    #[serde(flatten)]
    pub settings: TypeSettings,
}

pub(crate) const DEFAULT_POSITION: i64 = 999;

const fn default_true() -> bool {
    true
}

const fn default_position() -> i64 {
    DEFAULT_POSITION
}

impl FieldDefinition {
    /// Create a field definition with defaults for the optional attributes
    pub fn new(key: impl Into<String>, label: impl Into<String>, settings: TypeSettings) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            group: String::new(),
            description: String::new(),
            required: false,
            show_in_admin: true,
            ai_fillable: false,
            position: DEFAULT_POSITION,
            settings,
        }
    }

    /// Set the owning group
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the help text
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the sort position
    #[must_use]
    pub const fn with_position(mut self, position: i64) -> Self {
        self.position = position;
        self
    }

    /// Mark the field as required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as eligible for AI value lookup
    #[must_use]
    pub const fn ai_fillable(mut self) -> Self {
        self.ai_fillable = true;
        self
    }

    /// Hide the field from the admin edit surface
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.show_in_admin = false;
        self
    }

    /// Look up an option label by its stored value
    #[must_use]
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.settings
            .options()
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}
