//! Raw mutation inputs.
//!
//! These carry untrusted form values: identifiers are unsanitized,
//! numeric bounds arrive as strings and option lists as (key, label)
//! pairs. The manager sanitizes and validates them into clean
//! definitions.

/// Raw input for creating or updating a field definition
#[derive(Debug, Clone, Default)]
pub struct FieldInput {
    pub key: String,
    pub label: String,
    /// One of `text`, `number`, `textarea`, `select`, `radio`,
    /// `checkbox`, `checkbox_array`
    pub field_type: String,
    pub group: String,
    pub description: String,
    pub required: bool,
    /// `None` keeps the default (visible)
    pub show_in_admin: Option<bool>,
    pub ai_fillable: bool,
    /// `None` keeps an existing field's position, or pushes a new field
    /// to the end
    pub position: Option<i64>,
    /// Option (key, label) pairs for choice types; ignored otherwise
    pub options: Vec<(String, String)>,
    /// Numeric bounds as submitted; ignored for non-number types
    pub min: Option<String>,
    pub max: Option<String>,
    pub step: Option<String>,
}

impl FieldInput {
    /// Start an input with the three attributes every field needs
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<(String, String)>) -> Self {
        self.options = options;
        self
    }
}

/// Raw input for creating or updating a group definition
#[derive(Debug, Clone, Default)]
pub struct GroupInput {
    pub id: String,
    pub label: String,
    pub position: Option<i64>,
    /// Empty keeps the default (`normal`)
    pub context: String,
    /// Empty keeps the default (`high`)
    pub priority: String,
}

impl GroupInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }
}
