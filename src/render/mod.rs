//! Render-plan derivation.
//!
//! The external rendering layer never inspects field types itself: for
//! each field it receives a `RenderDescriptor` that says which widget to
//! draw, which constraints and options apply and what the current value
//! is. Formatting for read contexts lives in [`format`].

pub mod format;

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::listing::FieldValue;
use crate::manager::FieldManager;
use crate::schema::field::{FieldDefinition, SelectOption, TypeSettings};

pub use format::{FormatOptions, format_value};

/// Edit widget kind, derived 1:1 from the field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    TextInput,
    NumberInput,
    TextArea,
    Select,
    RadioGroup,
    Checkbox,
    CheckboxGroup,
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "text_input",
            Self::NumberInput => "number_input",
            Self::TextArea => "text_area",
            Self::Select => "select",
            Self::RadioGroup => "radio_group",
            Self::Checkbox => "checkbox",
            Self::CheckboxGroup => "checkbox_group",
        };
        write!(f, "{name}")
    }
}

/// Numeric constraints carried by number widgets
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericConstraints {
    pub min: f64,
    pub max: Option<f64>,
    pub step: f64,
}

/// Everything the rendering layer needs to present and edit one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderDescriptor {
    pub key: String,
    pub label: String,
    pub widget: Widget,
    /// Present only for number widgets
    pub constraints: Option<NumericConstraints>,
    /// Ordered option list, empty for non-choice widgets
    pub options: Vec<SelectOption>,
    pub current_value: Option<FieldValue>,
    pub help_text: String,
    pub required: bool,
    pub ai_fillable: bool,
}

/// Derive the render plan for one field and its current value
#[must_use]
pub fn plan(field: &FieldDefinition, current_value: Option<FieldValue>) -> RenderDescriptor {
    let (widget, constraints) = match &field.settings {
        TypeSettings::Text => (Widget::TextInput, None),
        TypeSettings::Number(bounds) => (
            Widget::NumberInput,
            Some(NumericConstraints {
                min: bounds.min,
                max: bounds.max,
                step: bounds.step,
            }),
        ),
        TypeSettings::Textarea => (Widget::TextArea, None),
        TypeSettings::Select { .. } => (Widget::Select, None),
        TypeSettings::Radio { .. } => (Widget::RadioGroup, None),
        TypeSettings::Checkbox => (Widget::Checkbox, None),
        TypeSettings::CheckboxArray { .. } => (Widget::CheckboxGroup, None),
    };
    RenderDescriptor {
        key: field.key.clone(),
        label: field.label.clone(),
        widget,
        constraints,
        options: field.settings.options().to_vec(),
        current_value,
        help_text: field.description.clone(),
        required: field.required,
        ai_fillable: field.ai_fillable,
    }
}

/// Format a value for a field addressed by key.
///
/// One generic handler for every field: the definition is looked up from
/// the schema at call time, so a field exists for output exactly as long
/// as it exists in the store, with no per-field registration to keep in
/// sync.
///
/// # Errors
/// `NotFound` when no field with that key is defined.
pub fn render_field(
    manager: &FieldManager,
    key: &str,
    value: &FieldValue,
    opts: &FormatOptions,
) -> Result<String> {
    let field = manager.field(key)?;
    Ok(format_value(&field, value, opts))
}
