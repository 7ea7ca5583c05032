//! Data model for the listing schema: field and group definitions,
//! sanitization and the built-in defaults.

pub mod defaults;
pub mod field;
pub mod group;
pub mod sanitize;

pub use field::{FieldDefinition, NumericBounds, SelectOption, TypeSettings};
pub use group::{GroupContext, GroupDefinition, GroupPriority};
