//! A Rust library for schema-driven vehicle listing management: runtime
//! field and group definitions, decode-data mapping and render-plan
//! derivation, with thin VIN-decode and AI value-lookup collaborators.

pub mod ai;
pub mod decode;
pub mod error;
pub mod listing;
pub mod manager;
pub mod mapping;
pub mod render;
pub mod schema;
pub mod store;

// Re-export the most common types for easier use
// Core types
pub use error::{Result, SchemaError};
pub use schema::{FieldDefinition, GroupDefinition, SelectOption, TypeSettings};

// Engines
pub use manager::{FieldInput, FieldManager, GroupInput};
pub use mapping::{DecodedAttribute, MappingOutcome, MappingTable, apply_mapping};

// Persistence
pub use store::{JsonFileStore, MemoryStore, SchemaStore, SettingsStore};

// Render plans and formatting
pub use render::{FormatOptions, RenderDescriptor, Widget, format_value, plan, render_field};

// Listing values
pub use listing::{FieldValue, RawInput, Submission, collect_submission, partition_features};

// External collaborators
pub use ai::{AiConfig, AiLookup, SearchMethod, VehicleContext};
pub use decode::{DecodeClient, ListingDraft, build_listing_draft};
