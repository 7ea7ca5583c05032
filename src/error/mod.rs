//! Error handling for the listing schema engine.

/// Errors produced by schema, mapping and collaborator operations
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Input rejected by validation; the stored collections are untouched
    #[error("validation error: {0}")]
    Validation(String),

    /// A field or group was looked up by a key that does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The underlying settings store failed to read or write a blob
    #[error("storage error: {0}")]
    Storage(String),

    /// A persisted blob could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An external collaborator request failed
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SchemaError {
    /// Shorthand for a validation failure
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for a missing key or id
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }
}

/// Alias for Result with `SchemaError`
pub type Result<T> = std::result::Result<T, SchemaError>;
