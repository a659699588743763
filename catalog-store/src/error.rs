//! Storage layer errors

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found
    #[error("Entity not found: {entity_type} with {key}")]
    NotFound {
        /// Type of entity
        entity_type: String,
        /// Lookup key, e.g. `id 4` or `title "Lamp"`
        key: String,
    },

    /// Pagination cursor could not be decoded
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// Seed data violates the identity invariants
    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    /// The identity counter cannot advance any further
    #[error("Product ids exhausted after {0}")]
    IdsExhausted(i64),
}

impl StoreError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            key: key.into(),
        }
    }

    /// True for [`StoreError::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
