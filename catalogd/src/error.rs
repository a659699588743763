//! Daemon error types.

use std::time::Duration;

use catalog_domain::DomainError;
use catalog_store::StoreError;
use thiserror::Error;

/// Daemon-level errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Draft failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),

    /// No product at the requested id or title
    #[error("Not found: {0}")]
    NotFound(String),

    /// Another product already uses the title
    #[error("Conflict: a product titled {0:?} already exists")]
    Conflict(String),

    /// Malformed cursor or argument
    #[error("Bad input: {0}")]
    BadInput(String),

    /// Orchestration deadline fired before the store call completed
    #[error("Deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    /// Unexpected failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity_type, key } => {
                CatalogError::NotFound(format!("{} with {}", entity_type, key))
            }
            StoreError::InvalidCursor(msg) => CatalogError::BadInput(format!("invalid cursor: {}", msg)),
            StoreError::InvalidSeed(msg) => CatalogError::Config(format!("invalid seed: {}", msg)),
            StoreError::IdsExhausted(last) => {
                CatalogError::Internal(format!("product ids exhausted after {}", last))
            }
        }
    }
}

/// Result type for daemon operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
