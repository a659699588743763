//! Catalog Domain Layer
//!
//! Pure domain types with zero I/O dependencies.
//! Contains the product entity and the validated draft used to create or
//! update one.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Product, ProductId};
pub use value_objects::{DomainError, ProductDraft};
