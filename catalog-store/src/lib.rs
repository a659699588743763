//! Catalog Storage Layer
//!
//! Provides the product repository and its cursor-paginated scan.
//!
//! # Architecture
//!
//! - **Repository trait**: Defines the storage interface (port)
//! - **In-memory store**: Process-lifetime implementation guarded by a single mutex
//! - **Cursor codec**: Opaque page tokens for `fetch`
//!
//! # Usage
//!
//! ```rust
//! use catalog_domain::ProductDraft;
//! use catalog_store::{MemoryStore, ProductRepository};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryStore::new();
//!
//!     let draft = ProductDraft::new("Kettle", "1.7L, stainless").unwrap();
//!     let product = store.store(&draft).await.unwrap();
//!
//!     let page = store.fetch("", 10).await.unwrap();
//!     assert_eq!(page.items[0].id, product.id);
//!     assert!(page.next_cursor.is_none());
//! }
//! ```

#![warn(clippy::all)]

// Modules
pub mod cursor;
mod error;
mod memory;
mod repository;

// Re-exports
pub use cursor::{decode_cursor, encode_cursor};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use repository::{Page, ProductRepository};
