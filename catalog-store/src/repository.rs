//! Repository trait definitions (Ports)
//!
//! The storage interface for products. The in-memory store is the only
//! implementation today; the orchestration layer depends on the trait.

use crate::error::StoreError;
use async_trait::async_trait;
use catalog_domain::{Product, ProductDraft, ProductId};

/// One page of a cursor-paginated scan.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Products in collection order
    pub items: Vec<Product>,
    /// Token for the following page; `None` once the collection is exhausted
    pub next_cursor: Option<String>,
}

/// Repository for Product entities
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Scan up to `limit` products starting after `cursor` (empty = from the start)
    async fn fetch(&self, cursor: &str, limit: usize) -> Result<Page, StoreError>;

    /// Find a product by ID
    async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError>;

    /// Find a product by exact title
    async fn get_by_title(&self, title: &str) -> Result<Product, StoreError>;

    /// Insert a new product, assigning its id and timestamps
    async fn store(&self, draft: &ProductDraft) -> Result<Product, StoreError>;

    /// Overwrite title and content of an existing product
    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, StoreError>;

    /// Remove a product
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}
