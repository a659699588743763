//! In-memory store implementation
//!
//! Holds the product collection for the lifetime of the process.
//! A single async mutex guards both the collection and the identity counter,
//! so every read, scan, and write observes a consistent snapshot.

use crate::cursor::{decode_cursor, encode_cursor};
use crate::error::StoreError;
use crate::repository::{Page, ProductRepository};
use async_trait::async_trait;
use catalog_domain::{Product, ProductDraft, ProductId};
use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const ENTITY: &str = "product";

/// In-memory product store
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

/// State behind the lock.
///
/// `products` stays sorted by ascending id: ids only grow and new products
/// are appended, while deletion removes in place.
struct Inner {
    products: Vec<Product>,
    last_id: ProductId,
}

impl Inner {
    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

/// Old/new pair written to the audit log on every mutation.
#[derive(Serialize)]
struct AuditRecord<'a> {
    old: Option<&'a Product>,
    new: Option<&'a Product>,
}

fn audit(action: &'static str, old: Option<&Product>, new: Option<&Product>) {
    match serde_json::to_string(&AuditRecord { old, new }) {
        Ok(record) => info!(target: "catalog_store::audit", action, %record, "Product changed"),
        Err(e) => warn!(target: "catalog_store::audit", action, error = %e, "Failed to serialize audit record"),
    }
}

impl MemoryStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                products: Vec::new(),
                last_id: 0,
            }),
        }
    }

    /// Create a store seeded with existing products.
    ///
    /// The identity counter resumes above both `last_id` and the highest
    /// seeded id. Seeds are ordered by id.
    ///
    /// # Errors
    /// `StoreError::InvalidSeed` if `last_id` is negative or any seed has a
    /// non-positive or repeated id.
    pub fn with_products(
        mut products: Vec<Product>,
        last_id: ProductId,
    ) -> Result<Self, StoreError> {
        if last_id < 0 {
            return Err(StoreError::InvalidSeed(format!("negative last id {}", last_id)));
        }
        if let Some(bad) = products.iter().find(|p| p.id <= 0) {
            return Err(StoreError::InvalidSeed(format!("non-positive id {}", bad.id)));
        }

        products.sort_by_key(|p| p.id);
        if let Some(pair) = products.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(StoreError::InvalidSeed(format!("duplicate id {}", pair[0].id)));
        }

        let highest = products.last().map(|p| p.id).unwrap_or(0);

        Ok(Self {
            inner: Mutex::new(Inner {
                products,
                last_id: last_id.max(highest),
            }),
        })
    }

    /// Get the number of stored products
    pub async fn len(&self) -> usize {
        self.inner.lock().await.products.len()
    }

    /// True when no products are stored
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.products.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Product Repository Implementation
// =============================================================================

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn fetch(&self, cursor: &str, limit: usize) -> Result<Page, StoreError> {
        let after = decode_cursor(cursor)?;

        let inner = self.inner.lock().await;
        let total = inner.products.len();

        let start = match after {
            Some(after_id) => inner.products.partition_point(|p| p.id <= after_id),
            None => 0,
        };
        let end = start.saturating_add(limit).min(total);
        let items = inner.products[start..end].to_vec();

        // Only hand out a cursor when another page actually exists
        let next_cursor = if limit > 0 && items.len() == limit && end < total {
            items.last().map(|p| encode_cursor(p.id))
        } else {
            None
        };

        debug!(start, returned = items.len(), total, has_next = next_cursor.is_some(), "Fetched page");

        Ok(Page { items, next_cursor })
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, format!("id {}", id)))
    }

    async fn get_by_title(&self, title: &str) -> Result<Product, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .products
            .iter()
            .find(|p| p.title == title)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, format!("title {:?}", title)))
    }

    async fn store(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        let mut inner = self.inner.lock().await;

        inner.last_id = inner
            .last_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted(inner.last_id))?;
        let product = Product::new(inner.last_id, draft, Utc::now());
        inner.products.push(product.clone());

        audit("store", None, Some(&product));
        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, StoreError> {
        let mut inner = self.inner.lock().await;

        let index = inner
            .position(id)
            .ok_or_else(|| StoreError::not_found(ENTITY, format!("id {}", id)))?;

        let product = &mut inner.products[index];
        let old = product.clone();
        product.apply(draft, Utc::now());

        audit("update", Some(&old), Some(&*product));
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;

        let index = inner
            .position(id)
            .ok_or_else(|| StoreError::not_found(ENTITY, format!("id {}", id)))?;

        let old = inner.products.remove(index);

        audit("delete", Some(&old), None);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
