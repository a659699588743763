//! Product use cases: policy around the repository.
//!
//! Every operation runs against a fresh [`Deadline`] derived from the
//! configured timeout. The service adds the rules the store does not enforce:
//! titles are unique, and delete reports a missing product instead of
//! touching the store.
//!
//! # Architecture
//!
//! ```text
//! API handler → ProductUsecase (ProductService) → ProductRepository (MemoryStore)
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use catalog_domain::{Product, ProductDraft, ProductId};
use catalog_store::{Page, ProductRepository, StoreError};

use crate::error::{CatalogError, CatalogResult};

/// Page size used when the caller asks for zero items.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// =============================================================================
// Deadline
// =============================================================================

/// Point in time after which an orchestrated call must not reach the store.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
        }
    }

    /// True once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Drive `fut` to completion unless the deadline fires first.
    ///
    /// An expired deadline fails without polling `fut` at all.
    pub async fn within<F: Future>(&self, fut: F) -> CatalogResult<F::Output> {
        if self.is_expired() {
            return Err(self.exceeded());
        }
        timeout_at(self.at, fut).await.map_err(|_| self.exceeded())
    }

    /// [`Deadline::within`] for store calls, converting the store error.
    pub async fn run<T, F>(&self, fut: F) -> CatalogResult<T>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        self.within(fut).await?.map_err(CatalogError::from)
    }

    fn exceeded(&self) -> CatalogError {
        CatalogError::DeadlineExceeded(self.budget)
    }
}

// =============================================================================
// Use case contract
// =============================================================================

/// Product operations offered to the API layer.
#[async_trait]
pub trait ProductUsecase: Send + Sync {
    /// List one page of products. `limit == 0` means [`DEFAULT_PAGE_SIZE`].
    async fn fetch(&self, cursor: &str, limit: usize) -> CatalogResult<Page>;

    /// Get a product by id.
    async fn get_by_id(&self, id: ProductId) -> CatalogResult<Product>;

    /// Get a product by exact title.
    async fn get_by_title(&self, title: &str) -> CatalogResult<Product>;

    /// Create a product; fails with `Conflict` if the title is taken.
    async fn store(&self, draft: ProductDraft) -> CatalogResult<Product>;

    /// Replace title and content of an existing product.
    async fn update(&self, id: ProductId, draft: ProductDraft) -> CatalogResult<Product>;

    /// Delete a product; fails with `NotFound` if it does not exist.
    async fn delete(&self, id: ProductId) -> CatalogResult<()>;
}

// =============================================================================
// Product Service
// =============================================================================

/// Default [`ProductUsecase`] over any repository.
pub struct ProductService<R: ProductRepository + 'static> {
    /// Backing repository
    repo: Arc<R>,
    /// Budget for each call
    timeout: Duration,
    /// Serializes check-then-write sequences (title lookup + insert, etc.)
    writes: Mutex<()>,
}

impl<R: ProductRepository + 'static> ProductService<R> {
    /// Create a new product service.
    pub fn new(repo: Arc<R>, timeout: Duration) -> Self {
        Self {
            repo,
            timeout,
            writes: Mutex::new(()),
        }
    }

    fn deadline(&self) -> Deadline {
        Deadline::after(self.timeout)
    }

    /// Fails with `Conflict` when `title` belongs to a product other than `owner`.
    async fn ensure_title_free(
        &self,
        deadline: &Deadline,
        title: &str,
        owner: Option<ProductId>,
    ) -> CatalogResult<()> {
        match deadline.run(self.repo.get_by_title(title)).await {
            Ok(existing) if Some(existing.id) != owner => {
                warn!(existing_id = existing.id, title, "Title already in use");
                Err(CatalogError::Conflict(title.to_string()))
            }
            Ok(_) | Err(CatalogError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<R: ProductRepository + 'static> ProductUsecase for ProductService<R> {
    async fn fetch(&self, cursor: &str, limit: usize) -> CatalogResult<Page> {
        let limit = if limit == 0 { DEFAULT_PAGE_SIZE } else { limit };
        let deadline = self.deadline();

        let page = deadline.run(self.repo.fetch(cursor, limit)).await?;
        debug!(limit, returned = page.items.len(), "Fetched products");

        Ok(page)
    }

    async fn get_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        let deadline = self.deadline();
        deadline.run(self.repo.get_by_id(id)).await
    }

    async fn get_by_title(&self, title: &str) -> CatalogResult<Product> {
        let deadline = self.deadline();
        deadline.run(self.repo.get_by_title(title)).await
    }

    async fn store(&self, draft: ProductDraft) -> CatalogResult<Product> {
        let deadline = self.deadline();
        let _guard = deadline.within(self.writes.lock()).await?;

        self.ensure_title_free(&deadline, draft.title(), None).await?;

        let product = deadline.run(self.repo.store(&draft)).await?;
        info!(id = product.id, title = %product.title, "Product created");

        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> CatalogResult<Product> {
        let deadline = self.deadline();
        let _guard = deadline.within(self.writes.lock()).await?;

        // A missing product is reported before any title clash
        let existing = deadline.run(self.repo.get_by_id(id)).await?;
        self.ensure_title_free(&deadline, draft.title(), Some(existing.id)).await?;

        let product = deadline.run(self.repo.update(id, &draft)).await?;
        info!(id, updated_at = %product.updated_at, "Product updated");

        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> CatalogResult<()> {
        let deadline = self.deadline();
        let _guard = deadline.within(self.writes.lock()).await?;

        let existing = deadline.run(self.repo.get_by_id(id)).await?;

        deadline.run(self.repo.delete(existing.id)).await?;
        info!(id, "Product deleted");

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
