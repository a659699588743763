//! Domain Entities for the Catalog
//!
//! The product is the only entity. Identity is assigned by the store and
//! never changes; timestamps track creation and the last modification.

use crate::value_objects::ProductDraft;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product ID
// =============================================================================

/// Unique identifier for a Product
pub type ProductId = i64;

// =============================================================================
// Product
// =============================================================================

/// A stored product.
///
/// Key invariants:
/// - `id` is non-zero and never reused
/// - `created_at` is set once
/// - `updated_at >= created_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identity
    pub id: ProductId,
    /// Unique among stored products
    pub title: String,
    /// Free-form body
    pub content: String,

    // Audit
    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a product from a validated draft, stamping both timestamps with `now`
    pub fn new(id: ProductId, draft: &ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title().to_string(),
            content: draft.content().to_string(),
            updated_at: now,
            created_at: now,
        }
    }

    /// Overwrite title and content and refresh `updated_at`.
    ///
    /// `id` and `created_at` are left untouched. A clock that moved backwards
    /// never pushes `updated_at` below `created_at`.
    pub fn apply(&mut self, draft: &ProductDraft, now: DateTime<Utc>) {
        self.title = draft.title().to_string();
        self.content = draft.content().to_string();
        self.updated_at = now.max(self.created_at);
    }
}

// =============================================================================
// Tests
// =============================================================================
