//! HTTP API for the catalog daemon.
//!
//! Provides REST endpoints for:
//! - Health check
//! - Listing products (cursor pagination, next cursor in `X-Cursor`)
//! - Creating, reading, updating, and deleting a product

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error};

use catalog_domain::{Product, ProductDraft, ProductId};

use crate::error::CatalogError;
use crate::usecase::ProductUsecase;

/// Response header carrying the next page token.
pub const CURSOR_HEADER: &str = "X-Cursor";

// =============================================================================
// API State
// =============================================================================

/// Shared state for API handlers.
pub struct ApiState {
    pub products: Arc<dyn ProductUsecase>,
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Query string for listing products.
#[derive(Debug, Default, Deserialize)]
pub struct FetchQuery {
    /// Page size; missing or empty means the default
    pub num: Option<String>,
    /// Token from a previous `X-Cursor` header
    pub cursor: Option<String>,
}

/// Body for create and update.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

// =============================================================================
// Router
// =============================================================================

/// Create the API router.
pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/products", get(fetch_handler).post(store_handler))
        .route(
            "/products/:id",
            get(get_product_handler)
                .post(update_handler)
                .delete(delete_handler),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List one page of products.
async fn fetch_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<FetchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = parse_limit(query.num.as_deref()).map_err(to_error_response)?;
    let cursor = query.cursor.unwrap_or_default();

    let page = state
        .products
        .fetch(&cursor, limit)
        .await
        .map_err(to_error_response)?;

    let next_cursor = page.next_cursor.unwrap_or_default();

    Ok((StatusCode::OK, [(CURSOR_HEADER, next_cursor)], Json(page.items)))
}

/// Get a single product.
async fn get_product_handler(
    State(state): State<Arc<ApiState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;

    let product = state
        .products
        .get_by_id(id)
        .await
        .map_err(to_error_response)?;

    Ok(Json(product))
}

/// Create a product.
async fn store_handler(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let draft = ProductDraft::new(req.title, req.content)
        .map_err(|e| to_error_response(e.into()))?;

    let product = state
        .products
        .store(draft)
        .await
        .map_err(to_error_response)?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product.
async fn update_handler(
    State(state): State<Arc<ApiState>>,
    Path(raw_id): Path<String>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;
    let draft = ProductDraft::new(req.title, req.content)
        .map_err(|e| to_error_response(e.into()))?;

    let product = state
        .products
        .update(id, draft)
        .await
        .map_err(to_error_response)?;

    Ok(Json(product))
}

/// Delete a product.
async fn delete_handler(
    State(state): State<Arc<ApiState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;

    state
        .products
        .delete(id)
        .await
        .map_err(to_error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

/// A path id that is not an integer cannot name a product.
fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse::<ProductId>().map_err(|_| {
        to_error_response(CatalogError::NotFound(format!("product with id {}", raw)))
    })
}

fn parse_limit(raw: Option<&str>) -> Result<usize, CatalogError> {
    let raw = match raw {
        None => return Ok(0),
        Some(s) if s.trim().is_empty() => return Ok(0),
        Some(s) => s.trim(),
    };

    let num = raw
        .parse::<i64>()
        .map_err(|_| CatalogError::BadInput(format!("num must be an integer, got {:?}", raw)))?;

    usize::try_from(num)
        .map_err(|_| CatalogError::BadInput(format!("num must not be negative, got {}", num)))
}

fn to_error_response(error: CatalogError) -> ApiError {
    let status = match &error {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Conflict(_) => StatusCode::CONFLICT,
        CatalogError::Validation(_) | CatalogError::BadInput(_) => StatusCode::BAD_REQUEST,
        CatalogError::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
        CatalogError::Internal(_) | CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!(error = %error, %status, "Request failed");
    } else {
        debug!(error = %error, %status, "Request rejected");
    }

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

// =============================================================================
// Tests
// =============================================================================
