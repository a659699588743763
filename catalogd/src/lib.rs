//! Catalog Daemon Library
//!
//! HTTP service exposing the product catalog.
//!
//! # Architecture
//!
//! ```text
//! HTTP → API handlers → ProductUsecase (deadline, title uniqueness) → ProductRepository
//! ```
//!
//! # Components
//!
//! - **Daemon**: Runtime wiring and server lifecycle
//! - **Usecase**: Policy layer around the repository
//! - **API**: HTTP endpoints
//! - **Config**: Environment-based configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use catalogd::{Config, Daemon};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env().expect("Failed to load config");
//!     let daemon = Daemon::new_in_memory(config);
//!     daemon.run().await.expect("Daemon error");
//! }
//! ```

#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod daemon;
pub mod error;
pub mod usecase;

// Re-exports for convenience
pub use api::{create_router, ApiState};
pub use config::{ApiConfig, Config, Environment, UsecaseConfig};
pub use daemon::Daemon;
pub use error::{CatalogError, CatalogResult};
pub use usecase::{Deadline, ProductService, ProductUsecase, DEFAULT_PAGE_SIZE};
