//! Daemon: Main runtime orchestrator.
//!
//! The Daemon ties together:
//! - Product repository (in-memory store)
//! - Product service (deadline and uniqueness policy)
//! - API Server (HTTP endpoints)
//!
//! # Lifecycle
//!
//! 1. Load configuration
//! 2. Initialize components
//! 3. Start API server
//! 4. Wait for SIGINT
//! 5. Drain in-flight requests and exit

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use catalog_store::{MemoryStore, ProductRepository};

use crate::api::{create_router, ApiState};
use crate::config::Config;
use crate::error::{CatalogError, CatalogResult};
use crate::usecase::ProductService;

// =============================================================================
// Daemon
// =============================================================================

/// The catalog daemon.
pub struct Daemon<R: ProductRepository + 'static> {
    /// Configuration
    config: Config,
    /// Product service
    service: Arc<ProductService<R>>,
    /// Cancelled to stop the API server
    shutdown_token: CancellationToken,
}

impl Daemon<MemoryStore> {
    /// Create a new daemon backed by an empty in-memory store.
    pub fn new_in_memory(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        let service = Arc::new(ProductService::new(store, config.usecase.timeout));

        Self::new(config, service)
    }
}

impl<R: ProductRepository + 'static> Daemon<R> {
    /// Create a new daemon with provided components.
    pub fn new(config: Config, service: Arc<ProductService<R>>) -> Self {
        Self {
            config,
            service,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Run the daemon.
    ///
    /// This method blocks until shutdown is requested (SIGINT).
    pub async fn run(self) -> CatalogResult<()> {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            environment = %self.config.environment,
            timeout = ?self.config.usecase.timeout,
            "Starting catalog daemon"
        );

        let (api_addr, server) = self.start_api_server().await?;
        info!(%api_addr, "API server started");

        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Received shutdown signal");

        self.shutdown(server).await
    }

    /// Start the API server.
    async fn start_api_server(&self) -> CatalogResult<(SocketAddr, JoinHandle<()>)> {
        let state = Arc::new(ApiState {
            products: self.service.clone(),
        });

        let router = create_router(state);
        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);

        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            CatalogError::Config(format!("Failed to bind to {}: {}", addr, e))
        })?;

        let local_addr = listener.local_addr().map_err(|e| {
            CatalogError::Config(format!("Failed to get local address: {}", e))
        })?;

        let token = self.shutdown_token.clone();
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(token.cancelled_owned())
                .await
            {
                error!(error = %e, "API server error");
            }
        });

        Ok((local_addr, server))
    }

    /// Graceful shutdown.
    async fn shutdown(&self, server: JoinHandle<()>) -> CatalogResult<()> {
        info!("Initiating graceful shutdown");

        self.shutdown_token.cancel();
        server
            .await
            .map_err(|e| CatalogError::Internal(format!("API server task failed: {}", e)))?;

        info!("Shutdown complete");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
