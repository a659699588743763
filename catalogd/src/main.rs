//! Catalog Daemon
//!
//! Serves the product catalog over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Start with default configuration
//! cargo run -p catalogd
//!
//! # Start with custom environment
//! CATALOG_ENV=test CATALOG_API_PORT=8081 cargo run -p catalogd
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_ENV`: Environment (test, development, production)
//! - `CATALOG_API_HOST`: API host (default: 0.0.0.0)
//! - `CATALOG_API_PORT`: API port (default: 9090)
//! - `CATALOG_CONTEXT_TIMEOUT_SECS`: Per-request deadline (default: 2)
//! - `CATALOG_DEBUG`: Debug mode, lowers the default log level (default: false)

use catalogd::{Config, Daemon};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first: debug mode picks the default log level
    let config = Config::from_env()?;

    let level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(format!("catalogd={}", level).parse()?)
                .add_directive(format!("catalog_store={}", level).parse()?),
        )
        .init();

    if config.debug {
        info!("Service running in debug mode");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        api_host = %config.api.host,
        api_port = config.api.port,
        "Catalog Daemon"
    );

    let daemon = Daemon::new_in_memory(config);
    daemon.run().await?;

    Ok(())
}
