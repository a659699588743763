//! Daemon configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::{CatalogError, CatalogResult};
use std::env;
use std::time::Duration;

// =============================================================================
// Configuration
// =============================================================================

/// Daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Use-case layer configuration
    pub usecase: UsecaseConfig,

    /// Environment (test, development, production)
    pub environment: Environment,

    /// Debug mode (raises the default log level)
    pub debug: bool,
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

/// Use-case layer configuration.
#[derive(Debug, Clone)]
pub struct UsecaseConfig {
    /// Deadline applied to every orchestrated call
    pub timeout: Duration,
}

/// Environment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Test environment
    Test,
    /// Development environment
    Development,
    /// Production environment
    Production,
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 9090;
const DEFAULT_TIMEOUT_SECS: u64 = 2;

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> CatalogResult<Self> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let environment = Self::load_environment()?;
        let api = Self::load_api_config()?;
        let usecase = Self::load_usecase_config()?;
        let debug = Self::load_bool_env("CATALOG_DEBUG", false)?;

        Ok(Self {
            api,
            usecase,
            environment,
            debug,
        })
    }

    /// Create test configuration.
    pub fn test() -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            usecase: UsecaseConfig {
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
            environment: Environment::Test,
            debug: false,
        }
    }

    fn load_environment() -> CatalogResult<Environment> {
        let env_str = env::var("CATALOG_ENV").unwrap_or_else(|_| "development".to_string());
        parse_environment(&env_str)
    }

    fn load_api_config() -> CatalogResult<ApiConfig> {
        let host = env::var("CATALOG_API_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("CATALOG_API_PORT") {
            Ok(val) => val
                .parse::<u16>()
                .map_err(|_| CatalogError::Config(format!("Invalid CATALOG_API_PORT: {}", val)))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(ApiConfig { host, port })
    }

    fn load_usecase_config() -> CatalogResult<UsecaseConfig> {
        let secs = match env::var("CATALOG_CONTEXT_TIMEOUT_SECS") {
            Ok(val) => parse_timeout_secs(&val)?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(UsecaseConfig {
            timeout: Duration::from_secs(secs),
        })
    }

    fn load_bool_env(key: &str, default: bool) -> CatalogResult<bool> {
        match env::var(key) {
            Ok(val) => parse_bool(&val)
                .ok_or_else(|| CatalogError::Config(format!("Invalid {} value: {}", key, val))),
            Err(_) => Ok(default),
        }
    }
}

fn parse_environment(value: &str) -> CatalogResult<Environment> {
    match value.to_lowercase().as_str() {
        "test" => Ok(Environment::Test),
        "development" | "dev" => Ok(Environment::Development),
        "production" | "prod" => Ok(Environment::Production),
        other => Err(CatalogError::Config(format!(
            "Invalid CATALOG_ENV: {}. Expected: test, development, production",
            other
        ))),
    }
}

fn parse_timeout_secs(value: &str) -> CatalogResult<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(CatalogError::Config(format!(
            "Invalid CATALOG_CONTEXT_TIMEOUT_SECS: {} (expected a positive number of seconds)",
            value
        ))),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            usecase: UsecaseConfig {
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
            environment: Environment::Development,
            debug: false,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
