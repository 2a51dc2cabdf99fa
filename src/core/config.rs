//! Configuration management for the product catalog server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Catalog storage configuration.
    pub catalog: CatalogConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Which catalog store backs the tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local store; contents are lost on exit.
    #[default]
    Memory,

    /// SQLite database file at `CatalogConfig::database_path`.
    Sqlite,
}

impl StorageBackend {
    /// Parse a backend name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "memory" | "mem" => Some(Self::Memory),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

/// Configuration for catalog storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Selected storage backend.
    pub backend: StorageBackend,

    /// Database file used by the SQLite backend.
    pub database_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            database_path: PathBuf::from("catalog.db"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "product-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_CATALOG_BACKEND`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();
        config.catalog = CatalogConfig::from_env();

        config
    }
}

impl CatalogConfig {
    /// Load catalog settings from `MCP_CATALOG_BACKEND` and `MCP_CATALOG_DB_PATH`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(backend) = std::env::var("MCP_CATALOG_BACKEND") {
            match StorageBackend::parse(&backend) {
                Some(parsed) => config.backend = parsed,
                None => warn!(
                    "Unknown MCP_CATALOG_BACKEND '{}', falling back to in-memory storage",
                    backend
                ),
            }
        }

        if let Ok(path) = std::env::var("MCP_CATALOG_DB_PATH") {
            config.database_path = PathBuf::from(path);
        }

        if config.backend == StorageBackend::Sqlite {
            info!("Catalog database: {:?}", config.database_path);
        }

        config
    }
}
