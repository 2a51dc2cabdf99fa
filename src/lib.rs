//! Product Catalog MCP Server Library
//!
//! An MCP (Model Context Protocol) server that lets an agent search and
//! extend a product catalog through two tools, `search-product` and
//! `create-product`.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **catalog**: product records and the storage capability (memory / SQLite)
//!   - **tools**: schemas, validation, query translation and result formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use product_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::from_config(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
