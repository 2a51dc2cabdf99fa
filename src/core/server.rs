//! MCP Server implementation and lifecycle management.
//!
//! The server owns the tool registry (and through it the catalog store) and
//! exposes it over MCP. Tools are declared in `domains/tools/definitions/`
//! and registered in `ToolRegistry::new()`; the rmcp router is built from
//! the registry, so **adding a tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use super::error::Result as CoreResult;
use crate::domains::catalog::{CatalogStore, open_store};
use crate::domains::tools::{ToolRegistry, build_tool_router};

/// Instructions advertised to MCP clients.
pub const SERVER_INSTRUCTIONS: &str = "Product catalog server. Use `search-product` to list \
     (action \"enumerate\") or count (action \"count\") products, and `create-product` to add \
     one. Arguments are validated before any storage access; a rejected call lists every \
     problem so it can be fixed in a single retry.";

/// The main MCP server handler.
///
/// Cloning is cheap: the registry and configuration are shared.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool registry used for dispatch and listing.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new server over an already opened catalog store.
    pub fn new(config: Config, store: Arc<dyn CatalogStore>) -> Self {
        let registry = Arc::new(ToolRegistry::new(store));

        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config: Arc::new(config),
            registry,
        }
    }

    /// Create a server, opening the catalog store named by the configuration.
    pub fn from_config(config: Config) -> CoreResult<Self> {
        let store = open_store(&config.catalog)?;
        Ok(Self::new(config, store))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Name of the catalog backend in use.
    pub fn storage_backend(&self) -> &'static str {
        self.registry.store().backend_name()
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        let registry = self.registry.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || registry.call_tool(&name, arguments))
            .await
            .map_err(|e| format!("Tool task failed: {}", e))?
            .map_err(|e| e.to_string())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
