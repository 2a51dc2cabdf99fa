//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The mapping from tool name to {schema, handler}
//! - Tool metadata for listing (`tools/list`)
//! - `dispatch()`, which validates arguments and runs the handler
//!
//! Dispatch is synchronous end-to-end and keeps no state between calls.

use rmcp::model::{CallToolResult, JsonObject, Tool};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::definitions::{CreateProductTool, SearchProductTool};
use super::error::ToolError;
use super::format::{error_result, validation_failure_text};
use super::schema::ToolSchema;
use super::validator::{ValidatedArgs, validate};
use crate::domains::catalog::CatalogStore;

/// Signature of a tool handler: validated arguments in, text result out.
pub type ToolHandlerFn = fn(ValidatedArgs, &dyn CatalogStore) -> CallToolResult;

/// A tool as known to the registry.
pub struct RegisteredTool {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub schema: ToolSchema,
    handler: ToolHandlerFn,
}

impl RegisteredTool {
    pub fn new(
        name: &'static str,
        title: &'static str,
        description: &'static str,
        schema: ToolSchema,
        handler: ToolHandlerFn,
    ) -> Self {
        Self {
            name,
            title,
            description,
            schema,
            handler,
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: Arc::new(self.schema.to_json_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(self.title.to_string()),
        }
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - owns the catalog store and every registered tool.
pub struct ToolRegistry {
    store: Arc<dyn CatalogStore>,
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// Create a registry with the catalog tools registered.
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        let mut registry = Self::empty(store);
        registry.register(RegisteredTool::new(
            SearchProductTool::NAME,
            SearchProductTool::TITLE,
            SearchProductTool::DESCRIPTION,
            SearchProductTool::schema(),
            SearchProductTool::handle,
        ));
        registry.register(RegisteredTool::new(
            CreateProductTool::NAME,
            CreateProductTool::TITLE,
            CreateProductTool::DESCRIPTION,
            CreateProductTool::schema(),
            CreateProductTool::handle,
        ));
        registry
    }

    /// Create a registry with no tools.
    pub fn empty(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            tools: Vec::new(),
        }
    }

    /// Register a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: RegisteredTool) {
        info!("Registering tool: {}", tool.name);
        self.tools.retain(|existing| existing.name != tool.name);
        self.tools.push(tool);
    }

    /// The catalog store handed to every handler.
    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    /// Registered tools, in registration order.
    pub fn tools(&self) -> &[RegisteredTool] {
        &self.tools
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(RegisteredTool::to_tool).collect()
    }

    /// Validate the arguments and run the named tool.
    ///
    /// Only an unknown tool name is an `Err`. Validation and storage failures
    /// come back as error results carrying plain text, and a validation
    /// failure never reaches the store.
    #[instrument(skip(self, arguments))]
    pub fn dispatch(&self, name: &str, arguments: &JsonObject) -> Result<CallToolResult, ToolError> {
        let Some(tool) = self.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        match validate(&tool.schema, arguments) {
            Ok(args) => Ok((tool.handler)(args, self.store.as_ref())),
            Err(failure) => {
                warn!("Rejected {} call: {}", name, failure);
                Ok(error_result(validation_failure_text(name, &failure)))
            }
        }
    }

    /// Dispatch a tool call arriving as raw JSON (HTTP transport).
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "expected an object, got {}",
                    other
                )));
            }
        };

        let result = self.dispatch(name, &arguments)?;
        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }
}
