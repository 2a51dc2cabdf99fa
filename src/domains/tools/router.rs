//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every registered tool becomes one route. A route hands the call to
//! `ToolRegistry::dispatch` on the blocking thread pool, since storage
//! calls are synchronous.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};
use std::sync::Arc;

use super::registry::{RegisteredTool, ToolRegistry};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .tools()
        .iter()
        .fold(ToolRouter::new(), |router, tool| {
            router.with_route(create_route(registry.clone(), tool))
        })
}

/// Create a ToolRoute for STDIO/TCP transport.
fn create_route<S>(registry: Arc<ToolRegistry>, tool: &RegisteredTool) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = tool.name;
    ToolRoute::new_dyn(tool.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let registry = registry.clone();
        async move {
            let dispatched = tokio::task::spawn_blocking(move || registry.dispatch(name, &args))
                .await
                .map_err(|e| McpError::internal_error(format!("Tool task failed: {}", e), None))?;

            dispatched.map_err(|e| McpError::invalid_params(e.to_string(), None))
        }
        .boxed()
    })
}
