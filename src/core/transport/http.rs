//! HTTP transport: JSON-RPC 2.0 over POST.
//!
//! Stateless. Every request is answered on its own, so `initialize` is
//! informational and tool calls work without it. Only the tool surface of
//! MCP is served: `initialize`, `ping`, `tools/list`, `tools/call` and
//! notifications.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::SERVER_INSTRUCTIONS;

/// Protocol revision reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

pub struct HttpTransport {
    config: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router for this transport.
    pub fn router(&self, server: McpServer) -> Router {
        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(server)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            app = app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        app
    }

    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr,
            if self.config.enable_cors { "enabled" } else { "disabled" }
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

async fn root_handler(State(server): State<McpServer>) -> impl IntoResponse {
    Json(json!({
        "name": server.name(),
        "version": server.version(),
        "transport": "HTTP",
        "protocol": "JSON-RPC 2.0",
        "tools": server.registry().tool_names(),
        "endpoints": {
            "health": "/health"
        }
    }))
}

async fn health_check(State(server): State<McpServer>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "catalog": server.storage_backend()
    }))
}

#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(server): State<McpServer>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", request.method.as_str());
    debug!("Received JSON-RPC request");
    Json(process_request(&server, request).await)
}

/// Answer one JSON-RPC request.
pub async fn process_request(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::error(request.id, INVALID_REQUEST, "Invalid Request");
    }

    match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            request.id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": server.name(),
                    "version": server.version()
                },
                "instructions": SERVER_INSTRUCTIONS
            }),
        ),
        "ping" => JsonRpcResponse::success(request.id, json!({})),
        "tools/list" => JsonRpcResponse::success(request.id, json!({ "tools": server.list_tools() })),
        "tools/call" => handle_tools_call(server, request).await,
        method if method.starts_with("notifications/") => {
            debug!("Notification: {}", method);
            JsonRpcResponse::success(request.id, Value::Null)
        }
        method => {
            warn!("Unknown method: {}", method);
            JsonRpcResponse::error(request.id, METHOD_NOT_FOUND, "Method not found")
        }
    }
}

async fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let Some(params) = request.params else {
        return JsonRpcResponse::error(request.id, INVALID_PARAMS, "Missing params");
    };

    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::error(request.id, INVALID_PARAMS, "Missing tool name");
    };

    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    match server.call_tool(name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::error(request.id, INVALID_PARAMS, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::catalog::MemoryCatalogStore;
    use std::sync::Arc;

    fn server() -> McpServer {
        McpServer::new(Config::default(), Arc::new(MemoryCatalogStore::new()))
    }

    fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize_advertises_tools_only() {
        let response = process_request(&server(), request("initialize", None)).await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["capabilities"], json!({ "tools": {} }));
        assert_eq!(result["serverInfo"]["name"], "product-server");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = process_request(&server(), request("tools/list", None)).await;
        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(tools.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_tools_call_create_and_count() {
        let server = server();
        let created = process_request(
            &server,
            request(
                "tools/call",
                Some(json!({
                    "name": "create-product",
                    "arguments": { "name": "Desk", "price": 120, "sku": "DESK-1", "category": "Furniture" }
                })),
            ),
        )
        .await;
        assert_eq!(created.result.unwrap()["isError"], false);

        let counted = process_request(
            &server,
            request(
                "tools/call",
                Some(json!({ "name": "search-product", "arguments": { "action": "count" } })),
            ),
        )
        .await;
        let result = counted.result.unwrap();
        assert_eq!(result["content"][0]["text"], "Total products found: 1");
    }

    #[tokio::test]
    async fn test_tools_call_errors() {
        let server = server();
        let missing = process_request(&server, request("tools/call", None)).await;
        assert_eq!(missing.error.unwrap().code, INVALID_PARAMS);

        let unknown = process_request(
            &server,
            request("tools/call", Some(json!({ "name": "drop-catalog" }))),
        )
        .await;
        let error = unknown.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert!(error.message.contains("drop-catalog"));
    }

    #[tokio::test]
    async fn test_unsupported_methods() {
        let server = server();
        let response = process_request(&server, request("resources/list", None)).await;
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);

        let mut bad = request("ping", None);
        bad.jsonrpc = "1.0".to_string();
        let response = process_request(&server, bad).await;
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);

        let pong = process_request(&server, request("ping", None)).await;
        assert_eq!(pong.result, Some(json!({})));
    }

    async fn send(router: Router, request: http::Request<axum::body::Body>) -> (http::StatusCode, Value) {
        use http_body_util::BodyExt;
        use tower::ServiceExt;

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_route_reports_backend() {
        let router = HttpTransport::new(HttpConfig::default()).router(server());
        let request = http::Request::builder()
            .uri("/health")
            .body(axum::body::Body::empty())
            .unwrap();

        let (status, body) = send(router, request).await;
        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["catalog"], "memory");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_rpc_route_on_custom_path() {
        let config = HttpConfig {
            rpc_path: "/rpc".to_string(),
            ..HttpConfig::default()
        };
        let router = HttpTransport::new(config).router(server());
        let request = http::Request::builder()
            .method(http::Method::POST)
            .uri("/rpc")
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(
                json!({ "jsonrpc": "2.0", "id": 7, "method": "tools/list" }).to_string(),
            ))
            .unwrap();

        let (status, body) = send(router, request).await;
        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(body["id"], 7);
        assert_eq!(body["result"]["tools"][0]["name"], "search-product");
    }
}
