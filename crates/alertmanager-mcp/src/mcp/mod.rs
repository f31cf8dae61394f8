//! Model Context Protocol surface
//!
//! Speaks JSON-RPC 2.0 and dispatches `tools/call` into the [`ToolRegistry`].
//! Transports (stdio, HTTP) only move messages in and out of [`McpServer`].

pub mod error;
pub mod protocol;
pub mod stdio;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::tools::{ToolError, ToolRegistry};

pub use error::McpError;
pub use protocol::{ErrorResponse, Request, Response};

pub const SERVER_NAME: &str = "Alertmanager MCP";

/// Newest first; the first entry is offered when the client asks for an unknown version.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

pub struct McpServer {
    tools: ToolRegistry,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

impl McpServer {
    pub fn new(tools: ToolRegistry) -> Self {
        Self { tools }
    }

    /// Handles one raw message. Returns `None` when no reply is due.
    pub async fn handle_message(&self, raw: &str) -> Option<Response> {
        let request: Request = match serde_json::from_str(raw) {
            Ok(req) => req,
            Err(e) => {
                let err = McpError::from(e);
                return Some(Response::error(Value::Null, err.code(), err.to_string()));
            }
        };
        self.handle(request).await
    }

    pub async fn handle(&self, request: Request) -> Option<Response> {
        debug!(id = ?request.id, method = %request.method, "handling request");

        if let Some(version) = request.jsonrpc.as_deref() {
            if version != protocol::JSONRPC_VERSION {
                let err = McpError::InvalidRequest(format!("unsupported jsonrpc version {:?}", version));
                return request
                    .id
                    .map(|id| Response::error(id, err.code(), err.to_string()));
            }
        }

        let result = self.dispatch(&request.method, request.params).await;

        let id = match request.id {
            Some(id) => id,
            None => {
                if let Err(e) = result {
                    warn!(method = %request.method, "notification failed: {}", e);
                }
                return None;
            }
        };

        Some(match result {
            Ok(value) => Response::success(id, value),
            Err(e) => Response::error(id, e.code(), e.to_string()),
        })
    }

    async fn dispatch(&self, method: &str, params: Value) -> Result<Value, McpError> {
        match method {
            "initialize" => Ok(self.initialize(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(params).await,
            m if m.starts_with("notifications/") => Ok(Value::Null),
            _ => Err(McpError::MethodNotFound(method.to_string())),
        }
    }

    fn initialize(&self, params: &Value) -> Value {
        let requested = params.get("protocolVersion").and_then(Value::as_str);
        let version = requested
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
            .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]);

        json!({
            "protocolVersion": version,
            "capabilities": {"tools": {"listChanged": false}},
            "serverInfo": {"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")},
        })
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "inputSchema": tool.input_schema(),
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, params: Value) -> Result<Value, McpError> {
        let params: CallToolParams =
            serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        match self.tools.call(&params.name, params.arguments).await {
            Ok(value) => Ok(json!({
                "content": [{"type": "text", "text": value.to_string()}],
                "structuredContent": value,
                "isError": false,
            })),
            Err(ToolError::Failed(e)) => Ok(json!({
                "content": [{"type": "text", "text": e.to_string()}],
                "structuredContent": {"error": e.kind(), "message": e.to_string()},
                "isError": true,
            })),
            Err(e @ (ToolError::UnknownTool(_) | ToolError::InvalidArguments(_))) => {
                Err(McpError::InvalidParams(e.to_string()))
            }
            Err(ToolError::Internal(msg)) => Err(McpError::Internal(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockAlertmanagerApi;
    use crate::models::Alert;
    use std::sync::Arc;

    fn server(api: MockAlertmanagerApi) -> McpServer {
        McpServer::new(ToolRegistry::alertmanager(Arc::new(api), "alertmanager-mcp"))
    }

    async fn roundtrip(server: &McpServer, message: Value) -> Response {
        server
            .handle_message(&message.to_string())
            .await
            .expect("a response")
    }

    #[tokio::test]
    async fn initialize_negotiates_protocol_version() {
        let server = server(MockAlertmanagerApi::new());

        let response = roundtrip(
            &server,
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize",
                   "params": {"protocolVersion": "2024-11-05", "capabilities": {}}}),
        )
        .await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "Alertmanager MCP");
        assert!(result["capabilities"]["tools"].is_object());

        let response = roundtrip(
            &server,
            json!({"jsonrpc": "2.0", "id": "init", "method": "initialize",
                   "params": {"protocolVersion": "1999-01-01"}}),
        )
        .await;
        assert_eq!(response.id, json!("init"));
        assert_eq!(response.result.unwrap()["protocolVersion"], SUPPORTED_PROTOCOL_VERSIONS[0]);
    }

    #[tokio::test]
    async fn notifications_get_no_reply() {
        let server = server(MockAlertmanagerApi::new());
        let reply = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn lists_tools_with_schemas() {
        let server = server(MockAlertmanagerApi::new());
        let response = roundtrip(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;

        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 4);
        assert_eq!(tools[0]["name"], "get_alerts");
        assert_eq!(tools[0]["description"], "Get alerts from Alertmanager (summary view)");
        assert_eq!(tools[2]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn tool_failures_are_flagged_with_their_kind() {
        let mut api = MockAlertmanagerApi::new();
        api.expect_get_alerts().returning(|_, _| Ok(Vec::<Alert>::new()));

        let response = roundtrip(
            &server(api),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "get_alert_details", "arguments": {"fingerprint": "nope"}}}),
        )
        .await;
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["structuredContent"]["error"], "not_found");
        assert_eq!(
            result["content"][0]["text"],
            "Alert with fingerprint 'nope' not found. No alerts available."
        );
    }

    #[tokio::test]
    async fn successful_calls_carry_structured_content() {
        let mut api = MockAlertmanagerApi::new();
        api.expect_get_alerts().returning(|_, _| Ok(vec![Alert::default()]));

        let response = roundtrip(
            &server(api),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "get_alerts"}}),
        )
        .await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"]["count"], 1);
        let text: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(text, result["structuredContent"]);
    }

    #[tokio::test]
    async fn protocol_errors_use_json_rpc_codes() {
        let server = server(MockAlertmanagerApi::new());

        let response = server.handle_message("{not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, protocol::PARSE_ERROR);

        let response = roundtrip(&server, json!({"jsonrpc": "2.0", "id": 5, "method": "resources/list"})).await;
        assert_eq!(response.error.unwrap().code, protocol::METHOD_NOT_FOUND);

        let response = roundtrip(
            &server,
            json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {"name": "nope"}}),
        )
        .await;
        assert_eq!(response.error.unwrap().code, protocol::INVALID_PARAMS);

        let response = roundtrip(
            &server,
            json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call",
                   "params": {"name": "silence_alert", "arguments": {"fingerprint": "abc"}}}),
        )
        .await;
        assert_eq!(response.error.unwrap().code, protocol::INVALID_PARAMS);
    }
}
