//! MCP server implementation.
//!
//! Serves the graph analytics tools over stdio using JSON-RPC 2.0. Logging
//! must go to stderr in this mode; stdout carries only protocol frames.

use std::io::{BufRead, BufReader, Write};
use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::analytics::AnalyticsService;

use super::handlers::ToolHandler;
use super::protocol::*;
use super::tools::all_tools;

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "soccer-graph-analytics";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP server that handles JSON-RPC 2.0 requests over stdio.
pub struct McpServer {
    tool_handler: ToolHandler,
    initialized: bool,
}

impl McpServer {
    pub fn new(analytics: Arc<AnalyticsService>) -> Self {
        Self {
            tool_handler: ToolHandler::new(analytics),
            initialized: false,
        }
    }

    /// Run the server, reading from stdin and writing to stdout.
    pub async fn run(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let reader = BufReader::new(stdin.lock());
        let mut writer = stdout.lock();

        info!("MCP server starting on stdio");

        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    error!("Failed to read line: {}", e);
                    break;
                }
            };

            if line.is_empty() {
                continue;
            }

            debug!("Received: {}", line);

            if let Some(response) = self.handle_message(&line).await {
                let json = serde_json::to_string(&response)?;
                debug!("Sending: {}", json);
                writeln!(writer, "{}", json)?;
                writer.flush()?;
            }
        }

        info!("MCP server shutting down");
        Ok(())
    }

    /// Handle a single JSON-RPC message.
    async fn handle_message(&mut self, message: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        // Notifications have no id and expect no response.
        let id = match &request.id {
            Some(id) => id.clone(),
            None => {
                self.handle_notification(&request);
                return None;
            }
        };

        let result = self.handle_request(&request).await;

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => {
                info!("Client confirmed initialization");
            }
            "notifications/cancelled" => {
                warn!("Request cancelled by client");
            }
            _ => {
                debug!("Unknown notification: {}", request.method);
            }
        }
    }

    async fn handle_request(&mut self, request: &JsonRpcRequest) -> Result<Value, JsonRpcError> {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(&request.params),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(&request.params).await,
            _ => Err(JsonRpcError::method_not_found(&request.method)),
        }
    }

    fn handle_initialize(&mut self, params: &Option<Value>) -> Result<Value, JsonRpcError> {
        let params: Option<InitializeParams> = params
            .as_ref()
            .map(|p| serde_json::from_value(p.clone()))
            .transpose()
            .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;

        if let Some(params) = &params {
            info!(
                "Initializing MCP server (client protocol: {})",
                params.protocol_version
            );
            if let Some(client) = &params.client_info {
                info!(
                    "Client: {} v{}",
                    client.name,
                    client.version.as_deref().unwrap_or("unknown")
                );
            }
        }

        self.initialized = true;

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }

    fn handle_tools_list(&self) -> Result<Value, JsonRpcError> {
        if !self.initialized {
            return Err(JsonRpcError::invalid_request("Server not initialized"));
        }

        let result = ToolsListResult { tools: all_tools() };
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }

    async fn handle_tools_call(&self, params: &Option<Value>) -> Result<Value, JsonRpcError> {
        if !self.initialized {
            return Err(JsonRpcError::invalid_request("Server not initialized"));
        }

        let params = params
            .as_ref()
            .ok_or_else(|| JsonRpcError::invalid_params("params required"))?;
        let params: ToolCallParams = serde_json::from_value(params.clone())
            .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;

        info!("Tool call: {}", params.name);
        debug!("Arguments: {:?}", params.arguments);

        let tool_result = match self.tool_handler.handle(&params.name, params.arguments).await {
            Ok(rendered) => ToolCallResult::success(rendered),
            Err(e) => {
                error!("Tool error: {}", e);
                ToolCallResult::error(e.to_string())
            }
        };

        serde_json::to_value(tool_result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_server() -> McpServer {
        let tmp = tempfile::tempdir().unwrap();
        // The cache loads lazily; a server over a missing data dir is fine
        // for protocol-level tests.
        McpServer::new(Arc::new(AnalyticsService::new(tmp.path())))
    }

    #[tokio::test]
    async fn test_initialize_then_tools_list() {
        let mut server = test_server();

        let init = r#"{"jsonrpc":"2.0","method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"client","version":"1.0"}},"id":1}"#;
        let resp = server.handle_message(init).await.unwrap();
        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);

        let list = r#"{"jsonrpc":"2.0","method":"tools/list","id":2}"#;
        let resp = server.handle_message(list).await.unwrap();
        let tools = resp.result.unwrap();
        assert_eq!(tools["tools"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_tools_list_before_initialize_rejected() {
        let mut server = test_server();
        let list = r#"{"jsonrpc":"2.0","method":"tools/list","id":1}"#;
        let resp = server.handle_message(list).await.unwrap();
        assert_eq!(resp.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let mut server = test_server();
        let raw = r#"{"jsonrpc":"2.0","method":"bogus/method","id":1}"#;
        let resp = server.handle_message(raw).await.unwrap();
        assert_eq!(resp.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_parse_error_response() {
        let mut server = test_server();
        let resp = server.handle_message("{ not json").await.unwrap();
        assert_eq!(resp.error.unwrap().code, -32700);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let mut server = test_server();
        let raw = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(server.handle_message(raw).await.is_none());
    }

    #[tokio::test]
    async fn test_tool_call_with_unavailable_data_renders_error_content() {
        let mut server = test_server();
        let init = r#"{"jsonrpc":"2.0","method":"initialize","params":{"protocolVersion":"2024-11-05"},"id":1}"#;
        server.handle_message(init).await.unwrap();

        // Data dir is empty → DataUnavailable, rendered into tool content.
        let call = r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"graph_community_detection","arguments":{"graph_type":"player"}},"id":2}"#;
        let resp = server.handle_message(call).await.unwrap();
        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], false);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Failed to load graph data"), "got {text}");
    }
}
