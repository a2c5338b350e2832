// ABOUTME: MCP server core that routes JSON-RPC requests to protocol handlers and tools
// ABOUTME: Implements initialize, initialized, tools/list, ping, and callTool MCP methods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse,
    PingResult, ServerCapabilities, ServerInfo, ToolsCapability, ToolsListResult, INTERNAL_ERROR,
    INVALID_PARAMS, METHOD_NOT_FOUND, PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION,
};
use crate::tools::ToolRegistry;

/// MCP server that dispatches JSON-RPC requests to the appropriate handler
///
/// Holds no per-request state. Transport layers feed raw lines into
/// `handle_line` (or validated requests into `handle_request`) and write
/// back whatever response comes out.
pub struct McpServer {
    tools: ToolRegistry,
}

impl McpServer {
    /// Create a server around the given tool registry
    pub const fn new(tools: ToolRegistry) -> Self {
        Self { tools }
    }

    /// Parse, validate, and dispatch one raw message
    ///
    /// Returns `None` when the message is a notification that must not be
    /// answered.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match JsonRpcRequest::parse(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!(error = %e, "Rejected inbound message");
                Some(e.into_response())
            }
        }
    }

    /// Route a validated JSON-RPC request to the appropriate MCP handler
    ///
    /// Returns `None` for `initialized` and other `notifications/*` methods.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let JsonRpcRequest {
            id, method, params, ..
        } = request;

        let response = match method.as_str() {
            "initialize" => Self::handle_initialize(id, params),
            "initialized" | "notifications/initialized" => {
                debug!(method = %method, "Client initialized, no response");
                return None;
            }
            m if m.starts_with("notifications/") => {
                debug!(method = %m, "Received notification, no response");
                return None;
            }
            "tools/list" => self.handle_tools_list(id),
            "ping" => Self::handle_ping(id),
            "callTool" | "tools/call" => self.handle_call_tool(id, params).await,
            other => {
                debug!(method = other, "Unknown MCP method");
                JsonRpcResponse::error(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {other}"),
                )
            }
        };

        Some(response)
    }

    /// Handle `initialize`: log client info and return server capabilities
    fn handle_initialize(id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        if let Some(params) = params {
            if let Ok(init) = serde_json::from_value::<InitializeParams>(params) {
                debug!(
                    client = %init.client_info.name,
                    version = ?init.client_info.version,
                    protocol = %init.protocol_version,
                    capabilities = %init.capabilities,
                    "MCP client connected"
                );
            }
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_owned(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {}),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_owned(),
                version: SERVER_VERSION.to_owned(),
            },
        };

        respond_with(id, &result)
    }

    /// Handle `tools/list`: return all registered tool definitions
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: self.tools.list_definitions(),
        };

        respond_with(id, &result)
    }

    /// Handle `ping`: report liveness with the current time
    fn handle_ping(id: Option<Value>) -> JsonRpcResponse {
        let result = PingResult {
            status: "ok",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        respond_with(id, &result)
    }

    /// Handle `callTool`: dispatch to the named tool handler
    async fn handle_call_tool(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(
                id,
                INTERNAL_ERROR,
                "Missing parameters for callTool".to_owned(),
            );
        };

        let call_params: CallToolParams = match serde_json::from_value(params) {
            Ok(cp) => cp,
            Err(e) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {e}"));
            }
        };

        let arguments = call_params
            .arguments
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        match self.tools.execute(&call_params.name, arguments).await {
            Ok(result) => respond_with(id, &result),
            Err(e) => {
                debug!(tool = %call_params.name, error = %e, "Tool call failed");
                JsonRpcResponse::error(id, e.code(), e.to_string())
            }
        }
    }
}

/// Serialize a result payload into a success response
fn respond_with<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(val) => JsonRpcResponse::success(id, val),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Serialization error: {e}")),
    }
}
