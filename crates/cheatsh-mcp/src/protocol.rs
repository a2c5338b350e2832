// ABOUTME: MCP JSON-RPC protocol types for request/response handling
// ABOUTME: Defines wire format, envelope validation, and error codes for the dispatcher
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC protocol version marker
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol version reported by this server
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name reported during MCP handshake
pub const SERVER_NAME: &str = "cheatsh-mcp";

/// Server version reported during MCP handshake
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// JSON-RPC Error Codes
// ============================================================================

/// JSON-RPC parse error: invalid JSON received
pub const PARSE_ERROR: i32 = -32_700;

/// JSON-RPC invalid request (e.g. wrong protocol version, missing method)
pub const INVALID_REQUEST: i32 = -32_600;

/// JSON-RPC method not found (also used for unknown tool names)
pub const METHOD_NOT_FOUND: i32 = -32_601;

/// JSON-RPC invalid parameters
pub const INVALID_PARAMS: i32 = -32_602;

/// JSON-RPC internal error
pub const INTERNAL_ERROR: i32 = -32_603;

/// Server-defined error: a tool ran but its upstream call failed
pub const TOOL_EXECUTION_ERROR: i32 = -32_000;

// ============================================================================
// JSON-RPC Messages
// ============================================================================

/// Validated JSON-RPC request from an MCP client
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcRequest {
    /// Protocol version marker, always "2.0" once validated
    pub jsonrpc: String,
    /// Request identifier (None for notifications)
    pub id: Option<Value>,
    /// Method name
    pub method: String,
    /// Method parameters (object or array)
    pub params: Option<Value>,
}

/// Why an inbound message could not become a [`JsonRpcRequest`]
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeError {
    /// The text was not valid JSON
    Parse(String),
    /// Valid JSON, but not a well-formed request envelope
    Invalid {
        /// Request id, when one could be extracted
        id: Option<Value>,
        /// What was wrong with the envelope
        reason: String,
    },
}

impl EnvelopeError {
    fn invalid(id: Option<Value>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            id,
            reason: reason.into(),
        }
    }

    /// Convert into the error response sent back to the client
    pub fn into_response(self) -> JsonRpcResponse {
        match self {
            Self::Parse(detail) => {
                JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {detail}"))
            }
            Self::Invalid { id, reason } => {
                JsonRpcResponse::error(id, INVALID_REQUEST, format!("Invalid request: {reason}"))
            }
        }
    }
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(detail) => write!(f, "parse error: {detail}"),
            Self::Invalid { reason, .. } => write!(f, "invalid request: {reason}"),
        }
    }
}

impl std::error::Error for EnvelopeError {}

impl JsonRpcRequest {
    /// Parse one line of text into a validated request
    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| EnvelopeError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON value as a request envelope
    ///
    /// A `null` id is treated the same as an absent one.
    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        let Value::Object(mut map) = value else {
            return Err(EnvelopeError::invalid(None, "message must be a JSON object"));
        };

        let id = match map.remove("id") {
            None | Some(Value::Null) => None,
            Some(id @ (Value::String(_) | Value::Number(_))) => Some(id),
            Some(other) => {
                return Err(EnvelopeError::invalid(
                    None,
                    format!("id must be a string or number, got {other}"),
                ));
            }
        };

        match map.remove("jsonrpc") {
            Some(Value::String(v)) if v == JSONRPC_VERSION => {}
            Some(other) => {
                return Err(EnvelopeError::invalid(
                    id,
                    format!("unsupported JSON-RPC version: {other}"),
                ));
            }
            None => return Err(EnvelopeError::invalid(id, "missing jsonrpc version")),
        }

        let method = match map.remove("method") {
            Some(Value::String(method)) => method,
            Some(_) => return Err(EnvelopeError::invalid(id, "method must be a string")),
            None => return Err(EnvelopeError::invalid(id, "missing method")),
        };

        let params = match map.remove("params") {
            None | Some(Value::Null) => None,
            Some(p @ (Value::Object(_) | Value::Array(_))) => Some(p),
            Some(_) => {
                return Err(EnvelopeError::invalid(
                    id,
                    "params must be an object or array",
                ));
            }
        };

        Ok(Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            id,
            method,
            params,
        })
    }
}

/// Outgoing JSON-RPC response to MCP client
///
/// `id` is always serialized; `null` stands in when the request id is
/// absent or could not be read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcResponse {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Matching request identifier, or `null`
    pub id: Value,
    /// Success payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    /// Numeric error code
    pub code: i32,
    /// Human-readable error message
    pub message: String,
    /// Additional error data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Build a success response with the given result
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// Build an error response with the given code and message
    pub fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
        }
    }

    /// Error code, if this is an error response
    pub fn error_code(&self) -> Option<i32> {
        self.error.as_ref().map(|e| e.code)
    }
}

// ============================================================================
// MCP Initialize
// ============================================================================

/// Parameters for the `initialize` request (used when deserializing client handshake)
#[derive(Debug, Deserialize)]
pub struct InitializeParams {
    /// Protocol version requested by the client
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Client capabilities
    #[serde(default)]
    pub capabilities: Value,
    /// Client identification
    #[serde(rename = "clientInfo")]
    pub client_info: ClientInfo,
}

/// Client identification sent during initialization (used within `InitializeParams`)
#[derive(Debug, Deserialize)]
pub struct ClientInfo {
    /// Client name
    pub name: String,
    /// Client version
    #[serde(default)]
    pub version: Option<String>,
}

/// Result of a successful `initialize` response
#[derive(Debug, Serialize)]
pub struct InitializeResult {
    /// Protocol version the server supports
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities
    pub capabilities: ServerCapabilities,
    /// Server identification
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

/// Server identification
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// Server capability declarations
#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    /// Tool support (presence signals tools are available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Marker type indicating the server supports MCP tools
#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

/// Result of a `ping` liveness probe
#[derive(Debug, Serialize)]
pub struct PingResult {
    /// Always "ok"
    pub status: &'static str,
    /// RFC 3339 time the ping was handled
    pub timestamp: String,
}

// ============================================================================
// MCP Tools
// ============================================================================

/// Tool definition exposed via `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Unique tool name
    pub name: String,
    /// Human-readable tool description
    pub description: String,
    /// JSON Schema describing the tool's input
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Result of a `tools/list` call
#[derive(Debug, Serialize)]
pub struct ToolsListResult {
    /// Available tool definitions
    pub tools: Vec<ToolDefinition>,
}

/// Parameters for a `callTool` request
#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    /// Name of the tool to invoke
    pub name: String,
    /// Tool arguments
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Result of a `callTool` invocation
#[derive(Debug, Serialize)]
pub struct CallToolResult {
    /// Response content parts
    pub content: Vec<ContentPart>,
}

/// A content part within a tool result
#[derive(Debug, Serialize)]
pub struct ContentPart {
    /// Content type (always "text" for now)
    #[serde(rename = "type")]
    pub content_type: String,
    /// Text content
    pub text: String,
}

impl CallToolResult {
    /// Build a result holding a single text block
    pub fn text(content: String) -> Self {
        Self {
            content: vec![ContentPart {
                content_type: "text".to_owned(),
                text: content,
            }],
        }
    }
}
