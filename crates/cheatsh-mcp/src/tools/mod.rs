// ABOUTME: Tool registry that maps MCP tool names to handler implementations
// ABOUTME: Provides the McpTool trait, ToolError, and ToolRegistry for discovery and dispatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

pub mod cheatsheet;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use cheatsh::types::CheatSheetSource;
use serde_json::Value;

use crate::protocol::{
    CallToolResult, ToolDefinition, INVALID_PARAMS, METHOD_NOT_FOUND, TOOL_EXECUTION_ERROR,
};

/// Failure of a `callTool` invocation, carried back as a JSON-RPC error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// No tool registered under the requested name
    NotFound(String),
    /// Arguments missing or malformed
    InvalidParams(String),
    /// The tool ran but its work failed
    Execution(String),
}

impl ToolError {
    /// JSON-RPC error code for this failure
    pub const fn code(&self) -> i32 {
        match self {
            Self::NotFound(_) => METHOD_NOT_FOUND,
            Self::InvalidParams(_) => INVALID_PARAMS,
            Self::Execution(_) => TOOL_EXECUTION_ERROR,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "Tool not found: {name}"),
            Self::InvalidParams(msg) => write!(f, "Invalid params: {msg}"),
            Self::Execution(msg) => write!(f, "Tool execution failed: {msg}"),
        }
    }
}

impl std::error::Error for ToolError {}

/// Trait implemented by each MCP tool exposed by this server
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Return the tool's MCP definition (name, description, input schema)
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given arguments
    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError>;
}

/// Registry mapping tool names to their handler implementations
///
/// Tools are registered at server startup and looked up by name
/// when `callTool` requests arrive from the MCP client.
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn McpTool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool handler, keyed by its definition name
    pub fn register(&mut self, tool: Box<dyn McpTool>) {
        let name = tool.definition().name;
        self.tools.insert(name, tool);
    }

    /// List all registered tool definitions for `tools/list` responses, sorted by name
    pub fn list_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Dispatch a `callTool` to the named tool handler
    pub async fn execute(&self, name: &str, arguments: Value) -> Result<CallToolResult, ToolError> {
        match self.tools.get(name) {
            Some(tool) => tool.execute(arguments).await,
            None => Err(ToolError::NotFound(name.to_owned())),
        }
    }
}

/// Build the default tool registry backed by the given cheat-sheet source
pub fn build_tool_registry(source: Arc<dyn CheatSheetSource>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(cheatsheet::GetCheatSheet::new(source)));
    registry
}
