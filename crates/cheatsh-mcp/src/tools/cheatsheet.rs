// ABOUTME: MCP tool that looks up a cheat sheet for a topic via the configured source
// ABOUTME: Validates query/language/options arguments and wraps the text in a content block
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::sync::Arc;

use async_trait::async_trait;
use cheatsh::types::{CheatSheetRequest, CheatSheetSource};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::protocol::{CallToolResult, ToolDefinition};
use crate::tools::{McpTool, ToolError};

/// Name under which the lookup tool is registered
pub const TOOL_NAME: &str = "get_cheatsheet";

/// Fetches cheat-sheet text for a query, optionally scoped to a language
pub struct GetCheatSheet {
    source: Arc<dyn CheatSheetSource>,
}

impl GetCheatSheet {
    /// Create the tool on top of a cheat-sheet source
    pub fn new(source: Arc<dyn CheatSheetSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl McpTool for GetCheatSheet {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: TOOL_NAME.to_owned(),
            description: "Look up a cheat sheet on cheat.sh for a command, topic, or \
                          language-specific question"
                .to_owned(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "language": {
                        "type": "string",
                        "description": "Programming language section (e.g. python, rust, go)"
                    },
                    "query": {
                        "type": "string",
                        "description": "Topic or command to look up (e.g. tar, map, reverse+a+list)"
                    },
                    "options": {
                        "type": "array",
                        "description": "cheat.sh option flags (e.g. T for no colors, q for quiet)",
                        "items": {
                            "type": "string"
                        }
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult, ToolError> {
        let request = parse_arguments(&arguments)?;

        info!(
            query = %request.query,
            language = ?request.language,
            options = ?request.options,
            "Looking up cheat sheet"
        );

        match self.source.fetch(&request).await {
            Ok(text) => Ok(CallToolResult::text(text)),
            Err(e) => {
                warn!(query = %request.query, error = %e, "Cheat sheet lookup failed");
                Err(ToolError::Execution(e.message))
            }
        }
    }
}

/// Parse the tool arguments into a lookup request
fn parse_arguments(arguments: &Value) -> Result<CheatSheetRequest, ToolError> {
    let query = arguments
        .get("query")
        .and_then(Value::as_str)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ToolError::InvalidParams("'query' must be a non-empty string".to_owned()))?;

    let mut request = CheatSheetRequest::new(query);

    match arguments.get("language") {
        None | Some(Value::Null) => {}
        Some(Value::String(language)) if !language.is_empty() => {
            request = request.with_language(language.as_str());
        }
        Some(Value::String(_)) => {}
        Some(other) => {
            return Err(ToolError::InvalidParams(format!(
                "'language' must be a string, got: {other}"
            )));
        }
    }

    match arguments.get("options") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            let mut options = Vec::with_capacity(items.len());
            for item in items {
                let Some(flag) = item.as_str() else {
                    return Err(ToolError::InvalidParams(format!(
                        "'options' entries must be strings, got: {item}"
                    )));
                };
                options.push(flag.to_owned());
            }
            request = request.with_options(options);
        }
        Some(other) => {
            return Err(ToolError::InvalidParams(format!(
                "'options' must be an array of strings, got: {other}"
            )));
        }
    }

    Ok(request)
}
