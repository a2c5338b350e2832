// ABOUTME: Transport abstraction for MCP server communication channels
// ABOUTME: Defines the McpTransport trait and TransportError shared by stdio and HTTP backends
//
// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 dravr.ai

pub mod http;
pub mod stdio;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::server::McpServer;

/// Failure that stops a transport from serving
#[derive(Debug)]
pub struct TransportError {
    /// Human-readable error message
    pub message: String,
}

impl TransportError {
    /// Create a transport error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transport: {}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// Transport layer for MCP JSON-RPC message exchange
///
/// Implementations handle the mechanics of reading requests and writing
/// responses over a specific channel (stdio, HTTP, etc.).
#[async_trait]
pub trait McpTransport: Send {
    /// Start serving MCP requests, blocking until the transport shuts down
    async fn serve(self, server: Arc<McpServer>) -> Result<(), TransportError>;
}
