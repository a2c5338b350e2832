// ABOUTME: HTTP transport carrying one JSON-RPC message per POST to /mcp
// ABOUTME: Replies with a JSON body, or with a single SSE event when the client asks for a stream
//
// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use futures::stream;
use tracing::{debug, info, warn};

use crate::protocol::JsonRpcResponse;
use crate::server::McpServer;
use crate::transport::{McpTransport, TransportError};

/// Serves the dispatcher over HTTP on `host:port`
pub struct HttpTransport {
    addr: String,
}

impl HttpTransport {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            addr: format!("{host}:{port}"),
        }
    }
}

/// Router with the single `POST /mcp` route, shared by `serve` and tests
pub fn router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route("/mcp", post(mcp_post))
        .with_state(server)
}

#[async_trait]
impl McpTransport for HttpTransport {
    async fn serve(self, server: Arc<McpServer>) -> Result<(), TransportError> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| TransportError::new(format!("Failed to bind {}: {e}", self.addr)))?;

        info!(address = %self.addr, "HTTP transport listening");

        axum::serve(listener, router(server))
            .await
            .map_err(|e| TransportError::new(format!("HTTP server error: {e}")))
    }
}

/// One POST body is one line as far as the dispatcher is concerned
async fn mcp_post(
    State(server): State<Arc<McpServer>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    debug!(bytes = body.len(), "HTTP message received");

    match server.handle_line(body.trim()).await {
        None => StatusCode::NO_CONTENT.into_response(),
        Some(response) if accepts_event_stream(&headers) => sse_reply(&response),
        Some(response) => Json(response).into_response(),
    }
}

fn accepts_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|accept| accept.contains("text/event-stream"))
}

fn sse_reply(response: &JsonRpcResponse) -> Response {
    match Event::default().json_data(response) {
        Ok(event) => {
            Sse::new(stream::once(async move { Ok::<_, Infallible>(event) })).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Could not encode SSE event");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
