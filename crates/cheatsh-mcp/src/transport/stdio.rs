// ABOUTME: Stdio transport reading newline-delimited JSON-RPC from stdin and writing to stdout
// ABOUTME: Handles one line at a time so responses leave in the order requests arrived
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error};

use crate::protocol::{JsonRpcResponse, PARSE_ERROR};
use crate::server::McpServer;
use crate::transport::{McpTransport, TransportError};

/// MCP transport over stdin/stdout using newline-delimited JSON-RPC
///
/// Each line on stdin is expected to be a complete JSON-RPC message.
/// Responses are written as single lines to stdout. Logs go to stderr
/// to avoid polluting the protocol channel.
pub struct StdioTransport;

#[async_trait]
impl McpTransport for StdioTransport {
    async fn serve(self, server: Arc<McpServer>) -> Result<(), TransportError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        debug!("Stdio transport ready, waiting for JSON-RPC messages on stdin");
        serve_lines(&server, stdin, stdout).await?;
        debug!("Stdin closed, shutting down stdio transport");
        Ok(())
    }
}

/// Drive the server from any line-oriented reader until EOF
///
/// Lines are handled strictly in sequence: a request's response (if any) is
/// written before the next line is read. Blank and non-UTF-8 lines are not
/// valid JSON and get a parse-error response like any other bad input.
pub async fn serve_lines<R, W>(
    server: &McpServer,
    mut reader: R,
    mut writer: W,
) -> Result<(), TransportError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| TransportError::new(format!("stdin read failed: {e}")))?;
        if read == 0 {
            return Ok(());
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => server.handle_line(line.trim_end_matches(['\r', '\n'])).await,
            Err(e) => {
                error!(error = %e, "Received non UTF-8 input line");
                Some(JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ))
            }
        };

        if let Some(response) = response {
            write_response(&mut writer, &response).await?;
        }
    }
}

/// Serialize and write a JSON-RPC response as a single line
async fn write_response<W>(
    writer: &mut W,
    response: &JsonRpcResponse,
) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin + Send,
{
    let json = serde_json::to_string(response)
        .map_err(|e| TransportError::new(format!("JSON serialization failed: {e}")))?;

    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| TransportError::new(format!("stdout write failed: {e}")))?;

    writer
        .write_all(b"\n")
        .await
        .map_err(|e| TransportError::new(format!("stdout newline write failed: {e}")))?;

    writer
        .flush()
        .await
        .map_err(|e| TransportError::new(format!("stdout flush failed: {e}")))?;

    Ok(())
}
