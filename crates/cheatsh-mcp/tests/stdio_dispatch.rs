// ABOUTME: Integration tests driving the MCP dispatcher through the line-oriented stdio loop
// ABOUTME: Covers handshake, discovery, tool invocation, ping, and every protocol error path
//
// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cheatsh::types::{CheatSheetRequest, CheatSheetSource, FetchError};
use serde_json::{json, Value};

use cheatsh_mcp::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
    TOOL_EXECUTION_ERROR,
};
use cheatsh_mcp::server::McpServer;
use cheatsh_mcp::tools::build_tool_registry;
use cheatsh_mcp::tools::cheatsheet::TOOL_NAME;
use cheatsh_mcp::transport::stdio::serve_lines;

/// Stub source that records every lookup and answers with a canned reply
struct RecordingSource {
    reply: Result<String, FetchError>,
    calls: AtomicUsize,
    last: Mutex<Option<CheatSheetRequest>>,
}

impl RecordingSource {
    fn new(reply: Result<String, FetchError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> Option<CheatSheetRequest> {
        self.last.lock().expect("lock").clone()
    }
}

#[async_trait]
impl CheatSheetSource for RecordingSource {
    async fn fetch(&self, request: &CheatSheetRequest) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().expect("lock") = Some(request.clone());
        self.reply.clone()
    }
}

/// Feed `lines` through the stdio loop and return every output line parsed as JSON
async fn exchange(source: Arc<RecordingSource>, lines: &[&str]) -> Vec<Value> {
    let server = McpServer::new(build_tool_registry(source));
    let mut input = lines.join("\n");
    input.push('\n');

    let mut output = Vec::new();
    serve_lines(&server, input.as_bytes(), &mut output)
        .await
        .expect("serve");

    String::from_utf8(output)
        .expect("utf8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each output line is JSON"))
        .collect()
}

fn call_tool_line(id: u64, arguments: &Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "callTool",
        "params": {"name": TOOL_NAME, "arguments": arguments}
    })
    .to_string()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[tokio::test]
async fn tools_list_returns_single_descriptor() {
    let out = exchange(
        RecordingSource::new(Ok(String::new())),
        &[r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#],
    )
    .await;

    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["id"], 1);
    let tools = out[0]["result"]["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], TOOL_NAME);
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["query"]));
}

#[tokio::test]
async fn call_tool_wraps_text_in_content_block() {
    let source = RecordingSource::new(Ok("map docs".to_owned()));
    let line = format!(
        r#"{{"jsonrpc":"2.0","id":2,"method":"callTool","params":{{"name":"{TOOL_NAME}","arguments":{{"query":"map","language":"python"}}}}}}"#
    );
    let out = exchange(Arc::clone(&source), &[line.as_str()]).await;

    assert_eq!(
        out,
        vec![json!({
            "jsonrpc": "2.0",
            "id": 2,
            "result": {"content": [{"type": "text", "text": "map docs"}]}
        })]
    );

    let request = source.last_request().expect("fetch attempted");
    assert_eq!(request.query, "map");
    assert_eq!(request.language.as_deref(), Some("python"));
    assert!(request.options.is_empty());
}

#[tokio::test]
async fn unknown_method_names_the_method() {
    let out = exchange(
        RecordingSource::new(Ok(String::new())),
        &[r#"{"jsonrpc":"2.0","id":3,"method":"frobnicate"}"#],
    )
    .await;

    assert_eq!(out[0]["id"], 3);
    assert_eq!(out[0]["error"]["code"], METHOD_NOT_FOUND);
    let message = out[0]["error"]["message"].as_str().expect("message");
    assert!(message.contains("frobnicate"), "message was: {message}");
}

#[tokio::test]
async fn full_session_keeps_request_order() {
    let source = RecordingSource::new(Ok("tar docs".to_owned()));
    let call = call_tool_line(3, &json!({"query": "tar", "options": ["T", "q"]}));
    let out = exchange(
        Arc::clone(&source),
        &[
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"it","version":"1.0"}}}"#,
            r#"{"jsonrpc":"2.0","method":"initialized"}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            call.as_str(),
            r#"{"jsonrpc":"2.0","id":4,"method":"ping"}"#,
        ],
    )
    .await;

    let ids: Vec<&Value> = out.iter().map(|r| &r["id"]).collect();
    assert_eq!(ids, [&json!(1), &json!(2), &json!(3), &json!(4)]);
    assert_eq!(out[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(source.last_request().expect("fetched").options, ["T", "q"]);
}

// ============================================================================
// Protocol error paths
// ============================================================================

#[tokio::test]
async fn each_malformed_line_gets_one_parse_error() {
    let out = exchange(
        RecordingSource::new(Ok(String::new())),
        &["{", "not json", r#"{"jsonrpc":"2.0","id":1,"method":"ping""#],
    )
    .await;

    assert_eq!(out.len(), 3);
    for response in &out {
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert_eq!(response["id"], Value::Null);
        assert!(response.get("result").is_none());
    }
}

#[tokio::test]
async fn envelope_without_method_is_invalid_request() {
    let out = exchange(
        RecordingSource::new(Ok(String::new())),
        &[
            r#"{"jsonrpc":"2.0","id":10}"#,
            r#"{"jsonrpc":"2.0","id":"s","params":{}}"#,
        ],
    )
    .await;

    assert_eq!(out.len(), 2);
    assert_eq!(out[0]["error"]["code"], INVALID_REQUEST);
    assert_eq!(out[0]["id"], 10);
    assert_eq!(out[1]["error"]["code"], INVALID_REQUEST);
    assert_eq!(out[1]["id"], "s");
}

#[tokio::test]
async fn initialized_produces_no_output_regardless_of_id() {
    let out = exchange(
        RecordingSource::new(Ok(String::new())),
        &[
            r#"{"jsonrpc":"2.0","method":"initialized"}"#,
            r#"{"jsonrpc":"2.0","id":5,"method":"initialized"}"#,
            r#"{"jsonrpc":"2.0","id":"x","method":"initialized","params":{}}"#,
        ],
    )
    .await;

    assert!(out.is_empty(), "unexpected output: {out:?}");
}

#[tokio::test]
async fn unknown_tool_is_method_not_found_naming_tool() {
    let source = RecordingSource::new(Ok(String::new()));
    let line = r#"{"jsonrpc":"2.0","id":6,"method":"callTool","params":{"name":"weather","arguments":{"query":"x"}}}"#;
    let out = exchange(Arc::clone(&source), &[line]).await;

    assert_eq!(out[0]["error"]["code"], METHOD_NOT_FOUND);
    assert!(out[0]["error"]["message"]
        .as_str()
        .expect("message")
        .contains("weather"));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn empty_or_missing_query_never_fetches() {
    let source = RecordingSource::new(Ok("unused".to_owned()));
    let empty = call_tool_line(7, &json!({"query": ""}));
    let missing = call_tool_line(8, &json!({"language": "rust"}));
    let wrong_type = call_tool_line(9, &json!({"query": 42}));
    let out = exchange(
        Arc::clone(&source),
        &[empty.as_str(), missing.as_str(), wrong_type.as_str()],
    )
    .await;

    assert_eq!(out.len(), 3);
    for response in &out {
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn call_tool_without_params_is_internal_error() {
    let out = exchange(
        RecordingSource::new(Ok(String::new())),
        &[r#"{"jsonrpc":"2.0","id":11,"method":"callTool"}"#],
    )
    .await;

    assert_eq!(out[0]["error"]["code"], INTERNAL_ERROR);
    assert_eq!(out[0]["id"], 11);
}

#[tokio::test]
async fn upstream_failure_is_reported_not_fatal() {
    let source = RecordingSource::new(Err(FetchError::transport("connection reset")));
    let call = call_tool_line(12, &json!({"query": "tar"}));
    let out = exchange(
        source,
        &[call.as_str(), r#"{"jsonrpc":"2.0","id":13,"method":"ping"}"#],
    )
    .await;

    assert_eq!(out.len(), 2);
    assert_eq!(out[0]["error"]["code"], TOOL_EXECUTION_ERROR);
    assert!(out[0]["error"]["message"]
        .as_str()
        .expect("message")
        .contains("connection reset"));
    assert_eq!(out[1]["result"]["status"], "ok");
}

// ============================================================================
// Ping
// ============================================================================

#[tokio::test]
async fn repeated_ping_differs_only_in_timestamp() {
    let ping = r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#;
    let mut out = exchange(RecordingSource::new(Ok(String::new())), &[ping, ping]).await;
    assert_eq!(out.len(), 2);

    for response in &mut out {
        let timestamp = response["result"]
            .as_object_mut()
            .expect("result object")
            .remove("timestamp")
            .expect("timestamp present");
        let timestamp = timestamp.as_str().expect("timestamp string");
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }
    assert_eq!(out[0], out[1]);
}
