// ABOUTME: CLI entry point for the cheatsh MCP server binary
// ABOUTME: Parses arguments, loads fetcher config, selects transport (stdio or HTTP), and serves
//
// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cheatsh::config::{load_config_file, parse_timeout};
use cheatsh::types::FetchError;
use cheatsh::{CheatShClient, FetcherConfig};
use clap::Parser;

use cheatsh_mcp::server::McpServer;
use cheatsh_mcp::tools::build_tool_registry;
use cheatsh_mcp::transport::{self, McpTransport};

/// cheatsh-mcp: MCP server exposing cheat.sh lookups via Model Context Protocol
#[derive(Parser)]
#[command(name = "cheatsh-mcp", version, about)]
struct Cli {
    /// Transport mode: "stdio" for stdin/stdout or "http" for HTTP+SSE
    #[arg(long, default_value = "stdio")]
    transport: String,

    /// HTTP listen port (only used with --transport http)
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// HTTP listen host (only used with --transport http)
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Upstream cheat.sh endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Upstream request timeout in seconds (no timeout when unset)
    #[arg(long = "timeout-secs", value_name = "SECS", value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// Path to a TOML config file (defaults to <config dir>/cheatsh/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Resolve fetcher config: defaults, then config file, then CLI flags
    fn fetcher_config(&self) -> Result<FetcherConfig, FetchError> {
        let mut config = load_config_file(self.config.as_deref())?
            .map_or_else(FetcherConfig::default, |file| {
                file.apply(FetcherConfig::default())
            });

        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.as_str());
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr to keep stdout clean for stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = cli.fetcher_config()?;
    tracing::info!(
        base_url = %config.base_url,
        timeout = ?config.timeout,
        "Configured cheat.sh upstream"
    );

    let client = CheatShClient::new(config)?;
    let registry = build_tool_registry(Arc::new(client));
    let server = Arc::new(McpServer::new(registry));

    tracing::info!(transport = %cli.transport, "Starting cheatsh MCP server");

    let result = match cli.transport.as_str() {
        "stdio" => transport::stdio::StdioTransport.serve(server).await,
        "http" => {
            transport::http::HttpTransport::new(&cli.host, cli.port)
                .serve(server)
                .await
        }
        other => {
            return Err(FetchError::config(format!(
                "Unknown transport: {other}. Valid: stdio, http"
            ))
            .into());
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Transport stopped with error");
    }
    result?;

    Ok(())
}
