// ABOUTME: HTTP fetcher that retrieves plain-text cheat sheets from the cheat.sh service
// ABOUTME: Builds lookup URLs and performs a single GET per request with a curl user agent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::FetcherConfig;
use crate::types::{CheatSheetRequest, CheatSheetSource, FetchError};

/// Longest slice of an error body carried into a `FetchError`
const ERROR_BODY_LIMIT: usize = 200;

/// Build the lookup URL for a request
///
/// Produces `{base}{language}/{query}?{opt1}&{opt2}`. Segments are inserted
/// verbatim; no percent-encoding is applied, so callers must pass URL-safe
/// tokens.
pub fn build_url(base_url: &str, request: &CheatSheetRequest) -> String {
    let mut url = String::from(base_url);
    if let Some(language) = &request.language {
        url.push_str(language);
        url.push('/');
    }
    url.push_str(&request.query);
    if !request.options.is_empty() {
        url.push('?');
        url.push_str(&request.options.join("&"));
    }
    url
}

/// cheat.sh client backed by `reqwest`
pub struct CheatShClient {
    config: FetcherConfig,
    http: reqwest::Client,
}

impl CheatShClient {
    /// Create a client from the given configuration
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl CheatSheetSource for CheatShClient {
    async fn fetch(&self, request: &CheatSheetRequest) -> Result<String, FetchError> {
        let url = build_url(&self.config.base_url, request);
        debug!(url = %url, "Fetching cheat sheet");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::transport(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(FetchError::http_status(
                status.as_u16(),
                truncate_body(body.trim()),
            ));
        }

        debug!(url = %url, bytes = body.len(), "Cheat sheet fetched");
        Ok(body)
    }
}

fn truncate_body(body: &str) -> &str {
    body.char_indices()
        .nth(ERROR_BODY_LIMIT)
        .map_or(body, |(idx, _)| &body[..idx])
}
