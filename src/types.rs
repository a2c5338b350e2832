// ABOUTME: Core types for cheat-sheet lookups: request shape, error type, and source trait
// ABOUTME: Provides CheatSheetSource so callers can swap the HTTP fetcher for a stub
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

//! # Core Types
//!
//! Self-contained type definitions shared by the upstream fetcher and any
//! protocol layer built on top of it.

use std::fmt;

use async_trait::async_trait;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for cheat-sheet fetch operations
#[derive(Debug, Clone)]
pub struct FetchError {
    /// Error category
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
}

/// Categories of errors produced while fetching cheat sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Internal error (bug, unexpected state)
    Internal,
    /// Network or protocol failure talking to the upstream service
    Transport,
    /// Upstream answered with a non-success HTTP status
    HttpStatus,
    /// Configuration error
    Config,
}

impl FetchError {
    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
        }
    }

    /// Create an error for a non-2xx upstream response
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::HttpStatus,
            message: format!("HTTP {status}: {}", message.into()),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Config,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

// ============================================================================
// Request Type
// ============================================================================

/// A single cheat-sheet lookup
///
/// `query` is the topic (`map`, `tar`, `:list`), `language` scopes it to a
/// language section, and `options` are raw cheat.sh flags such as `T` or `q`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatSheetRequest {
    /// Topic to look up
    pub query: String,
    /// Optional language section
    pub language: Option<String>,
    /// Option flags appended as the query string, in order
    pub options: Vec<String>,
}

impl CheatSheetRequest {
    /// Create a request for the given topic with no language or options
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: None,
            options: Vec::new(),
        }
    }

    /// Scope the lookup to a language section
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the option flags
    #[must_use]
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }
}

// ============================================================================
// Source Trait
// ============================================================================

/// Anything that can answer a cheat-sheet lookup with a text body
///
/// [`CheatShClient`](crate::fetcher::CheatShClient) is the HTTP-backed
/// implementation; tests substitute an in-memory one.
#[async_trait]
pub trait CheatSheetSource: Send + Sync {
    /// Fetch the raw text for the given lookup
    async fn fetch(&self, request: &CheatSheetRequest) -> Result<String, FetchError>;
}
