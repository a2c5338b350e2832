// ABOUTME: Cheat-sheet lookup library wrapping the cheat.sh plain-text HTTP service
// ABOUTME: Re-exports the fetcher, its configuration, and the CheatSheetSource trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

//! # cheatsh: cheat.sh lookups
//!
//! Small library that fetches cheat sheets from [cheat.sh](https://cheat.sh/)
//! as plain text. Lookups go through the [`CheatSheetSource`](types::CheatSheetSource)
//! trait so protocol layers can be tested against a stub.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cheatsh::{CheatShClient, FetcherConfig};
//! use cheatsh::types::{CheatSheetRequest, CheatSheetSource};
//!
//! # async fn example() -> Result<(), cheatsh::types::FetchError> {
//! let client = CheatShClient::new(FetcherConfig::default())?;
//! let request = CheatSheetRequest::new("map").with_language("python");
//! let text = client.fetch(&request).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: Core types: `CheatSheetSource` trait, requests, errors
//! - [`config`]: Fetcher configuration and optional config-file loading
//! - [`fetcher`]: `reqwest`-backed cheat.sh client and URL construction

/// Core types: source trait, lookup request, and errors
pub mod types;

/// Fetcher configuration
pub mod config;
/// HTTP client for cheat.sh
pub mod fetcher;

pub use config::FetcherConfig;
pub use fetcher::{build_url, CheatShClient};
pub use types::{CheatSheetRequest, CheatSheetSource, FetchError};
