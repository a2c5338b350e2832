// ABOUTME: Configuration for the cheat.sh fetcher: base endpoint, client identity, timeout
// ABOUTME: Optional TOML config-file loading behind the `config-file` feature
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 dravr.ai

use std::num::ParseIntError;
use std::time::Duration;

/// Public cheat.sh endpoint
pub const DEFAULT_BASE_URL: &str = "https://cheat.sh/";

/// User agent sent upstream
///
/// cheat.sh renders HTML for browsers and plain text for command-line
/// clients, so the fetcher identifies itself as curl.
pub const DEFAULT_USER_AGENT: &str = "curl/8.4.0";

/// Configuration for a [`CheatShClient`](crate::fetcher::CheatShClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Base endpoint, always ending in `/`
    pub base_url: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Request timeout; `None` waits for the upstream indefinitely
    pub timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: None,
        }
    }
}

impl FetcherConfig {
    /// Point the fetcher at a different endpoint (a trailing `/` is added if missing)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(base_url.into());
        self
    }

    /// Override the `User-Agent` header
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    base_url
}

/// Parse a timeout value from a string (in seconds)
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as a `u64`.
pub fn parse_timeout(input: &str) -> Result<Duration, ParseIntError> {
    input.trim().parse::<u64>().map(Duration::from_secs)
}

#[cfg(feature = "config-file")]
pub use file::{default_config_path, load_config_file, FileConfig};

#[cfg(feature = "config-file")]
mod file {
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use serde::Deserialize;
    use tracing::debug;

    use super::FetcherConfig;
    use crate::types::FetchError;

    /// On-disk configuration, every field optional
    ///
    /// ```toml
    /// base_url = "https://cheat.sh/"
    /// user_agent = "curl/8.4.0"
    /// timeout_secs = 30
    /// ```
    #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct FileConfig {
        /// Base endpoint override
        pub base_url: Option<String>,
        /// `User-Agent` override
        pub user_agent: Option<String>,
        /// Request timeout in seconds
        pub timeout_secs: Option<u64>,
    }

    impl FileConfig {
        /// Layer the file values over `base`
        #[must_use]
        pub fn apply(self, base: FetcherConfig) -> FetcherConfig {
            let mut config = base;
            if let Some(url) = self.base_url {
                config = config.with_base_url(url);
            }
            if let Some(agent) = self.user_agent {
                config = config.with_user_agent(agent);
            }
            if let Some(secs) = self.timeout_secs {
                config = config.with_timeout(Duration::from_secs(secs));
            }
            config
        }
    }

    /// Default location: `<config dir>/cheatsh/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cheatsh").join("config.toml"))
    }

    /// Load the config file
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and a missing file yields `Ok(None)`.
    pub fn load_config_file(path: Option<&Path>) -> Result<Option<FileConfig>, FetchError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(None),
            },
        };

        if !required && !path.exists() {
            debug!(path = %path.display(), "No config file found, using defaults");
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| {
            FetchError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let parsed: FileConfig = toml::from_str(&raw).map_err(|e| {
            FetchError::config(format!("Invalid config file {}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), "Loaded config file");
        Ok(Some(parsed))
    }
}
