//! Configuration module for the tweetfeed client.
//!
//! This module contains the client configuration and environment variable
//! handling for talking to the Tweet API.

use std::env;
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::{FeedError, FeedResult};

/// Default base URL of the Tweet API.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the Tweet API client and feed controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Tweet API, without trailing slash
    pub api_url: String,
    /// Timeout applied to every request
    pub timeout: Duration,
    /// Append a successfully created reply to the local feed instead of
    /// waiting for the next fetch
    pub optimistic_replies: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            optimistic_replies: false,
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at `api_url` with defaults for everything else.
    ///
    /// # Returns
    ///
    /// - `Ok(ClientConfig)`: If `api_url` is an absolute http(s) URL
    /// - `Err(FeedError::Config)`: Otherwise
    pub fn with_api_url(api_url: &str) -> FeedResult<Self> {
        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            ..Self::default()
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Optional Environment Variables
    ///
    /// - `TWEETAPP_API_URL`: Base URL of the Tweet API (defaults to `http://localhost:8080`)
    /// - `TWEETAPP_TIMEOUT_SECS`: Request timeout in seconds (defaults to 10)
    /// - `TWEETAPP_OPTIMISTIC_REPLIES`: `1` or `true` to insert new replies locally
    ///
    /// # Returns
    ///
    /// - `Ok(ClientConfig)`: If the API URL is valid
    /// - `Err(FeedError::Config)`: If `TWEETAPP_API_URL` is not a valid URL
    ///
    /// # Example
    ///
    /// ```rust
    /// use tweetfeed::ClientConfig;
    ///
    /// std::env::remove_var("TWEETAPP_API_URL");
    /// let config = ClientConfig::from_env().unwrap();
    /// assert_eq!(config.api_url, "http://localhost:8080");
    /// ```
    pub fn from_env() -> FeedResult<Self> {
        let api_url = match env::var("TWEETAPP_API_URL") {
            Ok(raw) if !raw.trim().is_empty() => normalize_api_url(&raw)?,
            _ => {
                debug!("TWEETAPP_API_URL not set, using {}", DEFAULT_API_URL);
                DEFAULT_API_URL.to_string()
            }
        };

        let timeout = match env::var("TWEETAPP_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        "Ignoring invalid TWEETAPP_TIMEOUT_SECS '{}', using {}s",
                        raw, DEFAULT_TIMEOUT_SECS
                    );
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
                }
            },
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let optimistic_replies = env::var("TWEETAPP_OPTIMISTIC_REPLIES")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        info!(
            "Client configured for {} (timeout {}s, optimistic replies {})",
            api_url,
            timeout.as_secs(),
            optimistic_replies
        );

        Ok(Self {
            api_url,
            timeout,
            optimistic_replies,
        })
    }
}

fn normalize_api_url(raw: &str) -> FeedResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| FeedError::Config(format!("invalid Tweet API URL '{}': {}", trimmed, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FeedError::Config(format!(
            "Tweet API URL must be http or https, got '{}'",
            parsed.scheme()
        )));
    }
    Ok(trimmed.to_string())
}
