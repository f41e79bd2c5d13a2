//! Error types for the tweet feed client.
//!
//! Validation failures are raised before any request is issued; everything
//! else comes from talking to the Tweet API. None of these are fatal: the
//! feed controller turns each of them into an error notice and keeps the last
//! good local state.

use thiserror::Error;

use crate::tweet::TweetId;

/// A message was rejected locally and never sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The message has no characters.
    #[error("tweet cannot be empty")]
    EmptyMessage,

    /// The message exceeds the maximum length (counted in code points).
    #[error("tweet length cannot be more than {max} characters (got {len})")]
    MessageTooLong { len: usize, max: usize },
}

/// Errors produced by feed operations.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Rejected before dispatch
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The session handle does not own the tweet
    #[error("@{handle} is not allowed to modify tweet {tweet_id}")]
    NotOwner { tweet_id: TweetId, handle: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The Tweet API answered with a non-2xx status
    #[error("Tweet API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeedError {
    /// True when the error was raised locally, before any request.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotOwner { .. } | Self::Config(_)
        )
    }
}

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
