//! # Tweetfeed Library
//!
//! A client for the TweetApp HTTP API built around a tweet-feed state engine.
//! It fetches a feed, tracks per-tweet interaction state (reply composer,
//! reply list, inline edit mode), decides which actions the current user may
//! take, and reconciles local state with the results of asynchronous requests.
//!
//! ## Features
//!
//! - Global and per-user feeds
//! - Post, reply, edit, delete and like with local validation (144 characters)
//! - Ownership-gated edit/delete controls
//! - Rollback of failed edits, confirmation-driven deletes
//! - Structured logging through the `log` facade
//!
//! ## Configuration
//!
//! - `TWEETAPP_API_URL`: Base URL of the Tweet API (defaults to `http://localhost:8080`)
//! - `TWEETAPP_TIMEOUT_SECS`: Request timeout (defaults to 10)
//! - `TWEETAPP_OPTIMISTIC_REPLIES`: Insert new replies locally without re-fetching
//! - `TWEETAPP_HANDLE`, `TWEETAPP_TOKEN`: Session used by the `tweetfeed` binary
//!
//! ## Example
//!
//! ```rust,no_run
//! use tweetfeed::{ClientConfig, FeedScope, FeedSyncController, HttpTweetApi, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tweetfeed::FeedError> {
//!     let config = ClientConfig::from_env()?;
//!     let api = HttpTweetApi::new(&config)?;
//!     let feed = FeedSyncController::new(api, Session::new("alice", "token"), &config);
//!
//!     feed.fetch_feed(FeedScope::All).await?;
//!     for view in feed.view(chrono::Utc::now()) {
//!         println!("@{}: {}", view.tweet.handle, view.message_text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod session;
pub mod tweet;

// Re-export commonly used types and functions
pub use api::{FeedScope, HttpTweetApi, NewTweet, TweetApi, UpdateTweet};
pub use config::ClientConfig;
pub use error::{FeedError, FeedResult, ValidationError};
pub use feed::{
    can_modify, Controls, FeedStore, FeedSyncController, InteractionState, InteractionTracker,
    Notice, NoticeLevel, Outcome, ToggleField, TweetView,
};
pub use session::{build_authorization_header, Session, SessionStore};
pub use tweet::{validate_message, Reply, Tweet, TweetId, MAX_MESSAGE_LEN};
