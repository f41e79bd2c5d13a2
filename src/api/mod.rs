//! Tweet API integration module.
//!
//! The feed controller talks to the external Tweet service only through the
//! [`TweetApi`] trait. [`HttpTweetApi`] is the reqwest-backed implementation;
//! tests substitute their own.

mod request;
mod tweets;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::FeedResult;
use crate::session::Session;
use crate::tweet::{Reply, Tweet, TweetId};

pub use request::sanitize_for_logging;
pub use tweets::HttpTweetApi;

/// Which tweets a feed holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedScope {
    /// Every tweet (`GET /tweets/all`).
    All,
    /// Tweets authored by one user (`GET /tweets/{username}`).
    User(String),
}

impl FeedScope {
    pub fn user(username: impl Into<String>) -> Self {
        Self::User(username.into())
    }
}

/// Body for creating a tweet or a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTweet {
    pub handle: String,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

impl NewTweet {
    /// A message authored by `handle`, stamped with the current time.
    pub fn now(handle: &str, message: &str) -> Self {
        Self {
            handle: handle.to_string(),
            created_at: Utc::now(),
            message: message.to_string(),
        }
    }
}

/// Body for editing a tweet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateTweet {
    pub message: String,
}

/// The external Tweet service.
///
/// Every call carries the caller's [`Session`]; write endpoints are addressed
/// under the session handle. Create, reply and update return the record the
/// server echoed back when the body parses as one.
#[async_trait]
pub trait TweetApi: Send + Sync {
    /// Fetch the tweets in `scope`, in server order.
    async fn fetch_feed(&self, session: &Session, scope: &FeedScope) -> FeedResult<Vec<Tweet>>;

    /// Create a top-level tweet.
    async fn post_tweet(&self, session: &Session, tweet: &NewTweet) -> FeedResult<Option<Tweet>>;

    /// Reply to tweet `id`.
    async fn reply_to_tweet(
        &self,
        session: &Session,
        id: &TweetId,
        reply: &NewTweet,
    ) -> FeedResult<Option<Reply>>;

    /// Replace the message of tweet `id`.
    async fn update_tweet(
        &self,
        session: &Session,
        id: &TweetId,
        update: &UpdateTweet,
    ) -> FeedResult<Option<Tweet>>;

    /// Delete tweet `id`.
    async fn delete_tweet(&self, session: &Session, id: &TweetId) -> FeedResult<()>;

    /// Like tweet `id`.
    async fn like_tweet(&self, session: &Session, id: &TweetId) -> FeedResult<()>;
}
