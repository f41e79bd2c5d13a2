//! Tweet operations against the Tweet API over HTTP.
//!
//! Routes:
//! - `GET /tweets/all`
//! - `GET /tweets/{username}`
//! - `POST /tweets/{username}/add`
//! - `PUT /tweets/{username}/update/{id}`
//! - `DELETE /tweets/{username}/delete/{id}`
//! - `POST /tweets/{username}/reply/{id}`
//! - `POST /tweets/{username}/like/{id}`

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::FeedResult;
use crate::session::Session;
use crate::tweet::{Reply, Tweet, TweetId};

use super::request::{parse_json, parse_optional_json, sanitize_for_logging, send_request};
use super::{FeedScope, NewTweet, TweetApi, UpdateTweet};

/// reqwest-backed [`TweetApi`].
#[derive(Debug, Clone)]
pub struct HttpTweetApi {
    client: Client,
    base_url: String,
}

impl HttpTweetApi {
    /// Creates a client for the API at `config.api_url`.
    ///
    /// # Returns
    ///
    /// - `Ok(HttpTweetApi)`: If the underlying HTTP client could be built
    /// - `Err(FeedError::Http)`: If TLS or client setup failed
    pub fn new(config: &ClientConfig) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("tweetfeed/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn feed_url(&self, scope: &FeedScope) -> String {
        match scope {
            FeedScope::All => format!("{}/tweets/all", self.base_url),
            FeedScope::User(username) => {
                format!("{}/tweets/{}", self.base_url, urlencoding::encode(username))
            }
        }
    }

    fn action_url(&self, session: &Session, action: &str, id: Option<&TweetId>) -> String {
        let base = format!(
            "{}/tweets/{}/{}",
            self.base_url,
            urlencoding::encode(&session.handle),
            action
        );
        match id {
            Some(id) => format!("{}/{}", base, urlencoding::encode(id.as_str())),
            None => base,
        }
    }
}

#[async_trait]
impl TweetApi for HttpTweetApi {
    async fn fetch_feed(&self, session: &Session, scope: &FeedScope) -> FeedResult<Vec<Tweet>> {
        let url = self.feed_url(scope);
        info!("Fetching feed {:?} from {}", scope, url);

        let request_builder = self
            .client
            .get(&url)
            .header("Authorization", session.authorization_header());

        let body = send_request(request_builder, "fetch_feed").await?;
        let tweets: Vec<Tweet> = parse_json(&body, "fetch_feed")?;
        info!("Fetched {} tweets for {:?}", tweets.len(), scope);
        Ok(tweets)
    }

    async fn post_tweet(&self, session: &Session, tweet: &NewTweet) -> FeedResult<Option<Tweet>> {
        let url = self.action_url(session, "add", None);
        info!(
            "Posting tweet as @{}: '{}'",
            session.handle,
            sanitize_for_logging(&tweet.message, 80)
        );
        debug!("Request headers: Authorization: [REDACTED], Content-Type: application/json");

        let request_builder = self
            .client
            .post(&url)
            .header("Authorization", session.authorization_header())
            .json(tweet);

        let body = send_request(request_builder, "post_tweet").await?;
        Ok(parse_optional_json(&body, "post_tweet"))
    }

    async fn reply_to_tweet(
        &self,
        session: &Session,
        id: &TweetId,
        reply: &NewTweet,
    ) -> FeedResult<Option<Reply>> {
        let url = self.action_url(session, "reply", Some(id));
        info!(
            "Replying to tweet {} as @{}: '{}'",
            id,
            session.handle,
            sanitize_for_logging(&reply.message, 80)
        );

        let request_builder = self
            .client
            .post(&url)
            .header("Authorization", session.authorization_header())
            .json(reply);

        let body = send_request(request_builder, "reply_to_tweet").await?;
        Ok(parse_optional_json(&body, "reply_to_tweet"))
    }

    async fn update_tweet(
        &self,
        session: &Session,
        id: &TweetId,
        update: &UpdateTweet,
    ) -> FeedResult<Option<Tweet>> {
        let url = self.action_url(session, "update", Some(id));
        info!(
            "Updating tweet {}: '{}'",
            id,
            sanitize_for_logging(&update.message, 80)
        );

        let request_builder = self
            .client
            .put(&url)
            .header("Authorization", session.authorization_header())
            .json(update);

        let body = send_request(request_builder, "update_tweet").await?;
        Ok(parse_optional_json(&body, "update_tweet"))
    }

    async fn delete_tweet(&self, session: &Session, id: &TweetId) -> FeedResult<()> {
        let url = self.action_url(session, "delete", Some(id));
        info!("Deleting tweet {} as @{}", id, session.handle);

        let request_builder = self
            .client
            .delete(&url)
            .header("Authorization", session.authorization_header());

        send_request(request_builder, "delete_tweet").await?;
        Ok(())
    }

    async fn like_tweet(&self, session: &Session, id: &TweetId) -> FeedResult<()> {
        let url = self.action_url(session, "like", Some(id));
        info!("Liking tweet {} as @{}", id, session.handle);

        let request_builder = self
            .client
            .post(&url)
            .header("Authorization", session.authorization_header());

        send_request(request_builder, "like_tweet").await?;
        Ok(())
    }
}
