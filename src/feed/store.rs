//! Ordered, in-memory copy of the tweets in one feed.
//!
//! All mutations are synchronous and total: a missing id is a no-op, never an
//! error. Every change that actually alters the feed bumps [`FeedStore::revision`]
//! so views know to re-render.

use log::debug;

use crate::tweet::{Reply, Tweet, TweetId};

#[derive(Debug, Clone, Default)]
pub struct FeedStore {
    tweets: Vec<Tweet>,
    revision: u64,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole feed, keeping server order.
    pub fn load(&mut self, tweets: Vec<Tweet>) {
        debug!("Loading {} tweets into feed store", tweets.len());
        self.tweets = tweets;
        self.bump();
    }

    /// Drops the top-level tweet with `id`. Returns whether one was removed.
    pub fn remove_by_id(&mut self, id: &TweetId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.tweets.remove(index);
                self.bump();
                true
            }
            None => false,
        }
    }

    /// Rewrites the message of tweet `id` in place; position and timestamps are kept.
    pub fn replace_message_by_id(&mut self, id: &TweetId, message: &str) -> bool {
        match self.get_mut(id) {
            Some(tweet) => {
                tweet.message = message.to_string();
                self.bump();
                true
            }
            None => false,
        }
    }

    /// Appends `reply` under the top-level tweet `parent`.
    pub fn append_reply(&mut self, parent: &TweetId, mut reply: Reply) -> bool {
        // replies are one level deep
        reply.replies.clear();
        match self.get_mut(parent) {
            Some(tweet) => {
                tweet.replies.push(reply);
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn increment_likes(&mut self, id: &TweetId) -> bool {
        match self.get_mut(id) {
            Some(tweet) => {
                tweet.likes = tweet.likes.saturating_add(1);
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &TweetId) -> Option<&Tweet> {
        self.tweets.iter().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TweetId) -> bool {
        self.position(id).is_some()
    }

    pub fn tweets(&self) -> &[Tweet] {
        &self.tweets
    }

    pub fn len(&self) -> usize {
        self.tweets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }

    /// Monotonic change counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position(&self, id: &TweetId) -> Option<usize> {
        self.tweets.iter().position(|t| &t.id == id)
    }

    fn get_mut(&mut self, id: &TweetId) -> Option<&mut Tweet> {
        self.tweets.iter_mut().find(|t| &t.id == id)
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
