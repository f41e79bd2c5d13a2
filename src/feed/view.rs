//! Render model for one feed: what a UI needs to draw each tweet.

use chrono::{DateTime, Utc};

use crate::session::Session;
use crate::tweet::{Reply, Tweet};

use super::gate::Controls;
use super::interaction::{InteractionState, InteractionTracker};

#[derive(Debug, Clone, PartialEq)]
pub struct TweetView {
    pub tweet: Tweet,
    pub state: InteractionState,
    pub controls: Controls,
    pub age: String,
    /// Text shown in the message box: the edit draft while editing, else the message.
    pub message_text: String,
    pub reply_draft: Option<String>,
}

impl TweetView {
    /// Replies are only rendered while the reply list is expanded.
    pub fn visible_replies(&self) -> &[Reply] {
        if self.state.replies_expanded {
            &self.tweet.replies
        } else {
            &[]
        }
    }

    pub fn reply_count(&self) -> usize {
        self.tweet.replies.len()
    }
}

pub(crate) fn build_views(
    tweets: &[Tweet],
    tracker: &InteractionTracker,
    session: &Session,
    now: DateTime<Utc>,
) -> Vec<TweetView> {
    tweets
        .iter()
        .map(|tweet| {
            let state = tracker.state(&tweet.id);
            let message_text = match tracker.edit_draft(&tweet.id) {
                Some(draft) if state.edit_mode => draft.to_string(),
                _ => tweet.message.clone(),
            };
            TweetView {
                tweet: tweet.clone(),
                state,
                controls: Controls::for_tweet(tweet, session),
                age: tweet.age_label(now),
                message_text,
                reply_draft: tracker.reply_draft(&tweet.id).map(str::to_string),
            }
        })
        .collect()
}
