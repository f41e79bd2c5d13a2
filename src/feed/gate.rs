//! Ownership-based action visibility.

use crate::session::Session;
use crate::tweet::Tweet;

/// Whether `session` may edit or delete `tweet`: only its author can.
pub fn can_modify(tweet: &Tweet, session: &Session) -> bool {
    tweet.handle == session.handle
}

/// Controls exposed for one tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub reply: bool,
    pub show_replies: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Controls {
    /// Reply and show-replies are always offered; edit and delete only to the author.
    pub fn for_tweet(tweet: &Tweet, session: &Session) -> Self {
        let owner = can_modify(tweet, session);
        Self {
            reply: true,
            show_replies: true,
            edit: owner,
            delete: owner,
        }
    }
}
