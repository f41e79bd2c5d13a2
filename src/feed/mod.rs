//! The tweet-feed state engine.
//!
//! - [`store`]: the ordered tweets of one feed
//! - [`interaction`]: per-tweet toggles and in-flight submissions
//! - [`gate`]: which controls the session user gets for a tweet
//! - [`sync`]: async operations against the Tweet API and their reconciliation
//! - [`notice`], [`view`]: what the UI shows

pub mod gate;
pub mod interaction;
pub mod notice;
pub mod store;
pub mod sync;
pub mod view;

pub use gate::{can_modify, Controls};
pub use interaction::{InteractionState, InteractionTracker, SubmissionKind, ToggleField};
pub use notice::{Notice, NoticeLevel, Notices, MAX_NOTICES};
pub use store::FeedStore;
pub use sync::{FeedSyncController, Outcome};
pub use view::TweetView;
