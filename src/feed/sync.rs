//! Feed sync controller.
//!
//! Drives every async operation against the [`TweetApi`] and applies results
//! to the local feed. Each operation checks and marks local state under a
//! short lock, awaits the API with the lock released, then reconciles. Other
//! tweets stay interactive while a request is in flight; the only
//! serialisation is one edit and one reply submission per tweet at a time.
//!
//! Failures never escape as panics. Each one is pushed as an error notice and
//! also returned, with local state left at its last good value.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::api::{sanitize_for_logging, FeedScope, NewTweet, TweetApi, UpdateTweet};
use crate::config::ClientConfig;
use crate::error::{FeedError, FeedResult};
use crate::session::Session;
use crate::tweet::{validate_message, Tweet, TweetId};

use super::gate::can_modify;
use super::interaction::{InteractionState, InteractionTracker, SubmissionKind, ToggleField};
use super::notice::{Notice, Notices};
use super::store::FeedStore;
use super::view::{build_views, TweetView};

const RETRY_LATER: &str = "Please try again later";

/// What an operation did to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request was sent and its result applied.
    Applied,
    /// Nothing was sent: the target is not in the feed, or the same
    /// submission is already in flight.
    Skipped,
}

#[derive(Debug, Default)]
struct FeedState {
    scope: Option<FeedScope>,
    store: FeedStore,
    tracker: InteractionTracker,
    loading: bool,
    /// Bumped on every fetch; only the latest fetch may touch the store.
    fetch_generation: u64,
    notices: Notices,
}

impl FeedState {
    fn fail(&mut self, context: &str, err: &FeedError) {
        let message = if err.is_local() {
            err.to_string()
        } else {
            format!("{}: {}", RETRY_LATER, context)
        };
        self.notices.push(Notice::error(message));
    }
}

/// Owns the feed, the per-tweet interaction state and the notice queue for
/// one logged-in user.
pub struct FeedSyncController<A: TweetApi> {
    api: A,
    session: Session,
    optimistic_replies: bool,
    state: Mutex<FeedState>,
}

impl<A: TweetApi> FeedSyncController<A> {
    /// Creates a controller with an empty feed.
    ///
    /// # Parameters
    ///
    /// - `api`: Tweet API implementation used for every request
    /// - `session`: The logged-in user; fixed for the controller's lifetime
    /// - `config`: Client settings; only `optimistic_replies` is read here
    pub fn new(api: A, session: Session, config: &ClientConfig) -> Self {
        info!("Feed controller ready for @{}", session.handle);
        Self {
            api,
            session,
            optimistic_replies: config.optimistic_replies,
            state: Mutex::new(FeedState::default()),
        }
    }

    /// Returns the Tweet API this controller talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the session every request is made as.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads `scope` and replaces the local feed with the result.
    ///
    /// On failure the previous feed is kept. When fetches overlap only the
    /// most recently started one is applied; an older one that resolves late
    /// is dropped and leaves the loading flag alone.
    ///
    /// # Parameters
    ///
    /// - `scope`: The global feed or one user's tweets
    ///
    /// # Returns
    ///
    /// - `Ok(usize)`: Number of tweets the server returned
    /// - `Err(FeedError)`: The request failed; an error notice is queued unless
    ///   a newer fetch has started since
    pub async fn fetch_feed(&self, scope: FeedScope) -> FeedResult<usize> {
        let generation = {
            let mut state = self.state();
            state.fetch_generation += 1;
            state.loading = true;
            state.scope = Some(scope.clone());
            state.fetch_generation
        };

        let result = self.api.fetch_feed(&self.session, &scope).await;

        let mut state = self.state();
        if state.fetch_generation != generation {
            debug!(
                "Dropping stale result for feed {:?}, a newer fetch has started",
                scope
            );
            return result.map(|tweets| tweets.len());
        }

        state.loading = false;
        match result {
            Ok(tweets) => {
                let count = tweets.len();
                state.store.load(tweets);
                info!("Feed {:?} loaded with {} tweets", scope, count);
                Ok(count)
            }
            Err(e) => {
                error!("Failed to fetch feed {:?}: {}", scope, e);
                state.fail("could not load tweets", &e);
                Err(e)
            }
        }
    }

    /// Re-fetches the last requested scope, or the global feed.
    pub async fn refresh(&self) -> FeedResult<usize> {
        let scope = self.state().scope.clone().unwrap_or(FeedScope::All);
        self.fetch_feed(scope).await
    }

    /// Posts a new top-level tweet as the session user.
    ///
    /// The local feed is not touched; the tweet shows up on the next fetch.
    pub async fn post_tweet(&self, message: &str) -> FeedResult<Option<Tweet>> {
        if let Err(e) = validate_message(message) {
            let e = FeedError::from(e);
            warn!("Rejected new tweet: {}", e);
            self.state().fail("could not post tweet", &e);
            return Err(e);
        }

        let body = NewTweet::now(&self.session.handle, message);
        match self.api.post_tweet(&self.session, &body).await {
            Ok(created) => {
                self.state()
                    .notices
                    .push(Notice::success("tweet posted successfully"));
                Ok(created)
            }
            Err(e) => {
                error!("Failed to post tweet: {}", e);
                self.state().fail("could not post tweet", &e);
                Err(e)
            }
        }
    }

    /// Replies to tweet `id` as the session user.
    ///
    /// Any authenticated user may reply to any tweet. On success the composer
    /// closes; the reply is only added locally when optimistic replies are
    /// enabled and the server echoed it back. On failure the composer stays open.
    pub async fn submit_reply(&self, id: &TweetId, message: &str) -> FeedResult<Outcome> {
        {
            let mut state = self.state();
            if let Err(e) = validate_message(message) {
                let e = FeedError::from(e);
                warn!("Rejected reply to {}: {}", id, e);
                state.fail("could not post reply", &e);
                return Err(e);
            }
            if !state.tracker.begin_submission(id, SubmissionKind::Reply) {
                debug!("Reply to {} already in flight, ignoring", id);
                return Ok(Outcome::Skipped);
            }
        }

        let body = NewTweet::now(&self.session.handle, message);
        let result = self.api.reply_to_tweet(&self.session, id, &body).await;

        let mut state = self.state();
        state.tracker.finish_submission(id, SubmissionKind::Reply);
        match result {
            Ok(created) => {
                state
                    .tracker
                    .set(id, ToggleField::ReplyComposerOpen, false);
                state.tracker.clear_reply_draft(id);
                if self.optimistic_replies {
                    if let Some(reply) = created {
                        state.store.append_reply(id, reply);
                    }
                }
                state
                    .notices
                    .push(Notice::success("reply posted successfully"));
                info!("Reply to {} posted", id);
                Ok(Outcome::Applied)
            }
            Err(e) => {
                error!("Failed to reply to {}: {}", id, e);
                state.fail("could not post reply", &e);
                Err(e)
            }
        }
    }

    /// Replaces the message of tweet `id`, which the session user must own.
    ///
    /// On success the local message is updated and edit mode ends. On failure
    /// edit mode stays on and the edit input reverts to the pre-edit message.
    pub async fn submit_edit(&self, id: &TweetId, new_message: &str) -> FeedResult<Outcome> {
        let previous = {
            let mut state = self.state();
            if let Err(e) = validate_message(new_message) {
                let e = FeedError::from(e);
                warn!("Rejected edit of {}: {}", id, e);
                state.fail("could not update tweet", &e);
                return Err(e);
            }
            let target = state
                .store
                .get(id)
                .map(|t| (can_modify(t, &self.session), t.message.clone()));
            let Some((owner, previous)) = target else {
                warn!("Edit of {} ignored, tweet is not in the feed", id);
                return Ok(Outcome::Skipped);
            };
            if !owner {
                let e = self.not_owner(id);
                state.fail("could not update tweet", &e);
                return Err(e);
            }
            if !state.tracker.begin_submission(id, SubmissionKind::Edit) {
                debug!("Edit of {} already in flight, ignoring", id);
                return Ok(Outcome::Skipped);
            }
            previous
        };

        let body = UpdateTweet {
            message: new_message.to_string(),
        };
        let result = self.api.update_tweet(&self.session, id, &body).await;

        let mut state = self.state();
        state.tracker.finish_submission(id, SubmissionKind::Edit);
        match result {
            Ok(_) => {
                if !state.store.replace_message_by_id(id, new_message) {
                    warn!("Tweet {} left the feed before its edit completed", id);
                }
                state.tracker.set(id, ToggleField::EditMode, false);
                state
                    .notices
                    .push(Notice::success("tweet updated successfully"));
                info!(
                    "Tweet {} updated to '{}'",
                    id,
                    sanitize_for_logging(new_message, 80)
                );
                Ok(Outcome::Applied)
            }
            Err(e) => {
                error!("Failed to update tweet {}: {}", id, e);
                state.tracker.set(id, ToggleField::EditMode, true);
                state.tracker.set_edit_draft(id, previous);
                state.fail("could not update tweet", &e);
                Err(e)
            }
        }
    }

    /// Deletes tweet `id`, which the session user must own.
    ///
    /// The tweet is removed locally only once the server confirms. Deleting an
    /// id that is not in the feed does nothing.
    pub async fn delete_tweet(&self, id: &TweetId) -> FeedResult<Outcome> {
        {
            let mut state = self.state();
            let owner = state.store.get(id).map(|t| can_modify(t, &self.session));
            let Some(owner) = owner else {
                debug!("Delete of {} ignored, tweet is not in the feed", id);
                return Ok(Outcome::Skipped);
            };
            if !owner {
                let e = self.not_owner(id);
                state.fail("could not delete tweet", &e);
                return Err(e);
            }
        }

        let result = self.api.delete_tweet(&self.session, id).await;

        let mut state = self.state();
        match result {
            Ok(()) => {
                state.store.remove_by_id(id);
                state
                    .notices
                    .push(Notice::success("tweet deleted successfully"));
                info!("Tweet {} deleted", id);
                Ok(Outcome::Applied)
            }
            Err(e) => {
                error!("Failed to delete tweet {}: {}", id, e);
                state.fail("could not delete tweet", &e);
                Err(e)
            }
        }
    }

    /// Likes tweet `id`; on success its local like count goes up by one.
    pub async fn like_tweet(&self, id: &TweetId) -> FeedResult<Outcome> {
        if !self.state().store.contains(id) {
            debug!("Like of {} ignored, tweet is not in the feed", id);
            return Ok(Outcome::Skipped);
        }

        let result = self.api.like_tweet(&self.session, id).await;

        let mut state = self.state();
        match result {
            Ok(()) => {
                state.store.increment_likes(id);
                state.notices.push(Notice::success("tweet liked"));
                Ok(Outcome::Applied)
            }
            Err(e) => {
                error!("Failed to like tweet {}: {}", id, e);
                state.fail("could not like tweet", &e);
                Err(e)
            }
        }
    }

    /// Flips one toggle for tweet `id` and returns its new value.
    ///
    /// Entering edit mode seeds the edit draft with the current message.
    pub fn toggle(&self, id: &TweetId, field: ToggleField) -> bool {
        let mut state = self.state();
        let value = state.tracker.toggle(id, field);
        if field == ToggleField::EditMode && value {
            if let Some(message) = state.store.get(id).map(|t| t.message.clone()) {
                state.tracker.set_edit_draft(id, message);
            }
        }
        value
    }

    /// Replaces the text in tweet `id`'s edit input.
    ///
    /// # Parameters
    ///
    /// - `id`: Tweet being edited
    /// - `text`: Current contents of the edit input
    pub fn set_edit_draft(&self, id: &TweetId, text: &str) {
        self.state().tracker.set_edit_draft(id, text);
    }

    /// Returns the edit input for tweet `id`, if one is open.
    pub fn edit_draft(&self, id: &TweetId) -> Option<String> {
        self.state().tracker.edit_draft(id).map(str::to_string)
    }

    /// Replaces the text in tweet `id`'s reply composer.
    ///
    /// # Parameters
    ///
    /// - `id`: Tweet being replied to
    /// - `text`: Current contents of the reply composer
    pub fn set_reply_draft(&self, id: &TweetId, text: &str) {
        self.state().tracker.set_reply_draft(id, text);
    }

    /// Returns the reply composer text for tweet `id`.
    ///
    /// # Returns
    ///
    /// - `Some(String)`: Unsent reply text
    /// - `None`: Nothing typed yet, or the last reply was posted
    pub fn reply_draft(&self, id: &TweetId) -> Option<String> {
        self.state().tracker.reply_draft(id).map(str::to_string)
    }

    /// Returns the toggles for tweet `id`; unknown ids get all-false defaults.
    pub fn interaction(&self, id: &TweetId) -> InteractionState {
        self.state().tracker.state(id)
    }

    /// True from the start of the latest fetch until it resolves.
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    /// True while any edit or reply submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state().tracker.is_submitting()
    }

    /// Returns the scope of the latest fetch, or `None` before the first one.
    pub fn scope(&self) -> Option<FeedScope> {
        self.state().scope.clone()
    }

    /// Returns a snapshot of the feed in server order.
    pub fn tweets(&self) -> Vec<Tweet> {
        self.state().store.tweets().to_vec()
    }

    /// Returns a copy of tweet `id` if it is in the feed.
    pub fn tweet(&self, id: &TweetId) -> Option<Tweet> {
        self.state().store.get(id).cloned()
    }

    /// Feed change counter; see [`FeedStore::revision`].
    pub fn revision(&self) -> u64 {
        self.state().store.revision()
    }

    /// Whether the session user may edit or delete tweet `id`.
    pub fn can_modify(&self, id: &TweetId) -> bool {
        self.state()
            .store
            .get(id)
            .is_some_and(|t| can_modify(t, &self.session))
    }

    /// Render model of the current feed.
    pub fn view(&self, now: DateTime<Utc>) -> Vec<TweetView> {
        let state = self.state();
        build_views(state.store.tweets(), &state.tracker, &self.session, now)
    }

    /// Takes every pending notice, oldest first.
    pub fn drain_notices(&self) -> Vec<Notice> {
        self.state().notices.drain()
    }

    fn not_owner(&self, id: &TweetId) -> FeedError {
        warn!(
            "@{} attempted to modify tweet {} they do not own",
            self.session.handle, id
        );
        FeedError::NotOwner {
            tweet_id: id.clone(),
            handle: self.session.handle.clone(),
        }
    }
}
