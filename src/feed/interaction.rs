//! Per-tweet UI toggles and in-flight submission tracking.
//!
//! State is keyed by tweet id and created on first touch with everything
//! closed. Nothing here is persisted, and entries are not torn down when a
//! tweet leaves the feed: a server that reuses an id will see the old toggles.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::tweet::TweetId;

/// One of the three independent per-tweet toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleField {
    RepliesExpanded,
    ReplyComposerOpen,
    EditMode,
}

/// Toggle record for one tweet. All fields default to closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub replies_expanded: bool,
    pub reply_composer_open: bool,
    pub edit_mode: bool,
}

impl InteractionState {
    pub fn get(&self, field: ToggleField) -> bool {
        match field {
            ToggleField::RepliesExpanded => self.replies_expanded,
            ToggleField::ReplyComposerOpen => self.reply_composer_open,
            ToggleField::EditMode => self.edit_mode,
        }
    }

    fn slot(&mut self, field: ToggleField) -> &mut bool {
        match field {
            ToggleField::RepliesExpanded => &mut self.replies_expanded,
            ToggleField::ReplyComposerOpen => &mut self.reply_composer_open,
            ToggleField::EditMode => &mut self.edit_mode,
        }
    }
}

/// Submissions that must not overlap for the same tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    Edit,
    Reply,
}

#[derive(Debug, Default)]
pub struct InteractionTracker {
    states: HashMap<TweetId, InteractionState>,
    edit_drafts: HashMap<TweetId, String>,
    reply_drafts: HashMap<TweetId, String>,
    in_flight: HashSet<(TweetId, SubmissionKind)>,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current toggles for `id`; defaults if it was never touched.
    pub fn state(&self, id: &TweetId) -> InteractionState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Flips `field` for `id` and returns the new value.
    ///
    /// Leaving edit mode discards the edit draft; closing the composer keeps
    /// the reply draft.
    pub fn toggle(&mut self, id: &TweetId, field: ToggleField) -> bool {
        let state = self.states.entry(id.clone()).or_default();
        let slot = state.slot(field);
        *slot = !*slot;
        let value = *slot;
        debug!("Tweet {} {:?} -> {}", id, field, value);
        if field == ToggleField::EditMode && !value {
            self.edit_drafts.remove(id);
        }
        value
    }

    /// Forces `field` for `id` to `value`.
    pub fn set(&mut self, id: &TweetId, field: ToggleField, value: bool) {
        let state = self.states.entry(id.clone()).or_default();
        *state.slot(field) = value;
        if field == ToggleField::EditMode && !value {
            self.edit_drafts.remove(id);
        }
    }

    pub fn edit_draft(&self, id: &TweetId) -> Option<&str> {
        self.edit_drafts.get(id).map(String::as_str)
    }

    pub fn set_edit_draft(&mut self, id: &TweetId, text: impl Into<String>) {
        self.edit_drafts.insert(id.clone(), text.into());
    }

    pub fn reply_draft(&self, id: &TweetId) -> Option<&str> {
        self.reply_drafts.get(id).map(String::as_str)
    }

    pub fn set_reply_draft(&mut self, id: &TweetId, text: impl Into<String>) {
        self.reply_drafts.insert(id.clone(), text.into());
    }

    pub fn clear_reply_draft(&mut self, id: &TweetId) {
        self.reply_drafts.remove(id);
    }

    /// Marks a submission as in flight. Returns `false` if one of the same
    /// kind is already running for this tweet.
    pub fn begin_submission(&mut self, id: &TweetId, kind: SubmissionKind) -> bool {
        self.in_flight.insert((id.clone(), kind))
    }

    pub fn finish_submission(&mut self, id: &TweetId, kind: SubmissionKind) {
        self.in_flight.remove(&(id.clone(), kind));
    }

    /// True while any edit or reply submission is in flight.
    pub fn is_submitting(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn is_submitting_for(&self, id: &TweetId, kind: SubmissionKind) -> bool {
        self.in_flight.contains(&(id.clone(), kind))
    }
}
