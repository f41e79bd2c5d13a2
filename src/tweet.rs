//! Tweet records as returned by the Tweet API.
//!
//! A feed is a flat two-level tree: top-level tweets, each carrying an ordered
//! list of replies. Replies never carry replies of their own.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Maximum message length, counted in Unicode code points.
pub const MAX_MESSAGE_LEN: usize = 144;

/// Server-assigned tweet identifier.
///
/// The API may send ids as strings or as numbers; both are kept as their
/// textual form so comparisons stay exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TweetId(String);

impl TweetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TweetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TweetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for TweetId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for TweetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// A tweet, or a reply nested under one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: TweetId,
    pub handle: String,
    pub message: String,
    /// `None` when the server sent no usable timestamp.
    #[serde(default, deserialize_with = "deserialize_created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, rename = "likesOnTweet", deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub replies: Vec<Reply>,
}

/// Structurally a tweet, always nested exactly one level under a top-level tweet.
pub type Reply = Tweet;

impl Tweet {
    /// Relative age as shown next to each tweet: whole days, rounded up.
    ///
    /// Tweets without a timestamp are labelled "date unknown".
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let Some(created_at) = self.created_at else {
            return "date unknown".to_string();
        };
        let millis = (now - created_at).num_milliseconds();
        let day = 1000 * 60 * 60 * 24;
        let days = if millis <= 0 {
            0
        } else {
            (millis + day - 1) / day
        };
        format!("{} days ago", days)
    }
}

/// Checks that `message` is non-empty and at most [`MAX_MESSAGE_LEN`] code points.
pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    let len = message.chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyMessage);
    }
    if len > MAX_MESSAGE_LEN {
        return Err(ValidationError::MessageTooLong {
            len,
            max: MAX_MESSAGE_LEN,
        });
    }
    Ok(())
}

// Jackson writes java.util.Date as epoch millis unless told otherwise, so both
// forms show up on the wire. Null decodes to None; a missing field is covered
// by `#[serde(default)]`.
fn deserialize_created_at<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Millis(i64),
        Text(DateTime<Utc>),
    }

    match Option::<RawTimestamp>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawTimestamp::Text(dt)) => Ok(Some(dt)),
        Some(RawTimestamp::Millis(ms)) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", ms))),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
