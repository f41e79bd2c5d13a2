//! Authenticated session handling.
//!
//! Logging in and out happens outside this crate. What lands here is the
//! result: a handle plus the token the Tweet API expects in the
//! `Authorization` header. The [`SessionStore`] holds the current session
//! for the process; the feed controller is handed a [`Session`] snapshot when
//! it is built and never reads the store itself.

use std::env;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use log::{info, warn};

use crate::error::{FeedError, FeedResult};

/// The authenticated caller: their handle and API credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub handle: String,
    pub auth_token: String,
}

impl Session {
    pub fn new(handle: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Builds a session from `TWEETAPP_HANDLE` and `TWEETAPP_TOKEN`.
    ///
    /// # Returns
    ///
    /// - `Ok(Session)`: If both variables are set and non-empty
    /// - `Err(FeedError::Config)`: If either is missing or empty
    pub fn from_env() -> FeedResult<Self> {
        let handle = env::var("TWEETAPP_HANDLE")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| FeedError::Config("TWEETAPP_HANDLE is not set".into()))?;
        let auth_token = env::var("TWEETAPP_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| FeedError::Config("TWEETAPP_TOKEN is not set".into()))?;

        info!("Loaded session for @{} from environment", handle.trim());
        Ok(Self::new(handle.trim(), auth_token.trim()))
    }

    /// Value for the `Authorization` header on every Tweet API request.
    pub fn authorization_header(&self) -> String {
        build_authorization_header(&self.auth_token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("handle", &self.handle)
            .field("auth_token", &"[REDACTED]")
            .finish()
    }
}

/// Builds the Authorization header for the Tweet API.
///
/// The login endpoint hands out the token in the exact form the API wants
/// echoed back, so it is passed through verbatim.
///
/// # Example
///
/// ```rust
/// use tweetfeed::build_authorization_header;
///
/// let header = build_authorization_header("Bearer abc.def");
/// assert_eq!(header, "Bearer abc.def");
/// ```
pub fn build_authorization_header(auth_token: &str) -> String {
    auth_token.trim().to_string()
}

/// Process-wide holder of the current session.
///
/// Set on successful login, cleared on logout.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&self, session: Session) {
        info!("Session started for @{}", session.handle);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.replace(session) {
            warn!("Replaced existing session for @{}", previous.handle);
        }
    }

    pub fn logout(&self) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.take() {
            info!("Session cleared for @{}", previous.handle);
        }
    }

    /// Snapshot of the current session, if anyone is logged in.
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
