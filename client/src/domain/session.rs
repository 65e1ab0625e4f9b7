//! Authentication session state and its single-writer store.
//!
//! [`reduce`] is the only place a [`Session`] changes. [`SessionStore`] owns
//! the current value behind a `tokio::sync::watch` channel: every mutation
//! goes through [`SessionStore::dispatch`], observers hold receivers and read
//! snapshots.

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::{AuthToken, User};

const DEFAULT_FAILURE_MESSAGE: &str = "Authentication failed";

/// Client-held authentication status and current user.
///
/// ## Invariants
/// - `is_authenticated` implies `user` is present.
/// - `is_loading` is never set together with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    is_authenticated: bool,
    is_loading: bool,
    user: Option<User>,
    error: Option<String>,
}

impl Session {
    /// State at application start: unauthenticated and loading.
    pub const fn initial() -> Self {
        Self {
            is_authenticated: false,
            is_loading: true,
            user: None,
            error: None,
        }
    }

    const fn signed_out(error: Option<String>) -> Self {
        Self {
            is_authenticated: false,
            is_loading: false,
            user: None,
            error,
        }
    }

    /// Whether a user is signed in.
    pub const fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Whether an authentication request is in flight.
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Signed-in user.
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Last authentication error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the signed-in user has a business account.
    pub fn is_business(&self) -> bool {
        self.is_authenticated && self.user.as_ref().is_some_and(User::is_business)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

/// Closed set of session transitions.
///
/// Events from a host bridge arrive as JSON objects tagged by `type`, for
/// example `{"type": "FAILED", "message": "Invalid credentials"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionEvent {
    /// An authentication request started.
    #[serde(alias = "AUTH_START")]
    Started,
    /// Authentication succeeded.
    #[serde(alias = "AUTH_SUCCESS")]
    Succeeded {
        /// Signed-in user.
        user: User,
        /// Token issued with the grant; the token store keeps it, not the
        /// session.
        #[serde(default)]
        token: Option<AuthToken>,
    },
    /// Authentication failed.
    #[serde(alias = "AUTH_FAILURE")]
    Failed {
        /// Human-readable reason.
        message: String,
    },
    /// The user signed out.
    #[serde(alias = "LOGOUT")]
    LoggedOut,
    /// Startup finished without a usable token.
    #[serde(alias = "AUTH_COMPLETE")]
    SettledWithoutUser,
    /// The signed-in user's profile changed.
    #[serde(alias = "UPDATE_USER")]
    UserUpdated {
        /// Updated user.
        user: User,
    },
    /// The error banner was dismissed.
    #[serde(alias = "CLEAR_ERROR")]
    ErrorCleared,
}

impl SessionEvent {
    /// Stable event name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
            Self::LoggedOut => "logged_out",
            Self::SettledWithoutUser => "settled_without_user",
            Self::UserUpdated { .. } => "user_updated",
            Self::ErrorCleared => "error_cleared",
        }
    }
}

/// Compute the session that follows `event`.
///
/// # Examples
/// ```
/// use client::domain::{Session, SessionEvent, reduce};
///
/// let next = reduce(&Session::initial(), SessionEvent::SettledWithoutUser);
/// assert!(!next.is_loading());
/// assert!(!next.is_authenticated());
/// ```
pub fn reduce(session: &Session, event: SessionEvent) -> Session {
    match event {
        SessionEvent::Started => Session {
            is_loading: true,
            error: None,
            ..session.clone()
        },
        SessionEvent::Succeeded { user, .. } => Session {
            is_authenticated: true,
            is_loading: false,
            user: Some(user),
            error: None,
        },
        SessionEvent::Failed { message } => {
            let message = if message.trim().is_empty() {
                DEFAULT_FAILURE_MESSAGE.to_owned()
            } else {
                message
            };
            Session::signed_out(Some(message))
        }
        SessionEvent::LoggedOut | SessionEvent::SettledWithoutUser => Session::signed_out(None),
        SessionEvent::UserUpdated { user } => Session {
            is_authenticated: session.is_authenticated,
            is_loading: false,
            user: Some(user),
            error: None,
        },
        SessionEvent::ErrorCleared => Session {
            error: None,
            ..session.clone()
        },
    }
}

/// Error raised when an untyped event cannot be parsed.
#[derive(Debug, Error)]
#[error("rejected session event: {0}")]
pub struct RejectedEvent(#[from] serde_json::Error);

/// Single-writer owner of the current [`Session`].
#[derive(Debug)]
pub struct SessionStore {
    sender: watch::Sender<Session>,
}

impl SessionStore {
    /// Store holding [`Session::initial`].
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(Session::initial());
        Self { sender }
    }

    /// Apply `event` and return the resulting session.
    pub fn dispatch(&self, event: SessionEvent) -> Session {
        let name = event.name();
        let mut next = Session::initial();
        self.sender.send_modify(|current| {
            *current = reduce(current, event);
            next = current.clone();
        });
        info!(
            event = name,
            authenticated = next.is_authenticated(),
            loading = next.is_loading(),
            "session transition"
        );
        next
    }

    /// Parse and apply an event received as JSON.
    ///
    /// Unknown or malformed events are logged and leave the session
    /// unchanged.
    pub fn dispatch_raw(&self, raw: &serde_json::Value) -> Result<Session, RejectedEvent> {
        match SessionEvent::deserialize(raw) {
            Ok(event) => Ok(self.dispatch(event)),
            Err(err) => {
                warn!(error = %err, "ignoring unknown session event");
                Err(RejectedEvent(err))
            }
        }
    }

    /// Current session.
    pub fn snapshot(&self) -> Session {
        self.sender.borrow().clone()
    }

    /// Receiver notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.sender.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
