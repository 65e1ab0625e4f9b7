//! Authentication session service.
//!
//! Orchestrates the remote [`AuthApi`] and the local [`TokenStore`] and feeds
//! every result through the session reducer. Action methods resolve to an
//! [`AuthOutcome`] instead of an error: ordinary failures (bad credentials,
//! network errors) are reported to the caller and recorded in the session,
//! never propagated.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::ports::{AuthApi, SessionIdentity, TokenStore};
use crate::domain::{
    AuthGrant, Error, LoginCredentials, PasswordChange, ProfileUpdate, Registration, Session,
    SessionEvent, SessionStore, User,
};

/// Result of a session action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The action completed.
    Succeeded,
    /// The action failed; `message` is suitable for display.
    Failed {
        /// Human-readable reason.
        message: String,
    },
}

impl AuthOutcome {
    fn failed(error: &Error) -> Self {
        Self::Failed {
            message: error.message().to_owned(),
        }
    }

    /// Whether the action completed.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Failure message, if the action failed.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded => None,
            Self::Failed { message } => Some(message.as_str()),
        }
    }
}

/// Session manager owning the [`SessionStore`].
pub struct AuthSessionService<A: ?Sized, T: ?Sized> {
    api: Arc<A>,
    tokens: Arc<T>,
    store: SessionStore,
}

impl<A: ?Sized, T: ?Sized> AuthSessionService<A, T> {
    /// Create a service in the initial loading state.
    pub fn new(api: Arc<A>, tokens: Arc<T>) -> Self {
        Self {
            api,
            tokens,
            store: SessionStore::new(),
        }
    }

    /// Current session.
    pub fn session(&self) -> Session {
        self.store.snapshot()
    }

    /// Receiver notified on every session transition.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.store.subscribe()
    }

    /// Dismiss the current error.
    pub fn clear_error(&self) {
        self.store.dispatch(SessionEvent::ErrorCleared);
    }
}

impl<A, T> AuthSessionService<A, T>
where
    A: AuthApi + ?Sized,
    T: TokenStore + ?Sized,
{
    /// Restore the session from a stored token.
    ///
    /// Without a stored token the session settles signed out and no request
    /// is made. A token the server rejects is removed. Other failures keep
    /// the token for the next start and record the error.
    pub async fn initialize(&self) -> Session {
        let token = match self.tokens.get().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("no stored token");
                return self.store.dispatch(SessionEvent::SettledWithoutUser);
            }
            Err(err) => {
                warn!(error = %err, "token storage unreadable; starting signed out");
                return self.store.dispatch(SessionEvent::SettledWithoutUser);
            }
        };

        match self.api.validate_token(&token).await {
            Ok(user) => self.store.dispatch(SessionEvent::Succeeded {
                user,
                token: Some(token),
            }),
            Err(err) if err.is_auth_rejection() => {
                info!(token = %token.fingerprint(), "stored token rejected");
                self.discard_token().await;
                self.store.dispatch(SessionEvent::SettledWithoutUser)
            }
            Err(err) => {
                warn!(error = %err, "token validation failed");
                self.store.dispatch(SessionEvent::Failed {
                    message: err.message().to_owned(),
                })
            }
        }
    }

    /// Sign in with `credentials`.
    pub async fn login(&self, credentials: &LoginCredentials) -> AuthOutcome {
        self.store.dispatch(SessionEvent::Started);
        let result = self.api.login(credentials).await;
        self.settle_grant(result).await
    }

    /// Create an account and sign it in.
    pub async fn register(&self, registration: &Registration) -> AuthOutcome {
        self.store.dispatch(SessionEvent::Started);
        let result = self.api.register(registration).await;
        self.settle_grant(result).await
    }

    /// Sign out.
    ///
    /// The server is told on a best-effort basis; the token is removed and the
    /// session cleared whatever the outcome.
    pub async fn logout(&self) {
        match self.tokens.get().await {
            Ok(Some(token)) => {
                if let Err(err) = self.api.logout(&token).await {
                    warn!(error = %err, token = %token.fingerprint(), "remote logout failed");
                }
            }
            Ok(None) => debug!("logout without stored token"),
            Err(err) => warn!(error = %err, "token storage unreadable during logout"),
        }
        self.discard_token().await;
        self.store.dispatch(SessionEvent::LoggedOut);
    }

    /// Apply a profile update to the signed-in user.
    ///
    /// Failures leave the session untouched unless the server rejected the
    /// credentials, which signs the user out.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> AuthOutcome {
        match self.api.update_profile(update).await {
            Ok(user) => self.apply_user(user),
            Err(err) => self.settle_action_error(&err, "profile update failed").await,
        }
    }

    /// Change the signed-in user's password.
    pub async fn change_password(&self, change: &PasswordChange) -> AuthOutcome {
        match self.api.change_password(change).await {
            Ok(()) => AuthOutcome::Succeeded,
            Err(err) => self.settle_action_error(&err, "password change failed").await,
        }
    }

    /// Reload the signed-in user's profile from the server.
    pub async fn refresh_user(&self) -> AuthOutcome {
        match self.api.fetch_profile().await {
            Ok(user) => self.apply_user(user),
            Err(err) => self.settle_action_error(&err, "profile refresh failed").await,
        }
    }

    async fn settle_grant(&self, result: Result<AuthGrant, Error>) -> AuthOutcome {
        match result {
            Ok(AuthGrant { token, user }) => {
                if let Err(err) = self.tokens.save(&token).await {
                    warn!(
                        error = %err,
                        token = %token.fingerprint(),
                        "token not persisted; session lasts until restart"
                    );
                }
                self.store.dispatch(SessionEvent::Succeeded {
                    user,
                    token: Some(token),
                });
                AuthOutcome::Succeeded
            }
            Err(err) => {
                debug!(error = %err, "authentication failed");
                self.store.dispatch(SessionEvent::Failed {
                    message: err.message().to_owned(),
                });
                AuthOutcome::failed(&err)
            }
        }
    }

    fn apply_user(&self, user: User) -> AuthOutcome {
        self.store.dispatch(SessionEvent::UserUpdated { user });
        AuthOutcome::Succeeded
    }

    async fn settle_action_error(&self, err: &Error, context: &'static str) -> AuthOutcome {
        warn!(error = %err, "{context}");
        if err.is_auth_rejection() {
            self.discard_token().await;
            self.store.dispatch(SessionEvent::LoggedOut);
        }
        AuthOutcome::failed(err)
    }

    async fn discard_token(&self) {
        if let Err(err) = self.tokens.remove().await {
            warn!(error = %err, "stored token could not be removed");
        }
    }
}

impl<A, T> SessionIdentity for AuthSessionService<A, T>
where
    A: ?Sized + Send + Sync,
    T: ?Sized + Send + Sync,
{
    fn current_user(&self) -> Option<User> {
        let session = self.store.snapshot();
        if session.is_authenticated() {
            session.user().cloned()
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "auth_session_service_tests.rs"]
mod tests;
