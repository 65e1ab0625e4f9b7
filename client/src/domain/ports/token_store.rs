//! Port for persisting the single authentication token.
//!
//! Storage can be unavailable (a locked keychain, a read-only data
//! directory), so every operation is fallible. Adapters keep at most one
//! token; `save` replaces any previous value.

use async_trait::async_trait;

use crate::domain::AuthToken;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token store adapters.
    pub enum TokenStoreError {
        /// The backing storage could not be reached.
        Unavailable {
            /// Backend failure description.
            message: String,
        } => Storage: "token storage unavailable: {message}",
        /// A stored value exists but is not a usable token.
        Corrupt {
            /// Why the stored value was rejected.
            message: String,
        } => Storage: "stored token is unreadable: {message}",
    }
}

/// Durable storage for the bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist `token`, replacing any stored value.
    async fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError>;

    /// Read the stored token. `Ok(None)` when nothing is stored.
    async fn get(&self) -> Result<Option<AuthToken>, TokenStoreError>;

    /// Delete the stored token. Removing an absent token succeeds.
    async fn remove(&self) -> Result<(), TokenStoreError>;
}
