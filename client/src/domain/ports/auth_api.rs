//! Port for the remote authentication API.

use async_trait::async_trait;

use crate::domain::{
    AuthGrant, AuthToken, Error, LoginCredentials, PasswordChange, ProfileUpdate, Registration,
    User,
};

/// Remote authentication endpoints. Each method maps exactly one call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token and user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, Error>;

    /// Create an account and sign it in.
    async fn register(&self, registration: &Registration) -> Result<AuthGrant, Error>;

    /// Invalidate `token` on the server.
    async fn logout(&self, token: &AuthToken) -> Result<(), Error>;

    /// Check `token` and return its user. Rejected tokens yield
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized) or
    /// [`ErrorCode::Forbidden`](crate::domain::ErrorCode::Forbidden).
    async fn validate_token(&self, token: &AuthToken) -> Result<User, Error>;

    /// Fetch the signed-in user's profile.
    async fn fetch_profile(&self) -> Result<User, Error>;

    /// Apply a partial profile update and return the updated user.
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, Error>;

    /// Change the signed-in user's password.
    async fn change_password(&self, change: &PasswordChange) -> Result<(), Error>;
}
