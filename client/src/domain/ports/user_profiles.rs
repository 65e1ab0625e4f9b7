//! Port for public user profiles.

use async_trait::async_trait;

use crate::domain::{Error, ProfileUpdate, User, UserId};

/// Profile lookups and updates through the users resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfiles: Send + Sync {
    /// Public profile of `id`.
    async fn profile(&self, id: &UserId) -> Result<User, Error>;

    /// Update the signed-in user's profile.
    async fn update_own_profile(&self, update: &ProfileUpdate) -> Result<User, Error>;
}
