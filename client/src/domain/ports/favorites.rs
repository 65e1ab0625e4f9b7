//! Port for the signed-in user's favorite bars.

use async_trait::async_trait;

use crate::domain::{BarId, Error, Favorite};

/// Favorite management. Every call requires a signed-in user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Favorites: Send + Sync {
    /// Add `bar` to the favorites.
    async fn add(&self, bar: &BarId) -> Result<(), Error>;

    /// Remove `bar` from the favorites.
    async fn remove(&self, bar: &BarId) -> Result<(), Error>;

    /// Whether `bar` is a favorite.
    async fn is_favorite(&self, bar: &BarId) -> Result<bool, Error>;

    /// All favorites, most recent first as ordered by the server.
    async fn list(&self) -> Result<Vec<Favorite>, Error>;
}
