//! Favorites under `users/{userId}/favorites`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use super::api_client::{ApiClient, Call};
use crate::domain::ports::{Favorites, SessionIdentity};
use crate::domain::{BarId, ClientResult, Favorite, FavoriteStatus};

/// [`Favorites`] over the REST API.
#[derive(Clone)]
pub struct HttpFavorites {
    api: Arc<ApiClient>,
    identity: Arc<dyn SessionIdentity>,
}

impl HttpFavorites {
    /// Adapter sharing `api`.
    pub fn new(api: Arc<ApiClient>, identity: Arc<dyn SessionIdentity>) -> Self {
        Self { api, identity }
    }
}

#[async_trait]
impl Favorites for HttpFavorites {
    async fn add(&self, bar: &BarId) -> ClientResult<()> {
        let user = self.identity.require_user()?;
        let segments = ["users", user.id().as_ref(), "favorites", bar.as_ref()];
        self.api.send(Call::new(Method::POST, &segments)).await
    }

    async fn remove(&self, bar: &BarId) -> ClientResult<()> {
        let user = self.identity.require_user()?;
        let segments = ["users", user.id().as_ref(), "favorites", bar.as_ref()];
        self.api.send(Call::new(Method::DELETE, &segments)).await
    }

    async fn is_favorite(&self, bar: &BarId) -> ClientResult<bool> {
        let user = self.identity.require_user()?;
        let segments = ["users", user.id().as_ref(), "favorites", bar.as_ref()];
        let status: FavoriteStatus = self.api.fetch(Call::get(&segments)).await?;
        Ok(status.favorite)
    }

    async fn list(&self) -> ClientResult<Vec<Favorite>> {
        let user = self.identity.require_user()?;
        self.api
            .fetch(Call::get(&["users", user.id().as_ref(), "favorites"]))
            .await
    }
}
