//! Public profiles under `users/`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use super::api_client::{ApiClient, Call};
use super::dto::UserPayload;
use crate::domain::ports::{SessionIdentity, UserProfiles};
use crate::domain::{ClientResult, ProfileUpdate, User, UserId};

/// [`UserProfiles`] over the REST API.
#[derive(Clone)]
pub struct HttpUserProfiles {
    api: Arc<ApiClient>,
    identity: Arc<dyn SessionIdentity>,
}

impl HttpUserProfiles {
    /// Adapter sharing `api`.
    pub fn new(api: Arc<ApiClient>, identity: Arc<dyn SessionIdentity>) -> Self {
        Self { api, identity }
    }
}

#[async_trait]
impl UserProfiles for HttpUserProfiles {
    async fn profile(&self, id: &UserId) -> ClientResult<User> {
        let payload: UserPayload = self.api.fetch(Call::get(&["users", id.as_ref()])).await?;
        Ok(payload.into())
    }

    async fn update_own_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        let user = self.identity.require_user()?;
        let payload: UserPayload = self
            .api
            .fetch(Call::new(Method::PUT, &["users", user.id().as_ref()]).json(update)?)
            .await?;
        Ok(payload.into())
    }
}
