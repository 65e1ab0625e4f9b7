//! Review endpoints under `reviews/`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use super::api_client::{ApiClient, Call};
use super::dto::ReviewCheckDto;
use crate::domain::ports::{Reviews, SessionIdentity};
use crate::domain::{
    BarId, ClientResult, ErrorCode, NewReview, Review, ReviewDraft, ReviewId, ReviewStats,
};

/// [`Reviews`] over the REST API.
#[derive(Clone)]
pub struct HttpReviews {
    api: Arc<ApiClient>,
    identity: Arc<dyn SessionIdentity>,
}

impl HttpReviews {
    /// Adapter sharing `api`.
    pub fn new(api: Arc<ApiClient>, identity: Arc<dyn SessionIdentity>) -> Self {
        Self { api, identity }
    }
}

#[async_trait]
impl Reviews for HttpReviews {
    async fn create(&self, bar: &BarId, draft: &ReviewDraft) -> ClientResult<Review> {
        self.identity.require_user()?;
        let body = NewReview { bar_id: bar, draft };
        self.api
            .fetch(Call::new(Method::POST, &["reviews"]).json(&body)?)
            .await
    }

    async fn update(&self, id: &ReviewId, draft: &ReviewDraft) -> ClientResult<Review> {
        self.identity.require_user()?;
        self.api
            .fetch(Call::new(Method::PUT, &["reviews", id.as_ref()]).json(draft)?)
            .await
    }

    async fn delete(&self, id: &ReviewId) -> ClientResult<()> {
        self.identity.require_user()?;
        self.api
            .send(Call::new(Method::DELETE, &["reviews", id.as_ref()]))
            .await
    }

    async fn mine_for_bar(&self, bar: &BarId) -> ClientResult<Option<Review>> {
        self.identity.require_user()?;
        let result: ClientResult<ReviewCheckDto> = self
            .api
            .fetch(Call::get(&["reviews", "check", bar.as_ref()]))
            .await;
        match result {
            Ok(check) => Ok(check.review),
            Err(err) if err.code() == ErrorCode::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn stats(&self, bar: &BarId) -> ClientResult<ReviewStats> {
        self.api
            .fetch(Call::get(&["reviews", "stats", bar.as_ref()]))
            .await
    }

    async fn my_reviews(&self) -> ClientResult<Vec<Review>> {
        let user = self.identity.require_user()?;
        self.api
            .fetch(Call::get(&["reviews", "user", user.id().as_ref()]))
            .await
    }
}
