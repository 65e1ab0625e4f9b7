//! Port for writing and reading reviews.
//!
//! The server is assumed to hold at most one review per user and bar. A
//! duplicate create is reported as [`ErrorCode::Conflict`](crate::domain::ErrorCode::Conflict).

use async_trait::async_trait;

use crate::domain::{BarId, Error, Review, ReviewDraft, ReviewId, ReviewStats};

/// Review endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Reviews: Send + Sync {
    /// Post a review of `bar` as the signed-in user.
    async fn create(&self, bar: &BarId, draft: &ReviewDraft) -> Result<Review, Error>;

    /// Replace the rating and comment of an existing review.
    async fn update(&self, id: &ReviewId, draft: &ReviewDraft) -> Result<Review, Error>;

    /// Delete a review.
    async fn delete(&self, id: &ReviewId) -> Result<(), Error>;

    /// The signed-in user's review of `bar`, if any.
    async fn mine_for_bar(&self, bar: &BarId) -> Result<Option<Review>, Error>;

    /// Rating statistics for `bar`.
    async fn stats(&self, bar: &BarId) -> Result<ReviewStats, Error>;

    /// Every review written by the signed-in user.
    async fn my_reviews(&self) -> Result<Vec<Review>, Error>;
}
