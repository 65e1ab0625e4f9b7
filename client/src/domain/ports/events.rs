//! Port for the event listing.

use async_trait::async_trait;

use crate::domain::{BarEvent, Error, EventId};

/// Event queries across all bars.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventQuery: Send + Sync {
    /// Upcoming events.
    async fn upcoming(&self) -> Result<Vec<BarEvent>, Error>;

    /// A single event.
    async fn event(&self, id: &EventId) -> Result<BarEvent, Error>;
}
