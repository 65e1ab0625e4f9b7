//! Events hosted by bars.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BarId, EventId};

/// Event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarEvent {
    /// Event id.
    #[serde(alias = "_id")]
    pub id: EventId,
    /// Hosting bar.
    #[serde(alias = "bar")]
    pub bar_id: BarId,
    /// Headline.
    pub title: String,
    /// Details.
    #[serde(default)]
    pub description: Option<String>,
    /// Start time.
    #[serde(alias = "date", alias = "startDate")]
    pub starts_at: DateTime<Utc>,
    /// End time, when announced.
    #[serde(default, alias = "endDate")]
    pub ends_at: Option<DateTime<Utc>>,
}

impl BarEvent {
    /// Whether the event has not finished at `now`.
    ///
    /// Events without an end time count as finished once they start.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.ends_at.unwrap_or(self.starts_at) >= now
    }
}
