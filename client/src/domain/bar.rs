//! Bars (venues) and the listing query.

use serde::{Deserialize, Serialize};

use crate::domain::validation::optional_text;
use crate::domain::{BarId, UserId};

/// Bar as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    /// Bar id.
    #[serde(alias = "_id")]
    pub id: BarId,
    /// Venue name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// City the venue is in.
    #[serde(default)]
    pub city: Option<String>,
    /// Cover photo URL.
    #[serde(default, alias = "photo")]
    pub photo_url: Option<String>,
    /// Mean review rating, absent until the first review.
    #[serde(default, alias = "averageRating")]
    pub rating: Option<f64>,
    /// Number of reviews.
    #[serde(default)]
    pub review_count: u32,
    /// Owning business account.
    #[serde(default, alias = "owner")]
    pub owner_id: Option<UserId>,
    /// Opening hours as entered by the owner.
    #[serde(default)]
    pub opening_hours: Option<String>,
}

impl Bar {
    /// Whether `user` owns this venue.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner_id.as_ref() == Some(user)
    }
}

/// Filters for the bar listing. Blank filters are omitted from the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarQuery {
    search: Option<String>,
    city: Option<String>,
}

impl BarQuery {
    /// Listing without filters.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter by free-text search.
    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = optional_text(search);
        self
    }

    /// Filter by city.
    #[must_use]
    pub fn with_city(mut self, city: &str) -> Self {
        self.city = optional_text(city);
        self
    }

    /// Query string pairs in a stable order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [("search", &self.search), ("city", &self.city)]
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|text| (key, text)))
            .collect()
    }
}
