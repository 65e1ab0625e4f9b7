//! Favorited bars.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// Bar saved by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// The favorited bar.
    #[serde(alias = "barId")]
    pub bar: Bar,
    /// When the favorite was added.
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
}

/// Response of the favorite check endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    /// Whether the bar is in the user's favorites.
    #[serde(alias = "isFavorite")]
    pub favorite: bool,
}
