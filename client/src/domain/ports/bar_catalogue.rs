//! Read-side port for bars and everything listed on a bar page.

use async_trait::async_trait;

use crate::domain::{Bar, BarEvent, BarId, BarQuery, Error, MenuItem, MenuItemType, Review};

/// Bar listing, detail and per-bar collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BarCatalogue: Send + Sync {
    /// Bars matching `query`.
    async fn list_bars(&self, query: &BarQuery) -> Result<Vec<Bar>, Error>;

    /// A single bar.
    async fn bar(&self, id: &BarId) -> Result<Bar, Error>;

    /// The bar's menu, optionally limited to one section.
    async fn menu(&self, id: &BarId, section: Option<MenuItemType>) -> Result<Vec<MenuItem>, Error>;

    /// Events hosted by the bar.
    async fn bar_events(&self, id: &BarId) -> Result<Vec<BarEvent>, Error>;

    /// Reviews written about the bar.
    async fn bar_reviews(&self, id: &BarId) -> Result<Vec<Review>, Error>;

    /// Bars owned by the signed-in business user.
    async fn my_bars(&self) -> Result<Vec<Bar>, Error>;
}
