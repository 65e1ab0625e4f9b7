//! Write-side port for menu management by venue owners.

use async_trait::async_trait;

use crate::domain::{BarId, Error, MenuItem, MenuItemDraft, MenuItemId};

/// Menu mutations. Only business accounts may call these.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuCommand: Send + Sync {
    /// Add an item to the bar's menu.
    async fn add_item(&self, bar: &BarId, draft: &MenuItemDraft) -> Result<MenuItem, Error>;

    /// Replace an existing item.
    async fn update_item(
        &self,
        bar: &BarId,
        item: &MenuItemId,
        draft: &MenuItemDraft,
    ) -> Result<MenuItem, Error>;

    /// Remove an item.
    async fn delete_item(&self, bar: &BarId, item: &MenuItemId) -> Result<(), Error>;
}
