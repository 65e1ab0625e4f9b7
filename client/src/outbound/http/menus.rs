//! Menu management under `bars/{id}/menu`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use super::api_client::{ApiClient, Call};
use crate::domain::ports::{MenuCommand, SessionIdentity};
use crate::domain::{BarId, ClientResult, MenuItem, MenuItemDraft, MenuItemId};

/// [`MenuCommand`] over the REST API.
///
/// Every call requires a signed-in business account and fails before any
/// request is made otherwise.
#[derive(Clone)]
pub struct HttpMenuCommand {
    api: Arc<ApiClient>,
    identity: Arc<dyn SessionIdentity>,
}

impl HttpMenuCommand {
    /// Adapter sharing `api`.
    pub fn new(api: Arc<ApiClient>, identity: Arc<dyn SessionIdentity>) -> Self {
        Self { api, identity }
    }
}

#[async_trait]
impl MenuCommand for HttpMenuCommand {
    async fn add_item(&self, bar: &BarId, draft: &MenuItemDraft) -> ClientResult<MenuItem> {
        self.identity.require_business()?;
        let item: MenuItem = self
            .api
            .fetch(Call::new(Method::POST, &["bars", bar.as_ref(), "menu"]).json(draft)?)
            .await?;
        info!(bar = %bar, item = %item.id, "menu item added");
        Ok(item)
    }

    async fn update_item(
        &self,
        bar: &BarId,
        item: &MenuItemId,
        draft: &MenuItemDraft,
    ) -> ClientResult<MenuItem> {
        self.identity.require_business()?;
        self.api
            .fetch(
                Call::new(Method::PUT, &["bars", bar.as_ref(), "menu", item.as_ref()])
                    .json(draft)?,
            )
            .await
    }

    async fn delete_item(&self, bar: &BarId, item: &MenuItemId) -> ClientResult<()> {
        self.identity.require_business()?;
        self.api
            .send(Call::new(
                Method::DELETE,
                &["bars", bar.as_ref(), "menu", item.as_ref()],
            ))
            .await?;
        info!(bar = %bar, item = %item, "menu item deleted");
        Ok(())
    }
}
