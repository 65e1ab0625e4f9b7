//! Bar listing and per-bar collections under `bars/`.

use std::sync::Arc;

use async_trait::async_trait;

use super::api_client::{ApiClient, Call};
use crate::domain::ports::{BarCatalogue, SessionIdentity};
use crate::domain::{Bar, BarEvent, BarId, BarQuery, ClientResult, MenuItem, MenuItemType, Review};

/// [`BarCatalogue`] over the REST API.
#[derive(Clone)]
pub struct HttpBarCatalogue {
    api: Arc<ApiClient>,
    identity: Arc<dyn SessionIdentity>,
}

impl HttpBarCatalogue {
    /// Adapter sharing `api`; `identity` gates the owner-only listing.
    pub fn new(api: Arc<ApiClient>, identity: Arc<dyn SessionIdentity>) -> Self {
        Self { api, identity }
    }
}

#[async_trait]
impl BarCatalogue for HttpBarCatalogue {
    async fn list_bars(&self, query: &BarQuery) -> ClientResult<Vec<Bar>> {
        let pairs = query.pairs();
        self.api.fetch(Call::get(&["bars"]).query(&pairs)).await
    }

    async fn bar(&self, id: &BarId) -> ClientResult<Bar> {
        self.api.fetch(Call::get(&["bars", id.as_ref()])).await
    }

    async fn menu(&self, id: &BarId, section: Option<MenuItemType>) -> ClientResult<Vec<MenuItem>> {
        match section {
            None => self.api.fetch(Call::get(&["bars", id.as_ref(), "menu"])).await,
            Some(kind) => {
                self.api
                    .fetch(Call::get(&["bars", id.as_ref(), "menu", kind.menu_segment()]))
                    .await
            }
        }
    }

    async fn bar_events(&self, id: &BarId) -> ClientResult<Vec<BarEvent>> {
        self.api
            .fetch(Call::get(&["bars", id.as_ref(), "events"]))
            .await
    }

    async fn bar_reviews(&self, id: &BarId) -> ClientResult<Vec<Review>> {
        self.api
            .fetch(Call::get(&["bars", id.as_ref(), "reviews"]))
            .await
    }

    async fn my_bars(&self) -> ClientResult<Vec<Bar>> {
        self.identity.require_user()?;
        self.api.fetch(Call::get(&["bars", "mine"])).await
    }
}
