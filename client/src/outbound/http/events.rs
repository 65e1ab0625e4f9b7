//! Event listing under `events/`.

use std::sync::Arc;

use async_trait::async_trait;

use super::api_client::{ApiClient, Call};
use crate::domain::ports::EventQuery;
use crate::domain::{BarEvent, ClientResult, EventId};

/// [`EventQuery`] over the REST API.
#[derive(Clone)]
pub struct HttpEventQuery {
    api: Arc<ApiClient>,
}

impl HttpEventQuery {
    /// Adapter sharing `api`.
    pub const fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EventQuery for HttpEventQuery {
    async fn upcoming(&self) -> ClientResult<Vec<BarEvent>> {
        self.api.fetch(Call::get(&["events"])).await
    }

    async fn event(&self, id: &EventId) -> ClientResult<BarEvent> {
        self.api.fetch(Call::get(&["events", id.as_ref()])).await
    }
}
