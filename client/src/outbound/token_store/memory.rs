//! Process-local token store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::AuthToken;
use crate::domain::ports::{TokenStore, TokenStoreError};

/// [`TokenStore`] that forgets the token when the process exits.
///
/// Used when no data directory is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl MemoryTokenStore {
    /// Store already holding `token`.
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }

    fn slot(&self) -> Result<MutexGuard<'_, Option<AuthToken>>, TokenStoreError> {
        self.token
            .lock()
            .map_err(|_| TokenStoreError::unavailable("token slot poisoned"))
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(&self, token: &AuthToken) -> Result<(), TokenStoreError> {
        *self.slot()? = Some(token.clone());
        Ok(())
    }

    async fn get(&self) -> Result<Option<AuthToken>, TokenStoreError> {
        Ok(self.slot()?.clone())
    }

    async fn remove(&self) -> Result<(), TokenStoreError> {
        *self.slot()? = None;
        Ok(())
    }
}
