//! In-app modal confirmation presenter.
//!
//! The presenter publishes the modal to show through a watch channel; the UI
//! renders whatever [`ModalPresenter::subscribe`] yields and reports the
//! button press through [`ModalPresenter::respond`]. One modal is shown at a
//! time; later requests wait their turn.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::{oneshot, watch};
use tracing::debug;

use crate::domain::ports::{ConfirmationPresenter, ConfirmationPrompt, Notice};

/// Content of an open modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContent {
    /// One-button notice.
    Notice(Notice),
    /// Two-button confirmation.
    Confirmation(ConfirmationPrompt),
}

/// Modal currently requested by the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    /// Identifier distinguishing consecutive modals.
    pub id: u64,
    /// What to render.
    pub content: ModalContent,
}

type Pending = Option<(u64, oneshot::Sender<bool>)>;

/// [`ConfirmationPresenter`] rendering through app-owned modal state.
#[derive(Debug)]
pub struct ModalPresenter {
    state: watch::Sender<Option<ModalState>>,
    pending: Mutex<Pending>,
    turn: tokio::sync::Mutex<()>,
    next_id: AtomicU64,
}

impl ModalPresenter {
    /// Presenter with no modal open.
    pub fn new() -> Self {
        let (state, _receiver) = watch::channel(None);
        Self {
            state,
            pending: Mutex::new(None),
            turn: tokio::sync::Mutex::new(()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Receiver yielding the modal to render, `None` when closed.
    pub fn subscribe(&self) -> watch::Receiver<Option<ModalState>> {
        self.state.subscribe()
    }

    /// Modal currently open.
    pub fn current(&self) -> Option<ModalState> {
        self.state.borrow().clone()
    }

    /// Report the user's answer for the open modal.
    ///
    /// Returns `false` when no modal was open.
    pub fn respond(&self, accepted: bool) -> bool {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some((id, reply)) = pending else {
            return false;
        };
        self.state.send_replace(None);
        debug!(modal = id, accepted, "modal answered");
        reply.send(accepted).is_ok()
    }

    async fn present(&self, content: ModalContent) -> bool {
        let _turn = self.turn.lock().await;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply, answer) = oneshot::channel();
        *self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some((id, reply));
        self.state.send_replace(Some(ModalState { id, content }));
        answer.await.unwrap_or(false)
    }
}

impl Default for ModalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfirmationPresenter for ModalPresenter {
    async fn notify(&self, notice: &Notice) {
        self.present(ModalContent::Notice(notice.clone())).await;
    }

    async fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        self.present(ModalContent::Confirmation(prompt.clone()))
            .await
    }
}
