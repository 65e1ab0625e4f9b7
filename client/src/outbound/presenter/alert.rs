//! Confirmation presenter backed by native system alerts.
//!
//! Mobile shells expose their alert dialog as a blocking call; the presenter
//! runs it on the tokio blocking pool so the async runtime keeps serving
//! other tasks while the dialog is up.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{ConfirmationPresenter, ConfirmationPrompt, Notice};

/// Blocking alert API provided by the host shell.
#[cfg_attr(test, mockall::automock)]
pub trait AlertBridge: Send + Sync + 'static {
    /// Show a one-button alert and return once it is dismissed.
    fn show_notice(&self, notice: &Notice);

    /// Show a two-button alert and return whether the confirm button won.
    fn ask(&self, prompt: &ConfirmationPrompt) -> bool;
}

/// [`ConfirmationPresenter`] delegating to an [`AlertBridge`].
pub struct NativeAlertPresenter<B: ?Sized> {
    bridge: Arc<B>,
}

impl<B: ?Sized> NativeAlertPresenter<B> {
    /// Presenter over `bridge`.
    pub const fn new(bridge: Arc<B>) -> Self {
        Self { bridge }
    }
}

#[async_trait]
impl<B: AlertBridge + ?Sized> ConfirmationPresenter for NativeAlertPresenter<B> {
    async fn notify(&self, notice: &Notice) {
        let bridge = Arc::clone(&self.bridge);
        let notice = notice.clone();
        if let Err(err) = tokio::task::spawn_blocking(move || bridge.show_notice(&notice)).await {
            warn!(error = %err, "native alert failed");
        }
    }

    async fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        let bridge = Arc::clone(&self.bridge);
        let prompt = prompt.clone();
        match tokio::task::spawn_blocking(move || bridge.ask(&prompt)).await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(error = %err, "native confirmation failed; treating as cancelled");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn confirm_returns_bridge_answer(#[case] answer: bool) {
        let mut bridge = MockAlertBridge::new();
        bridge
            .expect_ask()
            .withf(|prompt| prompt.destructive)
            .times(1)
            .return_const(answer);
        let presenter = NativeAlertPresenter::new(Arc::new(bridge));

        let prompt = ConfirmationPrompt::destructive("Delete review", "This cannot be undone.");
        assert_eq!(presenter.confirm(&prompt).await, answer);
    }

    #[tokio::test]
    async fn notify_shows_notice_once() {
        let mut bridge = MockAlertBridge::new();
        bridge
            .expect_show_notice()
            .withf(|notice| notice.title == "Saved")
            .times(1)
            .return_const(());
        let presenter = NativeAlertPresenter::new(Arc::new(bridge));

        presenter
            .notify(&Notice::success("Saved", "Menu item added"))
            .await;
    }
}
