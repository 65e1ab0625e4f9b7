//! "Add menu item" screen controller.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use super::form::{FormController, FormState, SubmitOutcome};
use crate::domain::ports::{ConfirmationPresenter, MenuCommand, Navigator, Notice};
use crate::domain::{BarId, MenuItem, MenuItemDraft, MenuItemInput, Route};

/// Drives the add-menu-item form of one bar.
///
/// On success the presenter confirms and the screen navigates back; on
/// failure the server message is shown and the form stays editable.
pub struct AddMenuItemController {
    bar: BarId,
    menus: Arc<dyn MenuCommand>,
    presenter: Arc<dyn ConfirmationPresenter>,
    navigator: Arc<dyn Navigator>,
    form: FormController,
}

impl AddMenuItemController {
    /// Controller for adding items to `bar`.
    pub fn new(
        bar: BarId,
        menus: Arc<dyn MenuCommand>,
        presenter: Arc<dyn ConfirmationPresenter>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            bar,
            menus,
            presenter,
            navigator,
            form: FormController::new(),
        }
    }

    /// Current form state.
    pub fn state(&self) -> FormState {
        self.form.state()
    }

    /// Receiver notified on form changes.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.form.subscribe()
    }

    /// Validate `input` and add the item.
    pub async fn submit(&self, input: &MenuItemInput) -> SubmitOutcome<MenuItem> {
        let outcome = self
            .form
            .run(
                || MenuItemDraft::try_from_input(input),
                |draft| async move { self.menus.add_item(&self.bar, &draft).await },
            )
            .await;
        match &outcome {
            SubmitOutcome::Succeeded(item) => {
                info!(bar = %self.bar, item = %item.id, "menu item created from form");
                self.presenter
                    .notify(&Notice::success("Success", "Menu item added successfully"))
                    .await;
                self.navigator.navigate(Route::Back);
            }
            SubmitOutcome::Failed { message } => {
                self.presenter.notify(&Notice::error("Error", message)).await;
            }
            SubmitOutcome::Ignored | SubmitOutcome::Cancelled | SubmitOutcome::Invalid(_) => {}
        }
        outcome
    }

    /// Leave the screen without saving.
    pub fn cancel(&self) {
        self.form.reset();
        self.navigator.navigate(Route::Back);
    }
}
