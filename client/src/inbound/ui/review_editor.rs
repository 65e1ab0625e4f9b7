//! Review editor controller: create, edit and delete the signed-in user's
//! review of one bar.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info};

use super::form::{FormController, FormState, SubmitOutcome};
use crate::domain::ports::{ConfirmationPresenter, ConfirmationPrompt, Navigator, Notice, Reviews};
use crate::domain::{BarId, ClientResult, Review, ReviewDraft, ReviewInput, Route};

/// Whether the editor posts a new review or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// No review of this bar yet.
    Create,
    /// The user already reviewed this bar.
    Edit,
}

/// Drives the review editor of one bar.
pub struct ReviewEditor {
    bar: BarId,
    existing: Mutex<Option<Review>>,
    reviews: Arc<dyn Reviews>,
    presenter: Arc<dyn ConfirmationPresenter>,
    navigator: Arc<dyn Navigator>,
    form: FormController,
}

impl ReviewEditor {
    /// Editor for `bar`, in create mode until [`ReviewEditor::load`] finds
    /// an existing review.
    pub fn new(
        bar: BarId,
        reviews: Arc<dyn Reviews>,
        presenter: Arc<dyn ConfirmationPresenter>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            bar,
            existing: Mutex::new(None),
            reviews,
            presenter,
            navigator,
            form: FormController::new(),
        }
    }

    /// Look up the user's review of the bar and return the editor prefill.
    ///
    /// # Errors
    ///
    /// Propagates the lookup failure; the editor stays in create mode.
    pub async fn load(&self) -> ClientResult<ReviewInput> {
        let review = self.reviews.mine_for_bar(&self.bar).await?;
        let input = review
            .as_ref()
            .map_or_else(ReviewInput::default, ReviewInput::from_review);
        self.set_existing(review);
        Ok(input)
    }

    /// Current mode.
    pub fn mode(&self) -> EditorMode {
        if self.existing().is_some() {
            EditorMode::Edit
        } else {
            EditorMode::Create
        }
    }

    /// Editor fields for the current mode.
    pub fn initial_input(&self) -> ReviewInput {
        self.existing()
            .as_ref()
            .map_or_else(ReviewInput::default, ReviewInput::from_review)
    }

    /// Current form state.
    pub fn state(&self) -> FormState {
        self.form.state()
    }

    /// Receiver notified on form changes.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.form.subscribe()
    }

    /// Validate `input`, then create or update the review.
    ///
    /// A duplicate create surfaces the server's conflict message; the editor
    /// does not switch to edit mode on its own.
    pub async fn submit(&self, input: &ReviewInput) -> SubmitOutcome<Review> {
        let existing_id = self.existing().map(|review| review.id);
        let editing = existing_id.is_some();
        let outcome = self
            .form
            .run(
                || ReviewDraft::try_from_input(input),
                |draft| async move {
                    match existing_id {
                        Some(id) => self.reviews.update(&id, &draft).await,
                        None => self.reviews.create(&self.bar, &draft).await,
                    }
                },
            )
            .await;
        match &outcome {
            SubmitOutcome::Succeeded(review) => {
                info!(bar = %self.bar, review = %review.id, editing, "review saved");
                self.set_existing(Some(review.clone()));
                let message = if editing {
                    "Review updated successfully"
                } else {
                    "Review submitted successfully"
                };
                self.presenter
                    .notify(&Notice::success("Success", message))
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

    /// Delete the existing review after the user confirms.
    pub async fn delete(&self) -> SubmitOutcome<()> {
        let Some(review) = self.existing() else {
            debug!(bar = %self.bar, "nothing to delete");
            return SubmitOutcome::Ignored;
        };
        if !self.form.try_begin() {
            debug!("delete ignored while in flight");
            return SubmitOutcome::Ignored;
        }
        let prompt = ConfirmationPrompt::destructive(
            "Delete Review",
            "Are you sure you want to delete this review?",
        );
        if !self.presenter.confirm(&prompt).await {
            self.form.reset();
            return SubmitOutcome::Cancelled;
        }

        match self.reviews.delete(&review.id).await {
            Ok(()) => {
                info!(bar = %self.bar, review = %review.id, "review deleted");
                self.set_existing(None);
                self.form.succeed();
                self.presenter
                    .notify(&Notice::success("Success", "Review deleted successfully"))
                    .await;
                self.navigator.navigate(Route::Back);
                SubmitOutcome::Succeeded(())
            }
            Err(err) => {
                let message = err.message().to_owned();
                self.form.fail(message.clone());
                self.presenter.notify(&Notice::error("Error", &message)).await;
                SubmitOutcome::Failed { message }
            }
        }
    }

    fn existing(&self) -> Option<Review> {
        self.existing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_existing(&self, review: Option<Review>) {
        *self.existing.lock().unwrap_or_else(PoisonError::into_inner) = review;
    }
}
