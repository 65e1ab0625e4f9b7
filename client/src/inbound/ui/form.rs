//! Submission state machine shared by the form screens.
//!
//! A form moves `Idle -> Submitting -> Succeeded | Failed`. Entering
//! `Submitting` is a single compare-and-set on the watch channel, so a second
//! submit while a request is in flight is ignored without touching the
//! network.

use std::fmt;
use std::future::Future;

use tokio::sync::watch;
use tracing::debug;

use crate::domain::FieldErrors;

/// Submission phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// Ready for input.
    #[default]
    Idle,
    /// A request is in flight; controls are disabled.
    Submitting,
    /// The last submission completed.
    Succeeded,
    /// The last submission failed.
    Failed {
        /// Message for the error banner.
        message: String,
    },
}

/// Observable form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Submission phase.
    pub phase: FormPhase,
    /// Inline messages from the last validation.
    pub field_errors: FieldErrors,
}

/// Result of a submit or destructive action.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Another submission was in flight; nothing happened.
    Ignored,
    /// The user declined the confirmation.
    Cancelled,
    /// Validation failed; no request was made.
    Invalid(FieldErrors),
    /// The request succeeded.
    Succeeded(T),
    /// The request failed.
    Failed {
        /// Message shown to the user.
        message: String,
    },
}

impl<T> SubmitOutcome<T> {
    /// Whether the request succeeded.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Owner of one form's [`FormState`].
#[derive(Debug)]
pub struct FormController {
    state: watch::Sender<FormState>,
}

impl FormController {
    /// Controller in the idle phase.
    pub fn new() -> Self {
        let (state, _receiver) = watch::channel(FormState::default());
        Self { state }
    }

    /// Current state.
    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every change.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Whether a request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state.borrow().phase == FormPhase::Submitting
    }

    /// Enter `Submitting` unless already there. Returns whether this caller
    /// owns the submission.
    pub fn try_begin(&self) -> bool {
        self.state.send_if_modified(|state| {
            if state.phase == FormPhase::Submitting {
                return false;
            }
            state.phase = FormPhase::Submitting;
            state.field_errors = FieldErrors::new();
            true
        })
    }

    /// Return to `Idle`, clearing the banner and field errors. Also used to
    /// leave `Submitting` after a declined confirmation.
    pub fn reset(&self) {
        self.set_phase(FormPhase::Idle, FieldErrors::new());
    }

    /// Record validation failures and return to `Idle`.
    pub fn reject(&self, errors: FieldErrors) {
        self.set_phase(FormPhase::Idle, errors);
    }

    /// Record a completed submission.
    pub fn succeed(&self) {
        self.set_phase(FormPhase::Succeeded, FieldErrors::new());
    }

    /// Record a failed submission.
    pub fn fail(&self, message: impl Into<String>) {
        self.set_phase(
            FormPhase::Failed {
                message: message.into(),
            },
            FieldErrors::new(),
        );
    }

    fn set_phase(&self, phase: FormPhase, field_errors: FieldErrors) {
        self.state.send_replace(FormState {
            phase,
            field_errors,
        });
    }

    /// Validate, then run `call` with the validated value.
    ///
    /// Ignored while another submission is in flight. Validation failures
    /// are recorded per field and never reach `call`.
    pub async fn run<D, T, E, Fut>(
        &self,
        validate: impl FnOnce() -> Result<D, FieldErrors>,
        call: impl FnOnce(D) -> Fut,
    ) -> SubmitOutcome<T>
    where
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        if !self.try_begin() {
            debug!("submit ignored while in flight");
            return SubmitOutcome::Ignored;
        }
        let value = match validate() {
            Ok(value) => value,
            Err(errors) => {
                self.reject(errors.clone());
                return SubmitOutcome::Invalid(errors);
            }
        };
        match call(value).await {
            Ok(result) => {
                self.succeed();
                SubmitOutcome::Succeeded(result)
            }
            Err(err) => {
                let message = err.to_string();
                self.fail(message.clone());
                SubmitOutcome::Failed { message }
            }
        }
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::Error;
    use rstest::rstest;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn overlapping_submits_make_one_call() {
        let form = Arc::new(FormController::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(Notify::new());

        let first = {
            let form = Arc::clone(&form);
            let calls = Arc::clone(&calls);
            let release = Arc::clone(&release);
            tokio::spawn(async move {
                form.run(
                    || Ok::<_, FieldErrors>(()),
                    |()| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        release.notified().await;
                        Ok::<_, Error>(())
                    },
                )
                .await
            })
        };
        let mut receiver = form.subscribe();
        receiver
            .wait_for(|state| state.phase == FormPhase::Submitting)
            .await
            .expect("form alive");

        let second = form
            .run(
                || Ok::<_, FieldErrors>(()),
                |()| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Error>(())
                },
            )
            .await;
        release.notify_one();

        assert_eq!(second, SubmitOutcome::Ignored);
        assert!(first.await.expect("first submit").is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(form.state().phase, FormPhase::Succeeded);
    }

    #[tokio::test]
    async fn invalid_input_never_calls() {
        let form = FormController::new();
        let mut errors = FieldErrors::new();
        errors.insert("price", "Price is required");

        let outcome = form
            .run(
                || Err::<(), _>(errors.clone()),
                |()| async { Err::<(), _>(Error::internal("must not run")) },
            )
            .await;

        assert_eq!(outcome, SubmitOutcome::Invalid(errors.clone()));
        assert_eq!(form.state().phase, FormPhase::Idle);
        assert_eq!(form.state().field_errors, errors);
    }

    #[rstest]
    #[tokio::test]
    async fn failure_is_recorded_and_form_can_retry() {
        let form = FormController::new();
        let outcome = form
            .run(
                || Ok::<_, FieldErrors>(()),
                |()| async { Err::<(), _>(Error::network("Network error")) },
            )
            .await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Network error".to_owned()
            }
        );
        assert!(form.try_begin(), "failed form accepts a new submit");
        form.reset();
        assert_eq!(form.state(), FormState::default());
    }
}
