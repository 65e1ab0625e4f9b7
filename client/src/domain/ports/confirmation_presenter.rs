//! Capability for showing notices and asking the user to confirm.
//!
//! Native shells show blocking system alerts, the web shell renders an
//! in-app modal; the composition root picks one implementation.

use async_trait::async_trait;

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Something completed.
    Success,
    /// Something failed.
    Error,
    /// Neutral information.
    Info,
}

/// One-button message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Tone.
    pub kind: NoticeKind,
    /// Heading.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Notice {
    /// Success notice.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Error notice.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Two-button question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    /// Heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Label of the accepting button.
    pub confirm_label: String,
    /// Label of the dismissing button.
    pub cancel_label: String,
    /// Whether accepting destroys data; shells style the button accordingly.
    pub destructive: bool,
}

impl ConfirmationPrompt {
    /// Destructive "Delete" / "Cancel" prompt.
    pub fn destructive(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Delete".to_owned(),
            cancel_label: "Cancel".to_owned(),
            destructive: true,
        }
    }
}

/// Notice and confirmation capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfirmationPresenter: Send + Sync {
    /// Show `notice` and wait for it to be dismissed.
    async fn notify(&self, notice: &Notice);

    /// Ask `prompt`; `true` when the user accepted.
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> bool;
}
