//! Confirmation presenter implementations.
//!
//! [`NativeAlertPresenter`] serves mobile shells, [`ModalPresenter`] the web
//! shell. The composition root picks one per platform.

mod alert;
mod modal;

#[cfg(test)]
pub use alert::MockAlertBridge;
pub use alert::{AlertBridge, NativeAlertPresenter};
pub use modal::{ModalContent, ModalPresenter, ModalState};
