//! View-model controllers for the form screens and the access guard.

mod access_guard;
mod add_menu_item;
mod auth_forms;
mod form;
mod review_editor;

pub use access_guard::{AccessGuard, AccessRequirement, AccessView, evaluate};
pub use add_menu_item::AddMenuItemController;
pub use auth_forms::{LoginForm, RegisterForm};
pub use form::{FormController, FormPhase, FormState, SubmitOutcome};
pub use review_editor::{EditorMode, ReviewEditor};
