//! Port through which controllers request navigation.

use crate::domain::Route;

/// Screen navigation owned by the UI shell.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Go to `route`.
    fn navigate(&self, route: Route);
}
