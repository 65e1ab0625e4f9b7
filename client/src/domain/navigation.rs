//! Screen routes the controllers may navigate to.

use crate::domain::BarId;

/// Navigation target requested by a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Pop the current screen.
    Back,
    /// Sign-in screen.
    Login,
    /// Account creation screen.
    Register,
    /// Upgrade to a business account.
    UpgradeAccount,
    /// Home / bar listing.
    Home,
    /// Detail page of a bar.
    BarDetail(BarId),
    /// Menu management screen of a bar.
    ManageMenu(BarId),
}
