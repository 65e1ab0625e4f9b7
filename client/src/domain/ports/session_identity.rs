//! Port exposing the signed-in user to code outside the session service.
//!
//! Service clients and controllers receive this handle instead of reading a
//! global.

use crate::domain::{Error, User};

/// Source of the current user.
#[cfg_attr(test, mockall::automock)]
pub trait SessionIdentity: Send + Sync {
    /// Signed-in user, if any.
    fn current_user(&self) -> Option<User>;

    /// Signed-in user or an unauthorized error.
    fn require_user(&self) -> Result<User, Error> {
        self.current_user()
            .ok_or_else(|| Error::unauthorized("You must be logged in to do that"))
    }

    /// Signed-in business user, or an unauthorized/forbidden error.
    fn require_business(&self) -> Result<User, Error> {
        let user = self.require_user()?;
        if user.is_business() {
            Ok(user)
        } else {
            Err(Error::forbidden("A business account is required"))
        }
    }
}

/// Identity with a fixed user, for tests and previews.
#[derive(Debug, Default, Clone)]
pub struct FixtureSessionIdentity {
    user: Option<User>,
}

impl FixtureSessionIdentity {
    /// Identity reporting `user`.
    pub const fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// Identity with nobody signed in.
    pub const fn anonymous() -> Self {
        Self { user: None }
    }
}

impl SessionIdentity for FixtureSessionIdentity {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }
}
