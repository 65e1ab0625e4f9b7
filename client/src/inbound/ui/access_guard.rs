//! Gate in front of screens that need a signed-in or business user.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::ports::Navigator;
use crate::domain::{Route, Session};

/// Who may see the guarded screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequirement {
    /// Any signed-in user.
    SignedIn,
    /// Business accounts only.
    Business,
}

/// What the guard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessView {
    /// The session is still resolving.
    Loading,
    /// Call to action: sign in or register.
    LoginRequired,
    /// Call to action: upgrade to a business account.
    BusinessAccountRequired,
    /// Render the guarded content.
    Granted,
}

/// Decide the view for `session` under `requirement`.
///
/// # Examples
/// ```
/// use client::domain::Session;
/// use client::inbound::ui::{AccessRequirement, AccessView, evaluate};
///
/// let view = evaluate(&Session::initial(), AccessRequirement::SignedIn);
/// assert_eq!(view, AccessView::Loading);
/// ```
pub fn evaluate(session: &Session, requirement: AccessRequirement) -> AccessView {
    if session.is_loading() {
        return AccessView::Loading;
    }
    if !session.is_authenticated() {
        return AccessView::LoginRequired;
    }
    match requirement {
        AccessRequirement::SignedIn => AccessView::Granted,
        AccessRequirement::Business if session.is_business() => AccessView::Granted,
        AccessRequirement::Business => AccessView::BusinessAccountRequired,
    }
}

/// Session-driven guard bound to one requirement.
pub struct AccessGuard {
    session: watch::Receiver<Session>,
    requirement: AccessRequirement,
    navigator: Arc<dyn Navigator>,
}

impl AccessGuard {
    /// Guard fed by `session` updates.
    pub fn new(
        session: watch::Receiver<Session>,
        requirement: AccessRequirement,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            requirement,
            navigator,
        }
    }

    /// View for the latest session.
    pub fn view(&self) -> AccessView {
        evaluate(&self.session.borrow(), self.requirement)
    }

    /// Wait for the next session change and return the resulting view.
    ///
    /// Returns `None` once the session store is gone.
    pub async fn changed(&mut self) -> Option<AccessView> {
        self.session.changed().await.ok()?;
        Some(evaluate(&self.session.borrow_and_update(), self.requirement))
    }

    /// Primary call to action: sign in, or upgrade the account.
    pub fn on_primary_action(&self) {
        match self.view() {
            AccessView::LoginRequired => self.navigator.navigate(Route::Login),
            AccessView::BusinessAccountRequired => self.navigator.navigate(Route::UpgradeAccount),
            AccessView::Loading | AccessView::Granted => {}
        }
    }

    /// Secondary call to action: register, or leave the screen.
    pub fn on_secondary_action(&self) {
        match self.view() {
            AccessView::LoginRequired => self.navigator.navigate(Route::Register),
            AccessView::BusinessAccountRequired => self.navigator.navigate(Route::Back),
            AccessView::Loading | AccessView::Granted => {}
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockNavigator;
    use crate::domain::user::fixtures::{business_user, personal_user};
    use crate::domain::{SessionEvent, reduce};
    use rstest::rstest;

    fn settled(event: SessionEvent) -> Session {
        reduce(&Session::initial(), event)
    }

    fn signed_in_personal() -> Session {
        settled(SessionEvent::Succeeded {
            user: personal_user(),
            token: None,
        })
    }

    fn signed_in_business() -> Session {
        settled(SessionEvent::Succeeded {
            user: business_user(),
            token: None,
        })
    }

    #[rstest]
    #[case::loading(Session::initial(), AccessRequirement::Business, AccessView::Loading)]
    #[case::signed_out(
        settled(SessionEvent::SettledWithoutUser),
        AccessRequirement::SignedIn,
        AccessView::LoginRequired
    )]
    #[case::failed(
        settled(SessionEvent::Failed { message: "nope".to_owned() }),
        AccessRequirement::Business,
        AccessView::LoginRequired
    )]
    #[case::personal_signed_in(signed_in_personal(), AccessRequirement::SignedIn, AccessView::Granted)]
    #[case::personal_business(
        signed_in_personal(),
        AccessRequirement::Business,
        AccessView::BusinessAccountRequired
    )]
    #[case::business(signed_in_business(), AccessRequirement::Business, AccessView::Granted)]
    fn evaluates_view(
        #[case] session: Session,
        #[case] requirement: AccessRequirement,
        #[case] expected: AccessView,
    ) {
        assert_eq!(evaluate(&session, requirement), expected);
    }

    #[rstest]
    #[case(settled(SessionEvent::LoggedOut), Route::Login, Route::Register)]
    #[case(signed_in_personal(), Route::UpgradeAccount, Route::Back)]
    fn actions_navigate(
        #[case] session: Session,
        #[case] primary: Route,
        #[case] secondary: Route,
    ) {
        let (_sender, receiver) = watch::channel(session);
        let mut navigator = MockNavigator::new();
        let mut sequence = mockall::Sequence::new();
        navigator
            .expect_navigate()
            .withf(move |route| *route == primary)
            .times(1)
            .in_sequence(&mut sequence)
            .return_const(());
        navigator
            .expect_navigate()
            .withf(move |route| *route == secondary)
            .times(1)
            .in_sequence(&mut sequence)
            .return_const(());
        let guard = AccessGuard::new(receiver, AccessRequirement::Business, Arc::new(navigator));

        guard.on_primary_action();
        guard.on_secondary_action();
    }

    #[rstest]
    fn granted_view_has_no_side_effects() {
        let (_sender, receiver) = watch::channel(signed_in_business());
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().times(0);
        let guard = AccessGuard::new(receiver, AccessRequirement::Business, Arc::new(navigator));

        guard.on_primary_action();
        guard.on_secondary_action();
        assert_eq!(guard.view(), AccessView::Granted);
    }

    #[tokio::test]
    async fn follows_session_changes() {
        let (sender, receiver) = watch::channel(Session::initial());
        let mut guard = AccessGuard::new(
            receiver,
            AccessRequirement::SignedIn,
            Arc::new(MockNavigator::new()),
        );
        assert_eq!(guard.view(), AccessView::Loading);

        sender.send_replace(signed_in_personal());
        assert_eq!(guard.changed().await, Some(AccessView::Granted));

        drop(sender);
        assert_eq!(guard.changed().await, None);
    }
}
