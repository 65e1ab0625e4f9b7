//! Login and registration screens driving the session manager.

use std::sync::Arc;

use tokio::sync::watch;

use super::form::{FormController, FormState, SubmitOutcome};
use crate::domain::ports::{AuthApi, Navigator, TokenStore};
use crate::domain::{
    AuthOutcome, AuthSessionService, CredentialsValidationError, FieldErrors, LoginCredentials,
    Registration, RegistrationInput, Route,
};

fn into_result(outcome: AuthOutcome) -> Result<(), String> {
    match outcome {
        AuthOutcome::Succeeded => Ok(()),
        AuthOutcome::Failed { message } => Err(message),
    }
}

fn credential_field(error: &CredentialsValidationError) -> &'static str {
    match error {
        CredentialsValidationError::EmptyEmail | CredentialsValidationError::InvalidEmail => {
            "email"
        }
        CredentialsValidationError::UsernameLength { .. } => "username",
        CredentialsValidationError::PasswordMismatch => "confirmPassword",
        CredentialsValidationError::EmptyPassword
        | CredentialsValidationError::PasswordTooShort { .. }
        | CredentialsValidationError::PasswordUnchanged => "password",
    }
}

/// Sign-in form.
pub struct LoginForm<A: ?Sized, T: ?Sized> {
    session: Arc<AuthSessionService<A, T>>,
    navigator: Arc<dyn Navigator>,
    destination: Route,
    form: FormController,
}

impl<A, T> LoginForm<A, T>
where
    A: AuthApi + ?Sized,
    T: TokenStore + ?Sized,
{
    /// Form that navigates to `destination` once signed in.
    pub fn new(
        session: Arc<AuthSessionService<A, T>>,
        navigator: Arc<dyn Navigator>,
        destination: Route,
    ) -> Self {
        Self {
            session,
            navigator,
            destination,
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

    /// Validate and sign in.
    pub async fn submit(&self, email: &str, password: &str) -> SubmitOutcome<()> {
        let outcome = self
            .form
            .run(
                || {
                    LoginCredentials::try_from_parts(email, password).map_err(|err| {
                        let mut errors = FieldErrors::new();
                        errors.insert(credential_field(&err), err);
                        errors
                    })
                },
                |credentials| async move { into_result(self.session.login(&credentials).await) },
            )
            .await;
        if outcome.is_success() {
            self.navigator.navigate(self.destination.clone());
        }
        outcome
    }

    /// Go to the registration screen.
    pub fn go_to_register(&self) {
        self.navigator.navigate(Route::Register);
    }
}

/// Account creation form.
pub struct RegisterForm<A: ?Sized, T: ?Sized> {
    session: Arc<AuthSessionService<A, T>>,
    navigator: Arc<dyn Navigator>,
    destination: Route,
    form: FormController,
}

impl<A, T> RegisterForm<A, T>
where
    A: AuthApi + ?Sized,
    T: TokenStore + ?Sized,
{
    /// Form that navigates to `destination` once the account exists.
    pub fn new(
        session: Arc<AuthSessionService<A, T>>,
        navigator: Arc<dyn Navigator>,
        destination: Route,
    ) -> Self {
        Self {
            session,
            navigator,
            destination,
            form: FormController::new(),
        }
    }

    /// Current form state.
    pub fn state(&self) -> FormState {
        self.form.state()
    }

    /// Validate and register.
    pub async fn submit(&self, input: &RegistrationInput<'_>) -> SubmitOutcome<()> {
        let outcome = self
            .form
            .run(
                || Registration::try_from_input(input),
                |registration| async move {
                    into_result(self.session.register(&registration).await)
                },
            )
            .await;
        if outcome.is_success() {
            self.navigator.navigate(self.destination.clone());
        }
        outcome
    }

    /// Go to the sign-in screen.
    pub fn go_to_login(&self) {
        self.navigator.navigate(Route::Login);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockAuthApi, MockNavigator, MockTokenStore};
    use crate::domain::user::fixtures::personal_user;
    use crate::domain::{AccountType, AuthGrant, AuthToken, Error};
    use rstest::rstest;

    type Service = AuthSessionService<MockAuthApi, MockTokenStore>;

    fn grant() -> AuthGrant {
        AuthGrant {
            token: AuthToken::new("fresh-token").expect("token"),
            user: personal_user(),
        }
    }

    fn navigator_expecting(route: Route) -> MockNavigator {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .withf(move |target| *target == route)
            .times(1)
            .return_const(());
        navigator
    }

    #[rstest]
    #[case("", "hunter22", "email")]
    #[case("not-an-email", "hunter22", "email")]
    #[case("ada@example.com", "", "password")]
    #[tokio::test]
    async fn login_validation_marks_field(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let mut api = MockAuthApi::new();
        api.expect_login().times(0);
        let service: Arc<Service> = Arc::new(AuthSessionService::new(
            Arc::new(api),
            Arc::new(MockTokenStore::new()),
        ));
        let form = LoginForm::new(service, Arc::new(MockNavigator::new()), Route::Home);

        let outcome = form.submit(email, password).await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref errors) if errors.contains(field)));
    }

    #[tokio::test]
    async fn login_success_navigates_to_destination() {
        let mut api = MockAuthApi::new();
        api.expect_login().times(1).return_once(|_| Ok(grant()));
        let mut tokens = MockTokenStore::new();
        tokens.expect_save().times(1).return_once(|_| Ok(()));
        let service = Arc::new(AuthSessionService::new(Arc::new(api), Arc::new(tokens)));
        let form = LoginForm::new(
            Arc::clone(&service),
            Arc::new(navigator_expecting(Route::Home)),
            Route::Home,
        );

        assert!(form.submit("ada@example.com", "hunter22").await.is_success());
        assert!(service.session().is_authenticated());
    }

    #[tokio::test]
    async fn login_failure_shows_server_message() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .times(1)
            .return_once(|_| Err(Error::unauthorized("Invalid email or password")));
        let service: Arc<Service> = Arc::new(AuthSessionService::new(
            Arc::new(api),
            Arc::new(MockTokenStore::new()),
        ));
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().times(0);
        let form = LoginForm::new(service, Arc::new(navigator), Route::Home);

        let outcome = form.submit("ada@example.com", "wrong-pass").await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Invalid email or password".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn register_mismatch_reports_confirmation_field() {
        let mut api = MockAuthApi::new();
        api.expect_register().times(0);
        let service: Arc<Service> = Arc::new(AuthSessionService::new(
            Arc::new(api),
            Arc::new(MockTokenStore::new()),
        ));
        let form = RegisterForm::new(service, Arc::new(MockNavigator::new()), Route::Home);
        let input = RegistrationInput {
            username: "ada",
            email: "ada@example.com",
            password: "hunter22",
            confirm_password: "hunter23",
            account_type: AccountType::Personal,
            ..RegistrationInput::default()
        };

        let outcome = form.submit(&input).await;

        assert!(
            matches!(outcome, SubmitOutcome::Invalid(ref errors) if errors.contains("confirmPassword"))
        );
    }

    #[tokio::test]
    async fn register_success_signs_in() {
        let mut api = MockAuthApi::new();
        api.expect_register().times(1).return_once(|_| Ok(grant()));
        let mut tokens = MockTokenStore::new();
        tokens.expect_save().times(1).return_once(|_| Ok(()));
        let service = Arc::new(AuthSessionService::new(Arc::new(api), Arc::new(tokens)));
        let form = RegisterForm::new(
            Arc::clone(&service),
            Arc::new(navigator_expecting(Route::Home)),
            Route::Home,
        );
        let input = RegistrationInput {
            username: "ada",
            email: "ada@example.com",
            password: "hunter22",
            confirm_password: "hunter22",
            ..RegistrationInput::default()
        };

        assert!(form.submit(&input).await.is_success());
        assert!(service.session().is_authenticated());
    }
}
