//! Authentication primitives: credentials, registrations and bearer tokens.
//!
//! Keep raw form input parsing out of the session service by exposing
//! constructors that validate string inputs before anything talks to a port.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::validation::{FieldErrors, optional_text};
use crate::domain::{AccountType, User};

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 6;
/// Minimum accepted username length.
pub const USERNAME_MIN: usize = 3;
/// Maximum accepted username length.
pub const USERNAME_MAX: usize = 30;

/// Length of a token fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Domain error returned when authentication inputs are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// E-mail was missing or blank once trimmed.
    EmptyEmail,
    /// E-mail does not look like `local@domain.tld`.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
    /// Password is shorter than [`PASSWORD_MIN`].
    PasswordTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// Password confirmation differs from the password.
    PasswordMismatch,
    /// New password equals the current one.
    PasswordUnchanged,
    /// Username length falls outside the accepted range.
    UsernameLength {
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
    },
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email is required"),
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::EmptyPassword => write!(f, "password is required"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordMismatch => write!(f, "passwords do not match"),
            Self::PasswordUnchanged => {
                write!(f, "new password must differ from the current password")
            }
            Self::UsernameLength { min, max } => {
                write!(f, "username must be between {min} and {max} characters")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

fn normalise_email(email: &str) -> Result<String, CredentialsValidationError> {
    let normalised = email.trim().to_lowercase();
    if normalised.is_empty() {
        return Err(CredentialsValidationError::EmptyEmail);
    }
    if !email_regex().is_match(&normalised) {
        return Err(CredentialsValidationError::InvalidEmail);
    }
    Ok(normalised)
}

fn check_new_password(password: &str) -> Result<(), CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    if password.chars().count() < PASSWORD_MIN {
        return Err(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
    }
    Ok(())
}

fn serialize_secret<S: Serializer>(
    secret: &Zeroizing<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.as_str())
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and shaped like an address.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use client::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.com ", "secret").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    email: String,
    #[serde(serialize_with = "serialize_secret")]
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = normalise_email(email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised e-mail address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Raw registration form input.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput<'a> {
    /// Desired public handle.
    pub username: &'a str,
    /// Login e-mail.
    pub email: &'a str,
    /// Chosen password.
    pub password: &'a str,
    /// Password typed a second time.
    pub confirm_password: &'a str,
    /// Requested account role.
    pub account_type: AccountType,
    /// Optional given name.
    pub first_name: &'a str,
    /// Optional family name.
    pub last_name: &'a str,
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    username: String,
    email: String,
    #[serde(serialize_with = "serialize_secret")]
    password: Zeroizing<String>,
    account_type: AccountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
}

impl Registration {
    /// Validate registration form input.
    ///
    /// Errors are reported per field so forms can render them inline.
    pub fn try_from_input(input: &RegistrationInput<'_>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = input.username.trim();
        let length = username.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
            errors.insert(
                "username",
                CredentialsValidationError::UsernameLength {
                    min: USERNAME_MIN,
                    max: USERNAME_MAX,
                },
            );
        }

        let email = match normalise_email(input.email) {
            Ok(email) => email,
            Err(err) => {
                errors.insert("email", err);
                String::new()
            }
        };

        if let Err(err) = check_new_password(input.password) {
            errors.insert("password", err);
        } else if input.password != input.confirm_password {
            errors.insert(
                "confirmPassword",
                CredentialsValidationError::PasswordMismatch,
            );
        }

        errors.into_result(|| Self {
            username: username.to_owned(),
            email,
            password: Zeroizing::new(input.password.to_owned()),
            account_type: input.account_type,
            first_name: optional_text(input.first_name),
            last_name: optional_text(input.last_name),
        })
    }

    /// Public handle.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Normalised e-mail.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Requested account role.
    pub fn account_type(&self) -> AccountType {
        self.account_type
    }
}

/// Validated password change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    #[serde(serialize_with = "serialize_secret")]
    current_password: Zeroizing<String>,
    #[serde(serialize_with = "serialize_secret")]
    new_password: Zeroizing<String>,
}

impl PasswordChange {
    /// Validate a password change.
    pub fn try_from_parts(
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<Self, CredentialsValidationError> {
        if current.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        check_new_password(new)?;
        if new != confirm {
            return Err(CredentialsValidationError::PasswordMismatch);
        }
        if new == current {
            return Err(CredentialsValidationError::PasswordUnchanged);
        }
        Ok(Self {
            current_password: Zeroizing::new(current.to_owned()),
            new_password: Zeroizing::new(new.to_owned()),
        })
    }
}

/// Opaque bearer credential issued by the API.
///
/// The value is zeroed on drop and never printed; use
/// [`AuthToken::fingerprint`] to correlate tokens in logs.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Wrap a raw token string, returning `None` when it is blank.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Raw token for the `Authorization` header or storage.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Truncated SHA-256 fingerprint suitable for logs.
    ///
    /// # Examples
    /// ```
    /// use client::domain::AuthToken;
    ///
    /// let token = AuthToken::new("abc").unwrap();
    /// assert_eq!(token.fingerprint().len(), 16);
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self(Zeroizing::new(value))
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&self.fingerprint()).finish()
    }
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    /// Bearer token to persist.
    pub token: AuthToken,
    /// Authenticated user.
    pub user: User,
}
