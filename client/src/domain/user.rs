//! User data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier carried surrounding whitespace.
    InvalidId,
    /// The e-mail address was blank.
    EmptyEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must not contain surrounding whitespace"),
            Self::EmptyEmail => write!(f, "user email must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier issued by the API.
///
/// The server owns the identifier format, so the client only rejects blank or
/// padded values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Account role. Business accounts own venues and manage their menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Venue owner.
    Business,
    /// Ordinary account used to browse, review and favorite bars.
    #[default]
    #[serde(rename = "user", alias = "customer", alias = "personal")]
    Personal,
}

impl AccountType {
    /// Wire representation used by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Personal => "user",
        }
    }
}

/// Optional profile fields attached to a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Free-form biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Application user as seen by the client.
///
/// ## Invariants
/// - `id` is non-empty and unpadded.
/// - `email` is non-empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    email: String,
    username: String,
    account_type: AccountType,
    profile: UserProfile,
    created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        username: impl Into<String>,
        account_type: AccountType,
    ) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self {
            id,
            email,
            username: username.into(),
            account_type,
            profile: UserProfile::default(),
            created_at: None,
        })
    }

    /// Replace the optional profile fields.
    #[must_use]
    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Record when the account was created.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login e-mail address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Public handle.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Account role.
    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Whether the account may manage venues.
    pub fn is_business(&self) -> bool {
        self.account_type == AccountType::Business
    }

    /// Optional profile fields.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Account creation time, when the server reports it.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Name shown in headers and review bylines.
    ///
    /// Uses the first and last name when present, otherwise the username.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [&self.profile.first_name, &self.profile.last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            self.username.clone()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    #[serde(alias = "_id")]
    id: String,
    email: String,
    #[serde(default)]
    username: String,
    #[serde(default, alias = "userType", alias = "role")]
    account_type: AccountType,
    #[serde(flatten)]
    profile: UserProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            email,
            username,
            account_type,
            profile,
            created_at,
        } = value;
        Self {
            id: id.into(),
            email,
            username,
            account_type,
            profile,
            created_at,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let user = User::new(
            UserId::try_from(value.id)?,
            value.email,
            value.username,
            value.account_type,
        )?
        .with_profile(value.profile);
        Ok(match value.created_at {
            Some(created_at) => user.with_created_at(created_at),
            None => user,
        })
    }
}

/// Partial profile update sent to the API. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New public handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New biography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update carries no changes.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
