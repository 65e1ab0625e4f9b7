//! Wire-format helpers for Barfinder API payloads.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{AuthGrant, AuthToken, Error, Review, User};

/// Response body that is either bare or wrapped in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Server-supplied error text: `message`, then `error` (string or object
/// carrying a `message`).
pub(crate) fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let from_error = |error: &Value| match error {
        Value::String(text) => Some(text.clone()),
        Value::Object(fields) => fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    };
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .filter(|text| !text.trim().is_empty())
        .or_else(|| value.get("error").and_then(from_error))
        .filter(|text| !text.trim().is_empty())
}

/// `{ token, user }` returned by login and register.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthGrantDto {
    token: String,
    user: User,
}

impl TryFrom<AuthGrantDto> for AuthGrant {
    type Error = Error;

    fn try_from(value: AuthGrantDto) -> Result<Self, Self::Error> {
        let token = AuthToken::new(value.token)
            .ok_or_else(|| Error::internal("server issued an empty token"))?;
        Ok(Self {
            token,
            user: value.user,
        })
    }
}

/// User payload, either bare or under a `user` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UserPayload {
    Keyed { user: User },
    Bare(User),
}

impl From<UserPayload> for User {
    fn from(value: UserPayload) -> Self {
        match value {
            UserPayload::Keyed { user } | UserPayload::Bare(user) => user,
        }
    }
}

/// Response of `reviews/check/{barId}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ReviewCheckDto {
    #[serde(default)]
    pub(crate) review: Option<Review>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(br#"{"message": "Bar not found"}"#.as_slice(), Some("Bar not found"))]
    #[case(br#"{"message": " ", "error": "Forbidden"}"#.as_slice(), Some("Forbidden"))]
    #[case(br#"{"error": {"message": "Token expired"}}"#.as_slice(), Some("Token expired"))]
    #[case(br#"{"error": 42}"#.as_slice(), None)]
    #[case(b"Service Unavailable".as_slice(), None)]
    fn extracts_server_message(#[case] body: &[u8], #[case] expected: Option<&str>) {
        assert_eq!(error_message(body).as_deref(), expected);
    }

    #[rstest]
    fn blank_token_is_rejected() {
        let dto: AuthGrantDto = serde_json::from_value(serde_json::json!({
            "token": "  ",
            "user": {"id": "u-1", "email": "ada@example.com", "username": "ada"},
        }))
        .expect("decode");
        assert!(AuthGrant::try_from(dto).is_err());
    }

    #[rstest]
    fn user_payload_accepts_keyed_and_bare_shapes() {
        let user = serde_json::json!({"id": "u-1", "email": "ada@example.com", "username": "ada"});
        let keyed: UserPayload =
            serde_json::from_value(serde_json::json!({"user": user.clone()})).expect("keyed");
        let bare: UserPayload = serde_json::from_value(user).expect("bare");
        assert_eq!(User::from(keyed), User::from(bare));
    }
}
