//! Authentication endpoints under `auth/`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use super::api_client::{ApiClient, Call};
use super::dto::{AuthGrantDto, UserPayload};
use crate::domain::ports::AuthApi;
use crate::domain::{
    AuthGrant, AuthToken, ClientResult, LoginCredentials, PasswordChange, ProfileUpdate,
    Registration, User,
};

/// [`AuthApi`] over the REST API.
#[derive(Clone)]
pub struct HttpAuthApi {
    api: Arc<ApiClient>,
}

impl HttpAuthApi {
    /// Adapter sharing `api`.
    pub const fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    async fn grant(&self, call: Call<'_>) -> ClientResult<AuthGrant> {
        let dto: AuthGrantDto = self.api.fetch(call).await?;
        AuthGrant::try_from(dto)
    }

    async fn user(&self, call: Call<'_>) -> ClientResult<User> {
        let payload: UserPayload = self.api.fetch(call).await?;
        Ok(payload.into())
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> ClientResult<AuthGrant> {
        self.grant(Call::new(Method::POST, &["auth", "login"]).json(credentials)?)
            .await
    }

    async fn register(&self, registration: &Registration) -> ClientResult<AuthGrant> {
        self.grant(Call::new(Method::POST, &["auth", "register"]).json(registration)?)
            .await
    }

    async fn logout(&self, token: &AuthToken) -> ClientResult<()> {
        self.api
            .send(Call::new(Method::POST, &["auth", "logout"]).bearer(token))
            .await
    }

    async fn validate_token(&self, token: &AuthToken) -> ClientResult<User> {
        self.user(Call::get(&["auth", "validate"]).bearer(token)).await
    }

    async fn fetch_profile(&self) -> ClientResult<User> {
        self.user(Call::get(&["auth", "profile"]).authenticated())
            .await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        self.user(
            Call::new(Method::PUT, &["auth", "profile"])
                .authenticated()
                .json(update)?,
        )
        .await
    }

    async fn change_password(&self, change: &PasswordChange) -> ClientResult<()> {
        self.api
            .send(
                Call::new(Method::PUT, &["auth", "change-password"])
                    .authenticated()
                    .json(change)?,
            )
            .await
    }
}
