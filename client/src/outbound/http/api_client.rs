//! Shared reqwest transport for the Barfinder REST API.
//!
//! This type owns transport details only: URL building, bearer headers,
//! timeout and HTTP error mapping, and JSON decoding of bare or
//! `{ "data": ... }` wrapped responses. Resource adapters layer endpoint
//! paths and identity checks on top.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::{Envelope, error_message};
use crate::domain::ports::TokenStore;
use crate::domain::{AuthToken, ClientResult, Error};

const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";
const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";
const DECODE_MESSAGE: &str = "Unexpected response from the server.";
const SIGNED_OUT_MESSAGE: &str = "You must be logged in to do that";

/// How the `Authorization` header is chosen for a request.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Bearer<'a> {
    /// Attach the token held by the token store, when there is one.
    Stored,
    /// Attach the stored token; fail without a request when there is none.
    Required,
    /// Attach this token regardless of what is stored.
    Explicit(&'a AuthToken),
}

/// One REST call.
pub(crate) struct Call<'a> {
    method: Method,
    segments: &'a [&'a str],
    query: &'a [(&'a str, &'a str)],
    body: Option<Value>,
    bearer: Bearer<'a>,
}

impl<'a> Call<'a> {
    /// Request without a body.
    pub(crate) const fn new(method: Method, segments: &'a [&'a str]) -> Self {
        Self {
            method,
            segments,
            query: &[],
            body: None,
            bearer: Bearer::Stored,
        }
    }

    /// `GET` request.
    pub(crate) const fn get(segments: &'a [&'a str]) -> Self {
        Self::new(Method::GET, segments)
    }

    /// Attach query pairs.
    pub(crate) fn query(mut self, query: &'a [(&'a str, &'a str)]) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body.
    pub(crate) fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|err| Error::internal(format!("failed to encode request body: {err}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Require a stored token.
    pub(crate) fn authenticated(mut self) -> Self {
        self.bearer = Bearer::Required;
        self
    }

    /// Use `token` instead of the stored token.
    pub(crate) fn bearer(mut self, token: &'a AuthToken) -> Self {
        self.bearer = Bearer::Explicit(token);
        self
    }
}

/// Reqwest client bound to one API base URL.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    /// Base URL every path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Perform `call` and decode the JSON response.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, call: Call<'_>) -> ClientResult<T> {
        let body = self.execute(call).await?;
        decode(&body)
    }

    /// Perform `call` and discard the response body.
    pub(crate) async fn send(&self, call: Call<'_>) -> ClientResult<()> {
        self.execute(call).await.map(drop)
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::internal("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn bearer_token(&self, bearer: Bearer<'_>) -> ClientResult<Option<AuthToken>> {
        match bearer {
            Bearer::Explicit(token) => Ok(Some(token.clone())),
            Bearer::Stored => match self.tokens.get().await {
                Ok(token) => Ok(token),
                Err(err) => {
                    warn!(error = %err, "sending request without stored token");
                    Ok(None)
                }
            },
            Bearer::Required => match self.tokens.get().await {
                Ok(Some(token)) => Ok(Some(token)),
                Ok(None) => Err(Error::unauthorized(SIGNED_OUT_MESSAGE)),
                Err(err) => {
                    warn!(error = %err, "stored token unreadable");
                    Err(Error::unauthorized(SIGNED_OUT_MESSAGE))
                }
            },
        }
    }

    async fn execute(&self, call: Call<'_>) -> ClientResult<Vec<u8>> {
        let url = self.endpoint(call.segments, call.query)?;
        let bearer = self.bearer_token(call.bearer).await?;
        let mut request = self.client.request(call.method.clone(), url.clone());
        if let Some(token) = bearer {
            request = request.bearer_auth(token.expose());
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        debug!(method = %call.method, path = url.path(), "api request");
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(method = %call.method, path = url.path(), status = status.as_u16(), "api response");

        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(map_status_error(status, &body))
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
    serde_json::from_slice::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|err| {
            debug!(error = %err, "undecodable API response");
            Error::internal(DECODE_MESSAGE)
        })
}

fn map_transport_error(error: reqwest::Error) -> Error {
    debug!(error = %error, "api transport failure");
    if error.is_timeout() {
        Error::network(TIMEOUT_MESSAGE)
    } else {
        Error::network(NETWORK_MESSAGE)
    }
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> Error {
    let message = error_message(body)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Error::invalid_request(message)
        }
        StatusCode::UNAUTHORIZED => Error::unauthorized(message),
        StatusCode::FORBIDDEN => Error::forbidden(message),
        StatusCode::NOT_FOUND => Error::not_found(message),
        StatusCode::CONFLICT => Error::conflict(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Error::network(message),
        _ if status.is_server_error() => Error::service_unavailable(message),
        _ => Error::invalid_request(message),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use crate::domain::ErrorCode;
    use crate::outbound::token_store::MemoryTokenStore;
    use rstest::rstest;

    #[rstest]
    #[case::bad_request(StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest)]
    #[case::unprocessable(StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::InvalidRequest)]
    #[case::unauthorized(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized)]
    #[case::forbidden(StatusCode::FORBIDDEN, ErrorCode::Forbidden)]
    #[case::not_found(StatusCode::NOT_FOUND, ErrorCode::NotFound)]
    #[case::conflict(StatusCode::CONFLICT, ErrorCode::Conflict)]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, ErrorCode::Network)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, ErrorCode::Network)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::ServiceUnavailable)]
    #[case::teapot(StatusCode::IM_A_TEAPOT, ErrorCode::InvalidRequest)]
    fn maps_http_statuses_to_error_codes(#[case] status: StatusCode, #[case] expected: ErrorCode) {
        let error = map_status_error(status, b"{\"message\":\"nope\"}");
        assert_eq!(error.code(), expected);
        assert_eq!(error.message(), "nope");
    }

    #[rstest]
    fn falls_back_to_generic_status_message() {
        let error = map_status_error(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(error.message(), "Request failed with status 502");
    }

    #[rstest]
    fn builds_percent_encoded_paths_and_queries() {
        let base = Url::parse("http://localhost:3000/api/").expect("base url");
        let client = ApiClient::new(
            base,
            Duration::from_secs(1),
            Arc::new(MemoryTokenStore::default()),
        )
        .expect("client");
        let url = client
            .endpoint(&["bars", "b 1", "menu"], &[("city", "São Paulo")])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/bars/b%201/menu?city=S%C3%A3o+Paulo"
        );
        let bare = client.endpoint(&["events"], &[]).expect("url");
        assert_eq!(bare.as_str(), "http://localhost:3000/api/events");
    }

    #[tokio::test]
    async fn required_bearer_without_stored_token_is_unauthorized() {
        let base = Url::parse("http://127.0.0.1:9/api/").expect("base url");
        let client = ApiClient::new(
            base,
            Duration::from_secs(1),
            Arc::new(MemoryTokenStore::default()),
        )
        .expect("client");

        let error = client
            .send(Call::get(&["auth", "profile"]).authenticated())
            .await
            .expect_err("no stored token");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), SIGNED_OUT_MESSAGE);
    }

    #[rstest]
    #[case(br#"{"data": [1, 2]}"#.as_slice())]
    #[case(b"[1, 2]".as_slice())]
    fn decodes_bare_and_wrapped_payloads(#[case] body: &[u8]) {
        let numbers: Vec<u32> = decode(body).expect("decode");
        assert_eq!(numbers, vec![1, 2]);
    }

    #[rstest]
    fn undecodable_payload_is_internal_error() {
        let error = decode::<Vec<u32>>(b"{\"oops\": true}").expect_err("shape mismatch");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
