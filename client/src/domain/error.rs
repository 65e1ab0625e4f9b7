//! Domain-level error types.
//!
//! These errors are transport agnostic. Outbound adapters normalize HTTP and
//! storage failures into them, and screen controllers surface
//! [`Error::message`] to the user.

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with state held by the server.
    Conflict,
    /// The request never produced a response (connect failure, timeout).
    Network,
    /// The server responded but could not serve the request.
    ServiceUnavailable,
    /// Local storage could not be read or written.
    Storage,
    /// An unexpected error occurred inside the client.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use client::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::NotFound, "missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

/// Message used when a blank message reaches [`Error::new`].
const FALLBACK_MESSAGE: &str = "Something went wrong";

impl Error {
    /// Create a new error, substituting a generic message when `message` is
    /// blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let raw = message.into();
        let message = if raw.trim().is_empty() {
            FALLBACK_MESSAGE.to_owned()
        } else {
            raw
        };
        Self { code, message }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message shown by the UI.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Whether the server rejected the caller's credentials.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self.code, ErrorCode::Unauthorized | ErrorCode::Forbidden)
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::Network`].
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Network, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::Storage`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Storage, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn invalid_request_constructor_sets_code() {
        let err = Error::invalid_request("bad");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "bad");
    }

    #[rstest]
    fn new_substitutes_fallback_for_blank_messages() {
        let err = Error::network("  ");
        assert_eq!(err.message(), FALLBACK_MESSAGE);
        assert_eq!(err.code(), ErrorCode::Network);
    }

    #[rstest]
    #[case(ErrorCode::Unauthorized, true)]
    #[case(ErrorCode::Forbidden, true)]
    #[case(ErrorCode::Network, false)]
    #[case(ErrorCode::NotFound, false)]
    fn auth_rejection_covers_401_and_403_codes(#[case] code: ErrorCode, #[case] expected: bool) {
        assert_eq!(Error::new(code, "x").is_auth_rejection(), expected);
    }
}
