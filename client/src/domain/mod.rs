//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed values the client exchanges with the
//! Barfinder API, the session reducer and the services driving it. Form
//! aggregates validate raw input before anything reaches the network.
//!
//! Public surface:
//! - Error / ErrorCode: normalized failure returned by every port.
//! - User, Bar, MenuItem, Review, BarEvent, Favorite: API resources.
//! - Session, SessionEvent, reduce, SessionStore: authentication state.
//! - AuthSessionService: session manager behind the login screens.

pub mod auth;
pub mod auth_session_service;
pub mod bar;
pub mod error;
pub mod event;
pub mod favorite;
pub mod ids;
pub mod menu;
pub mod navigation;
pub mod ports;
pub mod review;
pub mod session;
pub mod user;
pub mod validation;

pub use self::auth::{
    AuthGrant, AuthToken, CredentialsValidationError, LoginCredentials, PasswordChange,
    Registration, RegistrationInput,
};
pub use self::auth_session_service::{AuthOutcome, AuthSessionService};
pub use self::bar::{Bar, BarQuery};
pub use self::error::{Error, ErrorCode};
pub use self::event::BarEvent;
pub use self::favorite::{Favorite, FavoriteStatus};
pub use self::ids::{BarId, EventId, InvalidIdError, MenuItemId, ReviewId};
pub use self::menu::{
    MenuItem, MenuItemDraft, MenuItemInput, MenuItemType, MenuItemValidationError,
};
pub use self::navigation::Route;
pub use self::review::{
    NewReview, Rating, Review, ReviewAuthor, ReviewDraft, ReviewInput, ReviewStats,
    ReviewValidationError,
};
pub use self::session::{RejectedEvent, Session, SessionEvent, SessionStore, reduce};
pub use self::user::{AccountType, ProfileUpdate, User, UserId, UserProfile, UserValidationError};
pub use self::validation::FieldErrors;

/// Result alias used across ports and services.
///
/// # Examples
/// ```
/// use client::domain::{ClientResult, Error};
///
/// fn lookup() -> ClientResult<u32> {
///     Err(Error::not_found("bar not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ClientResult<T> = Result<T, Error>;
