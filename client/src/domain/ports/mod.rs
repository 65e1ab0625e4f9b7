//! Domain ports for the hexagonal boundary.
//!
//! Outbound adapters implement these traits against the REST API, local
//! storage and the UI shell; services and controllers only see the traits.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_api;
mod bar_catalogue;
mod confirmation_presenter;
mod events;
mod favorites;
mod menu_command;
mod navigator;
mod reviews;
mod session_identity;
mod token_store;
mod user_profiles;

pub use auth_api::AuthApi;
#[cfg(test)]
pub use auth_api::MockAuthApi;
pub use bar_catalogue::BarCatalogue;
#[cfg(test)]
pub use bar_catalogue::MockBarCatalogue;
#[cfg(test)]
pub use confirmation_presenter::MockConfirmationPresenter;
pub use confirmation_presenter::{ConfirmationPresenter, ConfirmationPrompt, Notice, NoticeKind};
pub use events::EventQuery;
#[cfg(test)]
pub use events::MockEventQuery;
pub use favorites::Favorites;
#[cfg(test)]
pub use favorites::MockFavorites;
pub use menu_command::MenuCommand;
#[cfg(test)]
pub use menu_command::MockMenuCommand;
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::Navigator;
#[cfg(test)]
pub use reviews::MockReviews;
pub use reviews::Reviews;
#[cfg(test)]
pub use session_identity::MockSessionIdentity;
pub use session_identity::{FixtureSessionIdentity, SessionIdentity};
#[cfg(test)]
pub use token_store::MockTokenStore;
pub use token_store::{TokenStore, TokenStoreError};
#[cfg(test)]
pub use user_profiles::MockUserProfiles;
pub use user_profiles::UserProfiles;
