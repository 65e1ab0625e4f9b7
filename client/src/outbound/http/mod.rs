//! REST adapters for the Barfinder API.
//!
//! [`ApiClient`] owns the reqwest transport; one adapter per resource
//! implements the matching domain port on top of it.

mod api_client;
mod auth;
mod bars;
mod dto;
mod events;
mod favorites;
mod menus;
mod reviews;
mod users;

pub use api_client::ApiClient;
pub use auth::HttpAuthApi;
pub use bars::HttpBarCatalogue;
pub use events::HttpEventQuery;
pub use favorites::HttpFavorites;
pub use menus::HttpMenuCommand;
pub use reviews::HttpReviews;
pub use users::HttpUserProfiles;
