//! Client core for the Barfinder apps.
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] holds the value types (users, bars, menus, reviews), the
//!   session reducer, the auth session service and the port traits.
//! - [`outbound`] implements the ports against infrastructure: the REST API
//!   over `reqwest`, token persistence on disk, and the two confirmation
//!   presenters.
//! - [`inbound`] exposes the screen controllers the UI shell drives.
//! - [`app`] is the composition root wiring all of the above from
//!   [`config::ClientSettings`].

pub mod app;
pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod telemetry;

pub use app::AppContext;
pub use config::ClientSettings;
