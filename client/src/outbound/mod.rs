//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest clients for the Barfinder REST API
//! - **token_store**: bearer token persistence on disk or in memory
//! - **presenter**: native alert and in-app modal confirmation presenters
//!
//! Adapters translate between domain types and wire or storage
//! representations. They contain no business logic.

pub mod http;
pub mod presenter;
pub mod token_store;
