//! Inbound adapters that translate UI events into domain service calls.
//!
//! Screen controllers live under [`ui`]. They own no rendering; the host
//! shell subscribes to their state and forwards user input.

pub mod ui;
