//! Tracing subscriber bootstrap for host shells and test harnesses.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// `json` switches to JSON lines. When a subscriber is already installed
/// the failure is logged through it and otherwise ignored.
pub fn init_tracing(json: bool) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
