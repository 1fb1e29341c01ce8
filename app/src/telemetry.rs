//! Tracing subscriber set-up.
//!
//! Logs go to stderr so command output on stdout stays clean.

use std::io;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. Filtering follows `RUST_LOG`.
///
/// A second call, or a subscriber installed elsewhere, is logged and
/// otherwise ignored.
pub fn init(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
