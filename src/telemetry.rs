//! Tracing setup for binaries and tests that embed the engine.

use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_FILTER: &str = "storefront_engine=info,warn";

/// Install a `fmt` subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_FILTER`] when it is unset or unparseable.
///
/// Returns `false` if a global subscriber was already installed, so calling
/// this more than once is harmless.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .is_ok()
}
