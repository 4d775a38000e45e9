//! Logging initialization.
//!
//! Uses `tracing` with `tracing-subscriber`; events go to stderr so the
//! rendered Markdown on stdout stays clean. The level is controlled through
//! `RUST_LOG`, e.g. `RUST_LOG=issues2markdown=debug` to trace every page fetch.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "issues2markdown=warn,reqwest=error";

/// Initialize the logging subsystem.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
