// Logging setup
//
// Diagnostics go to stderr so stdout stays clean for the menu and for
// yt-dlp's own output.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default filter; fixed because the program reads no environment variables
pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn init_logging() {
    let filter = EnvFilter::new(DEFAULT_LOG_FILTER);

    // A second call (e.g. from an embedding binary) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

/// Initialize tracing for tests
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
