//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with report output or the animation.
//! `RUST_LOG` takes precedence over the `-v` count.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level for a `-v` count: warn, info, debug, then trace.
#[must_use]
pub const fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber. Does nothing if one is already set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity).as_str().to_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
