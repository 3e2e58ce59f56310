//! Logging bootstrap
//!
//! Log output goes to stderr so that listings and reports on stdout stay
//! clean. A valid `RUST_LOG` replaces the level asked for on the command line.

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Map a count of `-v` flags to a log level.
pub fn level_for_verbosity(occurrences: u64) -> Level {
    match occurrences {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Build the event filter.
///
/// Valid `directives` (normally the value of `RUST_LOG`) are used as given;
/// otherwise everything at `level` and above is logged.
pub fn filter_for(level: Level, directives: Option<&str>) -> EnvFilter {
    match directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
    {
        Some(filter) => filter,
        None => EnvFilter::default().add_directive(LevelFilter::from_level(level).into()),
    }
}

/// Install the global subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init(level: Level) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter_for(level, directives.as_deref());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

/// Initialize logging with default settings (for tests and quick starts)
pub fn init_default() {
    init(Level::INFO);
}
