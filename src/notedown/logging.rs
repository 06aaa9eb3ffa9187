//! Subscriber setup for binaries.
//!
//! The library only emits `tracing` events. A client that wants them on
//! screen calls [`init`] once at startup; output goes to stderr so stdout
//! stays clean for rendered documents and listings.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when not verbose.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(level_for(verbose))
        .try_init();

    if result.is_ok() {
        tracing::debug!("logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(false), LevelFilter::WARN);
        assert_eq!(level_for(true), LevelFilter::DEBUG);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
