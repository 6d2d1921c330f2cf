//! Logging setup.
//!
//! Diagnostics go through `tracing` and are written to stderr, leaving stdout
//! to the menu and reports. `-q`/`-v` pick the level for this crate's targets
//! and a `RUST_LOG` value replaces that choice entirely.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much diagnostic output to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Warnings and errors.
    #[default]
    Normal,
    /// Debug output (`-v`).
    Verbose,
    /// Everything (`-vv` and up).
    Trace,
}

impl Verbosity {
    /// The most detailed level emitted at this verbosity.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive limiting output to this crate at [`Verbosity::level`].
    #[must_use]
    pub fn directive(self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.level())
    }
}

fn filter_for(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
}

/// Install the global stderr subscriber.
///
/// Only the first call has an effect; later calls are ignored so that tests
/// and embedding programs can call it freely.
///
/// ```no_run
/// use gradebook::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter_for(verbosity))
        .with(layer)
        .try_init();
}

/// Route warnings and errors into the test harness output.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(Verbosity::Normal.directive())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let levels: Vec<Level> = [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Trace,
        ]
        .into_iter()
        .map(Verbosity::level)
        .collect();
        assert_eq!(
            levels,
            vec![Level::ERROR, Level::WARN, Level::DEBUG, Level::TRACE]
        );
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
        assert!(Verbosity::Quiet < Verbosity::Normal);
        assert!(Verbosity::Verbose < Verbosity::Trace);
    }

    #[test]
    fn test_directive_targets_this_crate() {
        assert_eq!(Verbosity::Normal.directive(), "gradebook=WARN");
        assert_eq!(Verbosity::Trace.directive(), "gradebook=TRACE");
    }

    #[test]
    fn test_init_is_repeatable() {
        init_test_logging();
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Trace);
    }
}
