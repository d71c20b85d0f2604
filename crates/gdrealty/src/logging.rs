//! Logging configuration for gdrealty.
//!
//! Two sources of events matter when running the site: the application
//! itself (page renders, form submissions, live sessions) and the per-request
//! spans emitted by `tower_http`'s trace layer. Request tracing is noisy, so
//! individual requests only show from `-v` up while failures always do.
//! Axum's extractor rejections (bad query strings, malformed
//! form bodies) are only shown from `-v` up.

use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Suppress all output except errors.
    Quiet,
    /// Normal output level (info and above).
    #[default]
    Normal,
    /// Verbose output (debug and above).
    Verbose,
    /// Very verbose output (trace level).
    Trace,
}

impl Verbosity {
    /// Level for gdrealty's own events.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Level for `tower_http` request spans and events.
    ///
    /// The trace layer reports each request at `DEBUG`, so they appear from
    /// `-v` on; failures (`ERROR`) always show.
    #[must_use]
    pub fn request_level(&self) -> LevelFilter {
        match self {
            Self::Quiet | Self::Normal => LevelFilter::WARN,
            Self::Verbose => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// Level for `axum::rejection`, which axum emits at `TRACE`.
    #[must_use]
    pub fn rejection_level(&self) -> LevelFilter {
        match self {
            Self::Quiet | Self::Normal => LevelFilter::OFF,
            Self::Verbose | Self::Trace => LevelFilter::TRACE,
        }
    }

    /// Filter directives used when `RUST_LOG` is not set.
    #[must_use]
    pub fn default_filter(&self) -> String {
        format!(
            "gdrealty={},tower_http={},axum::rejection={}",
            LevelFilter::from_level(self.to_level_filter()),
            self.request_level(),
            self.rejection_level()
        )
    }
}

/// Initialize the logging system.
///
/// This should be called once at application startup. The logging level can be
/// controlled via:
/// 1. The `verbosity` parameter
/// 2. The `RUST_LOG` environment variable (takes precedence)
///
/// # Examples
///
/// ```no_run
/// use gdrealty::{init_logging, logging::Verbosity};
///
/// // Show each request as it is served
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    // Allow RUST_LOG to override
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        );

    // Install the subscriber (ignore error if already set)
    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_to_level() {
        assert_eq!(Verbosity::Quiet.to_level_filter(), Level::ERROR);
        assert_eq!(Verbosity::Normal.to_level_filter(), Level::INFO);
        assert_eq!(Verbosity::Verbose.to_level_filter(), Level::DEBUG);
        assert_eq!(Verbosity::Trace.to_level_filter(), Level::TRACE);
    }

    #[test]
    fn test_verbosity_default() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_requests_hidden_until_verbose() {
        assert_eq!(Verbosity::Normal.request_level(), LevelFilter::WARN);
        assert_eq!(Verbosity::Verbose.request_level(), LevelFilter::DEBUG);
        assert_eq!(Verbosity::Normal.rejection_level(), LevelFilter::OFF);
        assert_eq!(Verbosity::Verbose.rejection_level(), LevelFilter::TRACE);
    }

    #[test]
    fn test_default_filter_directives() {
        assert_eq!(
            Verbosity::Normal.default_filter(),
            "gdrealty=info,tower_http=warn,axum::rejection=off"
        );
        assert_eq!(
            Verbosity::Verbose.default_filter(),
            "gdrealty=debug,tower_http=debug,axum::rejection=trace"
        );
        assert_eq!(
            Verbosity::Quiet.default_filter(),
            "gdrealty=error,tower_http=warn,axum::rejection=off"
        );
    }

    #[test]
    fn test_default_filter_parses() {
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Trace,
        ] {
            assert!(EnvFilter::try_new(verbosity.default_filter()).is_ok());
        }
    }

    #[test]
    fn test_init_logging_with_all_verbosity_levels() {
        // Only the first call installs a subscriber
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Verbose);
    }
}
