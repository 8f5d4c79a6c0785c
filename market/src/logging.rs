//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with the report on stdout.
//! `RUST_LOG` wins over the `-v` count when set.

use crate::context::VerbosityLevel;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Maps a verbosity level to the default log level.
pub fn level_for(verbosity: VerbosityLevel) -> LevelFilter {
    match verbosity {
        VerbosityLevel::Normal => LevelFilter::WARN,
        VerbosityLevel::Verbose => LevelFilter::INFO,
        VerbosityLevel::VeryVerbose => LevelFilter::DEBUG,
        VerbosityLevel::Trace => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(verbosity: VerbosityLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= VerbosityLevel::VeryVerbose)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_each_verbosity() {
        assert_eq!(level_for(VerbosityLevel::Normal), LevelFilter::WARN);
        assert_eq!(level_for(VerbosityLevel::Verbose), LevelFilter::INFO);
        assert_eq!(level_for(VerbosityLevel::VeryVerbose), LevelFilter::DEBUG);
        assert_eq!(level_for(VerbosityLevel::Trace), LevelFilter::TRACE);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(VerbosityLevel::Normal);
        init(VerbosityLevel::Trace);
    }
}
