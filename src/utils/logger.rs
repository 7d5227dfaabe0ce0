// ============================================================================
// XliffMerge - Logger
// ============================================================================
//
// File: src/utils/logger.rs
// Responsibility: leveled message output
// Boundaries:
//   - ✅ Log level management (quiet / normal / verbose)
//   - ✅ Subscriber initialization
//   - ✅ Leveled message emission
//   - ❌ Should not contain business logic
//   - ❌ Should not contain message texts
//   - ❌ Should not contain file logging
//
// ============================================================================

use tracing_subscriber::EnvFilter;

/// Thin facade over `tracing` used by every module
pub struct Logger;

impl Logger {
    /// Install the global subscriber. `RUST_LOG` wins over the flags.
    ///
    /// Calling it more than once is harmless; only the first call takes effect.
    pub fn init(verbose: bool, quiet: bool) {
        let level = Self::level(verbose, quiet);
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .try_init();
    }

    fn level(verbose: bool, quiet: bool) -> &'static str {
        if quiet {
            "error"
        } else if verbose {
            "debug"
        } else {
            "info"
        }
    }

    pub fn debug<S: AsRef<str>>(msg: S) {
        tracing::debug!("{}", msg.as_ref());
    }

    pub fn info<S: AsRef<str>>(msg: S) {
        tracing::info!("{}", msg.as_ref());
    }

    pub fn warn<S: AsRef<str>>(msg: S) {
        tracing::warn!("{}", msg.as_ref());
    }

    pub fn error<S: AsRef<str>>(msg: S) {
        tracing::error!("{}", msg.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(Logger::level(true, true), "error");
        assert_eq!(Logger::level(true, false), "debug");
        assert_eq!(Logger::level(false, false), "info");
    }
}
