// ============================================================================
// Logging Setup
// Installs a tracing subscriber for binaries and demos
// ============================================================================

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Crate-specific filter variable, consulted after `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "RPN_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install a global `fmt` subscriber filtered by `RUST_LOG`, then `RPN_LOG`,
/// then `info`.
///
/// Returns `false` if a global subscriber was already set; the existing one
/// stays in place.
pub fn init_logging() -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV_VAR))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        let _ = init_logging();
        assert!(!init_logging());
        tracing::info!("logging initialised");
    }
}
