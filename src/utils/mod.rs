// ============================================================================
// Utilities Module
// Process-level helpers that sit outside the evaluation core
// ============================================================================

#[cfg(feature = "logging")]
mod logging;

#[cfg(feature = "logging")]
pub use logging::{init_logging, LOG_ENV_VAR};
