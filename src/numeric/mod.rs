// ============================================================================
// Numeric Module
// Exact decimal values and the precision/rounding policy that scales them
// ============================================================================
//
// This module provides:
// - Number: immutable decimal value backed by rust_decimal
// - NumericConfig / RoundingMode: explicit scaling policy
// - config: the process-wide configuration read by formatting code paths
// - NumericError: error types for construction and arithmetic
//
// Design principles:
// - Exact text and integer construction never loses digits
// - Float construction exists but is always named `_lossy`
// - All arithmetic returns Result (no panics)
// - Arithmetic never rounds to the configured precision on its own

pub mod config;
mod errors;
mod number;

pub use config::{NumericConfig, RoundingMode, DEFAULT_PRECISION, MAX_PRECISION};
pub use errors::{NumericError, NumericResult};
pub use number::Number;
