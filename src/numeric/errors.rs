// ============================================================================
// Numeric Errors
// Error types for decimal construction, arithmetic and configuration
// ============================================================================

use std::fmt;

/// Errors that can occur while building or combining [`Number`](super::Number) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the representable decimal range
    Overflow,
    /// Attempted division by zero
    DivisionByZero,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Input string or value is invalid
    InvalidInput,
    /// Floating-point value is NaN or infinite
    NotFinite,
    /// Requested precision is outside 0..=MAX_PRECISION
    InvalidPrecision,
    /// Rounding mode name is not one of the supported policies
    UnknownRoundingMode,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::DivisionByZero => write!(f, "Division by zero"),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::NotFinite => write!(f, "result is undefined or infinite"),
            NumericError::InvalidPrecision => write!(
                f,
                "invalid precision: must be between 0 and {}",
                super::config::MAX_PRECISION
            ),
            NumericError::UnknownRoundingMode => write!(f, "unknown rounding mode"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result exceeded maximum value"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "Division by zero");
        assert_eq!(
            NumericError::InvalidPrecision.to_string(),
            "invalid precision: must be between 0 and 28"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::NotFinite);
    }
}
