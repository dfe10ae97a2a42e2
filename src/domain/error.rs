// ============================================================================
// Calculation Errors
// Error values that travel on the stack like any other result
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reason text used when a float-computed result is NaN or infinite.
pub const UNDEFINED_RESULT: &str = "result is undefined or infinite";

/// Error value carried by [`StackItem::Error`](super::StackItem::Error).
///
/// The variant is the structured kind; the human-readable text is kept as a
/// payload so consumers never need to match on message substrings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalcError {
    /// Fewer items on the stack than the operation's arity
    InsufficientOperands {
        symbol: String,
        required: usize,
        actual: usize,
    },

    /// A popped operand was an operation or an error
    NonNumericOperand { symbol: String },

    /// Operation-specific precondition violated, or the result is undefined
    Domain { symbol: String, reason: String },

    /// Error supplied by the caller as program data
    Custom { message: String },
}

/// Fieldless discriminant of [`CalcError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorKind {
    InsufficientOperands,
    NonNumericOperand,
    Domain,
    Custom,
}

impl CalcError {
    pub fn insufficient_operands(symbol: impl Into<String>, required: usize, actual: usize) -> Self {
        CalcError::InsufficientOperands {
            symbol: symbol.into(),
            required,
            actual,
        }
    }

    pub fn non_numeric(symbol: impl Into<String>) -> Self {
        CalcError::NonNumericOperand {
            symbol: symbol.into(),
        }
    }

    pub fn domain(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Domain {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        CalcError::Custom {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InsufficientOperands { .. } => ErrorKind::InsufficientOperands,
            CalcError::NonNumericOperand { .. } => ErrorKind::NonNumericOperand,
            CalcError::Domain { .. } => ErrorKind::Domain,
            CalcError::Custom { .. } => ErrorKind::Custom,
        }
    }

    /// Symbol of the operation that produced the error, if any.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            CalcError::InsufficientOperands { symbol, .. }
            | CalcError::NonNumericOperand { symbol }
            | CalcError::Domain { symbol, .. } => Some(symbol),
            CalcError::Custom { .. } => None,
        }
    }

    /// Message without the operation prefix, e.g. `"Division by zero"`.
    pub fn message(&self) -> String {
        match self {
            CalcError::InsufficientOperands {
                required, actual, ..
            } => format!(
                "requires {} operand{}, but the stack holds {}",
                required,
                if *required == 1 { "" } else { "s" },
                actual
            ),
            CalcError::NonNumericOperand { .. } => "operand is not a number".to_string(),
            CalcError::Domain { reason, .. } => reason.clone(),
            CalcError::Custom { message } => message.clone(),
        }
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => write!(f, "{}: {}", symbol, self.message()),
            None => f.write_str(&self.message()),
        }
    }
}

impl std::error::Error for CalcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            CalcError::insufficient_operands("+", 2, 1).kind(),
            ErrorKind::InsufficientOperands
        );
        assert_eq!(CalcError::non_numeric("+").kind(), ErrorKind::NonNumericOperand);
        assert_eq!(CalcError::domain("/", "Division by zero").kind(), ErrorKind::Domain);
        assert_eq!(CalcError::custom("pre-existing").kind(), ErrorKind::Custom);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            CalcError::insufficient_operands("+", 2, 1).to_string(),
            "+: requires 2 operands, but the stack holds 1"
        );
        assert_eq!(
            CalcError::insufficient_operands("SQRT", 1, 0).to_string(),
            "SQRT: requires 1 operand, but the stack holds 0"
        );
        assert_eq!(
            CalcError::domain("/", "Division by zero").to_string(),
            "/: Division by zero"
        );
        assert_eq!(CalcError::custom("pre-existing").to_string(), "pre-existing");
    }

    #[test]
    fn test_message_keeps_reason() {
        let err = CalcError::domain("/", "Division by zero");
        assert_eq!(err.message(), "Division by zero");
        assert_eq!(err.symbol(), Some("/"));
        assert_eq!(CalcError::custom("x").symbol(), None);
    }
}
