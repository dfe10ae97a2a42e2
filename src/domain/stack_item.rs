// ============================================================================
// Stack Item
// The closed set of values a program and the working stack are made of
// ============================================================================

use super::error::CalcError;
use crate::interfaces::Operation;
use crate::numeric::Number;
use std::fmt;
use std::sync::Arc;

/// One program element or working-stack entry.
///
/// Numbers and errors are immutable values; operations are shared, stateless
/// capabilities that live for as long as the registry holding them.
#[derive(Clone)]
pub enum StackItem {
    Number(Number),
    Operation(Arc<dyn Operation>),
    Error(CalcError),
}

impl StackItem {
    pub fn number(value: impl Into<Number>) -> Self {
        StackItem::Number(value.into())
    }

    pub fn operation(op: Arc<dyn Operation>) -> Self {
        StackItem::Operation(op)
    }

    pub fn error(err: CalcError) -> Self {
        StackItem::Error(err)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, StackItem::Number(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StackItem::Error(_))
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            StackItem::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&CalcError> {
        match self {
            StackItem::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_operation(&self) -> Option<&Arc<dyn Operation>> {
        match self {
            StackItem::Operation(op) => Some(op),
            _ => None,
        }
    }
}

impl From<Number> for StackItem {
    fn from(value: Number) -> Self {
        StackItem::Number(value)
    }
}

impl From<CalcError> for StackItem {
    fn from(err: CalcError) -> Self {
        StackItem::Error(err)
    }
}

impl From<Arc<dyn Operation>> for StackItem {
    fn from(op: Arc<dyn Operation>) -> Self {
        StackItem::Operation(op)
    }
}

// Operations compare by symbol: two descriptors for the same symbol are
// interchangeable.
impl PartialEq for StackItem {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StackItem::Number(a), StackItem::Number(b)) => a == b,
            (StackItem::Error(a), StackItem::Error(b)) => a == b,
            (StackItem::Operation(a), StackItem::Operation(b)) => a.symbol() == b.symbol(),
            _ => false,
        }
    }
}

impl fmt::Debug for StackItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackItem::Number(n) => write!(f, "Number({})", n),
            StackItem::Operation(op) => write!(f, "Operation({})", op.symbol()),
            StackItem::Error(e) => write!(f, "Error({:?})", e),
        }
    }
}

impl fmt::Display for StackItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackItem::Number(n) => write!(f, "{}", n),
            StackItem::Operation(op) => f.write_str(op.symbol()),
            StackItem::Error(e) => write!(f, "Error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::arithmetic::{Add, Multiply};

    #[test]
    fn test_accessors() {
        let n = StackItem::number(7);
        assert!(n.is_number());
        assert_eq!(n.as_number(), Some(&Number::from(7)));
        assert!(n.as_error().is_none());

        let e = StackItem::error(CalcError::custom("boom"));
        assert!(e.is_error());
        assert_eq!(e.as_error().map(|e| e.message()), Some("boom".to_string()));

        let op = StackItem::operation(Arc::new(Add));
        assert_eq!(op.as_operation().map(|op| op.symbol()), Some("+"));
    }

    #[test]
    fn test_equality() {
        assert_eq!(StackItem::number(3), StackItem::Number("3.00".parse().unwrap()));
        assert_eq!(
            StackItem::operation(Arc::new(Add)),
            StackItem::operation(Arc::new(Add))
        );
        assert_ne!(
            StackItem::operation(Arc::new(Add)),
            StackItem::operation(Arc::new(Multiply))
        );
        assert_ne!(StackItem::number(0), StackItem::error(CalcError::custom("0")));
    }

    #[test]
    fn test_display() {
        assert_eq!(StackItem::number(42).to_string(), "42");
        assert_eq!(StackItem::operation(Arc::new(Multiply)).to_string(), "*");
        assert_eq!(
            StackItem::error(CalcError::domain("/", "Division by zero")).to_string(),
            "Error: /: Division by zero"
        );
    }
}
