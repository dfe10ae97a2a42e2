// ============================================================================
// Program Construction
// Builds postfix programs from values, registry keys, or whitespace text
// ============================================================================

use super::registry::OperationRegistry;
use crate::domain::{CalcError, StackItem};
use crate::interfaces::Operation;
use crate::numeric::{Number, NumericError};
use std::fmt;
use std::sync::Arc;

/// Failure to turn a token into a program item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// No operation is registered under the token
    UnknownOperation(String),

    /// Token looked like a number but did not parse
    InvalidLiteral { token: String, error: NumericError },
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::UnknownOperation(token) => write!(f, "unknown operation: {}", token),
            ProgramError::InvalidLiteral { token, error } => {
                write!(f, "invalid literal {:?}: {}", token, error)
            },
        }
    }
}

impl std::error::Error for ProgramError {}

/// Fluent builder for programs
///
/// # Example
/// ```
/// use rpn_engine::engine::{standard_registry, Evaluator, ProgramBuilder};
/// use rpn_engine::numeric::Number;
///
/// let program = ProgramBuilder::new(standard_registry())
///     .number(10)
///     .number(4)
///     .op("-")
///     .unwrap()
///     .build();
///
/// assert_eq!(Evaluator::new().evaluate_to_number(&program), Some(Number::from(6)));
/// ```
pub struct ProgramBuilder<'r> {
    registry: &'r OperationRegistry,
    items: Vec<StackItem>,
}

impl<'r> ProgramBuilder<'r> {
    pub fn new(registry: &'r OperationRegistry) -> Self {
        Self {
            registry,
            items: Vec::new(),
        }
    }

    /// Append a literal number
    pub fn number(mut self, value: impl Into<Number>) -> Self {
        self.items.push(StackItem::number(value));
        self
    }

    /// Append a literal parsed from decimal text
    pub fn literal(mut self, text: &str) -> Result<Self, ProgramError> {
        let value = parse_literal(text)?;
        self.items.push(StackItem::Number(value));
        Ok(self)
    }

    /// Append the operation registered under `key`
    pub fn op(mut self, key: &str) -> Result<Self, ProgramError> {
        let item = self
            .registry
            .item(key)
            .ok_or_else(|| ProgramError::UnknownOperation(key.to_string()))?;
        self.items.push(item);
        Ok(self)
    }

    /// Append an operation that is not in the registry
    pub fn operation(mut self, operation: Arc<dyn Operation>) -> Self {
        self.items.push(StackItem::Operation(operation));
        self
    }

    /// Append a pre-existing error
    pub fn error(mut self, error: CalcError) -> Self {
        self.items.push(StackItem::Error(error));
        self
    }

    pub fn build(self) -> Vec<StackItem> {
        self.items
    }
}

/// Parse whitespace-separated postfix text into a program.
///
/// Each token is looked up in `registry` first and otherwise read as a
/// decimal literal, so `"2 3 ^"` and `"2 3 power"` are the same program.
pub fn parse_program(registry: &OperationRegistry, text: &str) -> Result<Vec<StackItem>, ProgramError> {
    text.split_whitespace()
        .map(|token| match registry.item(token) {
            Some(item) => Ok(item),
            None => parse_token(token).map(StackItem::Number),
        })
        .collect()
}

fn parse_literal(text: &str) -> Result<Number, ProgramError> {
    Number::parse(text).map_err(|error| ProgramError::InvalidLiteral {
        token: text.to_string(),
        error,
    })
}

/// Tokens that do not start like a number are reported as unknown operations.
fn parse_token(token: &str) -> Result<Number, ProgramError> {
    let numeric_start = token
        .trim_start_matches(['-', '+'])
        .starts_with(|c: char| c.is_ascii_digit() || c == '.');

    if numeric_start {
        parse_literal(token)
    } else {
        Err(ProgramError::UnknownOperation(token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::standard_registry;
    use crate::operations::Add;

    #[test]
    fn test_parse_simple_program() {
        let program = parse_program(standard_registry(), "3 4 +").unwrap();
        assert_eq!(program.len(), 3);
        assert_eq!(program[0], StackItem::number(3));
        assert_eq!(program[1], StackItem::number(4));
        assert_eq!(program[2].as_operation().map(|op| op.symbol()), Some("+"));
    }

    #[test]
    fn test_parse_names_and_decimals() {
        let program = parse_program(standard_registry(), "  -1.50\t2  multiply\n").unwrap();
        assert_eq!(program[0], StackItem::Number(Number::parse("-1.50").unwrap()));
        assert_eq!(program[2].as_operation().map(|op| op.symbol()), Some("*"));
    }

    #[test]
    fn test_subtract_symbol_is_not_a_literal() {
        let program = parse_program(standard_registry(), "5 3 -").unwrap();
        assert!(program[2].as_operation().is_some());
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_program(standard_registry(), "   ").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_operation() {
        let err = parse_program(standard_registry(), "1 2 MOD").unwrap_err();
        assert_eq!(err, ProgramError::UnknownOperation("MOD".to_string()));
        assert_eq!(err.to_string(), "unknown operation: MOD");
    }

    #[test]
    fn test_invalid_literal() {
        let err = parse_program(standard_registry(), "1.2.3 4 +").unwrap_err();
        assert!(matches!(err, ProgramError::InvalidLiteral { ref token, .. } if token == "1.2.3"));
    }

    #[test]
    fn test_builder() {
        let program = ProgramBuilder::new(standard_registry())
            .literal("2.5")
            .unwrap()
            .number(2)
            .operation(Arc::new(Add))
            .error(CalcError::custom("upstream"))
            .build();

        assert_eq!(program.len(), 4);
        assert!(program[3].is_error());
    }

    #[test]
    fn test_builder_unknown_key() {
        let result = ProgramBuilder::new(standard_registry()).number(1).op("nope");
        assert!(matches!(result, Err(ProgramError::UnknownOperation(_))));
    }
}
