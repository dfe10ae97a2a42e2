// ============================================================================
// Operation Interface
// Defines the contract every calculation on the working stack follows
// ============================================================================

use crate::domain::{CalcError, Stack, StackItem, UNDEFINED_RESULT};
use crate::numeric::{config, Number, NumericConfig, NumericError};
use smallvec::SmallVec;
use std::fmt;

/// Name and plain-language meaning of one operand, for help and wizard UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandSpec {
    pub name: &'static str,
    pub meaning: &'static str,
}

impl OperandSpec {
    pub const fn new(name: &'static str, meaning: &'static str) -> Self {
        Self { name, meaning }
    }
}

/// Static description of an operation.
///
/// Only `symbol` and `arity` take part in evaluation; the rest is read by
/// presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationInfo {
    /// Upper-case registry name (e.g. `"DIVIDE"`)
    pub name: &'static str,
    /// Short display symbol (e.g. `"/"`)
    pub symbol: &'static str,
    /// Number of operands consumed
    pub arity: usize,
    /// One-line description
    pub description: &'static str,
    /// Worked example in postfix form
    pub example: &'static str,
    /// Operands in push order; `operands.len() == arity`
    pub operands: &'static [OperandSpec],
}

/// Why `validate` or `compute` refused to produce a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationFailure {
    /// Precondition violated; the string is the human reason
    Domain(String),
    /// Computation produced NaN or infinity
    Undefined,
}

impl OperationFailure {
    pub fn domain(reason: impl Into<String>) -> Self {
        OperationFailure::Domain(reason.into())
    }

    pub fn reason(&self) -> &str {
        match self {
            OperationFailure::Domain(reason) => reason,
            OperationFailure::Undefined => UNDEFINED_RESULT,
        }
    }
}

impl From<NumericError> for OperationFailure {
    fn from(err: NumericError) -> Self {
        match err {
            NumericError::NotFinite => OperationFailure::Undefined,
            other => OperationFailure::Domain(other.to_string()),
        }
    }
}

impl fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

pub type OperationResult = Result<Number, OperationFailure>;

/// A stateless calculation applied to the working stack.
///
/// Implementors provide metadata, optional domain validation and the
/// computation itself. The stack discipline lives in the provided
/// [`Operation::execute_with`] and must not be overridden:
///
/// 1. fewer than `arity` items: push `InsufficientOperands`, touch nothing else
/// 2. pop exactly `arity` items
/// 3. any non-number among them: push `NonNumericOperand`
/// 4. `validate` fails: push `Domain`
/// 5. `compute` fails: push `Domain` (or the undefined-result reason)
/// 6. otherwise push the computed number
///
/// Operands are handed to `validate` and `compute` in push order, so for
/// `10 4 /` the slice is `[10, 4]`.
pub trait Operation: Send + Sync {
    fn info(&self) -> &'static OperationInfo;

    /// Domain checks on the operands before computing.
    fn validate(&self, _args: &[Number]) -> Result<(), OperationFailure> {
        Ok(())
    }

    /// Produce the result. `config` supplies the scale for quotients; it is
    /// never used for validation.
    fn compute(&self, args: &[Number], config: &NumericConfig) -> OperationResult;

    fn symbol(&self) -> &'static str {
        self.info().symbol
    }

    fn name(&self) -> &'static str {
        self.info().name
    }

    fn arity(&self) -> usize {
        self.info().arity
    }

    /// Run against the stack using the process-wide numeric configuration.
    fn execute(&self, stack: &mut Stack) {
        self.execute_with(stack, &config::snapshot());
    }

    /// Run against the stack with an explicit numeric configuration.
    fn execute_with(&self, stack: &mut Stack, config: &NumericConfig) {
        let info = self.info();

        let Some(popped) = stack.pop_n(info.arity) else {
            let actual = stack.len();
            tracing::trace!(symbol = info.symbol, required = info.arity, actual, "insufficient operands");
            stack.push(CalcError::insufficient_operands(info.symbol, info.arity, actual));
            return;
        };

        let mut args: SmallVec<[Number; 4]> = SmallVec::with_capacity(info.arity);
        for item in popped {
            match item {
                StackItem::Number(n) => args.push(n),
                StackItem::Operation(_) | StackItem::Error(_) => {
                    stack.push(CalcError::non_numeric(info.symbol));
                    return;
                },
            }
        }

        let outcome = self
            .validate(&args)
            .and_then(|()| self.compute(&args, config));

        match outcome {
            Ok(value) => stack.push(value),
            Err(failure) => {
                tracing::trace!(symbol = info.symbol, reason = failure.reason(), "domain error");
                stack.push(CalcError::domain(info.symbol, failure.reason()));
            },
        }
    }
}

impl fmt::Debug for dyn Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("symbol", &self.symbol())
            .field("arity", &self.arity())
            .finish()
    }
}

// ============================================================================
// Shared Validation Helpers
// ============================================================================

/// Fail unless `value` is a whole number in `0..=max`.
pub fn require_count(value: Number, what: &str, max: u32) -> Result<u32, OperationFailure> {
    match value.to_u32() {
        Some(count) if count <= max => Ok(count),
        _ => Err(OperationFailure::Domain(format!(
            "{} must be a whole number between 0 and {}",
            what, max
        ))),
    }
}

/// Fail if `value` is negative.
pub fn require_non_negative(value: Number, what: &str) -> Result<(), OperationFailure> {
    if value.is_negative() {
        return Err(OperationFailure::Domain(format!("{} cannot be negative", what)));
    }
    Ok(())
}

/// Fail unless `value` is strictly positive.
pub fn require_positive(value: Number, what: &str) -> Result<(), OperationFailure> {
    if value.is_negative() || value.is_zero() {
        return Err(OperationFailure::Domain(format!("{} must be positive", what)));
    }
    Ok(())
}

/// Fail unless `value` lies in `[0, 1]`.
pub fn require_unit_interval(value: Number, what: &str) -> Result<(), OperationFailure> {
    if value.is_negative() || value > Number::ONE {
        return Err(OperationFailure::Domain(format!(
            "{} must be between 0 and 1",
            what
        )));
    }
    Ok(())
}

/// Convert an operand for a float-based computation.
pub fn as_f64(value: Number) -> Result<f64, OperationFailure> {
    value
        .to_f64()
        .ok_or_else(|| OperationFailure::domain("operand cannot be represented as a float"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;
    use proptest::prelude::*;

    static HALVE_INFO: OperationInfo = OperationInfo {
        name: "HALVE",
        symbol: "HALVE",
        arity: 1,
        description: "Half of x",
        example: "10 HALVE → 5",
        operands: &[OperandSpec::new("x", "value to halve")],
    };

    struct Halve;

    impl Operation for Halve {
        fn info(&self) -> &'static OperationInfo {
            &HALVE_INFO
        }

        fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
            require_non_negative(args[0], "x")
        }

        fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
            Ok(args[0].checked_div(Number::from(2))?)
        }
    }

    static BLEND_INFO: OperationInfo = OperationInfo {
        name: "BLEND",
        symbol: "BLEND",
        arity: 3,
        description: "a - b + c, or undefined when c is zero",
        example: "5 3 1 BLEND → 3",
        operands: &[
            OperandSpec::new("a", "first"),
            OperandSpec::new("b", "second"),
            OperandSpec::new("c", "third"),
        ],
    };

    struct Blend;

    impl Operation for Blend {
        fn info(&self) -> &'static OperationInfo {
            &BLEND_INFO
        }

        fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
            if args[2].is_zero() {
                return Err(OperationFailure::Undefined);
            }
            Ok(args[0].checked_sub(args[1])?.checked_add(args[2])?)
        }
    }

    fn numbers(values: &[i64]) -> Stack {
        values.iter().map(|v| StackItem::number(*v)).collect()
    }

    #[test]
    fn test_operand_order_is_push_order() {
        let mut stack = numbers(&[5, 3, 1]);
        Blend.execute_with(&mut stack, &NumericConfig::DEFAULT);
        assert_eq!(stack.items(), &[StackItem::number(3)]);
    }

    #[test]
    fn test_insufficient_operands_only_appends() {
        let mut stack = numbers(&[5, 3]);
        Blend.execute_with(&mut stack, &NumericConfig::DEFAULT);

        assert_eq!(stack.len(), 3);
        assert_eq!(&stack.items()[..2], numbers(&[5, 3]).items());
        assert_eq!(
            stack.top(),
            Some(&StackItem::error(CalcError::insufficient_operands("BLEND", 3, 2)))
        );
    }

    #[test]
    fn test_non_numeric_operand_discards_popped() {
        let mut stack = numbers(&[9, 1]);
        stack.push(CalcError::custom("upstream"));
        Halve.execute_with(&mut stack, &NumericConfig::DEFAULT);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.top().and_then(|i| i.as_error()).map(|e| e.kind()), Some(ErrorKind::NonNumericOperand));
        assert_eq!(&stack.items()[..2], numbers(&[9, 1]).items());
    }

    #[test]
    fn test_validation_failure_pushes_domain_error() {
        let mut stack = numbers(&[-4]);
        Halve.execute_with(&mut stack, &NumericConfig::DEFAULT);
        assert_eq!(
            stack.items(),
            &[StackItem::error(CalcError::domain("HALVE", "x cannot be negative"))]
        );
    }

    #[test]
    fn test_undefined_result_pushes_domain_error() {
        let mut stack = numbers(&[1, 2, 0]);
        Blend.execute_with(&mut stack, &NumericConfig::DEFAULT);
        assert_eq!(
            stack.items(),
            &[StackItem::error(CalcError::domain("BLEND", UNDEFINED_RESULT))]
        );
    }

    #[test]
    fn test_failure_from_numeric_error() {
        assert_eq!(
            OperationFailure::from(NumericError::NotFinite),
            OperationFailure::Undefined
        );
        assert_eq!(
            OperationFailure::from(NumericError::DivisionByZero),
            OperationFailure::domain("Division by zero")
        );
    }

    #[test]
    fn test_helpers() {
        assert_eq!(require_count(Number::from(12), "periods", 100), Ok(12));
        assert!(require_count(Number::from(101), "periods", 100).is_err());
        assert!(require_count("1.5".parse().unwrap(), "periods", 100).is_err());
        assert!(require_positive(Number::ZERO, "value").is_err());
        assert!(require_unit_interval("0.5".parse().unwrap(), "p").is_ok());
        assert!(require_unit_interval("1.01".parse().unwrap(), "p").is_err());
        assert!(require_unit_interval(Number::from(-1), "p").is_err());
    }

    proptest! {
        #[test]
        fn prop_short_stack_grows_by_one(depth in 0usize..3) {
            let values: Vec<i64> = (0..depth as i64).collect();
            let mut stack = numbers(&values);
            let before = stack.clone();

            Blend.execute_with(&mut stack, &NumericConfig::DEFAULT);

            prop_assert_eq!(stack.len(), depth + 1);
            prop_assert_eq!(&stack.items()[..depth], before.items());
        }

        #[test]
        fn prop_consumes_arity_and_produces_one(
            values in proptest::collection::vec(-1_000i64..1_000, 3..12)
        ) {
            let mut stack = numbers(&values);
            let depth = stack.len();

            Blend.execute_with(&mut stack, &NumericConfig::DEFAULT);
            prop_assert_eq!(stack.len(), depth + 1 - 3);

            Halve.execute_with(&mut stack, &NumericConfig::DEFAULT);
            prop_assert_eq!(stack.len(), depth + 1 - 3);
        }
    }
}
