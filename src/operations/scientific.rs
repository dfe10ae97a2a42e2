// ============================================================================
// Scientific Operations
// Transcendental functions computed in f64 and wrapped as lossy decimals
// ============================================================================
//
// None of these have an exact decimal algorithm, so operands are converted to
// f64, the function is evaluated, and the result goes back through
// Number::from_f64_lossy. Results carry roughly 15 significant digits.

use crate::interfaces::operation::as_f64;
use crate::interfaces::{OperandSpec, Operation, OperationFailure, OperationInfo, OperationResult};
use crate::numeric::{Number, NumericConfig};

/// Wrap a float result; NaN, infinities and out-of-range magnitudes are
/// undefined.
fn lossy(value: f64) -> OperationResult {
    Number::from_f64_lossy(value).map_err(|_| OperationFailure::Undefined)
}

/// Implements a one-operand float function with no domain restriction.
fn unary(args: &[Number], f: fn(f64) -> f64) -> OperationResult {
    lossy(f(as_f64(args[0])?))
}

const ANGLE: &[OperandSpec] = &[OperandSpec::new("θ", "angle in radians")];

static POWER_INFO: OperationInfo = OperationInfo {
    name: "POWER",
    symbol: "^",
    arity: 2,
    description: "x raised to the power y",
    example: "2 10 ^ → 1024",
    operands: &[
        OperandSpec::new("x", "base"),
        OperandSpec::new("y", "exponent"),
    ],
};

pub struct Power;

impl Operation for Power {
    fn info(&self) -> &'static OperationInfo {
        &POWER_INFO
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        lossy(as_f64(args[0])?.powf(as_f64(args[1])?))
    }
}

static SQUARE_ROOT_INFO: OperationInfo = OperationInfo {
    name: "SQUARE_ROOT",
    symbol: "SQRT",
    arity: 1,
    description: "Square root of x",
    example: "16 SQRT → 4",
    operands: &[OperandSpec::new("x", "radicand, must not be negative")],
};

pub struct SquareRoot;

impl Operation for SquareRoot {
    fn info(&self) -> &'static OperationInfo {
        &SQUARE_ROOT_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        if args[0].is_negative() {
            return Err(OperationFailure::domain("Square root of negative number"));
        }
        Ok(())
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        unary(args, f64::sqrt)
    }
}

fn require_log_argument(x: Number) -> Result<(), OperationFailure> {
    if x.is_negative() || x.is_zero() {
        return Err(OperationFailure::domain("Logarithm of non-positive number"));
    }
    Ok(())
}

static NATURAL_LOG_INFO: OperationInfo = OperationInfo {
    name: "NATURAL_LOG",
    symbol: "LN",
    arity: 1,
    description: "Natural logarithm of x",
    example: "1 LN → 0",
    operands: &[OperandSpec::new("x", "argument, must be positive")],
};

pub struct NaturalLog;

impl Operation for NaturalLog {
    fn info(&self) -> &'static OperationInfo {
        &NATURAL_LOG_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        require_log_argument(args[0])
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        unary(args, f64::ln)
    }
}

static LOG10_INFO: OperationInfo = OperationInfo {
    name: "LOG10",
    symbol: "LOG",
    arity: 1,
    description: "Base-10 logarithm of x",
    example: "1000 LOG → 3",
    operands: &[OperandSpec::new("x", "argument, must be positive")],
};

pub struct Log10;

impl Operation for Log10 {
    fn info(&self) -> &'static OperationInfo {
        &LOG10_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        require_log_argument(args[0])
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        unary(args, f64::log10)
    }
}

static EXPONENTIAL_INFO: OperationInfo = OperationInfo {
    name: "EXPONENTIAL",
    symbol: "EXP",
    arity: 1,
    description: "e raised to the power x",
    example: "0 EXP → 1",
    operands: &[OperandSpec::new("x", "exponent")],
};

pub struct Exponential;

impl Operation for Exponential {
    fn info(&self) -> &'static OperationInfo {
        &EXPONENTIAL_INFO
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        unary(args, f64::exp)
    }
}

static SINE_INFO: OperationInfo = OperationInfo {
    name: "SINE",
    symbol: "SIN",
    arity: 1,
    description: "Sine of an angle in radians",
    example: "0 SIN → 0",
    operands: ANGLE,
};

pub struct Sine;

impl Operation for Sine {
    fn info(&self) -> &'static OperationInfo {
        &SINE_INFO
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        unary(args, f64::sin)
    }
}

static COSINE_INFO: OperationInfo = OperationInfo {
    name: "COSINE",
    symbol: "COS",
    arity: 1,
    description: "Cosine of an angle in radians",
    example: "0 COS → 1",
    operands: ANGLE,
};

pub struct Cosine;

impl Operation for Cosine {
    fn info(&self) -> &'static OperationInfo {
        &COSINE_INFO
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        unary(args, f64::cos)
    }
}

static TANGENT_INFO: OperationInfo = OperationInfo {
    name: "TANGENT",
    symbol: "TAN",
    arity: 1,
    description: "Tangent of an angle in radians",
    example: "0 TAN → 0",
    operands: ANGLE,
};

pub struct Tangent;

impl Operation for Tangent {
    fn info(&self) -> &'static OperationInfo {
        &TANGENT_INFO
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        unary(args, f64::tan)
    }
}
