// ============================================================================
// Arithmetic Operations
// Exact decimal arithmetic on the working stack
// ============================================================================

use crate::interfaces::{OperandSpec, Operation, OperationFailure, OperationInfo, OperationResult};
use crate::numeric::{Number, NumericConfig};

const X_Y: &[OperandSpec] = &[
    OperandSpec::new("x", "first operand"),
    OperandSpec::new("y", "second operand"),
];

const X: &[OperandSpec] = &[OperandSpec::new("x", "operand")];

// ============================================================================
// Binary Operations
// ============================================================================

static ADD_INFO: OperationInfo = OperationInfo {
    name: "ADD",
    symbol: "+",
    arity: 2,
    description: "Sum of x and y",
    example: "3 4 + → 7",
    operands: X_Y,
};

pub struct Add;

impl Operation for Add {
    fn info(&self) -> &'static OperationInfo {
        &ADD_INFO
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        Ok(args[0].checked_add(args[1])?)
    }
}

static SUBTRACT_INFO: OperationInfo = OperationInfo {
    name: "SUBTRACT",
    symbol: "-",
    arity: 2,
    description: "x minus y",
    example: "10 4 - → 6",
    operands: X_Y,
};

pub struct Subtract;

impl Operation for Subtract {
    fn info(&self) -> &'static OperationInfo {
        &SUBTRACT_INFO
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        Ok(args[0].checked_sub(args[1])?)
    }
}

static MULTIPLY_INFO: OperationInfo = OperationInfo {
    name: "MULTIPLY",
    symbol: "*",
    arity: 2,
    description: "Product of x and y",
    example: "7 5 * → 35",
    operands: X_Y,
};

pub struct Multiply;

impl Operation for Multiply {
    fn info(&self) -> &'static OperationInfo {
        &MULTIPLY_INFO
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        Ok(args[0].checked_mul(args[1])?)
    }
}

static DIVIDE_INFO: OperationInfo = OperationInfo {
    name: "DIVIDE",
    symbol: "/",
    arity: 2,
    description: "x divided by y, rounded to the configured precision",
    example: "10 4 / → 2.5",
    operands: &[
        OperandSpec::new("x", "dividend"),
        OperandSpec::new("y", "divisor, must not be zero"),
    ],
};

pub struct Divide;

impl Operation for Divide {
    fn info(&self) -> &'static OperationInfo {
        &DIVIDE_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        if args[1].is_zero() {
            return Err(OperationFailure::domain("Division by zero"));
        }
        Ok(())
    }

    fn compute(&self, args: &[Number], config: &NumericConfig) -> OperationResult {
        Ok(args[0].checked_div(args[1])?.rounded(config))
    }
}

static PERCENT_INFO: OperationInfo = OperationInfo {
    name: "PERCENT",
    symbol: "%",
    arity: 2,
    description: "y percent of x",
    example: "200 15 % → 30",
    operands: &[
        OperandSpec::new("x", "base amount"),
        OperandSpec::new("y", "percentage"),
    ],
};

pub struct Percent;

impl Operation for Percent {
    fn info(&self) -> &'static OperationInfo {
        &PERCENT_INFO
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        // Division by 100 is exact in decimal
        Ok(args[0]
            .checked_mul(args[1])?
            .checked_div(Number::ONE_HUNDRED)?)
    }
}

// ============================================================================
// Unary Operations
// ============================================================================

static RECIPROCAL_INFO: OperationInfo = OperationInfo {
    name: "RECIPROCAL",
    symbol: "1/x",
    arity: 1,
    description: "One divided by x, rounded to the configured precision",
    example: "4 1/x → 0.25",
    operands: &[OperandSpec::new("x", "value, must not be zero")],
};

pub struct Reciprocal;

impl Operation for Reciprocal {
    fn info(&self) -> &'static OperationInfo {
        &RECIPROCAL_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        if args[0].is_zero() {
            return Err(OperationFailure::domain("Division by zero"));
        }
        Ok(())
    }

    fn compute(&self, args: &[Number], config: &NumericConfig) -> OperationResult {
        Ok(Number::ONE.checked_div(args[0])?.rounded(config))
    }
}

static NEGATE_INFO: OperationInfo = OperationInfo {
    name: "NEGATE",
    symbol: "NEG",
    arity: 1,
    description: "Change the sign of x",
    example: "5 NEG → -5",
    operands: X,
};

pub struct Negate;

impl Operation for Negate {
    fn info(&self) -> &'static OperationInfo {
        &NEGATE_INFO
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        Ok(-args[0])
    }
}

static ABSOLUTE_INFO: OperationInfo = OperationInfo {
    name: "ABSOLUTE",
    symbol: "ABS",
    arity: 1,
    description: "Absolute value of x",
    example: "-5 ABS → 5",
    operands: X,
};

pub struct Absolute;

impl Operation for Absolute {
    fn info(&self) -> &'static OperationInfo {
        &ABSOLUTE_INFO
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        Ok(args[0].abs())
    }
}
