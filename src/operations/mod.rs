// ============================================================================
// Operations Module
// Built-in calculations implementing the Operation contract
// ============================================================================

pub mod arithmetic;
pub mod financial;
pub mod scientific;
pub mod solver;

use crate::interfaces::Operation;
use std::sync::Arc;

pub use arithmetic::{Absolute, Add, Divide, Multiply, Negate, Percent, Reciprocal, Subtract};
pub use financial::{
    BondPrice, CapRate, ExpectedValue, FutureValue, InterestRate, Payment, PresentValue,
    ReturnOnInvestment,
};
pub use scientific::{
    Cosine, Exponential, Log10, NaturalLog, Power, Sine, SquareRoot, Tangent,
};

/// Exact decimal arithmetic.
pub fn arithmetic_operations() -> Vec<Arc<dyn Operation>> {
    vec![
        Arc::new(Add),
        Arc::new(Subtract),
        Arc::new(Multiply),
        Arc::new(Divide),
        Arc::new(Percent),
        Arc::new(Reciprocal),
        Arc::new(Negate),
        Arc::new(Absolute),
    ]
}

/// Float-backed transcendental functions.
pub fn scientific_operations() -> Vec<Arc<dyn Operation>> {
    vec![
        Arc::new(Power),
        Arc::new(SquareRoot),
        Arc::new(NaturalLog),
        Arc::new(Log10),
        Arc::new(Exponential),
        Arc::new(Sine),
        Arc::new(Cosine),
        Arc::new(Tangent),
    ]
}

/// Time-value-of-money and ratio formulas.
pub fn financial_operations() -> Vec<Arc<dyn Operation>> {
    vec![
        Arc::new(FutureValue),
        Arc::new(PresentValue),
        Arc::new(Payment),
        Arc::new(BondPrice),
        Arc::new(CapRate),
        Arc::new(ReturnOnInvestment),
        Arc::new(ExpectedValue),
        Arc::new(InterestRate),
    ]
}
