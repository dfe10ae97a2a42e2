// ============================================================================
// RPN Engine Library
// Deterministic postfix evaluation over exact decimal numbers
// ============================================================================

//! # RPN Engine
//!
//! The computational core of a postfix (Reverse Polish) calculator.
//!
//! ## Features
//!
//! - **Exact decimal numbers** with a process-wide precision and rounding mode
//! - **Closed stack item model**: numbers, operations and errors
//! - **Pluggable operations** looked up by symbol in a registry
//! - **Short-circuit evaluation**: the first error ends the run
//! - **Financial formulas** including a bounded Newton rate solver
//! - **Event hooks** for tracing evaluations
//!
//! ## Example
//!
//! ```rust
//! use rpn_engine::prelude::*;
//!
//! let registry = standard_registry();
//!
//! // (3 + 4) * 5
//! let program = parse_program(registry, "3 4 + 5 *").unwrap();
//! assert_eq!(evaluate_to_number(&program), Some(Number::from(35)));
//!
//! // Failures are values, not panics
//! let program = parse_program(registry, "10 0 / 5 +").unwrap();
//! let error = evaluate_for_error(&program).unwrap();
//! assert_eq!(error.kind(), ErrorKind::Domain);
//! assert_eq!(error.to_string(), "/: Division by zero");
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod operations;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{CalcError, ErrorKind, Stack, StackItem};
    pub use crate::engine::{
        evaluate, evaluate_for_error, evaluate_to_number, parse_program, standard_registry,
        Evaluation, Evaluator, OperationRegistry, Outcome, ProgramBuilder, ProgramError,
        RegistryBuilder,
    };
    pub use crate::interfaces::{
        EvaluationEvent, EventHandler, HaltReason, LoggingEventHandler, NoOpEventHandler,
        OperandSpec, Operation, OperationInfo, OperationResult,
    };
    pub use crate::numeric::{Number, NumericConfig, RoundingMode};
}
