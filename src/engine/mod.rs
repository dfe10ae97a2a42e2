// ============================================================================
// Engine Module
// Contains the evaluator, the operation registry and program construction
// ============================================================================

mod evaluator;
mod program;

pub mod registry;

pub use evaluator::{evaluate, evaluate_for_error, evaluate_to_number, Evaluation, Evaluator, Outcome};
pub use program::{parse_program, ProgramBuilder, ProgramError};
pub use registry::{standard_registry, OperationRegistry, RegistryBuilder};
