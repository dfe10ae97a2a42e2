// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod event_handler;
pub mod operation;

pub use event_handler::{
    EvaluationEvent, EvaluationId, EventHandler, HaltReason, LoggingEventHandler,
    NoOpEventHandler,
};
pub use operation::{OperandSpec, Operation, OperationFailure, OperationInfo, OperationResult};
