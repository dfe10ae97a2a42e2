// ============================================================================
// Domain Models Module
// Stack values, error values and the working stack
// ============================================================================

pub mod error;
pub mod stack;
pub mod stack_item;

pub use error::{CalcError, ErrorKind, UNDEFINED_RESULT};
pub use stack::{Popped, Stack};
pub use stack_item::StackItem;
