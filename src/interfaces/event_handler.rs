// ============================================================================
// Event Handler Interface
// Defines the contract for observing evaluation progress
// ============================================================================

use crate::domain::CalcError;
use crate::numeric::Number;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier tying together the events of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluationId(Uuid);

impl EvaluationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EvaluationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Why an evaluation stopped before consuming its whole program.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HaltReason {
    /// An error value appeared directly in the program
    PoisonedInput { position: usize },

    /// An operation left an error on top of the stack
    OperationFailed { symbol: String, position: usize },
}

impl HaltReason {
    /// Index of the program item that caused the halt.
    pub fn position(&self) -> usize {
        match self {
            HaltReason::PoisonedInput { position } | HaltReason::OperationFailed { position, .. } => {
                *position
            },
        }
    }
}

/// Events emitted by the evaluator
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EvaluationEvent {
    /// Evaluation began
    Started {
        evaluation_id: EvaluationId,
        program_len: usize,
        timestamp: DateTime<Utc>,
    },

    /// Literal number pushed onto the working stack
    LiteralPushed {
        evaluation_id: EvaluationId,
        value: Number,
        depth: usize,
        timestamp: DateTime<Utc>,
    },

    /// Operation ran and left a number on top
    OperationApplied {
        evaluation_id: EvaluationId,
        symbol: String,
        depth: usize,
        timestamp: DateTime<Utc>,
    },

    /// Evaluation stopped early
    Halted {
        evaluation_id: EvaluationId,
        reason: HaltReason,
        error: CalcError,
        timestamp: DateTime<Utc>,
    },

    /// Whole program consumed
    Completed {
        evaluation_id: EvaluationId,
        depth: usize,
        timestamp: DateTime<Utc>,
    },
}

impl EvaluationEvent {
    pub fn evaluation_id(&self) -> EvaluationId {
        match self {
            EvaluationEvent::Started { evaluation_id, .. }
            | EvaluationEvent::LiteralPushed { evaluation_id, .. }
            | EvaluationEvent::OperationApplied { evaluation_id, .. }
            | EvaluationEvent::Halted { evaluation_id, .. }
            | EvaluationEvent::Completed { evaluation_id, .. } => *evaluation_id,
        }
    }
}

/// Event handler trait for processing evaluator events
/// Implementations can handle logging, audit trails, UI updates, etc.
pub trait EventHandler: Send + Sync {
    /// Handle an evaluation event
    fn on_event(&self, event: EvaluationEvent);

    /// Whether events should be built at all
    fn enabled(&self) -> bool {
        true
    }

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<EvaluationEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: EvaluationEvent) {}

    fn enabled(&self) -> bool {
        false
    }

    fn on_events(&self, _events: Vec<EvaluationEvent>) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: EvaluationEvent) {
        match &event {
            EvaluationEvent::Halted { .. } => tracing::debug!("Evaluation halted: {:?}", event),
            _ => tracing::trace!("Evaluation event: {:?}", event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(EvaluationEvent::Started {
            evaluation_id: EvaluationId::new(),
            program_len: 0,
            timestamp: Utc::now(),
        });
        // Should not panic
    }

    #[test]
    fn test_event_carries_evaluation_id() {
        let id = EvaluationId::new();
        let event = EvaluationEvent::Completed {
            evaluation_id: id,
            depth: 1,
            timestamp: Utc::now(),
        };
        assert_eq!(event.evaluation_id(), id);
        assert_ne!(EvaluationId::new(), id);
    }

    #[test]
    fn test_halt_reason_position() {
        assert_eq!(HaltReason::PoisonedInput { position: 1 }.position(), 1);
        assert_eq!(
            HaltReason::OperationFailed {
                symbol: "/".to_string(),
                position: 2,
            }
            .position(),
            2
        );
    }
}
