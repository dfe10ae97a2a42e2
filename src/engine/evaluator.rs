// ============================================================================
// Evaluator
// Runs a postfix program against a private working stack
// ============================================================================

use crate::domain::{CalcError, Stack, StackItem};
use crate::interfaces::{EvaluationEvent, EvaluationId, EventHandler, HaltReason, NoOpEventHandler};
use crate::numeric::{config, Number, NumericConfig};
use chrono::Utc;
use std::sync::Arc;

/// How an evaluation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every program item was processed
    Completed,
    /// Processing stopped at an error
    Halted(HaltReason),
}

/// Terminal state of one evaluation.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub stack: Stack,
    pub outcome: Outcome,
}

impl Evaluation {
    pub fn is_halted(&self) -> bool {
        matches!(self.outcome, Outcome::Halted(_))
    }
}

/// Sequential postfix evaluator.
///
/// Items are processed left to right against a fresh working stack:
/// - a number is pushed
/// - an error in the program poisons the run: the result is a stack holding
///   only that error, and nothing after it is looked at
/// - an operation executes against the stack; if it leaves an error on top the
///   run halts and the stack is returned exactly as the operation left it
///
/// A program with surplus literals completes with more than one item; that is
/// not treated as an error here.
///
/// # Example
/// ```
/// use rpn_engine::prelude::*;
///
/// let registry = standard_registry();
/// let program = parse_program(registry, "3 4 + 5 *").unwrap();
/// let result = Evaluator::new().evaluate_to_number(&program);
/// assert_eq!(result, Some(Number::from(35)));
/// ```
pub struct Evaluator {
    /// Explicit configuration; `None` reads the process-wide one per run
    config: Option<NumericConfig>,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,
}

impl Evaluator {
    /// Evaluator reading the process-wide numeric configuration.
    pub fn new() -> Self {
        Self {
            config: None,
            event_handler: Arc::new(NoOpEventHandler),
        }
    }

    /// Evaluator pinned to an explicit numeric configuration.
    pub fn with_config(config: NumericConfig) -> Self {
        Self {
            config: Some(config),
            event_handler: Arc::new(NoOpEventHandler),
        }
    }

    /// Builder method: set the event handler
    pub fn with_event_handler(mut self, event_handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = event_handler;
        self
    }

    /// Configuration the next run will use.
    pub fn config(&self) -> NumericConfig {
        self.config.unwrap_or_else(config::snapshot)
    }

    /// Run `program` and report how it ended.
    pub fn run(&self, program: &[StackItem]) -> Evaluation {
        let id = EvaluationId::new();
        let config = self.config();
        let mut recorder = Recorder::new(id, self.event_handler.enabled());

        let span = tracing::debug_span!("evaluate", evaluation_id = %id.as_uuid(), items = program.len());
        let _guard = span.enter();

        recorder.record(|evaluation_id, timestamp| EvaluationEvent::Started {
            evaluation_id,
            program_len: program.len(),
            timestamp,
        });

        let mut stack = Stack::with_capacity(program.len());

        for (position, item) in program.iter().enumerate() {
            match item {
                StackItem::Number(value) => {
                    stack.push(*value);
                    let depth = stack.len();
                    recorder.record(|evaluation_id, timestamp| EvaluationEvent::LiteralPushed {
                        evaluation_id,
                        value: *value,
                        depth,
                        timestamp,
                    });
                },

                StackItem::Error(err) => {
                    tracing::debug!(position, error = %err, "error in program input");
                    let reason = HaltReason::PoisonedInput { position };
                    return self.halt(recorder, vec![StackItem::Error(err.clone())].into(), reason, err.clone());
                },

                StackItem::Operation(op) => {
                    op.execute_with(&mut stack, &config);

                    if let Some(StackItem::Error(err)) = stack.top() {
                        let err = err.clone();
                        tracing::debug!(position, symbol = op.symbol(), error = %err, "operation failed");
                        let reason = HaltReason::OperationFailed {
                            symbol: op.symbol().to_string(),
                            position,
                        };
                        return self.halt(recorder, stack, reason, err);
                    }

                    tracing::trace!(position, symbol = op.symbol(), depth = stack.len(), "operation applied");
                    let depth = stack.len();
                    recorder.record(|evaluation_id, timestamp| EvaluationEvent::OperationApplied {
                        evaluation_id,
                        symbol: op.symbol().to_string(),
                        depth,
                        timestamp,
                    });
                },
            }
        }

        let depth = stack.len();
        tracing::debug!(depth, "evaluation completed");
        recorder.record(|evaluation_id, timestamp| EvaluationEvent::Completed {
            evaluation_id,
            depth,
            timestamp,
        });
        recorder.flush(self.event_handler.as_ref());

        Evaluation {
            id,
            stack,
            outcome: Outcome::Completed,
        }
    }

    /// Terminal working stack of `program`.
    pub fn evaluate(&self, program: &[StackItem]) -> Stack {
        self.run(program).stack
    }

    /// The sole number left by `program`, if the terminal stack is exactly one
    /// number.
    pub fn evaluate_to_number(&self, program: &[StackItem]) -> Option<Number> {
        self.evaluate(program).single_number()
    }

    /// The error on top of the terminal stack, if any.
    pub fn evaluate_for_error(&self, program: &[StackItem]) -> Option<CalcError> {
        match self.evaluate(program).pop() {
            Some(StackItem::Error(err)) => Some(err),
            _ => None,
        }
    }

    fn halt(&self, mut recorder: Recorder, stack: Stack, reason: HaltReason, error: CalcError) -> Evaluation {
        recorder.record(|evaluation_id, timestamp| EvaluationEvent::Halted {
            evaluation_id,
            reason: reason.clone(),
            error,
            timestamp,
        });
        recorder.flush(self.event_handler.as_ref());

        Evaluation {
            id: recorder.id,
            stack,
            outcome: Outcome::Halted(reason),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Buffers events for one run; skips building them when nobody listens.
struct Recorder {
    id: EvaluationId,
    events: Option<Vec<EvaluationEvent>>,
}

impl Recorder {
    fn new(id: EvaluationId, enabled: bool) -> Self {
        Self {
            id,
            events: enabled.then(Vec::new),
        }
    }

    fn record<F>(&mut self, build: F)
    where
        F: FnOnce(EvaluationId, chrono::DateTime<Utc>) -> EvaluationEvent,
    {
        if let Some(events) = self.events.as_mut() {
            events.push(build(self.id, Utc::now()));
        }
    }

    fn flush(&mut self, handler: &dyn EventHandler) {
        if let Some(events) = self.events.take() {
            handler.on_events(events);
        }
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// [`Evaluator::evaluate`] with the process-wide configuration.
pub fn evaluate(program: &[StackItem]) -> Stack {
    Evaluator::new().evaluate(program)
}

/// [`Evaluator::evaluate_to_number`] with the process-wide configuration.
pub fn evaluate_to_number(program: &[StackItem]) -> Option<Number> {
    Evaluator::new().evaluate_to_number(program)
}

/// [`Evaluator::evaluate_for_error`] with the process-wide configuration.
pub fn evaluate_for_error(program: &[StackItem]) -> Option<CalcError> {
    Evaluator::new().evaluate_for_error(program)
}
