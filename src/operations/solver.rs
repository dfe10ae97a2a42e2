// ============================================================================
// Bounded Newton Solver
// Root finding with a numerical derivative and a fixed iteration budget
// ============================================================================

use std::fmt;

/// Iteration budget before giving up.
pub const MAX_ITERATIONS: usize = 100;

/// Converged once successive guesses differ by less than this.
pub const TOLERANCE: f64 = 1e-10;

/// Step for the central-difference derivative.
const DERIVATIVE_STEP: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverError {
    /// Budget exhausted without meeting the tolerance
    DidNotConverge { iterations: usize, last_guess: f64 },
    /// Derivative vanished; the next step would be unbounded
    FlatDerivative { at: f64 },
    /// Function or guess became NaN or infinite
    NonFinite,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::DidNotConverge { iterations, .. } => {
                write!(f, "did not converge within {} iterations", iterations)
            },
            SolverError::FlatDerivative { .. } => write!(f, "derivative vanished during solve"),
            SolverError::NonFinite => write!(f, "solve produced an undefined value"),
        }
    }
}

impl std::error::Error for SolverError {}

/// Find `x` with `f(x) = 0` starting from `guess`.
///
/// # Example
/// ```
/// use rpn_engine::operations::solver::newton;
///
/// let root = newton(|x| x * x - 2.0, 1.0).unwrap();
/// assert!((root - 2f64.sqrt()).abs() < 1e-9);
/// ```
pub fn newton<F>(f: F, guess: f64) -> Result<f64, SolverError>
where
    F: Fn(f64) -> f64,
{
    let mut x = guess;

    for iteration in 1..=MAX_ITERATIONS {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(SolverError::NonFinite);
        }
        if fx == 0.0 {
            return Ok(x);
        }

        let slope = (f(x + DERIVATIVE_STEP) - f(x - DERIVATIVE_STEP)) / (2.0 * DERIVATIVE_STEP);
        if !slope.is_finite() {
            return Err(SolverError::NonFinite);
        }
        if slope == 0.0 {
            return Err(SolverError::FlatDerivative { at: x });
        }

        let next = x - fx / slope;
        if !next.is_finite() {
            return Err(SolverError::NonFinite);
        }
        if (next - x).abs() < TOLERANCE {
            tracing::trace!(iteration, root = next, "newton converged");
            return Ok(next);
        }
        x = next;
    }

    tracing::warn!(iterations = MAX_ITERATIONS, last_guess = x, "newton did not converge");
    Err(SolverError::DidNotConverge {
        iterations: MAX_ITERATIONS,
        last_guess: x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_root_of_two() {
        let root = newton(|x| x * x - 2.0, 1.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_exact_guess_returns_immediately() {
        assert_eq!(newton(|x| x - 3.0, 3.0), Ok(3.0));
    }

    #[test]
    fn test_no_real_root_does_not_loop_forever() {
        // x² + 1 has no real root; Newton wanders until the budget runs out
        let result = newton(|x| x * x + 1.0, 0.5);
        assert!(matches!(
            result,
            Err(SolverError::DidNotConverge { iterations: MAX_ITERATIONS, .. })
                | Err(SolverError::FlatDerivative { .. })
                | Err(SolverError::NonFinite)
        ));
    }

    #[test]
    fn test_flat_function() {
        assert!(matches!(
            newton(|_| 1.0, 0.0),
            Err(SolverError::FlatDerivative { .. })
        ));
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(newton(|x| 1.0 / (x - x), 1.0), Err(SolverError::NonFinite));
    }

    #[test]
    fn test_error_display() {
        let err = SolverError::DidNotConverge {
            iterations: MAX_ITERATIONS,
            last_guess: 0.0,
        };
        assert_eq!(err.to_string(), "did not converge within 100 iterations");
    }
}
