//! The objective contract between the solver and the function being solved.
//!
//! The solver never parses or interprets an expression. It only asks an
//! [`Objective`] for `f(x)` at decoded candidate points.

use crate::error::EvaluationError;

/// A single-variable real function whose roots are sought.
///
/// Any `Fn(f64) -> f64` closure is an objective. A closure result that is
/// not finite (NaN or infinite, e.g. after a division by zero) is reported
/// as an [`EvaluationError`].
///
/// # Implementing
///
/// Objectives with their own domain checks implement the trait directly:
///
/// ```
/// use u_rootsolve::{EvaluationError, Objective};
///
/// struct Reciprocal;
///
/// impl Objective for Reciprocal {
///     fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
///         if x == 0.0 {
///             return Err(EvaluationError::new(x, "division by zero"));
///         }
///         Ok(1.0 / x - 0.5)
///     }
/// }
///
/// assert_eq!(Reciprocal.evaluate(2.0), Ok(0.0));
/// assert!(Reciprocal.evaluate(0.0).is_err());
/// ```
pub trait Objective {
    /// Returns `f(x)`, or an error if `f` is undefined at `x`.
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError>;
}

impl<F> Objective for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        let y = self(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(EvaluationError::new(x, format!("non-finite result {y}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_objective() {
        let f = |x: f64| x * x - 4.0;
        assert_eq!(f.evaluate(2.0), Ok(0.0));
        assert_eq!(f.evaluate(3.0), Ok(5.0));
    }

    #[test]
    fn test_closure_non_finite_is_error() {
        let f = |x: f64| 1.0 / x;
        let err = f.evaluate(0.0).unwrap_err();
        assert_eq!(err.x, 0.0);
        assert!(err.reason.contains("inf"));

        let g = |x: f64| (x - 10.0).sqrt();
        assert!(g.evaluate(0.0).is_err());
    }
}
