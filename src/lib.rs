//! Evolutionary root finder for single-variable real functions.
//!
//! Searches an integer-bounded interval for points where `f(x) ≈ 0` using
//! tournament selection, digit-level point mutation and steady-state
//! replacement over a fixed-width decimal encoding of real numbers.
//!
//! The function itself is injected as an [`Objective`]; this crate never
//! parses or evaluates expression text. The equation string is read only to
//! estimate how many roots to keep (its highest exponent).
//!
//! ```
//! use u_rootsolve::{RootSolver, SolverConfig};
//!
//! let config = SolverConfig::default()
//!     .with_population_size(20)
//!     .with_bounds(-5.0, 5.0)
//!     .with_error(0.01)
//!     .with_seed(1);
//! let mut solver = RootSolver::new("x**3 - x", |x: f64| x * x * x - x, config).unwrap();
//! solver.run(500).unwrap();
//! assert!(solver.roots().len() <= 3);
//! ```
//!
//! # Non-goals
//!
//! Symbolic solving, multivariate equations, and guarantees of convergence
//! or completeness: this is a heuristic search.

pub mod error;
pub mod solver;

pub use error::{ConfigError, EvaluationError, SolveResult, SolverError};
pub use solver::{
    compute_fraction_width, compute_integer_width, max_roots_from_equation, rank_tournament,
    tournament, DigitMutation, Evaluation, FitnessMode, Genome, GenomeCodec, Objective,
    RootOutcome, RootRecord, RootSolver, RootTracker, RunReport, SolverConfig,
};
