//! Error types for the root solver.
//!
//! Construction problems surface as [`ConfigError`], failures of the injected
//! objective as [`EvaluationError`], and everything a solver call can return
//! is wrapped in [`SolverError`].

use thiserror::Error;

/// Invalid construction parameters. Fatal to the solver instance.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The tolerance must lie strictly between 0 and 1.
    #[error("error tolerance must be in (0, 1), got {0}")]
    ErrorOutOfRange(f64),

    /// A domain bound is not an integer value.
    #[error("{name} must be an integer, got {value}")]
    NonIntegerBound { name: &'static str, value: f64 },

    /// The domain is empty or a single point.
    #[error("left_bound ({left}) must be strictly less than right_bound ({right})")]
    EmptyDomain { left: f64, right: f64 },

    /// Replacement needs two distinct winners and two distinct losers.
    #[error("tournament_size must be at least 4, got {0}")]
    TournamentTooSmall(usize),

    /// Cannot draw more distinct indices than the population holds.
    #[error("tournament_size ({tournament_size}) exceeds population_size ({population_size})")]
    TournamentTooLarge {
        tournament_size: usize,
        population_size: usize,
    },

    /// At least one locus must change per mutation.
    #[error("max_mutations must be at least 1")]
    NoMutations,

    /// The retry budget must allow at least one attempt.
    #[error("max_mutation_attempts must be at least 1")]
    NoMutationAttempts,

    /// Probability outside [0, 1].
    #[error("flip_chance must be in [0, 1], got {0}")]
    FlipChanceOutOfRange(f64),

    /// The clustering radius must be positive.
    #[error("significance must be positive, got {0}")]
    NonPositiveSignificance(f64),

    /// Crowding parameters must be finite and non-negative.
    #[error("crowding radius and penalty must be non-negative, got radius={radius}, penalty={penalty}")]
    InvalidCrowding { radius: f64, penalty: f64 },

    /// A root cap of zero would discard every candidate.
    #[error("max_roots must be at least 1")]
    NoRoots,
}

/// The objective could not be evaluated at `x`.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("evaluation failed at x = {x}: {reason}")]
pub struct EvaluationError {
    /// The point at which evaluation failed.
    pub x: f64,
    /// Human-readable cause (domain error, overflow, ...).
    pub reason: String,
}

impl EvaluationError {
    /// Creates an evaluation error for the point `x`.
    pub fn new(x: f64, reason: impl Into<String>) -> Self {
        Self {
            x,
            reason: reason.into(),
        }
    }
}

/// Top-level error type for solver operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The objective failed for a candidate.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// Mutation could not produce an in-bounds child within its retry budget.
    #[error("no in-bounds child of {parent} after {attempts} attempts")]
    BoundsExhaustion { parent: String, attempts: usize },
}

/// Result type alias for solver operations.
pub type SolveResult<T> = Result<T, SolverError>;
