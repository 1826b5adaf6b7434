//! Evolutionary root finding.
//!
//! A steady-state evolutionary search for roots of a single-variable real
//! function over an integer-bounded domain. Candidates are fixed-width
//! decimal strings, so mutation works digit by digit.
//!
//! # Core Types
//!
//! - [`Objective`]: the function being solved (any `Fn(f64) -> f64` works)
//! - [`SolverConfig`]: population, domain, tolerance and operator parameters
//! - [`RootSolver`]: owns the population and root set, runs mating events
//!
//! # Building Blocks
//!
//! - [`GenomeCodec`] / [`Genome`]: the fixed-width encoding
//! - [`tournament`]: distinct-index tournament sampling
//! - [`rank_tournament`]: fitness scoring, optionally crowding-penalized
//! - [`DigitMutation`]: bounded point mutation
//! - [`RootTracker`]: significance-radius root clustering
//!
//! # References
//!
//! - Syswerda (1991), "A Study of Reproduction in Generational and
//!   Steady-State Genetic Algorithms"
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod fitness;
mod genome;
mod operators;
mod roots;
mod runner;
mod selection;
mod types;

pub use config::{FitnessMode, SolverConfig};
pub use fitness::{apply_crowding, evaluate, rank_tournament, Evaluation};
pub use genome::{compute_fraction_width, compute_integer_width, Genome, GenomeCodec};
pub use operators::DigitMutation;
pub use roots::{max_roots_from_equation, RootOutcome, RootRecord, RootTracker};
pub use runner::{RootSolver, RunReport};
pub use selection::tournament;
pub use types::Objective;
