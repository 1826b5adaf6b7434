//! Solver configuration.
//!
//! [`SolverConfig`] holds every parameter that shapes the encoding, the
//! evolutionary operators, and root bookkeeping.

use crate::error::ConfigError;

/// How tournament members are scored before ranking.
///
/// Both modes assume **minimization** (lower fitness = closer to a root).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessMode {
    /// Fitness is `|f(x)|`.
    #[default]
    Absolute,

    /// Fitness is `|f(x)|` plus `penalty` for every *other* tournament member
    /// whose decoded value lies within `radius` of this one.
    ///
    /// Penalizes crowded neighborhoods so a tournament that has collapsed
    /// onto a single value does not keep breeding it.
    Crowding {
        /// Neighborhood half-width.
        radius: f64,
        /// Added once per neighbor.
        penalty: f64,
    },
}

impl FitnessMode {
    /// Crowding with radius 0.25 and penalty 10.
    pub fn crowding() -> Self {
        FitnessMode::Crowding {
            radius: 0.25,
            penalty: 10.0,
        }
    }
}

/// Configuration for the evolutionary root solver.
///
/// # Defaults
///
/// ```
/// use u_rootsolve::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.tournament_size, 7);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_rootsolve::{FitnessMode, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_population_size(30)
///     .with_bounds(-10.0, 10.0)
///     .with_error(0.001)
///     .with_max_mutations(5)
///     .with_fitness_mode(FitnessMode::crowding())
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Number of genomes in the population (`POP_SIZE`).
    pub population_size: usize,

    /// Lower end of the search domain. Must be an integer value.
    pub left_bound: f64,

    /// Upper end of the search domain. Must be an integer value.
    pub right_bound: f64,

    /// Root-acceptance tolerance in (0, 1).
    ///
    /// Also fixes the number of fractional digits in every genome:
    /// `0.001` gives three.
    pub error: f64,

    /// Members drawn per mating event (`T_SIZE`). At least 4.
    pub tournament_size: usize,

    /// Maximum number of loci altered by one mutation (`MNM`).
    pub max_mutations: usize,

    /// Probability that a mutation touching the sign locus inverts it.
    ///
    /// A sign locus that does not flip keeps the parent's sign. The policy
    /// is asymmetric on purpose; set to 0.0 to freeze signs entirely.
    pub flip_chance: f64,

    /// Radius under which two candidate roots count as the same root.
    pub significance: f64,

    /// Fitness scoring used for ranking tournaments.
    pub fitness_mode: FitnessMode,

    /// Minimum re-roll budget for a mutation whose child falls out of
    /// bounds. Mutations that pick many digits get more.
    pub max_mutation_attempts: usize,

    /// Explicit cap on the number of tracked roots.
    ///
    /// `None` derives the cap from the highest exponent in the equation.
    pub max_roots: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            left_bound: -1000.0,
            right_bound: 1000.0,
            error: 1e-5,
            tournament_size: 7,
            max_mutations: 3,
            flip_chance: 0.5,
            significance: 0.1,
            fitness_mode: FitnessMode::default(),
            max_mutation_attempts: 1000,
            max_roots: None,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets both domain bounds.
    pub fn with_bounds(mut self, left: f64, right: f64) -> Self {
        self.left_bound = left;
        self.right_bound = right;
        self
    }

    /// Sets the root tolerance (and with it the fractional width).
    pub fn with_error(mut self, error: f64) -> Self {
        self.error = error;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the maximum number of mutated loci.
    pub fn with_max_mutations(mut self, n: usize) -> Self {
        self.max_mutations = n;
        self
    }

    /// Sets the sign-flip probability.
    pub fn with_flip_chance(mut self, p: f64) -> Self {
        self.flip_chance = p;
        self
    }

    /// Sets the root-clustering radius.
    pub fn with_significance(mut self, radius: f64) -> Self {
        self.significance = radius;
        self
    }

    /// Sets the fitness scoring mode.
    pub fn with_fitness_mode(mut self, mode: FitnessMode) -> Self {
        self.fitness_mode = mode;
        self
    }

    /// Sets the minimum mutation re-roll budget.
    pub fn with_max_mutation_attempts(mut self, n: usize) -> Self {
        self.max_mutation_attempts = n;
        self
    }

    /// Overrides the root cap derived from the equation.
    pub fn with_max_roots(mut self, n: usize) -> Self {
        self.max_roots = Some(n);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Width computations have their own checks in
    /// [`GenomeCodec::new`](super::GenomeCodec::new); this covers the rest.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.error > 0.0 && self.error < 1.0) {
            return Err(ConfigError::ErrorOutOfRange(self.error));
        }
        for (name, value) in [
            ("left_bound", self.left_bound),
            ("right_bound", self.right_bound),
        ] {
            if !value.is_finite() || value.fract() != 0.0 {
                return Err(ConfigError::NonIntegerBound { name, value });
            }
        }
        if self.left_bound >= self.right_bound {
            return Err(ConfigError::EmptyDomain {
                left: self.left_bound,
                right: self.right_bound,
            });
        }
        if self.tournament_size < 4 {
            return Err(ConfigError::TournamentTooSmall(self.tournament_size));
        }
        if self.tournament_size > self.population_size {
            return Err(ConfigError::TournamentTooLarge {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        if self.max_mutations == 0 {
            return Err(ConfigError::NoMutations);
        }
        if self.max_mutation_attempts == 0 {
            return Err(ConfigError::NoMutationAttempts);
        }
        if !(0.0..=1.0).contains(&self.flip_chance) {
            return Err(ConfigError::FlipChanceOutOfRange(self.flip_chance));
        }
        if !(self.significance > 0.0) {
            return Err(ConfigError::NonPositiveSignificance(self.significance));
        }
        if let FitnessMode::Crowding { radius, penalty } = self.fitness_mode {
            if !(radius >= 0.0 && radius.is_finite() && penalty >= 0.0 && penalty.is_finite()) {
                return Err(ConfigError::InvalidCrowding { radius, penalty });
            }
        }
        if self.max_roots == Some(0) {
            return Err(ConfigError::NoRoots);
        }
        Ok(())
    }
}
