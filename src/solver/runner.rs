//! Steady-state evolutionary loop.
//!
//! [`RootSolver`] owns the population, the root set and the random stream.
//! One mating event is:
//! tournament → rank → mutate the best two into the worst two slots →
//! inspect the four touched slots for roots.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::SolverConfig;
use super::fitness::{self, Evaluation};
use super::genome::{Genome, GenomeCodec};
use super::operators::DigitMutation;
use super::roots::{max_roots_from_equation, RootOutcome, RootRecord, RootTracker};
use super::selection;
use super::types::Objective;
use crate::error::{ConfigError, EvaluationError, SolveResult, SolverError};

/// Summary of a [`RootSolver::run`] call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    /// Mating events that completed.
    pub completed_events: usize,

    /// Mating events abandoned because the objective failed.
    pub skipped_events: usize,

    /// Mating events abandoned because a mutation ran out of re-rolls.
    pub exhausted_events: usize,

    /// Root records after the run, in insertion order.
    pub roots: Vec<RootRecord>,

    /// Record with the smallest residual, if any root was found.
    pub best: Option<RootRecord>,
}

/// Evolutionary root finder for one objective over one domain.
///
/// # Usage
///
/// ```
/// use u_rootsolve::{RootSolver, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_population_size(30)
///     .with_bounds(-10.0, 10.0)
///     .with_error(0.01)
///     .with_max_mutations(5)
///     .with_flip_chance(0.5)
///     .with_seed(42);
///
/// let mut solver = RootSolver::new("x**2 - 4", |x: f64| x * x - 4.0, config).unwrap();
/// let report = solver.run(2000).unwrap();
/// assert_eq!(report.completed_events, 2000);
/// assert!(solver.roots().len() <= 2);
/// ```
pub struct RootSolver<O> {
    objective: O,
    config: SolverConfig,
    codec: GenomeCodec,
    mutation: DigitMutation,
    population: Vec<Genome>,
    tracker: RootTracker,
    rng: StdRng,
}

impl<O> fmt::Debug for RootSolver<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootSolver")
            .field("config", &self.config)
            .field("codec", &self.codec)
            .field("population", &self.population)
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

impl<O: Objective> RootSolver<O> {
    /// Builds a solver and samples its initial population.
    ///
    /// `equation` is only read for the root cap (highest exponent); all
    /// function values come from `objective`.
    ///
    /// # Errors
    /// Any invalid parameter in `config`.
    pub fn new(equation: &str, objective: O, config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let codec = GenomeCodec::new(config.left_bound, config.right_bound, config.error)?;
        let max_roots = config
            .max_roots
            .unwrap_or_else(|| max_roots_from_equation(equation));

        log::debug!(
            "root solver for {equation:?}: integer_width={}, fraction_width={}, max_roots={max_roots}",
            codec.integer_width(),
            codec.fraction_width()
        );

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let population = codec.generate_population(config.population_size, &mut rng);

        Ok(Self {
            objective,
            mutation: DigitMutation::from_config(&config),
            tracker: RootTracker::new(config.error, config.significance, max_roots),
            config,
            codec,
            population,
            rng,
        })
    }

    /// The configuration the solver was built with.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The genome codec in use.
    pub fn codec(&self) -> &GenomeCodec {
        &self.codec
    }

    /// Encoded population, indexed by slot.
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Decoded population, indexed by slot.
    pub fn decoded_population(&self) -> Vec<f64> {
        self.population.iter().map(|g| self.codec.decode(g)).collect()
    }

    /// Roots found so far, in insertion order.
    pub fn roots(&self) -> Vec<f64> {
        self.tracker.roots()
    }

    /// Root records found so far, in insertion order.
    pub fn root_records(&self) -> &[RootRecord] {
        self.tracker.records()
    }

    /// Root with the smallest residual.
    pub fn best_root(&self) -> Option<RootRecord> {
        self.tracker.best().copied()
    }

    /// Cap on the number of tracked roots.
    pub fn max_roots(&self) -> usize {
        self.tracker.max_roots()
    }

    /// Replaces the whole population with freshly sampled genomes.
    ///
    /// The root set is kept.
    pub fn regenerate_population(&mut self) {
        self.population = self
            .codec
            .generate_population(self.config.population_size, &mut self.rng);
    }

    /// Draws a tournament of distinct slots.
    pub fn tournament(&mut self) -> Result<Vec<usize>, ConfigError> {
        selection::tournament(
            self.population.len(),
            self.config.tournament_size,
            &mut self.rng,
        )
    }

    /// Scores one slot.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn evaluate(&self, index: usize) -> Result<Evaluation, EvaluationError> {
        fitness::evaluate(index, &self.population[index], &self.codec, &self.objective)
    }

    /// Scores the given slots and sorts them best-first using the
    /// configured fitness mode.
    pub fn evaluate_tournament(&self, indices: &[usize]) -> Result<Vec<Evaluation>, EvaluationError> {
        fitness::rank_tournament(
            &self.population,
            indices,
            &self.codec,
            &self.objective,
            self.config.fitness_mode,
        )
    }

    /// Returns a mutated copy of the genome in slot `index`.
    pub fn mutate(&mut self, index: usize) -> SolveResult<Genome> {
        self.mutation
            .mutate(&self.population[index], &self.codec, &mut self.rng)
    }

    /// Steady-state replacement on a best-first ranking.
    ///
    /// The best two members are mutated and their children overwrite the
    /// worst two slots (`ranked[-1]` gets the child of `ranked[0]`,
    /// `ranked[-2]` the child of `ranked[1]`). The four touched slots are
    /// inspected for roots; their indices are returned as
    /// `[best, second, second_worst, worst]`.
    ///
    /// Both children are produced and all four slots are evaluated before
    /// anything is written, so on error the population is unchanged.
    ///
    /// # Errors
    /// [`ConfigError::TournamentTooSmall`] for fewer than four members,
    /// [`SolverError::BoundsExhaustion`] from mutation, or an evaluation
    /// error from inspection.
    pub fn replace(&mut self, ranked: &[Evaluation]) -> SolveResult<[usize; 4]> {
        let n = ranked.len();
        if n < 4 {
            return Err(ConfigError::TournamentTooSmall(n).into());
        }
        let touched = [
            ranked[0].index,
            ranked[1].index,
            ranked[n - 2].index,
            ranked[n - 1].index,
        ];

        let child1 = self.mutate(touched[0])?;
        let child2 = self.mutate(touched[1])?;

        let xs = [
            self.codec.decode(&self.population[touched[0]]),
            self.codec.decode(&self.population[touched[1]]),
            self.codec.decode(&child2),
            self.codec.decode(&child1),
        ];
        let mut fxs = [0.0; 4];
        for (fx, &x) in fxs.iter_mut().zip(&xs) {
            *fx = self.objective.evaluate(x)?;
        }

        self.population[touched[3]] = child1;
        self.population[touched[2]] = child2;
        for (x, fx) in xs.into_iter().zip(fxs) {
            self.record(x, fx);
        }
        Ok(touched)
    }

    /// Offers slot `index` to the root tracker.
    pub fn inspect(&mut self, index: usize) -> Result<RootOutcome, EvaluationError> {
        let x = self.codec.decode(&self.population[index]);
        let fx = self.objective.evaluate(x)?;
        Ok(self.record(x, fx))
    }

    fn record(&mut self, x: f64, fx: f64) -> RootOutcome {
        let outcome = self.tracker.offer(x, fx);
        match outcome {
            RootOutcome::Added => log::info!("root found at x = {x} (f = {fx})"),
            RootOutcome::Improved { previous } => {
                log::info!("root {previous} refined to x = {x} (f = {fx})")
            }
            _ => {}
        }
        outcome
    }

    /// Runs one mating event.
    pub fn mating_event(&mut self) -> SolveResult<()> {
        let picks = self.tournament()?;
        let ranked = self.evaluate_tournament(&picks)?;
        log::trace!(
            "tournament {:?}: best x = {}, worst x = {}",
            picks,
            ranked[0].x,
            ranked[ranked.len() - 1].x
        );
        self.replace(&ranked)?;
        Ok(())
    }

    /// Runs `mating_events` mating events.
    ///
    /// An event whose objective evaluation fails, or whose mutation runs
    /// out of re-rolls, is skipped and counted; the population is left as
    /// it was. Any other error stops the run.
    pub fn run(&mut self, mating_events: usize) -> SolveResult<RunReport> {
        let mut completed_events = 0;
        let mut skipped_events = 0;
        let mut exhausted_events = 0;

        for event in 0..mating_events {
            match self.mating_event() {
                Ok(()) => completed_events += 1,
                Err(SolverError::Evaluation(e)) => {
                    log::warn!("mating event {event} skipped: {e}");
                    skipped_events += 1;
                }
                Err(SolverError::BoundsExhaustion { parent, attempts }) => {
                    log::warn!(
                        "mating event {event} skipped: no in-bounds child of {parent} after {attempts} attempts"
                    );
                    exhausted_events += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(RunReport {
            completed_events,
            skipped_events,
            exhausted_events,
            roots: self.tracker.records().to_vec(),
            best: self.best_root(),
        })
    }
}
