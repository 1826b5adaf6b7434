//! Point mutation over fixed-width decimal genomes.
//!
//! A mutation picks a handful of loci (never the decimal point) and
//! re-rolls them: digit loci get a fresh uniform digit, the sign locus may
//! flip. Children that decode outside the domain are re-rolled on the same
//! loci until one fits or the attempt budget runs out.
//!
//! Keeping the parent's sign and re-drawing the parent's own digits always
//! gives back an in-bounds genome, so with `d` digit loci at least one roll
//! in `10^d` (divided by the keep-sign chance when the sign locus is picked)
//! succeeds. The budget grows with that count.

use rand::Rng;

use super::config::SolverConfig;
use super::genome::{Genome, GenomeCodec};
use crate::error::{SolveResult, SolverError};

/// Re-rolls granted per expected success.
const ROLLS_PER_EXPECTED_HIT: f64 = 20.0;

/// Ceiling on the scaled re-roll budget.
const MAX_SCALED_ATTEMPTS: usize = 10_000_000;

/// Digit/sign point mutation with bounded re-rolls.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_rootsolve::{DigitMutation, GenomeCodec};
///
/// let codec = GenomeCodec::new(-10.0, 10.0, 0.01).unwrap();
/// let parent = codec.encode(3.25).unwrap();
/// let mutation = DigitMutation::new(3, 0.5, 1000);
///
/// let mut rng = StdRng::seed_from_u64(9);
/// let child = mutation.mutate(&parent, &codec, &mut rng).unwrap();
/// assert_eq!(child.len(), parent.len());
/// assert!(codec.contains(codec.decode(&child)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitMutation {
    /// Upper bound on the number of loci changed per mutation.
    pub max_mutations: usize,
    /// Probability that a selected sign locus inverts.
    pub flip_chance: f64,
    /// Minimum re-roll budget before giving up.
    pub max_attempts: usize,
}

impl DigitMutation {
    /// Creates a mutation operator.
    ///
    /// `flip_chance` is clamped to `[0, 1]`; NaN becomes 0.
    pub fn new(max_mutations: usize, flip_chance: f64, max_attempts: usize) -> Self {
        Self {
            max_mutations,
            flip_chance: clamp_probability(flip_chance),
            max_attempts,
        }
    }

    /// Takes the operator parameters from a solver configuration.
    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(
            config.max_mutations,
            config.flip_chance,
            config.max_mutation_attempts,
        )
    }

    /// Produces a child of `parent` that decodes inside the codec's domain.
    ///
    /// The number of loci is uniform in `[1, min(max_mutations, len - 1)]`.
    /// A selected sign locus flips with probability `flip_chance` and
    /// otherwise keeps the parent's sign, so it never re-rolls toward a
    /// particular sign on its own.
    ///
    /// # Errors
    /// [`SolverError::BoundsExhaustion`] if every re-roll within the budget
    /// (see [`attempt_budget`](Self::attempt_budget)) lands out of bounds.
    /// With a parent inside the domain this needs a sign locus that always
    /// flips into an infeasible half-domain, or more digit loci than the
    /// budget ceiling covers.
    pub fn mutate<R: Rng>(
        &self,
        parent: &Genome,
        codec: &GenomeCodec,
        rng: &mut R,
    ) -> SolveResult<Genome> {
        let loci = self.select_loci(parent.len(), codec.point_position(), rng);
        let parent_sign = parent.symbols().first().copied().unwrap_or(b'+');
        let flip_chance = clamp_probability(self.flip_chance);
        let budget = self.attempt_budget(&loci);

        let mut symbols = parent.symbols().to_vec();
        for _ in 0..budget {
            for &locus in &loci {
                symbols[locus] = if locus == 0 {
                    if rng.random_bool(flip_chance) {
                        flip(parent_sign)
                    } else {
                        parent_sign
                    }
                } else {
                    b'0' + rng.random_range(0..10u8)
                };
            }

            let child = Genome::from_symbols(symbols);
            if codec.contains(codec.decode(&child)) {
                return Ok(child);
            }
            symbols = child.into_symbols();
        }

        log::debug!("mutation of {parent} at loci {loci:?} exhausted {budget} attempts");
        Err(SolverError::BoundsExhaustion {
            parent: parent.to_string(),
            attempts: budget,
        })
    }

    /// Re-roll budget for one set of loci.
    ///
    /// `max(max_attempts, 20 × expected rolls per in-bounds child)`, where
    /// the expected count is `10^d` for `d` digit loci, divided by
    /// `1 - flip_chance` when the sign locus is picked. Capped at ten
    /// million.
    pub fn attempt_budget(&self, loci: &[usize]) -> usize {
        let digits = loci.iter().filter(|&&locus| locus != 0).count();
        let mut expected = 10f64.powi(digits.min(i32::MAX as usize) as i32);
        let flip_chance = clamp_probability(self.flip_chance);
        if loci.contains(&0) && flip_chance < 1.0 {
            expected /= 1.0 - flip_chance;
        }
        let scaled = (ROLLS_PER_EXPECTED_HIT * expected).min(MAX_SCALED_ATTEMPTS as f64);
        self.max_attempts.max(scaled as usize)
    }

    /// Draws distinct mutation loci, skipping the decimal point.
    fn select_loci<R: Rng>(&self, len: usize, point: usize, rng: &mut R) -> Vec<usize> {
        let mutable = len.saturating_sub(1);
        let cap = self.max_mutations.min(mutable);
        if cap == 0 {
            return Vec::new();
        }
        let count = rng.random_range(1..=cap);

        let mut loci = Vec::with_capacity(count);
        while loci.len() < count {
            let locus = rng.random_range(0..len);
            if locus != point && !loci.contains(&locus) {
                loci.push(locus);
            }
        }
        loci
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

fn flip(sign: u8) -> u8 {
    if sign == b'-' {
        b'+'
    } else {
        b'-'
    }
}
