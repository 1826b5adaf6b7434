//! Tournament sampling.
//!
//! Unlike a parent-picking tournament, the solver needs the whole sample:
//! the best two members breed and the worst two are replaced. Indices are
//! therefore drawn **without** replacement.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use crate::error::ConfigError;

/// Draws `tournament_size` distinct indices from `0..population_size`.
///
/// Rejection sampling: draw uniformly, keep the index if it is new, repeat.
/// Indices come back in draw order.
///
/// # Errors
/// [`ConfigError::TournamentTooLarge`] if more indices are requested than
/// the population holds.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_rootsolve::tournament;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let picks = tournament(10, 4, &mut rng).unwrap();
/// assert_eq!(picks.len(), 4);
/// assert!(picks.iter().all(|&i| i < 10));
/// ```
pub fn tournament<R: Rng>(
    population_size: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Result<Vec<usize>, ConfigError> {
    if tournament_size > population_size {
        return Err(ConfigError::TournamentTooLarge {
            tournament_size,
            population_size,
        });
    }

    let mut picks = Vec::with_capacity(tournament_size);
    while picks.len() < tournament_size {
        let idx = rng.random_range(0..population_size);
        if !picks.contains(&idx) {
            picks.push(idx);
        }
    }
    Ok(picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_indices_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let mut picks = tournament(20, 7, &mut rng).unwrap();
            assert_eq!(picks.len(), 7);
            assert!(picks.iter().all(|&i| i < 20));
            picks.sort_unstable();
            picks.dedup();
            assert_eq!(picks.len(), 7, "duplicate index drawn");
        }
    }

    #[test]
    fn test_full_tournament_is_permutation() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut picks = tournament(8, 8, &mut rng).unwrap();
        picks.sort_unstable();
        assert_eq!(picks, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_uniform_coverage() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 10];
        let n = 10000;
        for _ in 0..n {
            for idx in tournament(10, 4, &mut rng).unwrap() {
                counts[idx] += 1;
            }
        }
        // Each index expected 4000 times.
        for &c in &counts {
            assert!(c > 3500 && c < 4500, "expected uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_too_large() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            tournament(5, 6, &mut rng),
            Err(ConfigError::TournamentTooLarge {
                tournament_size: 6,
                population_size: 5
            })
        );
    }

    #[test]
    fn test_empty_tournament() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(tournament(0, 0, &mut rng), Ok(vec![]));
    }
}
