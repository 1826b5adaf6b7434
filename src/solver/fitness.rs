//! Fitness evaluation and tournament ranking.

use super::config::FitnessMode;
use super::genome::{Genome, GenomeCodec};
use super::types::Objective;
use crate::error::EvaluationError;

/// One scored tournament member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Population slot.
    pub index: usize,
    /// Decoded value.
    pub x: f64,
    /// `f(x)`.
    pub fx: f64,
    /// Ranking score; lower is fitter. `|f(x)|` plus any crowding penalty.
    pub fitness: f64,
}

/// Scores one genome: `fitness = |f(x)|`.
pub fn evaluate<O: Objective + ?Sized>(
    index: usize,
    genome: &Genome,
    codec: &GenomeCodec,
    objective: &O,
) -> Result<Evaluation, EvaluationError> {
    let x = codec.decode(genome);
    let fx = objective.evaluate(x)?;
    Ok(Evaluation {
        index,
        x,
        fx,
        fitness: fx.abs(),
    })
}

/// Scores every tournament member and sorts best-first.
///
/// The sort is stable, so members with equal fitness keep their draw order.
/// The first failing evaluation aborts the ranking.
pub fn rank_tournament<O: Objective + ?Sized>(
    population: &[Genome],
    indices: &[usize],
    codec: &GenomeCodec,
    objective: &O,
    mode: FitnessMode,
) -> Result<Vec<Evaluation>, EvaluationError> {
    let mut ranked = indices
        .iter()
        .map(|&i| evaluate(i, &population[i], codec, objective))
        .collect::<Result<Vec<_>, _>>()?;

    if let FitnessMode::Crowding { radius, penalty } = mode {
        apply_crowding(&mut ranked, radius, penalty);
    }

    ranked.sort_by(|a, b| {
        a.fitness
            .partial_cmp(&b.fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(ranked)
}

/// Adds `penalty` per *other* member whose `x` lies within `radius`.
///
/// Neighbor counts are taken from the decoded values before any penalty is
/// added, so the result does not depend on member order.
pub fn apply_crowding(members: &mut [Evaluation], radius: f64, penalty: f64) {
    let neighbors: Vec<usize> = members
        .iter()
        .enumerate()
        .map(|(i, a)| {
            members
                .iter()
                .enumerate()
                .filter(|&(j, b)| j != i && (a.x - b.x).abs() <= radius)
                .count()
        })
        .collect();

    for (member, count) in members.iter_mut().zip(neighbors) {
        member.fitness += penalty * count as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> GenomeCodec {
        GenomeCodec::new(-10.0, 10.0, 0.01).unwrap()
    }

    fn population(values: &[f64]) -> Vec<Genome> {
        let codec = codec();
        values.iter().map(|&v| codec.encode(v).unwrap()).collect()
    }

    #[test]
    fn test_evaluate() {
        let codec = codec();
        let genome = codec.encode(3.0).unwrap();
        let f = |x: f64| x * x - 4.0;
        let e = evaluate(7, &genome, &codec, &f).unwrap();
        assert_eq!(e.index, 7);
        assert!((e.x - 3.0).abs() < 1e-12);
        assert!((e.fx - 5.0).abs() < 1e-12);
        assert!((e.fitness - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_negative_fx_fitness_is_abs() {
        let codec = codec();
        let genome = codec.encode(0.0).unwrap();
        let f = |x: f64| x - 4.0;
        let e = evaluate(0, &genome, &codec, &f).unwrap();
        assert!((e.fx + 4.0).abs() < 1e-12);
        assert!((e.fitness - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_sorted_ascending() {
        let pop = population(&[5.0, 2.1, -3.0, 1.0, 2.0]);
        let f = |x: f64| x * x - 4.0;
        let ranked =
            rank_tournament(&pop, &[0, 1, 2, 3, 4], &codec(), &f, FitnessMode::Absolute).unwrap();
        let order: Vec<usize> = ranked.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![4, 1, 3, 2, 0]);
        for pair in ranked.windows(2) {
            assert!(pair[0].fitness <= pair[1].fitness);
        }
    }

    #[test]
    fn test_rank_ties_keep_draw_order() {
        // f(2) = f(-2) = 0 and f(1) = f(-1) = -3.
        let pop = population(&[2.0, -2.0, 1.0, -1.0]);
        let f = |x: f64| x * x - 4.0;
        let ranked =
            rank_tournament(&pop, &[3, 1, 2, 0], &codec(), &f, FitnessMode::Absolute).unwrap();
        let order: Vec<usize> = ranked.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![1, 0, 3, 2]);
    }

    #[test]
    fn test_rank_propagates_evaluation_error() {
        let pop = population(&[1.0, 0.0, 2.0, 3.0]);
        let f = |x: f64| 1.0 / x;
        let err =
            rank_tournament(&pop, &[0, 1, 2, 3], &codec(), &f, FitnessMode::Absolute).unwrap_err();
        assert_eq!(err.x, 0.0);
    }

    #[test]
    fn test_crowding_counts_only_others() {
        let mut members = vec![
            Evaluation { index: 0, x: 1.0, fx: 0.0, fitness: 0.0 },
            Evaluation { index: 1, x: 1.2, fx: 0.0, fitness: 0.0 },
            Evaluation { index: 2, x: 1.4, fx: 0.0, fitness: 0.0 },
            Evaluation { index: 3, x: 5.0, fx: 0.0, fitness: 0.5 },
        ];
        apply_crowding(&mut members, 0.25, 10.0);
        // 1.0 and 1.4 each have one neighbor (1.2); 1.2 has two.
        assert!((members[0].fitness - 10.0).abs() < 1e-12);
        assert!((members[1].fitness - 20.0).abs() < 1e-12);
        assert!((members[2].fitness - 10.0).abs() < 1e-12);
        assert!((members[3].fitness - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_crowding_reorders_collapsed_tournament() {
        // Three members sit on the root 2.0; a lone member at 3.0 is worse
        // by |f| but uncrowded.
        let pop = population(&[2.0, 2.0, 2.0, 3.0]);
        let f = |x: f64| x * x - 4.0;
        let ranked =
            rank_tournament(&pop, &[0, 1, 2, 3], &codec(), &f, FitnessMode::crowding()).unwrap();
        assert_eq!(ranked[0].index, 3);
        assert!((ranked[0].fitness - 5.0).abs() < 1e-12);
        assert!((ranked[1].fitness - 20.0).abs() < 1e-12);
    }
}
