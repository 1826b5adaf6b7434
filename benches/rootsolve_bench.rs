//! Criterion benchmarks for u-rootsolve.
//!
//! Measures mating-event throughput and the mutation operator on a cubic
//! with three real roots.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_rootsolve::{DigitMutation, FitnessMode, GenomeCodec, RootSolver, SolverConfig};

fn cubic(x: f64) -> f64 {
    (x - 1.5) * (x + 2.0) * (x - 7.25)
}

fn bench_mating_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("mating_events");

    for (name, mode) in [
        ("absolute", FitnessMode::Absolute),
        ("crowding", FitnessMode::crowding()),
    ] {
        group.bench_with_input(BenchmarkId::new("run_1000", name), &mode, |b, &mode| {
            b.iter(|| {
                let config = SolverConfig::default()
                    .with_population_size(50)
                    .with_bounds(-10.0, 10.0)
                    .with_error(0.001)
                    .with_max_mutations(5)
                    .with_fitness_mode(mode)
                    .with_seed(42);
                let mut solver = RootSolver::new("x**3", cubic, config).unwrap();
                black_box(solver.run(1000).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");

    for error in [0.01, 1e-6] {
        let codec = GenomeCodec::new(-1000.0, 1000.0, error).unwrap();
        let mutation = DigitMutation::new(5, 0.5, 1000);
        let mut rng = StdRng::seed_from_u64(7);
        let parent = codec.generate(&mut rng);

        group.bench_with_input(
            BenchmarkId::new("digits", codec.genome_len()),
            &parent,
            |b, parent| b.iter(|| black_box(mutation.mutate(parent, &codec, &mut rng).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_mating_events, bench_mutation);
criterion_main!(benches);
