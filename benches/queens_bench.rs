//! Criterion benchmarks for the N-Queens GA.
//!
//! Measures conflict counting on its own and whole runs with a fixed
//! generation budget.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nqueens_ga::ga::{count_conflicts, Crossover, Elitism, GaConfig, GaRunner, Mutation, Population};
use nqueens_ga::random::create_rng;
use rand::seq::SliceRandom;

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_count_conflicts(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_conflicts");

    for n in [8usize, 32, 128] {
        let mut rng = create_rng(42);
        let mut genes: Vec<usize> = (0..n).collect();
        genes.shuffle(&mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(n), &genes, |b, g| {
            b.iter(|| black_box(count_conflicts(black_box(g))))
        });
    }
    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    group.sample_size(20);

    for (crossover, mutation) in [
        (Crossover::SinglePoint, Mutation::Swap),
        (Crossover::Order, Mutation::Inversion),
        (Crossover::PartiallyMapped, Mutation::Displacement),
    ] {
        let config = GaConfig::default()
            .with_board_size(32)
            .with_crossover(crossover)
            .with_mutation(mutation)
            .with_elitism(Elitism::Fixed(2));
        let operators = config.operators();
        let mut rng = create_rng(42);
        let mut population = Population::new(32, 100).unwrap();
        population.initialize(&mut rng).unwrap();
        population.evaluate();

        group.bench_function(
            BenchmarkId::new(crossover.name(), mutation.name()),
            |b| {
                b.iter(|| {
                    let mut next = population.clone();
                    let step = next.advance_generation(&operators, &mut rng);
                    black_box((step, next))
                })
            },
        );
    }
    group.finish();
}

fn bench_ga_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_run");
    group.sample_size(10);

    for (n, pop, gen) in [(8usize, 100usize, 500usize), (16, 100, 200), (32, 200, 50)] {
        let config = GaConfig::default()
            .with_board_size(n)
            .with_population_size(pop)
            .with_max_generations(gen)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_g{}", n, pop, gen), n),
            &config,
            |b, c| {
                b.iter(|| {
                    let result = GaRunner::run(black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_count_conflicts, bench_generation, bench_ga_run);
criterion_main!(benches);
