//! GA run loop.
//!
//! [`GaRunner`] drives a [`Population`] across generations:
//! initialization → evaluation → repeat { generation transition → inspect
//! best } until a solution appears or a budget runs out.

use super::board::Board;
use super::config::GaConfig;
use super::population::Population;
use crate::error::{QueensError, Result};
use crate::random::create_rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Fitness statistics recorded after each generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index; 0 is the initial population.
    pub generation: usize,

    /// Highest fitness in this generation.
    pub max: usize,

    /// Mean fitness in this generation.
    pub mean: f64,

    /// Lowest fitness in this generation.
    pub min: usize,

    /// Highest fitness seen in any generation so far.
    ///
    /// Non-decreasing even when `max` regresses (possible without elitism).
    pub running_best: usize,
}

/// Result of a GA run.
///
/// Exhausting the generation budget is a normal outcome reported through
/// `solved == false`, not an error.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// The best board found during the entire run.
    pub best: Board,

    /// Fitness of `best`.
    pub best_fitness: usize,

    /// Fitness of a solution, `n(n-1)/2`.
    pub max_fitness: usize,

    /// Whether `best` has no attacking pairs.
    pub solved: bool,

    /// Number of generation transitions performed. When solved, this is the
    /// generation the solution appeared in.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run hit its wall-clock limit.
    pub timed_out: bool,

    /// Seed the random source was created from.
    pub seed: u64,

    /// Statistics for generation 0 and every generation after it.
    pub history: Vec<GenerationStats>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Executes the GA run loop.
///
/// # Usage
///
/// ```
/// use nqueens_ga::ga::{GaConfig, GaRunner};
///
/// let config = GaConfig::default().with_board_size(6).with_seed(42);
/// let result = GaRunner::run(&config).unwrap();
/// if result.solved {
///     assert!(result.best.is_solution());
///     println!("{}", result.best);
/// }
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA until solved or out of budget.
    ///
    /// # Errors
    /// Returns the validation error of an invalid configuration.
    pub fn run(config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next generation and returns the best board found so far.
    pub fn run_with_cancel(
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        let operators = config.operators();
        let time_limit = config.time_limit_ms.map(Duration::from_millis);
        let start = Instant::now();

        info!(
            board_size = config.board_size,
            population_size = config.population_size,
            max_generations = config.max_generations,
            seed,
            selection = config.selection.name(),
            crossover = config.crossover.name(),
            mutation = config.mutation.name(),
            elitism = config.elitism.name(),
            "starting GA run"
        );

        // 1. Initialize and evaluate
        let mut population = Population::new(config.board_size, config.population_size)?
            .with_parallel(config.parallel);
        population.initialize(&mut rng)?;
        population.evaluate();

        // 2. Track best
        let mut best = best_of(&population)?.clone();
        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(record(0, &population, best.fitness())?);

        let mut generations = 0usize;
        let mut cancelled = false;
        let mut timed_out = false;

        // 3. Evolutionary loop
        if !best.is_solution() {
            for gen in 1..=config.max_generations {
                if let Some(ref flag) = cancel {
                    if flag.load(Ordering::Relaxed) {
                        cancelled = true;
                        break;
                    }
                }
                if time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                    timed_out = true;
                    break;
                }

                population.advance_generation(&operators, &mut rng)?;
                generations = gen;

                let gen_best = best_of(&population)?;
                if gen_best.fitness() > best.fitness() {
                    best = gen_best.clone();
                }
                history.push(record(gen, &population, best.fitness())?);

                if best.is_solution() {
                    break;
                }
            }
        }

        let elapsed = start.elapsed();
        let solved = best.is_solution();
        if solved {
            info!(generation = generations, elapsed_ms = elapsed.as_millis() as u64, "solution found");
        } else if cancelled {
            info!(generation = generations, best_fitness = best.fitness(), "GA run cancelled");
        } else if timed_out {
            info!(generation = generations, best_fitness = best.fitness(), "GA run hit its time limit");
        } else {
            info!(
                generation = generations,
                best_fitness = best.fitness(),
                max_fitness = best.max_pairs(),
                "generation budget exhausted without a solution"
            );
        }

        Ok(GaResult {
            best_fitness: best.fitness(),
            max_fitness: best.max_pairs(),
            best,
            solved,
            generations,
            cancelled,
            timed_out,
            seed,
            history,
            elapsed,
        })
    }

    /// Runs one independent GA per seed, ignoring `config.seed`.
    ///
    /// With the `parallel` feature the runs are spread over the rayon pool.
    /// Each run owns its random source, so every result is identical to
    /// [`run`](Self::run) with that seed. Results are in seed order.
    pub fn run_batch(config: &GaConfig, seeds: &[u64]) -> Result<Vec<GaResult>> {
        config.validate()?;

        #[cfg(feature = "parallel")]
        let runs = seeds.par_iter();
        #[cfg(not(feature = "parallel"))]
        let runs = seeds.iter();

        runs.map(|&seed| Self::run(&config.clone().with_seed(seed)))
            .collect()
    }
}

/// Best member of a non-empty population.
fn best_of(population: &Population) -> Result<&Board> {
    population.best().ok_or(QueensError::EmptyPopulation)
}

/// Capture and log the statistics of one generation.
fn record(generation: usize, population: &Population, running_best: usize) -> Result<GenerationStats> {
    let stats = population.stats().ok_or(QueensError::EmptyPopulation)?;
    debug!(
        generation,
        max = stats.max,
        mean = stats.mean,
        min = stats.min,
        running_best,
        "generation complete"
    );
    Ok(GenerationStats {
        generation,
        max: stats.max,
        mean: stats.mean,
        min: stats.min,
        running_best,
    })
}

// ============================================================================
// Tests
// ============================================================================
