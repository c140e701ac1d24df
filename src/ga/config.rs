//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control a run: the problem size,
//! the operator choices and rates, and the termination conditions.

use super::crossover::Crossover;
use super::elitism::Elitism;
use super::mutation::Mutation;
use super::population::{Operators, ParentPool};
use super::selection::Selection;
use crate::error::{QueensError, Result};

/// Configuration for an N-Queens GA run.
///
/// # Defaults
///
/// ```
/// use nqueens_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.board_size, 8);
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use nqueens_ga::ga::{Crossover, Elitism, GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_board_size(12)
///     .with_selection(Selection::Ranking)
///     .with_crossover(Crossover::PartiallyMapped)
///     .with_elitism(Elitism::Percentage(0.1))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
///
/// Builders store values as given; out-of-range values are reported by
/// [`validate`](GaConfig::validate) rather than clamped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Board size `n` (number of queens). Must be at least 4.
    pub board_size: usize,

    /// Number of individuals in each generation.
    pub population_size: usize,

    /// Maximum number of generations after the initial one.
    pub max_generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Crossover operator.
    pub crossover: Crossover,

    /// Probability of recombining a selected pair (0.0–1.0).
    ///
    /// When crossover is not applied, both parents are cloned.
    pub crossover_rate: f64,

    /// Mutation operator.
    pub mutation: Mutation,

    /// Probability of mutating each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Elite-preservation policy.
    pub elitism: Elitism,

    /// Whether elites stay eligible as parents.
    pub parent_pool: ParentPool,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed from the thread RNG; the seed used is reported in
    /// the result.
    pub seed: Option<u64>,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation, so the actual runtime may
    /// exceed it by one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        let operators = Operators::default();
        Self {
            board_size: 8,
            population_size: 100,
            max_generations: 500,
            selection: operators.selection,
            crossover: operators.crossover,
            crossover_rate: operators.crossover_rate,
            mutation: operators.mutation,
            mutation_rate: operators.mutation_rate,
            elitism: operators.elitism,
            parent_pool: operators.parent_pool,
            seed: None,
            parallel: false,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the board size.
    pub fn with_board_size(mut self, n: usize) -> Self {
        self.board_size = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Convenience builder for `Selection::Tournament(k)`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the elitism policy.
    pub fn with_elitism(mut self, elitism: Elitism) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the parent pool policy.
    pub fn with_parent_pool(mut self, pool: ParentPool) -> Self {
        self.parent_pool = pool;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// The operator bundle consumed by [`Population::advance_generation`].
    ///
    /// [`Population::advance_generation`]: super::Population::advance_generation
    pub fn operators(&self) -> Operators {
        Operators {
            selection: self.selection,
            crossover: self.crossover,
            crossover_rate: self.crossover_rate,
            mutation: self.mutation,
            mutation_rate: self.mutation_rate,
            elitism: self.elitism,
            parent_pool: self.parent_pool,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`QueensError::InvalidSize`] for boards below 4,
    /// [`QueensError::InvalidConfig`] for run-level values,
    /// [`QueensError::InvalidOperatorParameter`] for operator parameters and
    /// rates.
    pub fn validate(&self) -> Result<()> {
        if self.board_size < super::board::MIN_BOARD_SIZE {
            return Err(QueensError::InvalidSize {
                size: self.board_size,
            });
        }
        if self.population_size == 0 {
            return Err(QueensError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(QueensError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(QueensError::InvalidConfig(
                "time_limit_ms must be positive or None".into(),
            ));
        }
        self.operators().validate()?;
        if let Selection::Tournament(k) = self.selection {
            let pool = self.parent_pool_size();
            if k > pool {
                return Err(QueensError::operator(
                    "tournament",
                    format!("tournament size {k} exceeds parent pool size {pool}"),
                ));
            }
        }
        Ok(())
    }

    /// Parents available per generation, as far as it is known before the
    /// run. [`Elitism::Threshold`] elites are only known at selection time.
    fn parent_pool_size(&self) -> usize {
        let size = self.population_size;
        match (self.parent_pool, self.elitism.count_for(size)) {
            (ParentPool::ExcludeElites, Some(elites)) if elites < size => size - elites,
            _ => size,
        }
    }
}
