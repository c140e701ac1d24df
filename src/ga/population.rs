//! Population lifecycle and the generation-transition algorithm.
//!
//! [`Population`] owns one generation of [`Board`]s. It does not decide when
//! to stop: the caller inspects [`Population::best`] after each
//! [`advance_generation`](Population::advance_generation).

use super::board::{max_pairs, Board};
use super::crossover::Crossover;
use super::elitism::Elitism;
use super::mutation::Mutation;
use super::selection::Selection;
use crate::error::{QueensError, Result};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

/// Which members parents are drawn from during a generation transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ParentPool {
    /// The whole current generation, elites included.
    #[default]
    Full,

    /// Every non-elite member. Falls back to the whole generation when every
    /// member is an elite.
    ExcludeElites,
}

/// The operators and rates composed by one generation transition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operators {
    /// Parent selection strategy.
    pub selection: Selection,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Probability that a selected pair is recombined rather than cloned.
    pub crossover_rate: f64,

    /// Mutation operator.
    pub mutation: Mutation,

    /// Probability that each child is mutated.
    pub mutation_rate: f64,

    /// Elite-preservation policy.
    pub elitism: Elitism,

    /// Draw pool for parent selection.
    pub parent_pool: ParentPool,
}

impl Default for Operators {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            crossover: Crossover::default(),
            crossover_rate: 0.8,
            mutation: Mutation::default(),
            mutation_rate: 0.1,
            elitism: Elitism::default(),
            parent_pool: ParentPool::default(),
        }
    }
}

impl Operators {
    /// Checks operator parameters and rates.
    pub fn validate(&self) -> Result<()> {
        check_probability(self.crossover.name(), self.crossover_rate)?;
        check_probability(self.mutation.name(), self.mutation_rate)?;
        self.selection.validate()?;
        self.elitism.validate()
    }
}

fn check_probability(operator: &'static str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(QueensError::operator(
            operator,
            format!("probability must be in [0, 1], got {p}"),
        ))
    }
}

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessStats {
    /// Highest fitness.
    pub max: usize,
    /// Mean fitness.
    pub mean: f64,
    /// Lowest fitness.
    pub min: usize,
}

/// One generation of candidate boards.
///
/// # Usage
///
/// ```
/// use nqueens_ga::ga::{Operators, Population};
/// use nqueens_ga::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let mut population = Population::new(8, 50).unwrap();
/// population.initialize(&mut rng).unwrap();
/// population.evaluate();
/// population
///     .advance_generation(&Operators::default(), &mut rng)
///     .unwrap();
/// assert_eq!(population.len(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct Population {
    board_size: usize,
    target_size: usize,
    members: Vec<Board>,
    parallel: bool,
}

impl Population {
    /// Creates an empty population for `board_size`-boards of `target_size`
    /// members per generation.
    pub fn new(board_size: usize, target_size: usize) -> Result<Self> {
        if board_size < super::board::MIN_BOARD_SIZE {
            return Err(QueensError::InvalidSize { size: board_size });
        }
        if target_size == 0 {
            return Err(QueensError::InvalidConfig(
                "population size must be at least 1".into(),
            ));
        }
        Ok(Self {
            board_size,
            target_size,
            members: Vec::new(),
            parallel: false,
        })
    }

    /// Builds a population from existing boards; the target size is their count.
    pub fn from_members(board_size: usize, members: Vec<Board>) -> Result<Self> {
        let mut population = Self::new(board_size, members.len())?;
        if let Some(other) = members.iter().find(|b| b.size() != board_size) {
            return Err(QueensError::InvalidGenes {
                expected: board_size,
                reason: format!("member has size {}", other.size()),
            });
        }
        population.members = members;
        Ok(population)
    }

    /// Enables parallel evaluation across the rayon pool.
    ///
    /// Only effective with the `parallel` feature; evaluation is sequential
    /// otherwise. Evaluation draws no random values, so results are the same
    /// either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Board size `n`.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Number of members produced by each generation transition.
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Fitness of a solution, `n(n-1)/2`.
    pub fn max_pairs(&self) -> usize {
        max_pairs(self.board_size)
    }

    /// Current members, in generation order.
    pub fn members(&self) -> &[Board] {
        &self.members
    }

    /// Number of current members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the population has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Replaces the members with `target_size` random boards.
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.members = (0..self.target_size)
            .map(|_| Board::random(self.board_size, rng))
            .collect::<Result<_>>()?;
        Ok(())
    }

    /// Computes the conflict count of every member that has none cached.
    pub fn evaluate(&mut self) {
        if self.parallel {
            evaluate_parallel(&self.members);
        } else {
            for board in &self.members {
                board.conflicts();
            }
        }
    }

    /// Fitness of each member, in generation order.
    pub fn fitness(&self) -> Vec<usize> {
        self.members.iter().map(Board::fitness).collect()
    }

    /// The fittest member; the first one wins ties.
    pub fn best(&self) -> Option<&Board> {
        self.members.iter().fold(None, |best: Option<&Board>, board| match best {
            Some(b) if b.fitness() >= board.fitness() => Some(b),
            _ => Some(board),
        })
    }

    /// Maximum, mean and minimum fitness, or `None` when empty.
    pub fn stats(&self) -> Option<FitnessStats> {
        if self.members.is_empty() {
            return None;
        }
        let fitness = self.fitness();
        let max = fitness.iter().copied().max().unwrap_or(0);
        let min = fitness.iter().copied().min().unwrap_or(0);
        let mean = fitness.iter().sum::<usize>() as f64 / fitness.len() as f64;
        Some(FitnessStats { max, mean, min })
    }

    /// Replaces the members with the next generation.
    ///
    /// 1. Elites chosen by `operators.elitism` are carried over unchanged.
    /// 2. Until the target size is reached: a pair of parents is selected from
    ///    the parent pool; with probability `crossover_rate` they are
    ///    recombined, otherwise cloned; each child is then mutated with
    ///    probability `mutation_rate`.
    /// 3. The overshoot of at most one child is dropped and the new members
    ///    are evaluated.
    ///
    /// Per pair the random source is consumed in a fixed order: selection,
    /// one crossover draw (plus the crossover's own draws), one mutation draw
    /// per child (plus the mutation's own draws).
    ///
    /// # Errors
    /// [`QueensError::EmptyPopulation`] before [`initialize`](Self::initialize),
    /// or any operator parameter error.
    #[instrument(
        level = "debug",
        skip(self, operators, rng),
        fields(
            members = self.members.len(),
            selection = operators.selection.name(),
            crossover = operators.crossover.name(),
            mutation = operators.mutation.name(),
            elites = tracing::field::Empty,
        )
    )]
    pub fn advance_generation<R: Rng + ?Sized>(
        &mut self,
        operators: &Operators,
        rng: &mut R,
    ) -> Result<()> {
        if self.members.is_empty() {
            return Err(QueensError::EmptyPopulation);
        }
        operators.validate()?;

        let fitness = self.fitness();
        let elites = operators.elitism.select(&fitness)?;
        tracing::Span::current().record("elites", elites.len());

        let mut next: Vec<Board> = Vec::with_capacity(self.target_size + 1);
        next.extend(elites.iter().map(|&i| self.members[i].clone()));

        let pool = self.parent_pool(operators.parent_pool, &elites);
        let pool_fitness: Vec<usize> = pool.iter().map(|&i| fitness[i]).collect();
        let selector = operators.selection.prepare(&pool_fitness)?;

        while next.len() < self.target_size {
            let (a, b) = selector.select_pair(rng);
            let parent1 = &self.members[pool[a]];
            let parent2 = &self.members[pool[b]];

            let (mut child1, mut child2) =
                if rng.random_range(0.0..1.0) < operators.crossover_rate {
                    operators.crossover.apply(parent1, parent2, rng)?
                } else {
                    (parent1.clone(), parent2.clone())
                };

            for child in [&mut child1, &mut child2] {
                if rng.random_range(0.0..1.0) < operators.mutation_rate {
                    operators.mutation.apply(child, rng);
                }
            }

            next.push(child1);
            next.push(child2);
        }

        next.truncate(self.target_size);
        self.members = next;
        self.evaluate();
        Ok(())
    }

    /// Member indices eligible as parents.
    fn parent_pool(&self, policy: ParentPool, elites: &[usize]) -> Vec<usize> {
        let all = || (0..self.members.len()).collect::<Vec<_>>();
        match policy {
            ParentPool::Full => all(),
            ParentPool::ExcludeElites => {
                let mut is_elite = vec![false; self.members.len()];
                for &i in elites {
                    is_elite[i] = true;
                }
                let rest: Vec<usize> = (0..self.members.len()).filter(|&i| !is_elite[i]).collect();
                if rest.is_empty() {
                    all()
                } else {
                    rest
                }
            }
        }
    }
}

#[cfg(feature = "parallel")]
fn evaluate_parallel(members: &[Board]) {
    members.par_iter().for_each(|board| {
        board.conflicts();
    });
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel(members: &[Board]) {
    for board in members {
        board.conflicts();
    }
}
