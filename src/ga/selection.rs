//! Parent selection strategies.
//!
//! Selection picks a pair of parents from the draw pool. Every strategy works
//! on the pool's fitness values (larger is better) and returns indices into
//! that pool; the same index may be returned twice.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::{QueensError, Result};
use rand::seq::index;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// All strategies assume **maximization** (higher fitness = better) and draw
/// the two parents independently.
///
/// # Examples
///
/// ```
/// use nqueens_ga::ga::Selection;
/// use nqueens_ga::random::create_rng;
///
/// let fitness = [3, 9, 1, 7];
/// let mut rng = create_rng(42);
/// let (a, b) = Selection::Tournament(4).select_pair(&fitness, &mut rng).unwrap();
/// assert_eq!((a, b), (1, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Selection {
    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// A point is drawn uniformly in `[0, Σ fitness]` and the wheel is walked
    /// until the cumulative fitness covers it.
    ///
    /// # Complexity
    /// O(n) per parent
    Roulette,

    /// Tournament selection: sample `k` distinct individuals, keep the best.
    ///
    /// Higher `k` = stronger selection pressure. `k` must not exceed the pool.
    ///
    /// # Complexity
    /// O(k) per parent
    Tournament(usize),

    /// Truncation selection: draw uniformly among the top
    /// `max(2, round(size * rate))` individuals.
    ///
    /// `rate` must lie in `(0, 1]`.
    ///
    /// # Complexity
    /// O(n log n) per [`prepare`](Selection::prepare) (sort), O(1) per parent
    Truncation(f64),

    /// Linear rank selection.
    ///
    /// Individuals are sorted ascending by fitness and given ranks `1..=n`;
    /// selection probability is proportional to rank, not raw fitness.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per [`prepare`](Selection::prepare) (sort), O(n) per parent
    Ranking,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Selection::Roulette => "roulette",
            Selection::Tournament(_) => "tournament",
            Selection::Truncation(_) => "truncation",
            Selection::Ranking => "ranking",
        }
    }

    /// Checks the parameters that do not depend on the pool size.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Selection::Tournament(0) => Err(QueensError::operator(
                self.name(),
                "tournament size must be at least 1",
            )),
            Selection::Truncation(rate) if !(rate > 0.0 && rate <= 1.0) => Err(
                QueensError::operator(self.name(), format!("rate must be in (0, 1], got {rate}")),
            ),
            _ => Ok(()),
        }
    }

    /// Binds the strategy to a pool described by its fitness values.
    ///
    /// The ordering needed by truncation and ranking is computed here once,
    /// so a generation sorts its pool once rather than once per pair.
    ///
    /// # Errors
    /// [`QueensError::EmptyPopulation`] for an empty pool,
    /// [`QueensError::InvalidOperatorParameter`] for a bad parameter or a
    /// tournament larger than the pool.
    pub fn prepare<'a>(&self, fitness: &'a [usize]) -> Result<PreparedSelection<'a>> {
        if fitness.is_empty() {
            return Err(QueensError::EmptyPopulation);
        }
        self.validate()?;

        let order = match *self {
            Selection::Tournament(k) if k > fitness.len() => {
                return Err(QueensError::operator(
                    self.name(),
                    format!("tournament size {k} exceeds pool size {}", fitness.len()),
                ));
            }
            Selection::Truncation(rate) => truncation_pool(fitness, rate),
            Selection::Ranking => ascending_order(fitness),
            Selection::Roulette | Selection::Tournament(_) => Vec::new(),
        };
        Ok(PreparedSelection {
            selection: *self,
            fitness,
            order,
        })
    }

    /// Selects two parents from a pool described by its fitness values.
    ///
    /// Returns indices into `fitness`. Equivalent to [`prepare`](Self::prepare)
    /// followed by one [`PreparedSelection::select_pair`].
    ///
    /// # Errors
    /// Same as [`prepare`](Self::prepare).
    pub fn select_pair<R: Rng + ?Sized>(
        &self,
        fitness: &[usize],
        rng: &mut R,
    ) -> Result<(usize, usize)> {
        Ok(self.prepare(fitness)?.select_pair(rng))
    }
}

/// A [`Selection`] bound to one pool, ready to draw any number of pairs.
#[derive(Debug, Clone)]
pub struct PreparedSelection<'a> {
    selection: Selection,
    fitness: &'a [usize],
    /// Truncation pool (best first) or ascending rank order; empty otherwise.
    order: Vec<usize>,
}

impl PreparedSelection<'_> {
    /// Draws two parents, returned as indices into the pool.
    pub fn select_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, usize) {
        let fitness = self.fitness;
        match self.selection {
            Selection::Roulette => (roulette(fitness, rng), roulette(fitness, rng)),
            Selection::Tournament(k) => (tournament(fitness, k, rng), tournament(fitness, k, rng)),
            Selection::Truncation(_) => {
                let pool = &self.order;
                let a = pool[rng.random_range(0..pool.len())];
                let b = pool[rng.random_range(0..pool.len())];
                (a, b)
            }
            Selection::Ranking => (ranking(&self.order, rng), ranking(&self.order, rng)),
        }
    }
}

/// Roulette wheel over raw fitness.
///
/// A pool whose fitness sums to zero always yields its first member.
fn roulette<R: Rng + ?Sized>(fitness: &[usize], rng: &mut R) -> usize {
    let total: f64 = fitness.iter().map(|&f| f as f64).sum();
    let point = rng.random_range(0.0..=total);
    let mut cumulative = 0.0;
    for (i, &f) in fitness.iter().enumerate() {
        cumulative += f as f64;
        if cumulative >= point {
            return i;
        }
    }
    fitness.len() - 1 // floating-point fallback
}

/// Tournament over `k` distinct members; the first sampled wins ties.
fn tournament<R: Rng + ?Sized>(fitness: &[usize], k: usize, rng: &mut R) -> usize {
    let mut contenders = index::sample(rng, fitness.len(), k).into_iter();
    // k >= 1 is checked by `prepare`.
    let mut best = contenders.next().unwrap_or(0);
    for idx in contenders {
        if fitness[idx] > fitness[best] {
            best = idx;
        }
    }
    best
}

/// Indices of the top `max(2, round(size * rate))` members, best first.
fn truncation_pool(fitness: &[usize], rate: f64) -> Vec<usize> {
    let size = fitness.len();
    let keep = ((size as f64 * rate).round() as usize).max(2).min(size);
    let mut order: Vec<usize> = (0..size).collect();
    order.sort_by(|&a, &b| fitness[b].cmp(&fitness[a]));
    order.truncate(keep);
    order
}

/// Indices sorted by ascending fitness (stable).
fn ascending_order(fitness: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by_key(|&i| fitness[i]);
    order
}

/// One rank-proportional draw; `order[r - 1]` holds rank `r`.
fn ranking<R: Rng + ?Sized>(order: &[usize], rng: &mut R) -> usize {
    let n = order.len();
    let total = (n * (n + 1)) as f64 / 2.0;
    let point = rng.random_range(1.0..=total);
    let mut cumulative = 0.0;
    for (rank0, &idx) in order.iter().enumerate() {
        cumulative += (rank0 + 1) as f64;
        if cumulative >= point {
            return idx;
        }
    }
    order[n - 1] // fallback
}
