//! Elitism policies: which members survive unchanged into the next generation.
//!
//! Policies work on fitness values and return indices of the chosen members.
//! They draw no random values.

use crate::error::{QueensError, Result};

/// Elite-preservation policy.
///
/// # Examples
///
/// ```
/// use nqueens_ga::ga::Elitism;
///
/// let fitness = [4, 9, 7, 9];
/// assert_eq!(Elitism::Fixed(2).select(&fitness).unwrap(), vec![1, 3]);
/// assert_eq!(Elitism::Threshold(7).select(&fitness).unwrap(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Elitism {
    /// No member is carried over.
    #[default]
    None,

    /// The `k` fittest members (all of them if the population is smaller).
    Fixed(usize),

    /// The fittest `max(1, ceil(size * rate))` members; `rate` in `(0, 1]`.
    Percentage(f64),

    /// Every member whose fitness is at least the threshold, in population
    /// order. May select nobody or everybody.
    ///
    /// The elite count depends on the population's fitness, so it is only
    /// known at selection time.
    Threshold(usize),
}

impl Elitism {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Elitism::None => "none",
            Elitism::Fixed(_) => "fixed",
            Elitism::Percentage(_) => "percentage",
            Elitism::Threshold(_) => "threshold",
        }
    }

    /// Checks the policy parameter.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Elitism::Percentage(rate) if !(rate > 0.0 && rate <= 1.0) => Err(
                QueensError::operator(self.name(), format!("rate must be in (0, 1], got {rate}")),
            ),
            _ => Ok(()),
        }
    }

    /// Number of elites chosen from a population of `size`, when it does not
    /// depend on fitness values. `None` for [`Elitism::Threshold`].
    pub fn count_for(&self, size: usize) -> Option<usize> {
        match *self {
            Elitism::None => Some(0),
            Elitism::Fixed(k) => Some(k.min(size)),
            Elitism::Percentage(rate) => Some(percentage_count(size, rate).min(size)),
            Elitism::Threshold(_) => None,
        }
    }

    /// Returns the indices of the elite members, fittest first for the
    /// ranked policies. Equal fitness keeps population order.
    pub fn select(&self, fitness: &[usize]) -> Result<Vec<usize>> {
        self.validate()?;
        let elites = match *self {
            Elitism::None => Vec::new(),
            Elitism::Fixed(k) => fittest(fitness, k),
            Elitism::Percentage(rate) => fittest(fitness, percentage_count(fitness.len(), rate)),
            Elitism::Threshold(t) => (0..fitness.len()).filter(|&i| fitness[i] >= t).collect(),
        };
        Ok(elites)
    }
}

/// `max(1, ceil(size * rate))`.
fn percentage_count(size: usize, rate: f64) -> usize {
    ((size as f64 * rate).ceil() as usize).max(1)
}

/// Indices of the `k` largest fitness values, best first (stable).
fn fittest(fitness: &[usize], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[b].cmp(&fitness[a]));
    order.truncate(k);
    order
}
