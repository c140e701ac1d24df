//! Permutation-preserving crossover operators.
//!
//! The free functions operate on `&[usize]` gene slices and always return two
//! permutations of `0..n` when given two permutations of `0..n`: genes that a
//! naive splice would duplicate are replaced by the other parent's genes in
//! order. [`Crossover`] wraps them for use on [`Board`]s.
//!
//! # Operators
//!
//! - [`single_point_crossover`]: prefix of one parent, rest in the other's order
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), preserves absolute position
//! - [`uniform_crossover`]: random mask, repaired from the other parent
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use super::board::Board;
use crate::error::{QueensError, Result};
use rand::seq::index;
use rand::Rng;

const EMPTY: usize = usize::MAX;

/// Crossover operator applied to a pair of parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Crossover {
    /// See [`single_point_crossover`].
    #[default]
    SinglePoint,
    /// See [`order_crossover`].
    Order,
    /// See [`pmx_crossover`].
    #[cfg_attr(feature = "serde", serde(rename = "pmx"))]
    PartiallyMapped,
    /// See [`uniform_crossover`].
    Uniform,
}

impl Crossover {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Crossover::SinglePoint => "single-point",
            Crossover::Order => "order",
            Crossover::PartiallyMapped => "pmx",
            Crossover::Uniform => "uniform",
        }
    }

    /// Recombines two parents into two fresh children.
    ///
    /// # Errors
    /// [`QueensError::InvalidGenes`] if the parents have different sizes.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        parent1: &Board,
        parent2: &Board,
        rng: &mut R,
    ) -> Result<(Board, Board)> {
        let n = parent1.size();
        if parent2.size() != n {
            return Err(QueensError::InvalidGenes {
                expected: n,
                reason: format!(
                    "parents have different sizes ({n} and {})",
                    parent2.size()
                ),
            });
        }

        let (p1, p2) = (parent1.genes(), parent2.genes());
        let (c1, c2) = match self {
            Crossover::SinglePoint => single_point_crossover(p1, p2, rng),
            Crossover::Order => order_crossover(p1, p2, rng),
            Crossover::PartiallyMapped => pmx_crossover(p1, p2, rng),
            Crossover::Uniform => uniform_crossover(p1, p2, rng),
        };
        Ok((Board::from_genes(n, c1)?, Board::from_genes(n, c2)?))
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover repaired for permutations.
///
/// Draws a cut `c` in `1..n`. Child 1 is `parent1[..c]` followed by the genes
/// of `parent2` not already used, in `parent2`'s order; child 2 swaps roles.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or fewer than two genes.
pub fn single_point_crossover<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n >= 2, "parents must have at least two genes");

    let cut = rng.random_range(1..n);

    (
        splice_child(parent1, parent2, cut),
        splice_child(parent2, parent1, cut),
    )
}

/// Build one single-point child: prefix from `head`, the rest from `tail`.
fn splice_child(head: &[usize], tail: &[usize], cut: usize) -> Vec<usize> {
    let mut used = vec![false; head.len()];
    let mut child = Vec::with_capacity(head.len());
    for &g in &head[..cut] {
        child.push(g);
        used[g] = true;
    }
    child.extend(tail.iter().copied().filter(|&g| !used[g]));
    child
}

/// Order Crossover (OX) for permutations.
///
/// Preserves the **relative order** of elements from both parents.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select two distinct cuts `start < end`
/// 2. Copy `template[start..end]` to the child at the same positions
/// 3. Fill the other positions left to right with the donor's elements that
///    are not in the segment, in the donor's order
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or fewer than two genes.
pub fn order_crossover<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n >= 2, "parents must have at least two genes");

    let (start, end) = distinct_pair(n, rng);

    let child1 = ox_build_child(parent1, parent2, start, end);
    let child2 = ox_build_child(parent2, parent1, start, end);

    (child1, child2)
}

/// Build one OX child: copy segment from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut in_segment = vec![false; n];
    for &g in &template[start..end] {
        in_segment[g] = true;
    }

    let rest: Vec<usize> = donor.iter().copied().filter(|&g| !in_segment[g]).collect();

    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&rest[..start]);
    child.extend_from_slice(&template[start..end]);
    child.extend_from_slice(&rest[start..]);
    child
}

/// Partially Mapped Crossover (PMX) for permutations.
///
/// Preserves the **absolute position** of elements from both parents
/// as much as possible.
///
/// # Algorithm (Goldberg & Lingle, 1985)
///
/// 1. Select two distinct cuts `start < end`
/// 2. Copy `template[start..end]` to the child at the same positions
/// 3. For each element of the donor's segment not yet in the child, follow
///    the mapping chain (position in the donor of the template's value) until
///    an empty slot is reached and place it there
/// 4. Fill the remaining empty slots from the donor at the same position
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or fewer than two genes.
pub fn pmx_crossover<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n >= 2, "parents must have at least two genes");

    let (start, end) = distinct_pair(n, rng);

    let child1 = pmx_build_child(parent1, parent2, start, end);
    let child2 = pmx_build_child(parent2, parent1, start, end);

    (child1, child2)
}

/// Build one PMX child: copy segment from `template`, map from `donor`.
fn pmx_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![EMPTY; n];
    let mut placed = vec![false; n];

    let mut donor_pos = vec![0; n];
    for (i, &v) in donor.iter().enumerate() {
        donor_pos[v] = i;
    }

    // Step 1: Copy segment from template
    for i in start..end {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    // Step 2: Place the donor's displaced segment values through the mapping chain
    for i in start..end {
        let donor_val = donor[i];
        if placed[donor_val] {
            continue;
        }
        let mut pos = i;
        loop {
            pos = donor_pos[template[pos]];
            if child[pos] == EMPTY {
                child[pos] = donor_val;
                placed[donor_val] = true;
                break;
            }
        }
    }

    // Step 3: Fill remaining from donor
    for (slot, &v) in child.iter_mut().zip(donor) {
        if *slot == EMPTY {
            *slot = v;
        }
    }

    child
}

/// Uniform crossover repaired for permutations.
///
/// Draws a mask of `n` fair coin flips. Child 1 keeps `parent1`'s genes where
/// the mask is set; its empty slots are filled left to right with the genes of
/// `parent2` it does not hold yet, in `parent2`'s order. Child 2 keeps
/// `parent2`'s genes under the same mask and is filled from `parent1`.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    let mask: Vec<bool> = (0..n).map(|_| rng.random_bool(0.5)).collect();

    (
        uniform_build_child(parent1, parent2, &mask),
        uniform_build_child(parent2, parent1, &mask),
    )
}

/// Build one uniform child: keep `keeper` under the mask, fill from `filler`.
fn uniform_build_child(keeper: &[usize], filler: &[usize], mask: &[bool]) -> Vec<usize> {
    let n = keeper.len();
    let mut child = vec![EMPTY; n];
    let mut used = vec![false; n];
    for i in (0..n).filter(|&i| mask[i]) {
        child[i] = keeper[i];
        used[keeper[i]] = true;
    }

    let mut slots = (0..n).filter(|&i| !mask[i]);
    for &g in filler {
        if used[g] {
            continue;
        }
        if let Some(slot) = slots.next() {
            child[slot] = g;
            used[g] = true;
        }
    }
    child
}

// ============================================================================
// Helpers
// ============================================================================

/// Draw two distinct positions in `0..n`, in draw order.
pub(crate) fn distinct_positions<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, n, 2);
    (picked.index(0), picked.index(1))
}

/// Draw two distinct positions in `0..n` and return them as `(low, high)`.
pub(crate) fn distinct_pair<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let (a, b) = distinct_positions(n, rng);
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
