//! Permutation-preserving mutation operators.
//!
//! Each operator rearranges genes in place and never changes the multiset of
//! values, so a permutation stays a permutation. The caller decides whether to
//! mutate (with its mutation probability); the operators themselves always act.
//!
//! - [`swap_mutation`]: exchange two distinct positions, O(1)
//! - [`displacement_mutation`]: remove and reinsert elsewhere, O(n)
//! - [`inversion_mutation`]: reverse a segment, O(n)
//! - [`scramble_mutation`]: shuffle a segment, O(n)

use super::board::Board;
use super::crossover::{distinct_pair, distinct_positions};
use rand::seq::SliceRandom;
use rand::Rng;

/// Mutation operator applied to a single board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Mutation {
    /// See [`swap_mutation`].
    #[default]
    Swap,
    /// See [`displacement_mutation`].
    Displacement,
    /// See [`inversion_mutation`].
    Inversion,
    /// See [`scramble_mutation`].
    Scramble,
}

impl Mutation {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Swap => "swap",
            Mutation::Displacement => "displacement",
            Mutation::Inversion => "inversion",
            Mutation::Scramble => "scramble",
        }
    }

    /// Mutates `board` in place and drops its cached conflict count.
    pub fn apply<R: Rng + ?Sized>(&self, board: &mut Board, rng: &mut R) {
        board.mutate_with(|genes| match self {
            Mutation::Swap => swap_mutation(genes, rng),
            Mutation::Displacement => displacement_mutation(genes, rng),
            Mutation::Inversion => inversion_mutation(genes, rng),
            Mutation::Scramble => scramble_mutation(genes, rng),
        });
    }
}

/// Swap mutation: exchange the values at two distinct random positions.
pub fn swap_mutation<R: Rng + ?Sized>(perm: &mut [usize], rng: &mut R) {
    if perm.len() < 2 {
        return;
    }
    let (i, j) = distinct_positions(perm.len(), rng);
    perm.swap(i, j);
}

/// Displacement mutation: remove the element at `i` and reinsert it at `j`,
/// for two distinct random positions.
///
/// # Complexity
/// O(n) due to array shifting
pub fn displacement_mutation<R: Rng + ?Sized>(perm: &mut Vec<usize>, rng: &mut R) {
    if perm.len() < 2 {
        return;
    }
    let (from, to) = distinct_positions(perm.len(), rng);
    let item = perm.remove(from);
    perm.insert(to, item);
}

/// Inversion mutation: reverse the segment `[i, j)` for random `i < j`.
pub fn inversion_mutation<R: Rng + ?Sized>(perm: &mut [usize], rng: &mut R) {
    if perm.len() < 2 {
        return;
    }
    let (start, end) = distinct_pair(perm.len(), rng);
    perm[start..end].reverse();
}

/// Scramble mutation: shuffle the segment `[i, j)` for random `i < j`.
pub fn scramble_mutation<R: Rng + ?Sized>(perm: &mut [usize], rng: &mut R) {
    if perm.len() < 2 {
        return;
    }
    let (start, end) = distinct_pair(perm.len(), rng);
    perm[start..end].shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::board::is_permutation;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn changed_positions(a: &[usize], b: &[usize]) -> usize {
        a.iter().zip(b).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = create_rng(42);
        let original: Vec<usize> = (0..10).collect();
        for _ in 0..100 {
            let mut perm = original.clone();
            swap_mutation(&mut perm, &mut rng);
            assert_eq!(changed_positions(&original, &perm), 2);
        }
    }

    #[test]
    fn test_displacement_moves_one_gene() {
        let mut rng = create_rng(42);
        let original: Vec<usize> = (0..10).collect();
        for _ in 0..100 {
            let mut perm = original.clone();
            displacement_mutation(&mut perm, &mut rng);
            assert_ne!(perm, original);
            // Removing the moved gene from both leaves the same relative order.
            let moved = (0..10).any(|g| {
                let a: Vec<_> = original.iter().filter(|&&x| x != g).collect();
                let b: Vec<_> = perm.iter().filter(|&&x| x != g).collect();
                a == b
            });
            assert!(moved, "{perm:?}");
        }
    }

    #[test]
    fn test_inversion_reverses_one_segment() {
        let mut rng = create_rng(42);
        let original: Vec<usize> = (0..10).collect();
        for _ in 0..100 {
            let mut perm = original.clone();
            inversion_mutation(&mut perm, &mut rng);
            let first = perm.iter().zip(&original).position(|(a, b)| a != b);
            if let Some(start) = first {
                let end = 10 - perm
                    .iter()
                    .rev()
                    .zip(original.iter().rev())
                    .position(|(a, b)| a != b)
                    .unwrap_or(0);
                let mut segment = original[start..end].to_vec();
                segment.reverse();
                assert_eq!(&perm[start..end], segment.as_slice());
            }
        }
    }

    #[test]
    fn test_scramble_touches_only_a_segment() {
        let mut rng = create_rng(42);
        let original: Vec<usize> = (0..12).collect();
        for _ in 0..100 {
            let mut perm = original.clone();
            scramble_mutation(&mut perm, &mut rng);
            let changed: Vec<usize> = (0..12).filter(|&i| perm[i] != original[i]).collect();
            if let (Some(&lo), Some(&hi)) = (changed.first(), changed.last()) {
                let mut seg: Vec<usize> = perm[lo..=hi].to_vec();
                seg.sort_unstable();
                assert_eq!(seg, original[lo..=hi].to_vec());
            }
        }
    }

    #[test]
    fn test_short_slices_untouched() {
        let mut rng = create_rng(42);
        let mut single = vec![0];
        swap_mutation(&mut single, &mut rng);
        displacement_mutation(&mut single, &mut rng);
        inversion_mutation(&mut single, &mut rng);
        scramble_mutation(&mut single, &mut rng);
        assert_eq!(single, vec![0]);
    }

    #[test]
    fn test_apply_invalidates_cache() {
        let mut rng = create_rng(42);
        for mutation in [
            Mutation::Swap,
            Mutation::Displacement,
            Mutation::Inversion,
            Mutation::Scramble,
        ] {
            let mut board = Board::from_genes(8, vec![0, 4, 7, 5, 2, 6, 1, 3]).unwrap();
            assert!(board.is_solution());
            mutation.apply(&mut board, &mut rng);
            assert!(!board.is_evaluated());
            assert!(is_permutation(board.genes(), 8));
        }
    }

    #[test]
    fn test_swap_breaks_solution() {
        // The other 4-queens solution differs in all four columns.
        let mut rng = create_rng(7);
        let mut board = Board::from_genes(4, vec![1, 3, 0, 2]).unwrap();
        board.conflicts();
        Mutation::Swap.apply(&mut board, &mut rng);
        assert_eq!(board.conflicts(), crate::ga::board::count_conflicts(board.genes()));
        assert!(!board.is_solution());
    }

    proptest! {
        #[test]
        fn prop_mutations_preserve_permutation(seed in any::<u64>(), n in 4usize..40) {
            let mut rng = create_rng(seed);
            let mut perm: Vec<usize> = (0..n).collect();
            perm.shuffle(&mut rng);
            swap_mutation(&mut perm, &mut rng);
            prop_assert!(is_permutation(&perm, n));
            displacement_mutation(&mut perm, &mut rng);
            prop_assert!(is_permutation(&perm, n));
            inversion_mutation(&mut perm, &mut rng);
            prop_assert!(is_permutation(&perm, n));
            scramble_mutation(&mut perm, &mut rng);
            prop_assert!(is_permutation(&perm, n));
        }
    }
}
