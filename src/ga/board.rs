//! The individual: a permutation-encoded N-Queens board.
//!
//! `genes[col] = row`, so every column holds exactly one queen by
//! construction, and every row holds exactly one queen as long as the genes
//! stay a permutation. Every constructor and operator in this crate keeps
//! that property.

use crate::error::{QueensError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::sync::OnceLock;

/// Smallest board size accepted by [`Board`].
pub const MIN_BOARD_SIZE: usize = 4;

/// Number of unordered queen pairs on an `n`-board, `n(n-1)/2`.
///
/// This is also the fitness of a solution.
pub fn max_pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Counts unordered pairs of queens that share a row or a diagonal.
///
/// # Complexity
/// O(n²)
pub fn count_conflicts(genes: &[usize]) -> usize {
    let n = genes.len();
    let mut conflicts = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if genes[i] == genes[j] || genes[i].abs_diff(genes[j]) == j - i {
                conflicts += 1;
            }
        }
    }
    conflicts
}

/// Returns `true` if `genes` holds every value of `0..n` exactly once.
pub(crate) fn is_permutation(genes: &[usize], n: usize) -> bool {
    if genes.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &g in genes {
        if g >= n || seen[g] {
            return false;
        }
        seen[g] = true;
    }
    true
}

fn check_size(n: usize) -> Result<()> {
    if n < MIN_BOARD_SIZE {
        return Err(QueensError::InvalidSize { size: n });
    }
    Ok(())
}

/// A candidate N-Queens configuration with a memoized conflict count.
///
/// The conflict count is computed on first access and reset whenever the
/// genes change, so [`fitness`](Board::fitness) always reflects the current
/// genes. Clones carry the cached value along.
///
/// # Examples
///
/// ```
/// use nqueens_ga::ga::Board;
///
/// let board = Board::from_genes(4, vec![1, 3, 0, 2]).unwrap();
/// assert_eq!(board.conflicts(), 0);
/// assert_eq!(board.fitness(), 6);
/// assert!(board.is_solution());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Board {
    genes: Vec<usize>,
    conflicts: OnceLock<usize>,
}

impl Board {
    /// Creates a board holding a uniformly random permutation of `0..n`.
    ///
    /// Draws one Fisher–Yates shuffle of the identity.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self> {
        check_size(n)?;
        let mut genes: Vec<usize> = (0..n).collect();
        genes.shuffle(rng);
        Ok(Self::new_unchecked(genes))
    }

    /// Creates a board from explicit genes.
    ///
    /// Fails with [`QueensError::InvalidSize`] if `n < 4` and with
    /// [`QueensError::InvalidGenes`] if `genes` is not a permutation of `0..n`.
    pub fn from_genes(n: usize, genes: Vec<usize>) -> Result<Self> {
        check_size(n)?;
        if genes.len() != n {
            return Err(QueensError::InvalidGenes {
                expected: n,
                reason: format!("expected {n} genes, got {}", genes.len()),
            });
        }
        if !is_permutation(&genes, n) {
            return Err(QueensError::InvalidGenes {
                expected: n,
                reason: format!("{genes:?} is not a permutation of 0..{n}"),
            });
        }
        Ok(Self::new_unchecked(genes))
    }

    fn new_unchecked(genes: Vec<usize>) -> Self {
        Self {
            genes,
            conflicts: OnceLock::new(),
        }
    }

    /// Board size `n`.
    pub fn size(&self) -> usize {
        self.genes.len()
    }

    /// Row of the queen in each column.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Fitness of a solution on this board, `n(n-1)/2`.
    pub fn max_pairs(&self) -> usize {
        max_pairs(self.size())
    }

    /// Number of attacking queen pairs, computed once and cached.
    pub fn conflicts(&self) -> usize {
        *self
            .conflicts
            .get_or_init(|| count_conflicts(&self.genes))
    }

    /// Number of non-attacking pairs: `max_pairs - conflicts`.
    pub fn fitness(&self) -> usize {
        self.max_pairs() - self.conflicts()
    }

    /// Whether no two queens attack each other.
    pub fn is_solution(&self) -> bool {
        self.conflicts() == 0
    }

    /// Whether the conflict count is currently cached.
    pub fn is_evaluated(&self) -> bool {
        self.conflicts.get().is_some()
    }

    /// Gives in-place access to the genes and drops the cached conflict count.
    ///
    /// `f` must leave the genes a permutation of `0..n`.
    pub(crate) fn mutate_with<F: FnOnce(&mut Vec<usize>)>(&mut self, f: F) {
        let n = self.genes.len();
        f(&mut self.genes);
        debug_assert!(
            is_permutation(&self.genes, n),
            "mutation broke the permutation: {:?}",
            self.genes
        );
        self.conflicts = OnceLock::new();
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.genes == other.genes
    }
}

impl Eq for Board {}

impl TryFrom<Vec<usize>> for Board {
    type Error = QueensError;

    fn try_from(genes: Vec<usize>) -> Result<Self> {
        Board::from_genes(genes.len(), genes)
    }
}

impl From<Board> for Vec<usize> {
    fn from(board: Board) -> Self {
        board.genes
    }
}

/// Renders the board row by row, `Q` for a queen and `.` for an empty square.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        for row in 0..n {
            for col in 0..n {
                if col > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(if self.genes[col] == row { "Q" } else { "." })?;
            }
            if row + 1 < n {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    const KNOWN_SOLUTIONS: &[&[usize]] = &[
        &[1, 3, 0, 2],
        &[0, 2, 4, 1, 3],
        &[1, 3, 5, 0, 2, 4],
        &[0, 4, 7, 5, 2, 6, 1, 3],
    ];

    #[test]
    fn test_known_solutions_have_no_conflicts() {
        for &genes in KNOWN_SOLUTIONS {
            let n = genes.len();
            let board = Board::from_genes(n, genes.to_vec()).unwrap();
            assert_eq!(board.conflicts(), 0, "{genes:?}");
            assert_eq!(board.fitness(), max_pairs(n));
            assert!(board.is_solution());
        }
    }

    #[test]
    fn test_identity_is_one_diagonal() {
        // Every pair sits on the main diagonal.
        let board = Board::from_genes(8, (0..8).collect()).unwrap();
        assert_eq!(board.conflicts(), 28);
        assert_eq!(board.fitness(), 0);
    }

    #[test]
    fn test_count_conflicts_rows_and_diagonals() {
        assert_eq!(count_conflicts(&[0, 0, 0, 0]), 6);
        assert_eq!(count_conflicts(&[0, 2, 1, 3]), 2);
        assert_eq!(count_conflicts(&[3, 2, 1, 0]), 6);
    }

    #[test]
    fn test_invalid_size() {
        let mut rng = create_rng(42);
        for n in 0..4 {
            assert_eq!(
                Board::random(n, &mut rng),
                Err(QueensError::InvalidSize { size: n })
            );
        }
        assert!(matches!(
            Board::from_genes(3, vec![0, 1, 2]),
            Err(QueensError::InvalidSize { size: 3 })
        ));
    }

    #[test]
    fn test_invalid_genes() {
        assert!(matches!(
            Board::from_genes(5, vec![0, 1, 2, 3]),
            Err(QueensError::InvalidGenes { expected: 5, .. })
        ));
        assert!(matches!(
            Board::from_genes(4, vec![0, 1, 1, 3]),
            Err(QueensError::InvalidGenes { .. })
        ));
        assert!(matches!(
            Board::from_genes(4, vec![0, 1, 2, 4]),
            Err(QueensError::InvalidGenes { .. })
        ));
    }

    #[test]
    fn test_random_is_permutation() {
        let mut rng = create_rng(42);
        for n in 4..20 {
            let board = Board::random(n, &mut rng).unwrap();
            assert!(is_permutation(board.genes(), n));
            assert!(!board.is_evaluated());
        }
    }

    #[test]
    fn test_cache_and_invalidation() {
        let mut board = Board::from_genes(4, vec![1, 3, 0, 2]).unwrap();
        assert!(!board.is_evaluated());
        assert_eq!(board.conflicts(), 0);
        assert!(board.is_evaluated());

        let cloned = board.clone();
        assert!(cloned.is_evaluated());

        board.mutate_with(|g| g.swap(0, 1));
        assert!(!board.is_evaluated());
        assert_eq!(board.genes(), &[3, 1, 0, 2]);
        assert_eq!(board.conflicts(), count_conflicts(&[3, 1, 0, 2]));
        assert_eq!(cloned.conflicts(), 0);
    }

    #[test]
    fn test_display() {
        let board = Board::from_genes(4, vec![1, 3, 0, 2]).unwrap();
        let expected = ". . Q .\nQ . . .\n. . . Q\n. Q . .";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_try_from_vec() {
        let board = Board::try_from(vec![2, 0, 3, 1]).unwrap();
        assert_eq!(board.size(), 4);
        assert!(Board::try_from(vec![0, 1]).is_err());
        let genes: Vec<usize> = board.into();
        assert_eq!(genes, vec![2, 0, 3, 1]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_gene_list() {
        let board = Board::from_genes(5, vec![0, 2, 4, 1, 3]).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[0,2,4,1,3]");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert!(serde_json::from_str::<Board>("[0,0,1,2]").is_err());
    }

    proptest! {
        #[test]
        fn prop_fitness_complements_conflicts(seed in any::<u64>(), n in 4usize..24) {
            let mut rng = create_rng(seed);
            let board = Board::random(n, &mut rng).unwrap();
            prop_assert!(board.conflicts() <= max_pairs(n));
            prop_assert_eq!(board.fitness() + board.conflicts(), max_pairs(n));
            prop_assert_eq!(board.fitness() == max_pairs(n), board.conflicts() == 0);
        }

        #[test]
        fn prop_conflicts_invariant_under_reflection(seed in any::<u64>(), n in 4usize..24) {
            let mut rng = create_rng(seed);
            let board = Board::random(n, &mut rng).unwrap();
            let mirrored: Vec<usize> = board.genes().iter().rev().copied().collect();
            let flipped: Vec<usize> = board.genes().iter().map(|&g| n - 1 - g).collect();
            prop_assert_eq!(count_conflicts(&mirrored), board.conflicts());
            prop_assert_eq!(count_conflicts(&flipped), board.conflicts());
        }
    }
}
