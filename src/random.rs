//! Seedable random source.
//!
//! All randomness in the crate flows through a [`QueensRng`] that the caller
//! creates and passes down explicitly. The same seed reproduces a run.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// The random generator used by the run loop.
pub type QueensRng = Pcg64Mcg;

/// Creates a generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> QueensRng {
    Pcg64Mcg::seed_from_u64(seed)
}
