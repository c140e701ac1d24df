//! Genetic-algorithm solver for the N-Queens problem.
//!
//! Places `n` queens on an `n x n` board so that no two attack each other,
//! by evolving a population of permutation-encoded boards:
//!
//! - **Board** ([`ga::Board`]): one queen per column, `genes[col]` is its row.
//!   Fitness counts the non-attacking pairs.
//! - **Operators**: pluggable selection, crossover, mutation and elitism
//!   policies, each a closed enum selected by configuration.
//! - **Run loop** ([`ga::GaRunner`]): evolves until a solution appears, the
//!   generation budget runs out, a time limit passes or the caller cancels.
//!
//! Every random draw comes from one seeded generator ([`random::create_rng`]),
//! so a run is reproducible from its seed. The optional `parallel` feature
//! evaluates fitness and runs seed batches on the rayon thread pool without
//! changing results.
//!
//! # Example
//!
//! ```
//! use nqueens_ga::ga::{Elitism, GaConfig, GaRunner};
//!
//! let config = GaConfig::default()
//!     .with_board_size(8)
//!     .with_elitism(Elitism::Fixed(2))
//!     .with_seed(7);
//! let result = GaRunner::run(&config)?;
//! println!("solved: {} after {} generations", result.solved, result.generations);
//! # Ok::<(), nqueens_ga::QueensError>(())
//! ```

pub mod error;
pub mod ga;
pub mod random;

pub use error::{QueensError, Result};
