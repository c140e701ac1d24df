//! Genetic algorithm for the N-Queens problem.
//!
//! A board is a permutation of `0..n`: `genes[col]` is the row of the queen
//! in that column. The encoding rules out row and column clashes, so in
//! practice only diagonal attacks are counted. Fitness is the number of
//! non-attacking pairs, `n(n-1)/2 - conflicts`, and a board at that maximum
//! is a solution.
//!
//! # Key Types
//!
//! - [`Board`]: Candidate placement with a cached conflict count
//! - [`Population`]: Fixed-size set of boards and the generation transition
//! - [`GaConfig`]: Run parameters (sizes, operators, rates, budgets, seed)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best board, outcome flags and per-generation statistics
//!
//! # Operators
//!
//! - [`Selection`]: roulette, tournament, truncation, linear ranking
//! - [`Crossover`]: single-point, order (OX), partially mapped (PMX), uniform
//! - [`Mutation`]: swap, displacement, inversion, scramble
//! - [`Elitism`]: none, fixed count, percentage, fitness threshold
//!
//! The [`crossover`] and [`mutation`] submodules also expose the operators as
//! free functions over gene slices.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains" (OX)
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem" (PMX)

mod board;
mod config;
pub mod crossover;
mod elitism;
pub mod mutation;
mod population;
mod runner;
mod selection;

pub use board::{count_conflicts, max_pairs, Board, MIN_BOARD_SIZE};
pub use config::GaConfig;
pub use crossover::Crossover;
pub use elitism::Elitism;
pub use mutation::Mutation;
pub use population::{FitnessStats, Operators, ParentPool, Population};
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::{PreparedSelection, Selection};
