//! Error type shared by the board, operators, population and run loop.
//!
//! Every variant is a precondition violation detected at construction or
//! operator-invocation time. None of them is retried or clamped internally.

/// Errors produced by the N-Queens GA engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueensError {
    /// Board size below 4 (N-Queens has no solution for 2 and 3, 1 is excluded).
    #[error("board size must be at least 4, got {size}")]
    InvalidSize { size: usize },

    /// Explicit genes do not form a permutation of `0..expected`.
    #[error("invalid genes for board size {expected}: {reason}")]
    InvalidGenes { expected: usize, reason: String },

    /// An operator was configured with a parameter it cannot honour.
    #[error("invalid parameter for {operator}: {reason}")]
    InvalidOperatorParameter {
        operator: &'static str,
        reason: String,
    },

    /// A run-level configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Selection or a generation transition was attempted with no members.
    #[error("population is empty")]
    EmptyPopulation,
}

impl QueensError {
    pub(crate) fn operator(operator: &'static str, reason: impl Into<String>) -> Self {
        QueensError::InvalidOperatorParameter {
            operator,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, QueensError>;
