use anyhow::Context as _;
use thiserror::Error;

use crate::rating::Solution;

/// Errors produced by the matrix builder and the rank solver
#[derive(Debug, Error)]
pub enum RankError {
    #[error(
        "Win matrix ({}x{}) and tie matrix ({}x{}) must be square and of the same size",
        .win.0, .win.1, .tie.0, .tie.1
    )]
    MismatchedDimensions {
        win: (usize, usize),
        tie: (usize, usize),
    },

    #[error("Comparison between the same competitor: {0}")]
    SelfComparison(String),

    #[error("Invalid outcome {outcome} in comparison {left} vs {right}")]
    InvalidOutcome {
        left: String,
        right: String,
        outcome: String,
    },

    /// Not fatal: the best-effort solution is carried along.
    #[error("Did not converge within {} iterations", .0.iterations)]
    NonConvergence(Box<Solution>),
}

impl RankError {
    /// Best-effort solution attached to a non-convergence report
    pub fn best_effort(&self) -> Option<&Solution> {
        match self {
            RankError::NonConvergence(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Add context to input read errors
pub fn read_context(path: &str) -> String {
    format!("Failed to read comparisons from: {}", path)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Wrap result with read context
pub fn with_read_context<T, E>(result: Result<T, E>, path: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(read_context(path))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}
