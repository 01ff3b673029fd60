pub mod bootstrap;
mod convergence;
pub mod matrix;
pub mod newman;
mod normalization;
pub mod types;

pub use bootstrap::{ScoreInterval, bootstrap_intervals};
pub use matrix::{CompetitorIndex, ComparisonMatrices, build_matrices, build_matrices_from_votes};
pub use newman::solve;
pub use normalization::Normalization;
pub use types::{CompetitorScore, Solution};
