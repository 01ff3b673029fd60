use serde::{Deserialize, Serialize};

use ndarray::Array1;

use super::matrix::CompetitorIndex;
use super::normalization::Normalization;
use crate::errors::RankError;

pub type ScoreValue = f64;

/// Output of a Newman solve, scores aligned with the competitor index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub scores: Vec<ScoreValue>,
    pub nu: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl Solution {
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Same solution with the scores rescaled by `normalization`
    pub fn rescaled(self, normalization: Normalization) -> Self {
        let scores = normalization.apply(Array1::from(self.scores)).to_vec();
        Self { scores, ..self }
    }

    /// Turn an exhausted iteration budget into `RankError::NonConvergence`
    pub fn ensure_converged(self) -> Result<Self, RankError> {
        if self.converged {
            Ok(self)
        } else {
            Err(RankError::NonConvergence(Box::new(self)))
        }
    }

    /// Pair every score with its competitor name, in index order
    pub fn named(&self, index: &CompetitorIndex) -> Vec<CompetitorScore> {
        self.scores
            .iter()
            .enumerate()
            .map(|(idx, &score)| CompetitorScore {
                competitor: index.name(idx).to_string(),
                score,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorScore {
    pub competitor: String,
    pub score: ScoreValue,
}
