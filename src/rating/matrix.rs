use std::collections::HashMap;

use log::debug;
use ndarray::Array2;

use crate::domain::{Comparison, IndifferentVotes, Outcome, RawComparison};
use crate::errors::RankError;

/// Deterministic mapping between competitor names and dense indices (0..N)
///
/// Names are sorted before indices are assigned, so the mapping does not
/// depend on the order in which comparisons arrive.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl CompetitorIndex {
    pub fn from_comparisons(comparisons: &[Comparison]) -> Self {
        let names = extract_competitor_names(comparisons);
        let positions = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        Self { names, positions }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    /// Index-to-name view
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name-to-index view
    pub fn positions(&self) -> &HashMap<String, usize> {
        &self.positions
    }
}

/// Win/tie count matrices aligned with a `CompetitorIndex`
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonMatrices {
    /// `wins[[i, j]]` is the number of times `i` beat `j`
    pub wins: Array2<f64>,
    /// Symmetric tie counts, `None` when no tie was recorded
    pub ties: Option<Array2<f64>>,
    pub index: CompetitorIndex,
}

impl ComparisonMatrices {
    pub fn has_ties(&self) -> bool {
        self.ties.is_some()
    }
}

pub fn build_matrices(comparisons: &[Comparison]) -> Result<ComparisonMatrices, RankError> {
    reject_self_comparisons(comparisons)?;

    let index = CompetitorIndex::from_comparisons(comparisons);
    let n = index.len();
    let mut wins = Array2::<f64>::zeros((n, n));
    let mut ties = Array2::<f64>::zeros((n, n));

    for comparison in comparisons {
        let i = index.positions[&comparison.left];
        let j = index.positions[&comparison.right];

        match comparison.outcome {
            Outcome::LeftWin => wins[[i, j]] += 1.0,
            Outcome::RightWin => wins[[j, i]] += 1.0,
            Outcome::Tie => {
                ties[[i, j]] += 1.0;
                ties[[j, i]] += 1.0;
            }
        }
    }

    let ties = if ties.iter().any(|&count| count != 0.0) {
        Some(ties)
    } else {
        None
    };

    debug!(
        "Built {}x{} matrices from {} comparisons (ties: {})",
        n,
        n,
        comparisons.len(),
        ties.is_some()
    );

    Ok(ComparisonMatrices { wins, ties, index })
}

/// Validate raw votes and build the matrices from them
///
/// The whole batch is rejected on the first self-comparison or unusable vote.
pub fn build_matrices_from_votes(
    raw: &[RawComparison],
    policy: IndifferentVotes,
) -> Result<ComparisonMatrices, RankError> {
    let comparisons = raw
        .iter()
        .map(|r| to_comparison(r, policy))
        .collect::<Result<Vec<_>, _>>()?;

    build_matrices(&comparisons)
}

pub fn to_comparison(raw: &RawComparison, policy: IndifferentVotes) -> Result<Comparison, RankError> {
    if raw.left == raw.right {
        return Err(RankError::SelfComparison(raw.left.clone()));
    }

    let outcome = raw
        .winner
        .vote()
        .and_then(|vote| vote.outcome(policy))
        .ok_or_else(|| RankError::InvalidOutcome {
            left: raw.left.clone(),
            right: raw.right.clone(),
            outcome: raw.winner.to_string(),
        })?;

    Ok(Comparison {
        left: raw.left.clone(),
        right: raw.right.clone(),
        outcome,
    })
}

fn reject_self_comparisons(comparisons: &[Comparison]) -> Result<(), RankError> {
    match comparisons.iter().find(|c| c.left == c.right) {
        Some(c) => Err(RankError::SelfComparison(c.left.clone())),
        None => Ok(()),
    }
}

fn extract_competitor_names(comparisons: &[Comparison]) -> Vec<String> {
    let mut names: Vec<&str> = comparisons
        .iter()
        .flat_map(|c| [c.left.as_str(), c.right.as_str()])
        .collect();

    names.sort_unstable();
    names.dedup();
    names.into_iter().map(str::to_string).collect()
}
