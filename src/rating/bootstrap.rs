use std::collections::HashMap;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::matrix::build_matrices;
use super::newman::solve;
use super::normalization::Normalization;
use crate::config::settings::SolverSettings;
use crate::domain::Comparison;
use crate::errors::RankError;

/// Percentile interval of a competitor's score across bootstrap resamples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Resample the comparisons with replacement, solve each resample and report
/// per-competitor percentile intervals at `confidence_level`.
///
/// Every resample is rescaled to geometric mean 1 before it is pooled, so the
/// intervals are on the scale of `Solution::rescaled(Normalization::GeometricMean)`.
///
/// The RNG is seeded from `seed`, so identical inputs give identical intervals.
pub fn bootstrap_intervals(
    comparisons: &[Comparison],
    settings: &SolverSettings,
    samples: usize,
    confidence_level: f64,
    seed: u64,
) -> Result<HashMap<String, ScoreInterval>, RankError> {
    if comparisons.is_empty() || samples == 0 {
        return Ok(HashMap::new());
    }

    info!("Bootstrapping {} resamples of {} comparisons", samples, comparisons.len());

    let mut rng = StdRng::seed_from_u64(seed);
    let mut distributions: HashMap<String, Vec<f64>> = HashMap::new();

    for sample in 0..samples {
        let resample = draw_resample(comparisons, &mut rng);
        let matrices = build_matrices(&resample)?;
        let settings = SolverSettings {
            initial_nu: settings.initial_nu_for(matrices.has_ties()),
            ..*settings
        };
        let solution = solve(&matrices.wins, matrices.ties.as_ref(), &settings)?
            .rescaled(Normalization::GeometricMean);

        if !solution.is_converged() {
            debug!("Bootstrap resample {} did not converge", sample);
        }

        for entry in solution.named(&matrices.index) {
            distributions.entry(entry.competitor).or_default().push(entry.score);
        }
    }

    Ok(distributions
        .into_iter()
        .map(|(name, scores)| (name, percentile_interval(scores, confidence_level)))
        .collect())
}

fn draw_resample(comparisons: &[Comparison], rng: &mut impl Rng) -> Vec<Comparison> {
    let n = comparisons.len();
    (0..n)
        .map(|_| comparisons[rng.random_range(0..n)].clone())
        .collect()
}

fn percentile_interval(mut scores: Vec<f64>, confidence_level: f64) -> ScoreInterval {
    scores.sort_by(f64::total_cmp);

    let len = scores.len();
    let last = len.saturating_sub(1);
    let lower_idx = (((1.0 - confidence_level) / 2.0 * len as f64) as usize).min(last);
    let upper_idx = (((1.0 + confidence_level) / 2.0 * len as f64) as usize)
        .saturating_sub(1)
        .min(last);

    ScoreInterval {
        lower: scores[lower_idx],
        upper: scores[upper_idx],
    }
}
