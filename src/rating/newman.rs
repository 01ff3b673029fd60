use log::{debug, info};
use ndarray::{Array1, Array2};

use super::convergence::{has_converged, should_continue};
use super::normalization::Normalization;
use super::types::Solution;
use crate::config::settings::SolverSettings;
use crate::errors::RankError;

/// Ranks competitors from win/tie counts with Newman's fixed-point iteration
/// (M. E. J. Newman, "Efficient computation of rankings from pairwise
/// comparisons"), jointly estimating the tie weight ν when ties are present.
///
/// Scores start at 1.0 and ν at `settings.initial_nu`. Without a tie matrix ν
/// is never updated. Reaching `max_iterations` is not an error here: the
/// returned solution has `converged == false`, see `Solution::ensure_converged`.
pub fn solve(
    wins: &Array2<f64>,
    ties: Option<&Array2<f64>>,
    settings: &SolverSettings,
) -> Result<Solution, RankError> {
    check_dimensions(wins, ties)?;

    let n = wins.nrows();
    if n == 0 {
        return Ok(Solution {
            scores: Vec::new(),
            nu: settings.initial_nu,
            iterations: 0,
            converged: true,
        });
    }

    let problem = Problem::new(wins, ties, settings);
    let mut state = IterationState::seed(n, settings.initial_nu);
    let mut applied_nu = settings.initial_nu;
    let mut iterations = 0;
    let mut converged = false;

    while !converged && should_continue(iterations, settings.max_iterations) {
        iterations += 1;

        let step = problem.step(&state);
        converged = has_converged(&state.scores, &step.next.scores, settings.tolerance);
        applied_nu = step.applied_nu;
        state = step.next;
    }

    if converged {
        info!("Newman iteration converged in {} iterations (nu = {:.6})", iterations, applied_nu);
    } else {
        info!("Newman iteration stopped after {} iterations without converging", iterations);
    }

    Ok(Solution {
        scores: state.scores.to_vec(),
        nu: applied_nu,
        iterations,
        converged,
    })
}

fn check_dimensions(wins: &Array2<f64>, ties: Option<&Array2<f64>>) -> Result<(), RankError> {
    let win_dim = wins.dim();
    let tie_dim = ties.map(|t| t.dim()).unwrap_or(win_dim);

    if win_dim.0 != win_dim.1 || tie_dim != win_dim {
        return Err(RankError::MismatchedDimensions {
            win: win_dim,
            tie: tie_dim,
        });
    }

    Ok(())
}

/// Scores and the ν estimate carried from one iteration to the next
#[derive(Debug, Clone)]
struct IterationState {
    scores: Array1<f64>,
    nu: f64,
}

impl IterationState {
    fn seed(n: usize, nu: f64) -> Self {
        Self {
            scores: Array1::ones(n),
            nu,
        }
    }
}

struct Step {
    next: IterationState,
    /// ν actually used for this iteration, after the NaN reset
    applied_nu: f64,
}

/// Pairwise quantities derived from one score vector
struct PairTerms {
    geo_mean: Array2<f64>,
    sum: Array2<f64>,
    sqrt_ratio: Array2<f64>,
    denominator: Array2<f64>,
}

impl PairTerms {
    fn new(scores: &Array1<f64>, nu: f64) -> Self {
        let n = scores.len();
        let geo_mean = Array2::from_shape_fn((n, n), |(i, j)| (scores[i] * scores[j]).sqrt());
        let sum = Array2::from_shape_fn((n, n), |(i, j)| scores[i] + scores[j]);
        let sqrt_ratio = Array2::from_shape_fn((n, n), |(i, j)| {
            if scores[j] == 0.0 {
                0.0
            } else {
                (scores[i] / scores[j]).sqrt()
            }
        });
        let denominator = &sum + &(&geo_mean * (2.0 * nu));

        Self {
            geo_mean,
            sum,
            sqrt_ratio,
            denominator,
        }
    }
}

/// Immutable inputs of one solve
struct Problem<'a> {
    wins: &'a Array2<f64>,
    ties: Option<&'a Array2<f64>>,
    /// wins + ties / 2
    win_tie_half: Array2<f64>,
    tolerance: f64,
    normalization: Normalization,
}

impl<'a> Problem<'a> {
    fn new(wins: &'a Array2<f64>, ties: Option<&'a Array2<f64>>, settings: &SolverSettings) -> Self {
        let win_tie_half = match ties {
            Some(ties) => wins + &(ties / 2.0),
            None => wins.clone(),
        };

        Self {
            wins,
            ties,
            win_tie_half,
            tolerance: settings.tolerance,
            normalization: settings.normalization,
        }
    }

    /// One fixed-point update; never mutates `state`
    fn step(&self, state: &IterationState) -> Step {
        let nu = if state.nu.is_nan() { self.tolerance } else { state.nu };
        let terms = PairTerms::new(&state.scores, nu);

        let scores = self.update_scores(&state.scores, &terms, nu);
        let scores = self.normalization.apply(scores);

        let next_nu = match self.ties {
            Some(ties) => self.update_nu(ties, &terms),
            None => state.nu,
        };

        debug!("Step with nu = {:.6}, next nu = {:.6}", nu, next_nu);

        Step {
            next: IterationState {
                scores,
                nu: next_nu,
            },
            applied_nu: nu,
        }
    }

    fn update_scores(&self, scores: &Array1<f64>, terms: &PairTerms, nu: f64) -> Array1<f64> {
        let n = scores.len();

        Array1::from_shape_fn(n, |i| {
            let mut numerator = 0.0;
            let mut denominator = 0.0;

            for j in 0..n {
                let common = terms.denominator[[i, j]];
                if common == 0.0 {
                    continue;
                }

                numerator += self.win_tie_half[[i, j]] * (scores[j] + nu * terms.geo_mean[[i, j]])
                    / common;
                denominator += self.win_tie_half[[j, i]] * (1.0 + nu * terms.sqrt_ratio[[i, j]])
                    / terms.denominator[[j, i]];
            }

            if denominator == 0.0 {
                return self.tolerance;
            }

            self.clamp(numerator / denominator)
        })
    }

    fn update_nu(&self, ties: &Array2<f64>, terms: &PairTerms) -> f64 {
        let n = ties.nrows();
        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for i in 0..n {
            for j in 0..n {
                let common = terms.denominator[[i, j]];
                if common == 0.0 {
                    continue;
                }

                numerator += ties[[i, j]] * terms.sum[[i, j]] / common;
                denominator += self.wins[[i, j]] * terms.geo_mean[[i, j]] / common;
            }
        }

        numerator /= 2.0;
        denominator *= 2.0;

        if denominator == 0.0 {
            return self.tolerance;
        }

        self.clamp(numerator / denominator)
    }

    fn clamp(&self, value: f64) -> f64 {
        if value.is_finite() { value } else { self.tolerance }
    }
}
