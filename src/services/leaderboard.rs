use std::collections::HashMap;

use log::{info, warn};
use serde::Serialize;

use crate::config::settings::{AppConfig, SolverSettings};
use crate::domain::{Comparison, RawComparison};
use crate::errors::RankError;
use crate::rating::{self, ComparisonMatrices, Normalization, ScoreInterval, Solution};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub competitor: String,
    pub votes: u64,
    pub score: f64,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub nu: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Turns comparisons into a sorted leaderboard with vote counts
pub struct LeaderboardService {
    config: AppConfig,
}

impl LeaderboardService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Validate raw votes under the configured policy, then build the leaderboard
    pub fn build_from_votes(&self, raw: &[RawComparison]) -> Result<Leaderboard, RankError> {
        let policy = self.config.leaderboard.indifferent_votes;
        let comparisons = raw
            .iter()
            .map(|r| rating::matrix::to_comparison(r, policy))
            .collect::<Result<Vec<_>, _>>()?;

        self.build(&comparisons)
    }

    pub fn build(&self, comparisons: &[Comparison]) -> Result<Leaderboard, RankError> {
        info!("=== Building leaderboard from {} comparisons ===", comparisons.len());

        let matrices = rating::build_matrices(comparisons)?;
        info!("  → {} competitors, ties present: {}", matrices.index.len(), matrices.has_ties());

        let solution = self.solve(&matrices)?;
        if !solution.is_converged() {
            warn!(
                "Scores did not converge within {} iterations, using best effort",
                solution.iterations
            );
        }

        let votes = count_votes(comparisons);
        let intervals = self.bootstrap(comparisons)?;
        let solution = self.on_interval_scale(solution);
        let entries = build_entries(&matrices, &solution, &votes, &intervals);

        Ok(Leaderboard {
            entries,
            nu: solution.nu,
            iterations: solution.iterations,
            converged: solution.converged,
        })
    }

    fn solve(&self, matrices: &ComparisonMatrices) -> Result<Solution, RankError> {
        let settings = self.solver_settings(matrices.has_ties());
        rating::solve(&matrices.wins, matrices.ties.as_ref(), &settings)
    }

    fn solver_settings(&self, has_ties: bool) -> SolverSettings {
        let solver = &self.config.solver;
        SolverSettings {
            initial_nu: solver.initial_nu_for(has_ties),
            ..*solver
        }
    }

    /// Bootstrap intervals are pooled at geometric mean 1; report the point score there too
    fn on_interval_scale(&self, solution: Solution) -> Solution {
        if self.config.leaderboard.bootstrap_samples > 0 {
            solution.rescaled(Normalization::GeometricMean)
        } else {
            solution
        }
    }

    fn bootstrap(&self, comparisons: &[Comparison]) -> Result<HashMap<String, ScoreInterval>, RankError> {
        let settings = &self.config.leaderboard;
        rating::bootstrap_intervals(
            comparisons,
            &self.config.solver,
            settings.bootstrap_samples,
            settings.confidence_level,
            settings.seed,
        )
    }
}

/// Each comparison counts as one vote for both participants
fn count_votes(comparisons: &[Comparison]) -> HashMap<&str, u64> {
    let mut counts = HashMap::new();
    for comparison in comparisons {
        *counts.entry(comparison.left.as_str()).or_insert(0) += 1;
        *counts.entry(comparison.right.as_str()).or_insert(0) += 1;
    }
    counts
}

fn build_entries(
    matrices: &ComparisonMatrices,
    solution: &Solution,
    votes: &HashMap<&str, u64>,
    intervals: &HashMap<String, ScoreInterval>,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = solution
        .named(&matrices.index)
        .into_iter()
        .map(|named| {
            let interval = intervals.get(&named.competitor).copied().unwrap_or(ScoreInterval {
                lower: named.score,
                upper: named.score,
            });

            LeaderboardEntry {
                votes: votes.get(named.competitor.as_str()).copied().unwrap_or(0),
                score: named.score,
                lower: interval.lower,
                upper: interval.upper,
                competitor: named.competitor,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.competitor.cmp(&b.competitor))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::LeaderboardSettings;
    use crate::domain::{IndifferentVotes, Outcome, VoteCode};

    fn comparisons() -> Vec<Comparison> {
        vec![
            Comparison::new("gpt", "llama", Outcome::LeftWin),
            Comparison::new("llama", "gpt", Outcome::RightWin),
            Comparison::new("llama", "gpt", Outcome::LeftWin),
            Comparison::new("claude", "gpt", Outcome::LeftWin),
            Comparison::new("gpt", "claude", Outcome::RightWin),
            Comparison::new("claude", "llama", Outcome::LeftWin),
            Comparison::new("claude", "llama", Outcome::LeftWin),
            Comparison::new("llama", "claude", Outcome::LeftWin),
        ]
    }

    #[test]
    fn test_entries_sorted_by_score() {
        let service = LeaderboardService::new(AppConfig::new());

        let leaderboard = service.build(&comparisons()).unwrap();
        let names: Vec<&str> = leaderboard.entries.iter().map(|e| e.competitor.as_str()).collect();

        assert!(leaderboard.converged);
        assert_eq!(leaderboard.nu, 0.0);
        assert_eq!(names, vec!["claude", "gpt", "llama"]);
        assert!(leaderboard.entries.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_votes_count_both_sides() {
        let service = LeaderboardService::new(AppConfig::new());

        let leaderboard = service.build(&comparisons()).unwrap();
        let votes: HashMap<&str, u64> = leaderboard
            .entries
            .iter()
            .map(|e| (e.competitor.as_str(), e.votes))
            .collect();

        assert_eq!(votes["gpt"], 5);
        assert_eq!(votes["llama"], 6);
        assert_eq!(votes["claude"], 5);
    }

    #[test]
    fn test_intervals_default_to_point_score() {
        let service = LeaderboardService::new(AppConfig::new());

        let leaderboard = service.build(&comparisons()).unwrap();

        assert!(leaderboard.entries.iter().all(|e| e.lower == e.score && e.upper == e.score));
    }

    #[test]
    fn test_bootstrap_intervals_attached() {
        let config = AppConfig {
            solver: SolverSettings {
                normalization: Normalization::GeometricMean,
                ..SolverSettings::default()
            },
            leaderboard: LeaderboardSettings {
                bootstrap_samples: 40,
                ..LeaderboardSettings::default()
            },
        };
        let service = LeaderboardService::new(config);

        let leaderboard = service.build(&comparisons()).unwrap();

        assert!(leaderboard.entries.iter().all(|e| e.lower <= e.upper));
    }

    #[test]
    fn test_bootstrap_on_default_solver_stays_on_one_scale() {
        let config = AppConfig {
            solver: SolverSettings::default(),
            leaderboard: LeaderboardSettings {
                bootstrap_samples: 200,
                ..LeaderboardSettings::default()
            },
        };
        let service = LeaderboardService::new(config);
        let mut input = comparisons();
        input.push(Comparison::new("gpt", "llama", Outcome::Tie));
        input.push(Comparison::new("claude", "gpt", Outcome::Tie));

        let leaderboard = service.build(&input).unwrap();

        for entry in &leaderboard.entries {
            assert!(entry.lower.is_finite() && entry.upper.is_finite());
            assert!(entry.upper < 1e2, "{}: upper = {}", entry.competitor, entry.upper);
            assert!(
                entry.lower <= entry.score && entry.score <= entry.upper,
                "{}: {} outside [{}, {}]",
                entry.competitor,
                entry.score,
                entry.lower,
                entry.upper
            );
        }
    }

    #[test]
    fn test_permuted_input_gives_same_leaderboard() {
        let service = LeaderboardService::new(AppConfig::new());
        let mut shuffled = comparisons();
        shuffled.rotate_left(3);
        shuffled.swap(0, 4);

        let original = service.build(&comparisons()).unwrap();
        let permuted = service.build(&shuffled).unwrap();

        assert_eq!(original, permuted);
    }

    #[test]
    fn test_ties_seed_nu() {
        let service = LeaderboardService::new(AppConfig::new());
        let mut input = comparisons();
        input.push(Comparison::new("gpt", "llama", Outcome::Tie));

        let leaderboard = service.build(&input).unwrap();

        assert!(leaderboard.nu > 0.0);
        assert!(leaderboard.nu.is_finite());
    }

    #[test]
    fn test_self_comparison_fails_whole_build() {
        let service = LeaderboardService::new(AppConfig::new());
        let mut input = comparisons();
        input.push(Comparison::new("gpt", "gpt", Outcome::Tie));

        assert!(matches!(service.build(&input), Err(RankError::SelfComparison(_))));
    }

    #[test]
    fn test_votes_use_configured_policy() {
        let raw = vec![
            RawComparison {
                left: "a".to_string(),
                right: "b".to_string(),
                winner: VoteCode::Name("LEFT".to_string()),
            },
            RawComparison {
                left: "a".to_string(),
                right: "b".to_string(),
                winner: VoteCode::Number(1),
            },
        ];

        let strict = LeaderboardService::new(AppConfig::new());
        assert!(matches!(strict.build_from_votes(&raw), Err(RankError::InvalidOutcome { .. })));

        let mut config = AppConfig::new();
        config.leaderboard.indifferent_votes = IndifferentVotes::AsTie;
        let lenient = LeaderboardService::new(config);
        let leaderboard = lenient.build_from_votes(&raw).unwrap();
        assert_eq!(leaderboard.entries.len(), 2);
        assert!(leaderboard.entries.iter().all(|e| e.votes == 2));
        assert!(leaderboard.nu.is_finite());
    }
}
