use crate::domain::IndifferentVotes;
use crate::rating::Normalization;

pub struct SolverSettings {
    /// Seed for the tie-weight parameter ν when the comparisons contain ties
    pub initial_nu: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub normalization: Normalization,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            initial_nu: 1.0,
            tolerance: 1e-3,
            max_iterations: 10_000,
            normalization: Normalization::None,
        }
    }
}

impl SolverSettings {
    /// Starting ν for a solve: the configured seed with ties, zero without
    pub fn initial_nu_for(&self, has_ties: bool) -> f64 {
        if has_ties { self.initial_nu } else { 0.0 }
    }
}

pub struct LeaderboardSettings {
    /// Bootstrap resamples for confidence intervals, 0 disables them
    pub bootstrap_samples: usize,
    pub confidence_level: f64,
    pub seed: u64,
    pub indifferent_votes: IndifferentVotes,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            bootstrap_samples: 0,
            confidence_level: 0.95,
            seed: 42,
            indifferent_votes: IndifferentVotes::Reject,
        }
    }
}

pub struct AppConfig {
    pub solver: SolverSettings,
    pub leaderboard: LeaderboardSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            solver: SolverSettings::default(),
            leaderboard: LeaderboardSettings::default(),
        }
    }
}
