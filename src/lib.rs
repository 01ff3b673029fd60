pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::{Command, RankArgs};
use crate::config::settings::AppConfig;
use crate::domain::IndifferentVotes;
use crate::rating::Normalization;
use crate::services::LeaderboardService;
use crate::services::{input, output};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Rank(args) => handle_rank(&args),
        Command::Matrix {
            input,
            ties_from_indifferent,
        } => handle_matrix(&input, ties_from_indifferent),
    }
}

pub fn handle_rank(args: &RankArgs) -> Result<()> {
    let raw = input::load_comparisons(&args.input)?;
    let service = LeaderboardService::new(build_config(args));
    let leaderboard = service.build_from_votes(&raw)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&leaderboard)?);
    } else {
        print!("{}", output::render_leaderboard(&leaderboard));
    }
    Ok(())
}

pub fn handle_matrix(path: &str, ties_from_indifferent: bool) -> Result<()> {
    let raw = input::load_comparisons(path)?;
    let matrices = rating::build_matrices_from_votes(&raw, indifferent_votes(ties_from_indifferent))?;
    print!("{}", output::render_matrices(&matrices));
    Ok(())
}

/// Defaults overridden by whatever flags were given
pub fn build_config(args: &RankArgs) -> AppConfig {
    let mut config = AppConfig::new();

    if let Some(tolerance) = args.tolerance {
        config.solver.tolerance = tolerance;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.solver.max_iterations = max_iterations;
    }
    if let Some(initial_nu) = args.initial_nu {
        config.solver.initial_nu = initial_nu;
    }
    if args.normalize {
        config.solver.normalization = Normalization::GeometricMean;
    }
    if let Some(samples) = args.bootstrap {
        config.leaderboard.bootstrap_samples = samples;
    }
    if let Some(seed) = args.seed {
        config.leaderboard.seed = seed;
    }
    if let Some(confidence) = args.confidence {
        config.leaderboard.confidence_level = confidence;
    }
    config.leaderboard.indifferent_votes = indifferent_votes(args.ties_from_indifferent);

    config
}

fn indifferent_votes(as_tie: bool) -> IndifferentVotes {
    if as_tie {
        IndifferentVotes::AsTie
    } else {
        IndifferentVotes::Reject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank_args() -> RankArgs {
        RankArgs {
            input: "votes.json".to_string(),
            tolerance: None,
            max_iterations: Some(250),
            initial_nu: None,
            normalize: true,
            bootstrap: None,
            seed: Some(9),
            confidence: None,
            ties_from_indifferent: true,
            json: false,
        }
    }

    #[test]
    fn test_build_config_applies_overrides() {
        let config = build_config(&rank_args());

        assert_eq!(config.solver.max_iterations, 250);
        assert_eq!(config.solver.tolerance, 1e-3);
        assert_eq!(config.solver.normalization, Normalization::GeometricMean);
        assert_eq!(config.leaderboard.seed, 9);
        assert_eq!(config.leaderboard.bootstrap_samples, 0);
        assert_eq!(config.leaderboard.indifferent_votes, IndifferentVotes::AsTie);
    }

    #[test]
    fn test_run_reports_missing_input() {
        let result = run(Command::Matrix {
            input: "/nonexistent/votes.json".to_string(),
            ties_from_indifferent: false,
        });

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("/nonexistent/votes.json"), "{message}");
    }
}
