use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Newman pairwise-comparison ranking")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Rank competitors from a JSON file of comparisons
    Rank(RankArgs),
    /// Print the competitor index and the win/tie matrices
    Matrix {
        /// JSON file with `{left, right, winner}` records
        #[arg(short, long)]
        input: String,
        /// Count "both" and "neither" votes as ties
        #[arg(long)]
        ties_from_indifferent: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct RankArgs {
    /// JSON file with `{left, right, winner}` records
    #[arg(short, long)]
    pub input: String,
    /// Convergence threshold and numeric floor
    #[arg(long)]
    pub tolerance: Option<f64>,
    /// Iteration cap for the solver
    #[arg(long)]
    pub max_iterations: Option<usize>,
    /// Initial tie weight, used only when ties are present
    #[arg(long)]
    pub initial_nu: Option<f64>,
    /// Pin the geometric mean of the scores to 1 after every iteration
    #[arg(long)]
    pub normalize: bool,
    /// Bootstrap resamples for confidence intervals (0 disables)
    #[arg(long)]
    pub bootstrap: Option<usize>,
    /// Seed for bootstrap resampling
    #[arg(long)]
    pub seed: Option<u64>,
    /// Confidence level of bootstrap intervals
    #[arg(long)]
    pub confidence: Option<f64>,
    /// Count "both" and "neither" votes as ties
    #[arg(long)]
    pub ties_from_indifferent: bool,
    /// Print the leaderboard as JSON
    #[arg(long)]
    pub json: bool,
}
