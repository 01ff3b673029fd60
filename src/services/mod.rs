pub mod input;
pub mod leaderboard;
pub mod output;

pub use leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardService};
