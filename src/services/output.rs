use std::fmt::Write as _;

use colored::Colorize;

use crate::rating::ComparisonMatrices;
use crate::services::Leaderboard;

pub fn render_leaderboard(leaderboard: &Leaderboard) -> String {
    let mut out = String::new();
    let name_width = leaderboard
        .entries
        .iter()
        .map(|e| e.competitor.len())
        .max()
        .unwrap_or(0)
        .max("competitor".len());

    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:>4}  {:<width$}  {:>6}  {:>12}  {:>25}",
            "rank",
            "competitor",
            "votes",
            "score",
            "interval",
            width = name_width
        )
        .bold()
    );

    for (position, entry) in leaderboard.entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<width$}  {:>6}  {:>12.6}  [{:>11.6}, {:>11.6}]",
            position + 1,
            entry.competitor,
            entry.votes,
            entry.score,
            entry.lower,
            entry.upper,
            width = name_width
        );
    }

    let status = if leaderboard.converged {
        format!("converged in {} iterations", leaderboard.iterations).green()
    } else {
        format!("did not converge after {} iterations", leaderboard.iterations).yellow()
    };
    let _ = writeln!(out, "\nnu = {:.6}, {}", leaderboard.nu, status);

    out
}

pub fn render_matrices(matrices: &ComparisonMatrices) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "index".bold());
    for (idx, name) in matrices.index.names().iter().enumerate() {
        let _ = writeln!(out, "{:>4}  {}", idx, name);
    }

    let _ = writeln!(out, "\n{}", "wins".bold());
    let _ = writeln!(out, "{}", matrices.wins);

    match &matrices.ties {
        Some(ties) => {
            let _ = writeln!(out, "\n{}", "ties".bold());
            let _ = writeln!(out, "{}", ties);
        }
        None => {
            let _ = writeln!(out, "\n{}", "no ties recorded".dimmed());
        }
    }

    out
}
