use std::fs;

use anyhow::Result;
use log::info;

use crate::domain::RawComparison;
use crate::errors::{with_parse_context, with_read_context};

/// Read a JSON array of `{left, right, winner}` records
pub fn load_comparisons(path: &str) -> Result<Vec<RawComparison>> {
    let content = with_read_context(fs::read_to_string(path), path)?;
    let comparisons = parse_comparisons(&content)?;
    info!("Loaded {} comparisons from {}", comparisons.len(), path);
    Ok(comparisons)
}

pub fn parse_comparisons(content: &str) -> Result<Vec<RawComparison>> {
    with_parse_context(serde_json::from_str(content), "comparisons")
}
