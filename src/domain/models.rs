use serde::{Deserialize, Serialize};

pub type CompetitorId = String;

/// Result of a single pairwise comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    LeftWin,
    RightWin,
    Tie,
}

/// A pairwise comparison between two named competitors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub left: CompetitorId,
    pub right: CompetitorId,
    pub outcome: Outcome,
}

impl Comparison {
    pub fn new(left: impl Into<String>, right: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            outcome,
        }
    }
}

/// Vote as recorded by the voting frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Unspecified, // 0
    Neither,     // 1 - didn't like either side
    Left,        // 2
    Right,       // 3
    Both,        // 4 - liked both sides equally
}

impl Vote {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Vote::Unspecified),
            1 => Some(Vote::Neither),
            2 => Some(Vote::Left),
            3 => Some(Vote::Right),
            4 => Some(Vote::Both),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "UNSPECIFIED" => Some(Vote::Unspecified),
            "NONE" => Some(Vote::Neither),
            "LEFT" => Some(Vote::Left),
            "RIGHT" => Some(Vote::Right),
            "BOTH" => Some(Vote::Both),
            _ => None,
        }
    }

    /// Outcome this vote contributes to the comparison matrices, if any
    pub fn outcome(self, policy: IndifferentVotes) -> Option<Outcome> {
        match (self, policy) {
            (Vote::Left, _) => Some(Outcome::LeftWin),
            (Vote::Right, _) => Some(Outcome::RightWin),
            (Vote::Both | Vote::Neither, IndifferentVotes::AsTie) => Some(Outcome::Tie),
            (Vote::Both | Vote::Neither, IndifferentVotes::Reject) => None,
            (Vote::Unspecified, _) => None,
        }
    }
}

/// How "both" and "neither" votes enter the ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndifferentVotes {
    #[default]
    Reject,
    AsTie,
}

/// Vote code as it arrives on the wire: either the numeric code or its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoteCode {
    Number(i64),
    Name(String),
}

impl VoteCode {
    pub fn vote(&self) -> Option<Vote> {
        match self {
            VoteCode::Number(code) => Vote::from_code(*code),
            VoteCode::Name(name) => Vote::from_name(&name.to_uppercase()),
        }
    }
}

impl std::fmt::Display for VoteCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteCode::Number(code) => write!(f, "{}", code),
            VoteCode::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Unvalidated comparison as read from an input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawComparison {
    pub left: CompetitorId,
    pub right: CompetitorId,
    pub winner: VoteCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_codes() {
        assert_eq!(Vote::from_code(2), Some(Vote::Left));
        assert_eq!(Vote::from_code(4), Some(Vote::Both));
        assert_eq!(Vote::from_code(9), None);
        assert_eq!(VoteCode::Name("right".to_string()).vote(), Some(Vote::Right));
        assert_eq!(VoteCode::Name("NONE".to_string()).vote(), Some(Vote::Neither));
    }

    #[test]
    fn test_indifferent_votes_policy() {
        assert_eq!(Vote::Both.outcome(IndifferentVotes::Reject), None);
        assert_eq!(Vote::Neither.outcome(IndifferentVotes::AsTie), Some(Outcome::Tie));
        assert_eq!(Vote::Left.outcome(IndifferentVotes::Reject), Some(Outcome::LeftWin));
        assert_eq!(Vote::Unspecified.outcome(IndifferentVotes::AsTie), None);
    }

    #[test]
    fn test_raw_comparison_accepts_code_or_name() {
        let raw: Vec<RawComparison> = serde_json::from_str(
            r#"[{"left": "a", "right": "b", "winner": 3},
                {"left": "a", "right": "c", "winner": "LEFT"}]"#,
        )
        .unwrap();

        assert_eq!(raw[0].winner.vote(), Some(Vote::Right));
        assert_eq!(raw[1].winner.vote(), Some(Vote::Left));
    }

    #[test]
    fn test_outcome_serialization() {
        let comparison = Comparison::new("Pizza", "Sushi", Outcome::LeftWin);
        let json = serde_json::to_string(&comparison).unwrap();

        assert_eq!(json, r#"{"left":"Pizza","right":"Sushi","outcome":"left_win"}"#);
    }
}
