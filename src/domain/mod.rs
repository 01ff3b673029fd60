pub mod models;

pub use models::{
    Comparison, CompetitorId, IndifferentVotes, Outcome, RawComparison, Vote, VoteCode,
};
