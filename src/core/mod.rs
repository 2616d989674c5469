pub mod bot;
pub mod classifier;
pub mod engine;
pub mod extractor;
pub mod ingest;
pub mod ranker;
pub mod render;
pub mod session;

pub use crate::domain::model::{
    Candidate, PatternKind, PatternMatch, RankedSplit, ScoredCandidate, ScoringPolicy,
};
pub use crate::domain::ports::{ChatApi, ConfigProvider, Storage};
pub use crate::utils::error::Result;
