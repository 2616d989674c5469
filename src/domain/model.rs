use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_CANDIDATE_DIGITS: usize = 8;
pub const MAX_CANDIDATE_DIGITS: usize = 15;

/// A string of 8 to 15 ASCII digits with no sign or separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    /// Accepts only strings the classifier is defined for.
    pub fn parse(value: &str) -> Option<Self> {
        let len = value.len();
        if (MIN_CANDIDATE_DIGITS..=MAX_CANDIDATE_DIGITS).contains(&len)
            && value.bytes().all(|b| b.is_ascii_digit())
        {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// E.164-ish display form used in replies and the remainder file.
    pub fn with_plus(&self) -> String {
        format!("+{}", self.0)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Repeated,
    SequentialUp,
    SequentialDown,
    DoublePattern,
    Palindrome,
}

impl PatternKind {
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Repeated,
        PatternKind::SequentialUp,
        PatternKind::SequentialDown,
        PatternKind::DoublePattern,
        PatternKind::Palindrome,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Repeated => "Repeated",
            Self::SequentialUp => "Seq Up",
            Self::SequentialDown => "Seq Down",
            Self::DoublePattern => "Double",
            Self::Palindrome => "Palindrome",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub kind: PatternKind,
    pub matched: String,
    /// Weighted contribution of this single occurrence.
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ScoringPolicy {
    /// Sum of per-occurrence weights.
    #[default]
    Weighted,
    /// Number of distinct pattern kinds matched (0..=5).
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: u32,
    pub matches: Vec<PatternMatch>,
}

impl ScoredCandidate {
    pub fn is_fancy(&self) -> bool {
        self.score > 0
    }
}

/// The first N ranked candidates and everything after them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedSplit {
    pub selected: Vec<ScoredCandidate>,
    pub remainder: Vec<ScoredCandidate>,
}
