//! Fanciness scoring.
//!
//! Each pattern kind is scanned left to right for non-overlapping
//! occurrences: after a hit the scan resumes at the end of the match, the
//! way a regex `find_iter` walks the input. So `12345678` yields the
//! ascending runs `1234` and `5678`, never the overlapping `2345`.

use crate::core::{Candidate, PatternKind, PatternMatch, ScoredCandidate, ScoringPolicy};
use std::collections::HashSet;

const REPEATED_WEIGHT: u32 = 10;
const SEQUENTIAL_WEIGHT: u32 = 8;
const DOUBLE_WEIGHT: u32 = 6;
const PALINDROME_POINTS: u32 = 15;

const SEQUENCE_LEN: usize = 4;

pub fn classify(candidate: &Candidate, policy: ScoringPolicy) -> ScoredCandidate {
    let matches = find_patterns(candidate);

    let score = match policy {
        ScoringPolicy::Weighted => matches.iter().map(|m| m.points).sum(),
        ScoringPolicy::Boolean => matches
            .iter()
            .map(|m| m.kind)
            .collect::<HashSet<_>>()
            .len() as u32,
    };

    ScoredCandidate {
        candidate: candidate.clone(),
        score,
        matches,
    }
}

/// Every occurrence of every pattern kind, grouped by kind.
pub fn find_patterns(candidate: &Candidate) -> Vec<PatternMatch> {
    let digits = candidate.as_str();
    let mut matches = Vec::new();

    for kind in PatternKind::ALL {
        scan(digits, kind, &mut matches);
    }

    matches
}

fn scan(digits: &str, kind: PatternKind, out: &mut Vec<PatternMatch>) {
    let bytes = digits.as_bytes();
    let mut start = 0;

    while start < bytes.len() {
        match probe(kind, &bytes[start..]) {
            Some(len) => {
                out.push(PatternMatch {
                    kind,
                    matched: digits[start..start + len].to_string(),
                    points: points(kind, len),
                });
                start += len;
            }
            None => start += 1,
        }
    }
}

/// Length of the `kind` match anchored at the head of `rest`, if any.
fn probe(kind: PatternKind, rest: &[u8]) -> Option<usize> {
    match kind {
        PatternKind::Repeated => {
            let first = *rest.first()?;
            let run = rest.iter().take_while(|&&b| b == first).count();
            (run >= 3).then_some(run)
        }
        PatternKind::SequentialUp => {
            let window = rest.get(..SEQUENCE_LEN)?;
            window
                .windows(2)
                .all(|pair| pair[1] == pair[0] + 1)
                .then_some(SEQUENCE_LEN)
        }
        PatternKind::SequentialDown => {
            let window = rest.get(..SEQUENCE_LEN)?;
            window
                .windows(2)
                .all(|pair| pair[1] + 1 == pair[0])
                .then_some(SEQUENCE_LEN)
        }
        PatternKind::DoublePattern => {
            let group = rest.get(..2)?;
            let repeats = rest[2..]
                .chunks_exact(2)
                .take_while(|chunk| *chunk == group)
                .count();
            (repeats >= 1).then_some(2 * (repeats + 1))
        }
        PatternKind::Palindrome => {
            let window = rest.get(..4)?;
            (window[0] == window[3] && window[1] == window[2]).then_some(4)
        }
    }
}

fn points(kind: PatternKind, len: usize) -> u32 {
    let len = len as u32;
    match kind {
        PatternKind::Repeated => REPEATED_WEIGHT * len,
        PatternKind::SequentialUp | PatternKind::SequentialDown => SEQUENTIAL_WEIGHT * len,
        PatternKind::DoublePattern => DOUBLE_WEIGHT * len,
        PatternKind::Palindrome => PALINDROME_POINTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(s: &str) -> Candidate {
        Candidate::parse(s).unwrap()
    }

    fn matched(scored: &ScoredCandidate, kind: PatternKind) -> Vec<&str> {
        scored
            .matches
            .iter()
            .filter(|m| m.kind == kind)
            .map(|m| m.matched.as_str())
            .collect()
    }

    #[test]
    fn test_two_independent_repeated_runs() {
        let scored = classify(&candidate("11122233"), ScoringPolicy::Weighted);
        assert_eq!(matched(&scored, PatternKind::Repeated), vec!["111", "222"]);
        assert_eq!(scored.score, 60);
        assert_eq!(scored.matches.len(), 2);
    }

    #[test]
    fn test_sequential_up_is_non_overlapping() {
        let scored = classify(&candidate("12345678"), ScoringPolicy::Weighted);
        assert_eq!(matched(&scored, PatternKind::SequentialUp), vec!["1234", "5678"]);
        assert_eq!(scored.score, 64);
    }

    #[test]
    fn test_sequential_down() {
        let scored = classify(&candidate("98765432"), ScoringPolicy::Weighted);
        assert_eq!(matched(&scored, PatternKind::SequentialDown), vec!["9876", "5432"]);
        assert!(matched(&scored, PatternKind::SequentialUp).is_empty());
        assert_eq!(scored.score, 64);
    }

    #[test]
    fn test_sequences_do_not_wrap_around() {
        let scored = classify(&candidate("78901890"), ScoringPolicy::Weighted);
        assert!(matched(&scored, PatternKind::SequentialUp).is_empty());
        assert!(matched(&scored, PatternKind::SequentialDown).is_empty());
    }

    #[test]
    fn test_no_pattern_scores_zero() {
        let weighted = classify(&candidate("91827364"), ScoringPolicy::Weighted);
        assert_eq!(weighted.score, 0);
        assert!(weighted.matches.is_empty());
        assert!(!weighted.is_fancy());

        let boolean = classify(&candidate("91827364"), ScoringPolicy::Boolean);
        assert_eq!(boolean.score, 0);
    }

    #[test]
    fn test_palindrome_without_double_pattern() {
        let scored = classify(&candidate("12211221"), ScoringPolicy::Weighted);
        assert_eq!(matched(&scored, PatternKind::Palindrome), vec!["1221", "1221"]);
        assert!(matched(&scored, PatternKind::DoublePattern).is_empty());
        assert_eq!(scored.score, 30);
    }

    #[test]
    fn test_double_pattern_takes_whole_repetition() {
        let scored = classify(&candidate("50121212"), ScoringPolicy::Weighted);
        assert_eq!(matched(&scored, PatternKind::DoublePattern), vec!["121212"]);
        // alternating digits never form an abba window
        assert!(matched(&scored, PatternKind::Palindrome).is_empty());
        assert_eq!(scored.score, 36);
    }

    #[test]
    fn test_all_nines_hits_three_kinds() {
        let scored = classify(&candidate("99999999"), ScoringPolicy::Weighted);
        assert_eq!(matched(&scored, PatternKind::Repeated), vec!["99999999"]);
        assert_eq!(matched(&scored, PatternKind::DoublePattern), vec!["99999999"]);
        assert_eq!(matched(&scored, PatternKind::Palindrome), vec!["9999", "9999"]);
        assert_eq!(scored.score, 80 + 48 + 30);
    }

    #[test]
    fn test_boolean_counts_distinct_kinds() {
        let scored = classify(&candidate("11122233"), ScoringPolicy::Boolean);
        assert_eq!(scored.score, 1);

        let scored = classify(&candidate("99999999"), ScoringPolicy::Boolean);
        assert_eq!(scored.score, 3);

        let scored = classify(&candidate("123400043210"), ScoringPolicy::Boolean);
        assert_eq!(matched(&scored, PatternKind::SequentialUp), vec!["1234"]);
        // 4321 consumes the 1 that 3210 would need
        assert_eq!(matched(&scored, PatternKind::SequentialDown), vec!["4321"]);
        assert_eq!(matched(&scored, PatternKind::Repeated), vec!["000"]);
        assert_eq!(scored.score, 3);
    }

    #[test]
    fn test_match_points_follow_weights() {
        let scored = classify(&candidate("44441234"), ScoringPolicy::Weighted);
        let repeated = scored
            .matches
            .iter()
            .find(|m| m.kind == PatternKind::Repeated)
            .unwrap();
        assert_eq!(repeated.points, 40);
        let up = scored
            .matches
            .iter()
            .find(|m| m.kind == PatternKind::SequentialUp)
            .unwrap();
        assert_eq!(up.points, 32);
    }
}
