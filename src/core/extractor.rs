use crate::core::Candidate;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// 以最長連續數字為單位比對，前後不會再緊接數字
static NUMBER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?[0-9]+").expect("number run pattern is valid"));

/// Distinct 8-15 digit runs in order of first appearance, `+` stripped.
///
/// Runs are maximal: a 16+ digit run is skipped rather than truncated, and
/// `0123456789` and `123456789` stay distinct.
pub fn extract(text: &str) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for found in NUMBER_RUN.find_iter(text) {
        let digits = found.as_str();
        let digits = digits.strip_prefix('+').unwrap_or(digits);

        if let Some(candidate) = Candidate::parse(digits) {
            if seen.insert(candidate.clone()) {
                candidates.push(candidate);
            }
        }
    }

    tracing::debug!("Extracted {} distinct candidates", candidates.len());
    candidates
}
