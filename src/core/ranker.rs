use crate::core::classifier::classify;
use crate::core::{Candidate, RankedSplit, ScoredCandidate, ScoringPolicy};

/// Fancy candidates by descending score.
///
/// Zero-score candidates are dropped. Equal scores keep input order.
pub fn rank(candidates: &[Candidate], policy: ScoringPolicy) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|candidate| classify(candidate, policy))
        .filter(ScoredCandidate::is_fancy)
        .collect();

    // sort_by 為穩定排序，同分保持原順序
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Splits the ranked list at `n`; `n` past the end leaves the remainder empty.
pub fn top(mut ranked: Vec<ScoredCandidate>, n: usize) -> RankedSplit {
    let at = n.min(ranked.len());
    let remainder = ranked.split_off(at);
    RankedSplit {
        selected: ranked,
        remainder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(values: &[&str]) -> Vec<Candidate> {
        values.iter().map(|v| Candidate::parse(v).unwrap()).collect()
    }

    fn numbers(scored: &[ScoredCandidate]) -> Vec<&str> {
        scored.iter().map(|s| s.candidate.as_str()).collect()
    }

    #[test]
    fn test_rank_orders_by_score_and_keeps_ties_stable() {
        let ranked = rank(
            &candidates(&["11112222", "12345678", "99999999"]),
            ScoringPolicy::Weighted,
        );

        assert_eq!(numbers(&ranked), vec!["11112222", "99999999", "12345678"]);
        assert_eq!(ranked[0].score, 158);
        assert_eq!(ranked[1].score, 158);
        assert_eq!(ranked[2].score, 64);
    }

    #[test]
    fn test_rank_tie_order_follows_input() {
        let ranked = rank(
            &candidates(&["99999999", "11112222"]),
            ScoringPolicy::Weighted,
        );
        assert_eq!(numbers(&ranked), vec!["99999999", "11112222"]);
    }

    #[test]
    fn test_rank_drops_zero_scores() {
        let ranked = rank(
            &candidates(&["91827364", "11122233", "13572468"]),
            ScoringPolicy::Weighted,
        );
        assert_eq!(numbers(&ranked), vec!["11122233"]);
        assert!(ranked.iter().all(|s| s.score > 0));
    }

    #[test]
    fn test_rank_is_non_increasing() {
        let input = candidates(&[
            "14155550132",
            "98765432",
            "12121212",
            "70000007",
            "91827364",
            "4915112345678",
            "55512345",
        ]);
        for policy in [ScoringPolicy::Weighted, ScoringPolicy::Boolean] {
            let ranked = rank(&input, policy);
            assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
        }
    }

    #[test]
    fn test_rank_empty_input() {
        assert!(rank(&[], ScoringPolicy::Weighted).is_empty());
    }

    #[test]
    fn test_top_split_reconstructs_ranking() {
        let ranked = rank(
            &candidates(&["11112222", "12345678", "99999999", "70000007"]),
            ScoringPolicy::Weighted,
        );

        for n in 0..=ranked.len() + 2 {
            let split = top(ranked.clone(), n);
            assert_eq!(split.selected.len(), n.min(ranked.len()));

            let mut rejoined = split.selected.clone();
            rejoined.extend(split.remainder.clone());
            assert_eq!(rejoined, ranked);
        }
    }

    #[test]
    fn test_top_beyond_length_has_empty_remainder() {
        let ranked = rank(&candidates(&["11122233"]), ScoringPolicy::Weighted);
        let split = top(ranked, usize::MAX);
        assert_eq!(split.selected.len(), 1);
        assert!(split.remainder.is_empty());
    }
}
