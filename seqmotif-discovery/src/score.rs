//! Heuristic pattern scoring and ranking.
//!
//! `score = Σgaps + lowercase·n + uppercase·n²`, where `n` is the original
//! sequence length and a ranged gap `x(i,j)` contributes `max(i, j)`. Anchors
//! dominate spacers for any `n` at least the sequence length, which is what
//! pushes anchor-rich patterns to the top; the constants beyond that shape
//! are heuristic.

/// A pattern with its heuristic score.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredPattern {
    pub pattern: String,
    pub score: usize,
}

fn gap_contribution(token: &str) -> usize {
    let inner = &token[2..token.len() - 1];
    match inner.split_once(',') {
        Some((lo, hi)) => {
            let lo = lo.parse::<usize>().unwrap_or(0);
            let hi = hi.parse::<usize>().unwrap_or(0);
            lo.max(hi)
        }
        None => inner.parse::<usize>().unwrap_or(0),
    }
}

fn score_single(pattern: &str, n: usize) -> usize {
    let mut gap_sum = 0usize;
    let mut lower = 0usize;
    let mut upper = 0usize;

    for token in pattern.split('-') {
        if token.starts_with("x(") && token.ends_with(')') {
            gap_sum += gap_contribution(token);
        } else if token.len() == 1 {
            let c = token.as_bytes()[0];
            if c.is_ascii_uppercase() {
                upper += 1;
            } else if c.is_ascii_lowercase() {
                lower += 1;
            }
        }
    }
    gap_sum + lower * n + upper * n * n
}

/// Score each pattern against original-sequence length `n`.
pub fn score_patterns(patterns: &[String], n: usize) -> Vec<ScoredPattern> {
    patterns
        .iter()
        .map(|p| ScoredPattern {
            pattern: p.clone(),
            score: score_single(p, n),
        })
        .collect()
}

/// Score and sort, best first; ties break lexicographically.
pub fn rank_patterns(patterns: &[String], n: usize) -> Vec<ScoredPattern> {
    let mut scored = score_patterns(patterns, n);
    scored.sort_by(|x, y| {
        y.score
            .cmp(&x.score)
            .then_with(|| x.pattern.cmp(&y.pattern))
    });
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_dominate_gaps() {
        let n = 10;
        assert_eq!(score_single("A-x(3)-B", n), 3 + 2 * n * n);
        assert!(score_single("A-B-C", n) > score_single("A-x(9)-B", n));
    }

    #[test]
    fn ranged_gap_contributes_its_max() {
        assert_eq!(score_single("A-x(2,7)-B", 1), 7 + 2);
    }

    #[test]
    fn lowercase_letters_score_linearly() {
        let n = 5;
        assert_eq!(score_single("A-b-C", n), n + 2 * n * n);
    }

    #[test]
    fn ranking_is_descending_and_tie_stable() {
        let patterns: Vec<String> = ["A-x(2)-B", "A-B-C", "B-x(2)-A"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let ranked = rank_patterns(&patterns, 10);
        assert_eq!(ranked[0].pattern, "A-B-C");
        assert_eq!(ranked[1].pattern, "A-x(2)-B");
        assert_eq!(ranked[2].pattern, "B-x(2)-A");
        assert_eq!(ranked[1].score, ranked[2].score);
    }
}
