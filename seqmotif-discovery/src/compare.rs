//! Pattern extraction by comparing two collapsed-subsequence sets.
//!
//! A candidate pattern arises two ways: a collapsed form present in both
//! sets verbatim (fixed gaps, rendered `x(n)`), or two forms with the same
//! letter skeleton but different spacer counts (per-slot ranges, rendered
//! `x(min,max)`).

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::normalize::{normalize_tokens, parse_collapsed, strip_digits, Token};

/// Render an exactly-shared collapsed form; zero gaps are omitted.
fn format_identical(seq: &str) -> Option<String> {
    let tokens = normalize_tokens(&parse_collapsed(seq))?;
    let mut parts: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token {
            Token::Gap(n) if n > 0 => parts.push(format!("x({})", n)),
            Token::Gap(_) => {}
            Token::Letter(c) => parts.push((c as char).to_string()),
        }
    }
    Some(parts.join("-"))
}

/// Render two same-skeleton forms as one pattern with per-slot gap ranges.
fn format_variant(s1: &str, s2: &str) -> Option<String> {
    let t1 = normalize_tokens(&parse_collapsed(s1))?;
    let t2 = normalize_tokens(&parse_collapsed(s2))?;
    if t1.len() != t2.len() {
        return None;
    }

    let mut parts: Vec<String> = Vec::with_capacity(t1.len());
    for (a, b) in t1.iter().zip(&t2) {
        match (a, b) {
            (Token::Letter(x), Token::Letter(y)) if x == y => {
                parts.push((*x as char).to_string());
            }
            (Token::Gap(x), Token::Gap(y)) => {
                let (lo, hi) = (*x.min(y), *x.max(y));
                let mut token = String::new();
                if lo == hi {
                    let _ = write!(token, "x({})", lo);
                } else {
                    let _ = write!(token, "x({},{})", lo, hi);
                }
                parts.push(token);
            }
            _ => return None,
        }
    }
    Some(parts.join("-"))
}

/// Unique patterns shared between two collapsed-subsequence sets.
///
/// Output is deduplicated and deterministically ordered.
pub fn compare_subsequences(a: &[String], b: &[String]) -> Vec<String> {
    let set_b: BTreeSet<&str> = b.iter().map(String::as_str).collect();

    let mut seen_inputs: BTreeSet<&str> = BTreeSet::new();
    let mut patterns: BTreeSet<String> = BTreeSet::new();

    for s1 in a {
        if !seen_inputs.insert(s1) {
            continue;
        }
        if set_b.contains(s1.as_str()) {
            if let Some(pattern) = format_identical(s1) {
                patterns.insert(pattern);
            }
        } else {
            let skeleton = strip_digits(s1);
            for s2 in &set_b {
                if skeleton == strip_digits(s2) {
                    if let Some(pattern) = format_variant(s1, s2) {
                        patterns.insert(pattern);
                    }
                }
            }
        }
    }

    patterns.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_forms_render_fixed_gaps() {
        assert_eq!(format_identical("A2B"), Some("A-x(2)-B".into()));
        assert_eq!(format_identical("AB"), Some("A-B".into()));
        assert_eq!(format_identical("2A"), Some("A".into()));
    }

    #[test]
    fn variants_render_gap_ranges() {
        assert_eq!(format_variant("A2B", "A5B"), Some("A-x(2,5)-B".into()));
        assert_eq!(format_variant("A3B", "A3B"), Some("A-x(3)-B".into()));
        assert_eq!(format_variant("A2B", "A2C"), None);
    }

    #[test]
    fn compare_finds_shared_and_ranged_patterns() {
        let a = strings(&["A2B", "AB", "A7C"]);
        let b = strings(&["A2B", "A4C"]);
        let got = compare_subsequences(&a, &b);
        assert!(got.contains(&"A-x(2)-B".to_string()));
        assert!(got.contains(&"A-x(4,7)-C".to_string()));
        assert!(!got.iter().any(|p| p.contains('B') && p.contains('C')));
    }

    #[test]
    fn compare_deduplicates() {
        let a = strings(&["A1B", "A1B"]);
        let b = strings(&["A1B"]);
        assert_eq!(compare_subsequences(&a, &b), vec!["A-x(1)-B".to_string()]);
    }

    #[test]
    fn disjoint_sets_share_nothing() {
        let a = strings(&["A2B"]);
        let b = strings(&["C2D"]);
        assert!(compare_subsequences(&a, &b).is_empty());
    }
}
