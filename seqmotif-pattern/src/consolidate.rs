//! Consolidation of structurally equivalent observed patterns.
//!
//! Pairwise comparisons across a sequence set produce many observed patterns
//! that differ only in their specific gap values — `A-x(2)-B` here,
//! `A-x(3)-B` there. Consolidation groups observations that share both the
//! anchor skeleton and the *positions* that carry a gap token, pools the gap
//! values seen per position, and re-renders each position's values as maximal
//! runs of consecutive integers. A position may pool into several disjoint
//! runs, in which case one consolidated pattern is emitted per combination of
//! one run per position (Cartesian product), each carrying the union of the
//! group's supporting sequences.
//!
//! Observations with different skeletons, or the same skeleton but different
//! gap positions, are never merged. Consolidating an already-consolidated map
//! returns it unchanged.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use seqmotif_core::Result;

use crate::notation::parse_notation;

/// Support statistics for one observed (or consolidated) pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternStat {
    /// The rendered pattern notation.
    pub pattern: String,
    /// Number of anchors in the pattern.
    pub anchor_count: usize,
    /// Indices of the input sequences supporting the pattern.
    pub sequence_indices: BTreeSet<usize>,
}

struct Group {
    /// Pooled values per gap slot; `None` for slots with no gap token.
    value_sets: Vec<Option<BTreeSet<usize>>>,
    support: BTreeSet<usize>,
}

/// Split an ascending set into maximal runs of consecutive integers.
fn consecutive_runs(values: &BTreeSet<usize>) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for &v in values {
        match runs.last_mut() {
            Some((_, hi)) if v == *hi + 1 => *hi = v,
            _ => runs.push((v, v)),
        }
    }
    runs
}

fn run_token(lo: usize, hi: usize) -> String {
    if lo == hi {
        format!("x({})", lo)
    } else {
        format!("x({},{})", lo, hi)
    }
}

/// Advance a mixed-radix counter (rightmost digit fastest); `false` once the
/// counter wraps around.
fn advance(choice: &mut [usize], radix: &[usize]) -> bool {
    for i in (0..choice.len()).rev() {
        choice[i] += 1;
        if choice[i] < radix[i] {
            return true;
        }
        choice[i] = 0;
    }
    false
}

/// Merge structurally equivalent patterns into range-consolidated ones.
///
/// # Errors
///
/// Returns [`seqmotif_core::SeqmotifError::Parse`] if any key is not
/// well-formed pattern notation.
pub fn consolidate(stats: &BTreeMap<String, PatternStat>) -> Result<BTreeMap<String, PatternStat>> {
    let mut groups: BTreeMap<(String, Vec<bool>), Group> = BTreeMap::new();

    for stat in stats.values() {
        let parsed = parse_notation(&stat.pattern)?;
        let flags: Vec<bool> = parsed.gaps.iter().map(Option::is_some).collect();
        let group = groups
            .entry((parsed.skeleton.clone(), flags))
            .or_insert_with(|| Group {
                value_sets: parsed
                    .gaps
                    .iter()
                    .map(|g| g.as_ref().map(|_| BTreeSet::new()))
                    .collect(),
                support: BTreeSet::new(),
            });
        for (slot, values) in group.value_sets.iter_mut().zip(&parsed.gaps) {
            if let (Some(pool), Some(values)) = (slot, values) {
                pool.extend(values.iter().copied());
            }
        }
        group.support.extend(stat.sequence_indices.iter().copied());
    }

    let mut out = BTreeMap::new();
    for ((skeleton, _), group) in groups {
        let runs: Vec<Option<Vec<(usize, usize)>>> = group
            .value_sets
            .iter()
            .map(|slot| slot.as_ref().map(consecutive_runs))
            .collect();

        // One consolidated pattern per combination of one run per gap slot.
        let radix: Vec<usize> = runs
            .iter()
            .filter_map(|r| r.as_ref().map(Vec::len))
            .collect();
        let mut choice = vec![0usize; radix.len()];
        loop {
            let mut rendered = String::new();
            let mut gap_slot = 0usize;
            for (i, ch) in skeleton.chars().enumerate() {
                rendered.push(ch);
                if i + 1 < skeleton.len() {
                    match &runs[i] {
                        Some(slot_runs) => {
                            let (lo, hi) = slot_runs[choice[gap_slot]];
                            gap_slot += 1;
                            let _ = write!(rendered, "-{}-", run_token(lo, hi));
                        }
                        None => rendered.push('-'),
                    }
                }
            }
            out.insert(
                rendered.clone(),
                PatternStat {
                    pattern: rendered,
                    anchor_count: skeleton.len(),
                    sequence_indices: group.support.clone(),
                },
            );
            if !advance(&mut choice, &radix) {
                break;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(pattern: &str, seqs: &[usize]) -> (String, PatternStat) {
        (
            pattern.to_string(),
            PatternStat {
                pattern: pattern.to_string(),
                anchor_count: pattern.bytes().filter(u8::is_ascii_uppercase).count(),
                sequence_indices: seqs.iter().copied().collect(),
            },
        )
    }

    fn stats(entries: &[(&str, &[usize])]) -> BTreeMap<String, PatternStat> {
        entries.iter().map(|&(p, s)| stat(p, s)).collect()
    }

    #[test]
    fn merges_adjacent_values_into_a_run() {
        let input = stats(&[("A-x(2)-B", &[1, 2]), ("A-x(3)-B", &[3])]);
        let out = consolidate(&input).unwrap();
        assert_eq!(out.len(), 1);
        let merged = &out["A-x(2,3)-B"];
        assert_eq!(merged.anchor_count, 2);
        assert_eq!(merged.sequence_indices, BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn disjoint_values_stay_separate_patterns_with_shared_support() {
        let input = stats(&[("A-x(2)-B", &[1]), ("A-x(7)-B", &[2])]);
        let out = consolidate(&input).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out["A-x(2)-B"].sequence_indices, BTreeSet::from([1, 2]));
        assert_eq!(out["A-x(7)-B"].sequence_indices, BTreeSet::from([1, 2]));
    }

    #[test]
    fn cartesian_product_across_slots() {
        let input = stats(&[
            ("A-x(1)-B-x(10)-C", &[1]),
            ("A-x(2)-B-x(20)-C", &[2]),
        ]);
        let out = consolidate(&input).unwrap();
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["A-x(1,2)-B-x(10)-C", "A-x(1,2)-B-x(20)-C"]
        );
        for stat in out.values() {
            assert_eq!(stat.sequence_indices, BTreeSet::from([1, 2]));
        }
    }

    #[test]
    fn different_skeletons_never_merge() {
        let input = stats(&[("A-x(2)-B", &[1]), ("A-x(2)-C", &[2])]);
        let out = consolidate(&input).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out["A-x(2)-B"].sequence_indices, BTreeSet::from([1]));
        assert_eq!(out["A-x(2)-C"].sequence_indices, BTreeSet::from([2]));
    }

    #[test]
    fn different_gap_positions_never_merge() {
        let input = stats(&[("A-B", &[1]), ("A-x(2)-B", &[2])]);
        let out = consolidate(&input).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out["A-B"].sequence_indices, BTreeSet::from([1]));
    }

    #[test]
    fn expands_observed_ranges_before_merging() {
        // x(2,4) pools as {2,3,4}; together with x(5) it forms one run.
        let input = stats(&[("A-x(2,4)-B", &[1]), ("A-x(5)-B", &[2])]);
        let out = consolidate(&input).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out.contains_key("A-x(2,5)-B"));
    }

    #[test]
    fn consolidation_is_idempotent() {
        let input = stats(&[
            ("B-x(2)-A-x(3)-B", &[1, 2]),
            ("B-x(3)-A-x(3)-B", &[2, 3]),
            ("B-x(9)-A-x(3)-B", &[4]),
            ("A-B", &[1]),
        ]);
        let once = consolidate(&input).unwrap();
        let twice = consolidate(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn malformed_key_is_a_parse_error() {
        let input = stats(&[("A-x(-B", &[1])]);
        assert!(consolidate(&input).is_err());
    }

    #[test]
    fn empty_input_consolidates_to_empty() {
        let out = consolidate(&BTreeMap::new()).unwrap();
        assert!(out.is_empty());
    }
}
