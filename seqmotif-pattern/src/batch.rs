//! Batch pairwise motif comparison over a sequence collection.
//!
//! Each unordered pair of input sequences is an independent job: project the
//! anchors, enumerate every LCS, compute both sequences' achievable gap sets
//! per candidate, union and render. Jobs are dispatched across the rayon
//! pool; the report vector is indexed by submission order, so the output is
//! identical no matter how worker completions interleave.

use std::collections::BTreeMap;

use rayon::prelude::*;
use seqmotif_core::{Result, SeqmotifError};

use crate::aggregate::{format_pattern_with_values, pair_union_sets, GapValues};
use crate::consolidate::PatternStat;
use crate::gaps::all_gap_values;
use crate::lcs::{all_lcs, lcs_table};
use crate::projection::anchors_only;

/// One candidate pattern of a pairwise comparison, with its merged gap sets
/// and rendered notation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternReport {
    /// Anchor skeleton, e.g. `"BABA"`.
    pub pattern: String,
    /// Union of both sequences' achievable gap sets, one per adjacent pair.
    pub gap_values: Vec<GapValues>,
    /// Rendered notation, e.g. `"B-x(2|11)-A-x(2|3|11)-B-x(3|6|14)-A"`.
    pub formatted: String,
}

/// Comparison result for one sequence pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairwiseReport {
    /// Index of the first sequence in the input collection.
    pub seq_x: usize,
    /// Index of the second sequence in the input collection.
    pub seq_y: usize,
    /// Candidate patterns, longest first, ties lexicographic.
    pub patterns: Vec<PatternReport>,
}

/// Compare one sequence pair: every LCS of the anchor projections, with the
/// union of achievable gap sets across both sequences.
///
/// Candidates whose gap analysis fails on either sequence are skipped (a
/// genuine LCS of the projections always embeds, so this is defensive).
pub fn compare_pair(seq_x: &[u8], seq_y: &[u8]) -> Vec<PatternReport> {
    let upper_x = anchors_only(seq_x);
    let upper_y = anchors_only(seq_y);
    if upper_x.is_empty() || upper_y.is_empty() {
        return Vec::new();
    }

    let table = lcs_table(&upper_x, &upper_y);
    if table.lcs_len() == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<Vec<u8>> = all_lcs(&upper_x, &upper_y, &table)
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
    candidates.sort_by(|x, y| y.len().cmp(&x.len()).then_with(|| x.cmp(y)));

    let mut reports = Vec::with_capacity(candidates.len());
    for pattern in candidates {
        let Some(sets_x) = all_gap_values(seq_x, &pattern) else {
            continue;
        };
        let Some(sets_y) = all_gap_values(seq_y, &pattern) else {
            continue;
        };
        let merged = pair_union_sets(&sets_x, &sets_y);
        let formatted = format_pattern_with_values(&pattern, &merged);
        reports.push(PatternReport {
            pattern: pattern.iter().map(|&b| b as char).collect(),
            gap_values: merged,
            formatted,
        });
    }
    reports
}

/// Compare every unordered pair of `seqs` in parallel.
///
/// Reports come back ordered by `(seq_x, seq_y)` submission order regardless
/// of which worker finished first.
///
/// # Errors
///
/// Returns [`SeqmotifError::InvalidInput`] with fewer than two sequences.
pub fn compare_all_pairs(seqs: &[&[u8]]) -> Result<Vec<PairwiseReport>> {
    if seqs.len() < 2 {
        return Err(SeqmotifError::InvalidInput(
            "at least two sequences are required".into(),
        ));
    }

    let mut jobs = Vec::with_capacity(seqs.len() * (seqs.len() - 1) / 2);
    for i in 0..seqs.len() {
        for j in i + 1..seqs.len() {
            jobs.push((i, j));
        }
    }

    Ok(jobs
        .par_iter()
        .map(|&(i, j)| PairwiseReport {
            seq_x: i,
            seq_y: j,
            patterns: compare_pair(seqs[i], seqs[j]),
        })
        .collect())
}

/// Accumulate per-pattern support statistics across pairwise reports, keyed
/// by rendered notation. Feed the result to
/// [`crate::consolidate::consolidate`].
pub fn collect_pattern_stats(reports: &[PairwiseReport]) -> BTreeMap<String, PatternStat> {
    let mut stats: BTreeMap<String, PatternStat> = BTreeMap::new();
    for report in reports {
        for pattern in &report.patterns {
            let entry = stats
                .entry(pattern.formatted.clone())
                .or_insert_with(|| PatternStat {
                    pattern: pattern.formatted.clone(),
                    anchor_count: pattern.pattern.len(),
                    sequence_indices: Default::default(),
                });
            entry.sequence_indices.insert(report.seq_x);
            entry.sequence_indices.insert(report.seq_y);
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ1: &[u8] = b"DxxBxxxxDxxCxxxAxxBxxxA";
    const SEQ2: &[u8] = b"BxxAxxxBxxCxxxxBxxDxxxAxxBxxxxB";

    #[test]
    fn reference_pair_comparison() {
        let reports = compare_pair(SEQ1, SEQ2);
        let got: Vec<(&str, &str)> = reports
            .iter()
            .map(|r| (r.pattern.as_str(), r.formatted.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("BABA", "B-x(2|11)-A-x(2|3|11)-B-x(3|6|14)-A"),
                ("BCAB", "B-x(2|7|9)-C-x(3|11)-A-x(2|7)-B"),
                ("BCBA", "B-x(2|7|9)-C-x(4|6)-B-x(3|6)-A"),
                ("BDAB", "B-x(2|4|10|17)-D-x(3|6)-A-x(2|7)-B"),
            ]
        );
    }

    #[test]
    fn adjacent_anchors_render_without_spacer_tokens() {
        let reports = compare_pair(b"AB", b"AB");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].pattern, "AB");
        assert_eq!(reports[0].formatted, "A-B");
    }

    #[test]
    fn single_common_anchor() {
        let reports = compare_pair(b"AB", b"CA");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].formatted, "A");
    }

    #[test]
    fn disjoint_alphabets_yield_no_patterns() {
        assert!(compare_pair(b"AB", b"CD").is_empty());
    }

    #[test]
    fn anchorless_input_yields_no_patterns() {
        assert!(compare_pair(b"xxx", b"AB").is_empty());
    }

    #[test]
    fn all_pairs_preserve_submission_order() {
        let seqs: Vec<&[u8]> = vec![b"AxB", b"AxxB", b"AB", b"ACB"];
        let reports = compare_all_pairs(&seqs).unwrap();
        let order: Vec<(usize, usize)> = reports.iter().map(|r| (r.seq_x, r.seq_y)).collect();
        assert_eq!(
            order,
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn all_pairs_match_individual_comparisons() {
        let seqs: Vec<&[u8]> = vec![SEQ1, SEQ2, b"AxB"];
        let reports = compare_all_pairs(&seqs).unwrap();
        for report in &reports {
            assert_eq!(
                report.patterns,
                compare_pair(seqs[report.seq_x], seqs[report.seq_y])
            );
        }
    }

    #[test]
    fn fewer_than_two_sequences_is_invalid() {
        assert!(compare_all_pairs(&[]).is_err());
        assert!(compare_all_pairs(&[b"AxB" as &[u8]]).is_err());
    }

    #[test]
    fn stats_union_supporting_sequences() {
        let seqs: Vec<&[u8]> = vec![b"AxB", b"AxB", b"AxB"];
        let reports = compare_all_pairs(&seqs).unwrap();
        let stats = collect_pattern_stats(&reports);
        let stat = &stats["A-x(1)-B"];
        assert_eq!(stat.anchor_count, 2);
        assert_eq!(
            stat.sequence_indices,
            [0usize, 1, 2].into_iter().collect()
        );
    }

    #[test]
    fn stats_feed_consolidation() {
        use crate::consolidate::consolidate;

        let seqs: Vec<&[u8]> = vec![b"AxB", b"AxxB", b"AxxxB"];
        let reports = compare_all_pairs(&seqs).unwrap();
        let stats = collect_pattern_stats(&reports);
        let consolidated = consolidate(&stats).unwrap();
        // The observed per-pair variants pool into one contiguous run.
        assert!(consolidated.contains_key("A-x(1,3)-B"));
    }
}
