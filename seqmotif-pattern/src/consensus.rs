//! Progressive consensus search over many sequences.
//!
//! Scales the pairwise machinery to N inputs the cheap way: project every
//! sequence to its anchors, fold a single deterministic LCS across the
//! projections in ascending-length order, then aggregate the consensus
//! pattern's spacer statistics over every input. The richer K-best beam
//! search built on top of this lives in [`crate::topk`].

use seqmotif_core::{Result, SeqmotifError};

use crate::projection::AnchorProjection;
use crate::types::{AggregatedPattern, GapRange};

/// Suffix LCS-length table: `dp[i][j]` is the LCS length of `a[i..]` and
/// `b[j..]`, flattened row-major over `(|a|+1) x (|b|+1)`.
pub(crate) fn suffix_table(a: &[u8], b: &[u8]) -> Vec<u32> {
    let rows = a.len() + 1;
    let cols = b.len() + 1;
    let mut dp = vec![0u32; rows * cols];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            dp[i * cols + j] = if a[i] == b[j] {
                dp[(i + 1) * cols + j + 1] + 1
            } else {
                dp[(i + 1) * cols + j].max(dp[i * cols + j + 1])
            };
        }
    }
    dp
}

/// One deterministic LCS of `a` and `b`.
///
/// Ties in the traceback prefer advancing in `a`, so equal inputs always
/// produce the same string.
pub fn lcs_classic(a: &[u8], b: &[u8]) -> Vec<u8> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let cols = b.len() + 1;
    let dp = suffix_table(a, b);

    let mut out = Vec::with_capacity(dp[0] as usize);
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            out.push(a[i]);
            i += 1;
            j += 1;
        } else if dp[(i + 1) * cols + j] >= dp[i * cols + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// Fold [`lcs_classic`] over anchor sequences in ascending-length order.
///
/// Starting from the shortest keeps the working consensus small; the fold
/// stops early once it collapses to empty.
pub fn progressive_lcs(uppers: &[&[u8]]) -> Vec<u8> {
    if uppers.is_empty() {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..uppers.len()).collect();
    order.sort_by_key(|&i| uppers[i].len());

    let mut consensus = uppers[order[0]].to_vec();
    for &i in &order[1..] {
        consensus = lcs_classic(&consensus, uppers[i]);
        if consensus.is_empty() {
            break;
        }
    }
    consensus
}

/// Match positions of `pattern` in `s`: greedy left-to-right, then each match
/// (except the last) pushed to the rightmost same-symbol occurrence before
/// its successor. `None` if the pattern is not a subsequence of `s`.
fn align_pattern_indices(pattern: &[u8], s: &[u8]) -> Option<Vec<usize>> {
    let mut matches = Vec::with_capacity(pattern.len());
    let mut start = 0usize;
    for &ch in pattern {
        let offset = s[start..].iter().position(|&c| c == ch)?;
        matches.push(start + offset);
        start = start + offset + 1;
    }

    for i in 0..matches.len().saturating_sub(1) {
        let ch = pattern[i];
        let bound = matches[i + 1];
        if let Some(last) = s[matches[i] + 1..bound].iter().rposition(|&c| c == ch) {
            matches[i] = matches[i] + 1 + last;
        }
    }
    Some(matches)
}

/// Filler counts between consecutive matched anchors of `pattern` embedded in
/// one projected sequence.
fn gaps_for_pattern(pattern: &[u8], proj: &AnchorProjection) -> Option<Vec<usize>> {
    let indices = align_pattern_indices(pattern, &proj.original)?;
    if indices.len() <= 1 {
        return Some(Vec::new());
    }
    Some(
        indices
            .windows(2)
            .map(|w| proj.fillers_between(w[0], w[1]))
            .collect(),
    )
}

/// Aggregate `pattern`'s per-pair spacer statistics over every projection.
///
/// Returns `None` if any sequence does not support the pattern.
pub fn aggregate_over_sequences(
    pattern: &[u8],
    projs: &[AnchorProjection],
) -> Option<AggregatedPattern> {
    if projs.is_empty() {
        return None;
    }
    let mut all_gaps = Vec::with_capacity(projs.len());
    for proj in projs {
        all_gaps.push(gaps_for_pattern(pattern, proj)?);
    }

    let pairs = pattern.len().saturating_sub(1);
    let mut ranges = Vec::with_capacity(pairs);
    let mut averages = Vec::with_capacity(pairs);
    for pair in 0..pairs {
        let mut min = usize::MAX;
        let mut max = 0usize;
        let mut sum = 0usize;
        for gaps in &all_gaps {
            let v = gaps[pair];
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        ranges.push(GapRange { min, max });
        averages.push(sum as f64 / all_gaps.len() as f64);
    }

    let gap_score = ranges.iter().map(|r| r.min).sum();
    Some(AggregatedPattern {
        pattern: pattern.iter().map(|&b| b as char).collect(),
        gap_ranges: ranges,
        gap_averages: averages,
        anchor_score: pattern.len(),
        gap_score,
    })
}

/// Full consensus pipeline: project, fold the progressive LCS, aggregate.
///
/// `Ok(None)` when the inputs share no anchor subsequence.
///
/// # Errors
///
/// Returns [`SeqmotifError::InvalidInput`] when `seqs` is empty.
pub fn best_common_pattern(seqs: &[&[u8]]) -> Result<Option<AggregatedPattern>> {
    if seqs.is_empty() {
        return Err(SeqmotifError::InvalidInput(
            "at least one sequence is required".into(),
        ));
    }
    let projs: Vec<AnchorProjection> = seqs.iter().map(|s| AnchorProjection::new(s)).collect();
    let uppers: Vec<&[u8]> = projs.iter().map(|p| p.anchors.as_slice()).collect();

    let consensus = progressive_lcs(&uppers);
    if consensus.is_empty() {
        return Ok(None);
    }
    Ok(aggregate_over_sequences(&consensus, &projs))
}
