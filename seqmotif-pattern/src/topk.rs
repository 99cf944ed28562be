//! Top-K consensus patterns via beam search over K-best pairwise folds.
//!
//! The single progressive fold in [`crate::consensus`] commits to one LCS per
//! step and can miss good consensus patterns on unlucky fold orders. The
//! search here hedges three ways:
//!
//! 1. **Multiple fold orders** — the ascending-length order plus seeded
//!    random permutations of it (first element fixed).
//! 2. **A beam per order** — each fold step expands every beam entry with up
//!    to `per_pair_alt` K-best alternatives, then re-ranks and truncates.
//! 3. **Deletion expansion** — bounded rounds of single-symbol deletions keep
//!    candidates that remain common to every input, catching motifs shorter
//!    than the strict LCS.
//!
//! Survivors are aggregated and ranked by (anchor count desc, summed minimum
//! gaps desc, pattern asc).

use std::collections::BTreeSet;

use seqmotif_core::{Result, SeqmotifError};

use crate::consensus::aggregate_over_sequences;
use crate::kbest::lcs_k_best;
use crate::projection::AnchorProjection;
use crate::types::AggregatedPattern;

/// Tuning knobs for [`top_k_common_patterns`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopKOptions {
    /// Number of fold orders to explore (the sorted order plus `n - 1`
    /// random permutations).
    pub num_orders: usize,
    /// K-best alternatives generated per beam entry and fold step.
    pub per_pair_alt: usize,
    /// Beam width kept after each fold step.
    pub beam_width: usize,
    /// Rounds of single-symbol deletion expansion (0 disables).
    pub delete_depth: usize,
    /// PRNG seed for the permuted fold orders.
    pub seed: u64,
}

impl Default for TopKOptions {
    fn default() -> Self {
        TopKOptions {
            num_orders: 12,
            per_pair_alt: 3,
            beam_width: 20,
            delete_depth: 2,
            seed: 42,
        }
    }
}

// ---------------------------------------------------------------------------
// Private Xorshift64 PRNG
// ---------------------------------------------------------------------------

struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    fn new(seed: u64) -> Self {
        // Avoid the all-zero fixed point.
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

// ---------------------------------------------------------------------------
// Subsequence helpers
// ---------------------------------------------------------------------------

fn is_subsequence(pat: &[u8], s: &[u8]) -> bool {
    let mut it = s.iter();
    pat.iter().all(|&c| it.by_ref().any(|&x| x == c))
}

fn is_subsequence_of_all(pat: &[u8], uppers: &[&[u8]]) -> bool {
    uppers.iter().all(|u| is_subsequence(pat, u))
}

/// All strings obtained from `pat` by deleting exactly one symbol.
fn single_deletions(pat: &[u8]) -> Vec<Vec<u8>> {
    if pat.len() <= 1 {
        return Vec::new();
    }
    (0..pat.len())
        .map(|i| {
            let mut d = Vec::with_capacity(pat.len() - 1);
            d.extend_from_slice(&pat[..i]);
            d.extend_from_slice(&pat[i + 1..]);
            d
        })
        .collect()
}

/// Breadth-first deletion expansion: up to `depth` layers of single-symbol
/// deletions, keeping only new candidates that stay common to every
/// projection.
fn expand_by_deletions(
    candidates: &[Vec<u8>],
    uppers: &[&[u8]],
    depth: usize,
) -> Vec<Vec<u8>> {
    let mut seen: BTreeSet<Vec<u8>> = BTreeSet::new();
    let mut pool: Vec<Vec<u8>> = Vec::with_capacity(candidates.len());
    for c in candidates {
        if seen.insert(c.clone()) {
            pool.push(c.clone());
        }
    }

    let mut layer: Vec<Vec<u8>> = pool.clone();
    for _ in 0..depth {
        let mut next: Vec<Vec<u8>> = Vec::new();
        for c in &layer {
            for d in single_deletions(c) {
                if d.is_empty() || seen.contains(&d) {
                    continue;
                }
                if is_subsequence_of_all(&d, uppers) {
                    seen.insert(d.clone());
                    next.push(d.clone());
                    pool.push(d);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        layer = next;
    }
    pool
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Fold orders: ascending projection length first, then seeded permutations
/// of it with the first (shortest) element pinned.
fn fold_orders(uppers: &[&[u8]], opt: &TopKOptions) -> Vec<Vec<usize>> {
    let mut base: Vec<usize> = (0..uppers.len()).collect();
    base.sort_by_key(|&i| uppers[i].len());

    let mut orders = Vec::with_capacity(opt.num_orders.max(1));
    orders.push(base.clone());

    let mut rng = Xorshift64::new(opt.seed);
    for _ in 1..opt.num_orders {
        let mut perm = base.clone();
        for i in (2..perm.len()).rev() {
            let mut j = (rng.next_u64() % i as u64) as usize;
            if j == 0 {
                j = 1;
            }
            perm.swap(i, j);
        }
        orders.push(perm);
    }
    orders
}

/// The K best-ranked consensus patterns across `seqs`.
///
/// `Ok` with an empty vector means no non-empty consensus survived — "no
/// pattern found", not an error.
///
/// # Errors
///
/// Returns [`SeqmotifError::InvalidInput`] when `seqs` is empty or `k == 0`.
pub fn top_k_common_patterns(
    seqs: &[&[u8]],
    k: usize,
    opt: &TopKOptions,
) -> Result<Vec<AggregatedPattern>> {
    if seqs.is_empty() {
        return Err(SeqmotifError::InvalidInput(
            "at least one sequence is required".into(),
        ));
    }
    if k == 0 {
        return Err(SeqmotifError::InvalidInput("k must be positive".into()));
    }

    let projs: Vec<AnchorProjection> = seqs.iter().map(|s| AnchorProjection::new(s)).collect();
    let uppers: Vec<&[u8]> = projs.iter().map(|p| p.anchors.as_slice()).collect();

    // Beam search per fold order; survivors pooled across orders.
    let mut seen: BTreeSet<Vec<u8>> = BTreeSet::new();
    let mut candidates: Vec<Vec<u8>> = Vec::new();

    for order in fold_orders(&uppers, opt) {
        let mut beam: Vec<Vec<u8>> = vec![uppers[order[0]].to_vec()];
        for &next_idx in &order[1..] {
            let next_upper = uppers[next_idx];
            let mut new_beam: Vec<Vec<u8>> =
                Vec::with_capacity(beam.len() * opt.per_pair_alt.max(1));
            for entry in &beam {
                for alt in lcs_k_best(entry, next_upper, opt.per_pair_alt) {
                    if !alt.is_empty() {
                        new_beam.push(alt);
                    }
                }
            }
            new_beam.sort_by(|x, y| y.len().cmp(&x.len()).then_with(|| x.cmp(y)));
            new_beam.truncate(opt.beam_width);
            beam = new_beam;
            if beam.is_empty() {
                break;
            }
        }
        for survivor in beam {
            if !survivor.is_empty() && seen.insert(survivor.clone()) {
                candidates.push(survivor);
            }
        }
    }

    if opt.delete_depth > 0 {
        candidates = expand_by_deletions(&candidates, &uppers, opt.delete_depth);
    }

    // Aggregate and rank.
    let mut aggregated: Vec<AggregatedPattern> = Vec::with_capacity(candidates.len());
    let mut seen_patterns: BTreeSet<Vec<u8>> = BTreeSet::new();
    for pattern in candidates {
        if !seen_patterns.insert(pattern.clone()) {
            continue;
        }
        if let Some(agg) = aggregate_over_sequences(&pattern, &projs) {
            aggregated.push(agg);
        }
    }

    aggregated.sort_by(|x, y| {
        y.anchor_score
            .cmp(&x.anchor_score)
            .then_with(|| y.gap_score.cmp(&x.gap_score))
            .then_with(|| x.pattern.cmp(&y.pattern))
    });
    aggregated.truncate(k);
    Ok(aggregated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsequence_checks() {
        assert!(is_subsequence(b"ABC", b"AxBxC"));
        assert!(is_subsequence(b"", b"AB"));
        assert!(!is_subsequence(b"CA", b"AxC"));
    }

    #[test]
    fn deletions_enumerate_every_position() {
        let d = single_deletions(b"ABC");
        assert_eq!(d, vec![b"BC".to_vec(), b"AC".to_vec(), b"AB".to_vec()]);
        assert!(single_deletions(b"A").is_empty());
    }

    #[test]
    fn deletion_expansion_keeps_only_common_subsequences() {
        let uppers: Vec<&[u8]> = vec![b"ABC", b"ABDC", b"AXBC"];
        let pool = expand_by_deletions(&[b"ABC".to_vec()], &uppers, 2);
        assert!(pool.contains(&b"ABC".to_vec()));
        assert!(pool.contains(&b"AB".to_vec()));
        assert!(pool.contains(&b"BC".to_vec()));
        assert!(pool.contains(&b"A".to_vec()));
        // "AC" is a deletion of "ABC" and common to all three as well.
        assert!(pool.contains(&b"AC".to_vec()));
        for p in &pool {
            assert!(is_subsequence_of_all(p, &uppers));
        }
    }

    #[test]
    fn orders_fix_the_first_element() {
        let uppers: Vec<&[u8]> = vec![b"AAAA", b"AA", b"AAA", b"AAAAA"];
        let opt = TopKOptions {
            num_orders: 8,
            ..TopKOptions::default()
        };
        let orders = fold_orders(&uppers, &opt);
        assert_eq!(orders.len(), 8);
        for order in &orders {
            assert_eq!(order[0], 1, "shortest projection must stay first");
        }
    }

    #[test]
    fn orders_are_seed_deterministic() {
        let uppers: Vec<&[u8]> = vec![b"AB", b"ABC", b"ABCD", b"ABCDE", b"A"];
        let opt = TopKOptions::default();
        assert_eq!(fold_orders(&uppers, &opt), fold_orders(&uppers, &opt));
    }

    #[test]
    fn top_k_finds_the_shared_motif() {
        let seqs: Vec<&[u8]> = vec![
            b"asAfdBasdAdsC",
            b"AsdGsBC",
            b"AbsdfBdsBasdC",
            b"AsdfBsadC",
        ];
        let top = top_k_common_patterns(&seqs, 5, &TopKOptions::default()).unwrap();
        assert!(!top.is_empty());
        assert_eq!(top[0].pattern, "ABC");
        // Ranking is by anchor count first.
        for pair in top.windows(2) {
            assert!(pair[0].anchor_score >= pair[1].anchor_score);
        }
    }

    #[test]
    fn deletion_expansion_surfaces_shorter_motifs() {
        // The strict LCS of these three is length 2 at best per pair, but
        // deletion expansion must also surface the single-anchor motifs.
        let seqs: Vec<&[u8]> = vec![b"AxBxC", b"CxAxB", b"BxCxA"];
        let top = top_k_common_patterns(&seqs, 10, &TopKOptions::default()).unwrap();
        assert!(top.iter().any(|a| a.pattern.len() == 1));
    }

    #[test]
    fn no_common_motif_yields_empty_ok() {
        let seqs: Vec<&[u8]> = vec![b"Axx", b"Bxx", b"Cxx"];
        let top = top_k_common_patterns(&seqs, 3, &TopKOptions::default()).unwrap();
        assert!(top.is_empty());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(top_k_common_patterns(&[], 3, &TopKOptions::default()).is_err());
        let seqs: Vec<&[u8]> = vec![b"Ax"];
        assert!(top_k_common_patterns(&seqs, 0, &TopKOptions::default()).is_err());
    }

    #[test]
    fn results_respect_k() {
        let seqs: Vec<&[u8]> = vec![b"AxBxCxD", b"AxxBxCxD", b"ABCD"];
        let top = top_k_common_patterns(&seqs, 2, &TopKOptions::default()).unwrap();
        assert!(top.len() <= 2);
    }
}
