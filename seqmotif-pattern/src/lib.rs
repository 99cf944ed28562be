//! Gapped-motif discovery across biological sequences.
//!
//! Input sequences mix uppercase *anchor* residues with lowercase *filler*
//! residues. The crate discovers PROSITE-style motifs — anchor subsequences
//! with per-pair spacer annotations such as `B-x(2|11)-A-x(2,4)-B` — shared
//! across two or more sequences:
//!
//! - **LCS engine** — DP table construction plus exhaustive enumeration of
//!   *every* longest common anchor subsequence, in contract-identical
//!   sequential ([`lcs`]) and parallel ([`parallel`]) variants
//! - **Gap viability** — every spacer length achievable between adjacent
//!   anchors over all valid embeddings ([`gaps`])
//! - **Aggregation** — cross-sequence gap-set union, notation rendering and
//!   parsing, and consolidation of structurally equivalent patterns
//!   ([`aggregate`], [`notation`], [`consolidate`])
//! - **Consensus search** — progressive LCS and K-best beam search over many
//!   sequences ([`consensus`], [`kbest`], [`topk`])
//! - **Batch driver** — order-stable parallel all-pairs comparison
//!   ([`batch`])
//!
//! # Quick start
//!
//! ```
//! use seqmotif_pattern::batch::compare_pair;
//!
//! let reports = compare_pair(b"AxxB", b"AxB");
//! assert_eq!(reports[0].formatted, "A-x(1,2)-B");
//! ```

pub mod aggregate;
pub mod batch;
pub mod consensus;
pub mod consolidate;
pub mod gaps;
pub mod kbest;
pub mod lcs;
pub mod notation;
pub mod parallel;
pub mod projection;
pub mod topk;
pub mod types;

pub use aggregate::{format_aggregated, format_pattern_with_values, pair_union_sets, GapValues};
pub use batch::{
    collect_pattern_stats, compare_all_pairs, compare_pair, PairwiseReport, PatternReport,
};
pub use consensus::{aggregate_over_sequences, best_common_pattern, lcs_classic, progressive_lcs};
pub use consolidate::{consolidate, PatternStat};
pub use gaps::{all_gap_values, min_gaps};
pub use kbest::lcs_k_best;
pub use lcs::{all_lcs, lcs_table, DpTable};
pub use notation::{parse_notation, ParsedPattern};
pub use parallel::{all_lcs_parallel, lcs_table_parallel};
pub use projection::{anchors_only, AnchorProjection};
pub use topk::{top_k_common_patterns, TopKOptions};
pub use types::{AggregatedPattern, GapRange};


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn mixed_seq(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            prop_oneof![Just(b'A'), Just(b'B'), Just(b'C'), Just(b'x'), Just(b'y')],
            1..=max_len,
        )
    }

    proptest! {
        #[test]
        fn pair_comparison_is_deterministic(a in mixed_seq(20), b in mixed_seq(20)) {
            prop_assert_eq!(compare_pair(&a, &b), compare_pair(&a, &b));
        }

        #[test]
        fn every_reported_pattern_round_trips(a in mixed_seq(20), b in mixed_seq(20)) {
            for report in compare_pair(&a, &b) {
                let parsed = parse_notation(&report.formatted).unwrap();
                prop_assert_eq!(parsed.skeleton, report.pattern);
            }
        }

        #[test]
        fn reported_stats_consolidate_idempotently(
            a in mixed_seq(16),
            b in mixed_seq(16),
            c in mixed_seq(16),
        ) {
            let seqs: Vec<&[u8]> = vec![&a, &b, &c];
            let reports = compare_all_pairs(&seqs).unwrap();
            let stats = collect_pattern_stats(&reports);
            let once = consolidate(&stats).unwrap();
            let twice = consolidate(&once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
