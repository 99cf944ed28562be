//! Brute-force gapped-motif discovery by exhaustive subsequence enumeration.
//!
//! The sibling engine crate discovers motifs through LCS analysis; this crate
//! is the exhaustive reference variant. It enumerates **every** subsequence
//! of two short sequences in collapsed form (deleted symbols become
//! run-length spacer counts), intersects the two candidate sets by letter
//! skeleton, and ranks the resulting patterns with a heuristic score that
//! rewards anchors over spacers.
//!
//! The enumeration is 2^n per sequence and is only meant for short reference
//! sequences; the [`Subsequences`] iterator is lazy so memory stays bounded
//! regardless.
//!
//! # Quick start
//!
//! ```
//! use seqmotif_discovery::discover;
//!
//! let ranked = discover("AB", "AB").unwrap();
//! assert_eq!(ranked[0].pattern, "A-B");
//! ```

mod normalize;

pub mod compare;
pub mod generator;
pub mod score;

pub use compare::compare_subsequences;
pub use generator::Subsequences;
pub use score::{rank_patterns, score_patterns, ScoredPattern};

use seqmotif_core::Result;

/// End-to-end discovery for one sequence pair: enumerate both subsequence
/// sets, extract shared patterns, score and rank them.
///
/// # Errors
///
/// Returns [`seqmotif_core::SeqmotifError::InvalidInput`] when either
/// sequence exceeds the supported enumeration width.
pub fn discover(seq_a: &str, seq_b: &str) -> Result<Vec<ScoredPattern>> {
    let subs_a: Vec<String> = Subsequences::new(seq_a)?.collect();
    let subs_b: Vec<String> = Subsequences::new(seq_b)?.collect();
    let patterns = compare_subsequences(&subs_a, &subs_b);
    let n = seq_a.len().max(seq_b.len());
    Ok(rank_patterns(&patterns, n))
}
