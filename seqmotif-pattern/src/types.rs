//! Shared result types for motif aggregation.

/// Inclusive `[min, max]` range of spacer lengths between two adjacent
/// pattern anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GapRange {
    pub min: usize,
    pub max: usize,
}

/// A consensus pattern with its per-pair gap statistics and ranking scores.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatedPattern {
    /// The anchor skeleton, e.g. `"ABC"`.
    pub pattern: String,
    /// One `[min, max]` spacer range per adjacent anchor pair.
    pub gap_ranges: Vec<GapRange>,
    /// Mean spacer length per adjacent anchor pair, across the supporting
    /// sequences (informative only; not used for ranking).
    pub gap_averages: Vec<f64>,
    /// Number of anchors (primary ranking key).
    pub anchor_score: usize,
    /// Sum of per-pair minimum spacer lengths (secondary ranking key).
    pub gap_score: usize,
}
