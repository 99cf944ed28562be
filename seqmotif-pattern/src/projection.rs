//! Anchor projection of raw sequences.
//!
//! Raw input sequences mix *anchor* symbols (uppercase ASCII residues that
//! may appear in a motif) with *filler* symbols (lowercase residues that only
//! contribute spacer length). [`AnchorProjection`] extracts the anchor-only
//! view once per sequence and keeps the bookkeeping needed later: the
//! original position of every anchor, and a prefix-sum array of filler counts
//! for O(1) filler-between-positions queries.

/// Anchor-only view of a raw sequence, with position and filler-count maps.
///
/// Built once per input sequence and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AnchorProjection {
    /// The raw sequence the projection was built from.
    pub original: Vec<u8>,
    /// The anchor (uppercase) symbols, in order.
    pub anchors: Vec<u8>,
    /// For each anchor, its index in `original`.
    pub anchor_positions: Vec<usize>,
    /// `filler_prefix[i]` = number of filler symbols in `original[..i]`.
    /// Length is `original.len() + 1`.
    pub filler_prefix: Vec<usize>,
}

impl AnchorProjection {
    /// Build the projection of `seq`.
    ///
    /// Uppercase ASCII bytes are anchors, lowercase ASCII bytes are filler;
    /// any other byte is neither (it occupies a position but is not counted
    /// as spacer material).
    pub fn new(seq: &[u8]) -> Self {
        let mut anchors = Vec::new();
        let mut anchor_positions = Vec::new();
        let mut filler_prefix = Vec::with_capacity(seq.len() + 1);
        filler_prefix.push(0);

        for (i, &c) in seq.iter().enumerate() {
            let fillers = filler_prefix[i] + usize::from(c.is_ascii_lowercase());
            filler_prefix.push(fillers);
            if c.is_ascii_uppercase() {
                anchor_positions.push(i);
                anchors.push(c);
            }
        }

        AnchorProjection {
            original: seq.to_vec(),
            anchors,
            anchor_positions,
            filler_prefix,
        }
    }

    /// Number of filler symbols strictly between positions `i` and `j` of the
    /// original sequence (`i < j`); zero when `j <= i`.
    pub fn fillers_between(&self, i: usize, j: usize) -> usize {
        if j <= i {
            return 0;
        }
        self.filler_prefix[j] - self.filler_prefix[i + 1]
    }
}

/// The anchor (uppercase) symbols of `seq`, in order.
pub fn anchors_only(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .copied()
        .filter(u8::is_ascii_uppercase)
        .collect()
}
