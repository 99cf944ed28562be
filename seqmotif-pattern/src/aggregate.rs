//! Cross-sequence merging of gap sets and motif notation rendering.
//!
//! Rendering rules for one adjacent anchor pair:
//!
//! - empty value set — the anchors are adjacent, plain `-` separator
//! - singleton `{v}` — `x(v)`
//! - a contiguous integer run — `x(min,max)`
//! - anything else — explicit ascending list `x(v1|v2|...)`
//!
//! A gap set equal to `{0}` means "the anchors were adjacent in every
//! supporting embedding" and is cleared to empty before formatting.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::types::AggregatedPattern;

/// The distinct spacer lengths observed for one adjacent anchor pair.
///
/// Values are unique and ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GapValues {
    pub values: Vec<usize>,
}

/// Per-pair union of two sequences' gap-value sets for the same pattern.
///
/// The output is truncated to the shorter of the two lists. A union equal to
/// `{0}` carries no spacer information and is cleared to empty.
pub fn pair_union_sets(sets_x: &[BTreeSet<usize>], sets_y: &[BTreeSet<usize>]) -> Vec<GapValues> {
    sets_x
        .iter()
        .zip(sets_y)
        .map(|(x, y)| {
            let values: Vec<usize> = x.union(y).copied().collect();
            if values == [0] {
                GapValues::default()
            } else {
                GapValues { values }
            }
        })
        .collect()
}

fn is_contiguous(sorted: &[usize]) -> bool {
    sorted.windows(2).all(|w| w[1] == w[0] + 1)
}

/// Render one gap token (without separators) from an ascending value list.
pub(crate) fn gap_token(values: &[usize]) -> String {
    match values {
        [] => String::new(),
        [v] => format!("x({})", v),
        _ if is_contiguous(values) => format!("x({},{})", values[0], values[values.len() - 1]),
        _ => {
            let mut out = String::from("x(");
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                let _ = write!(out, "{}", v);
            }
            out.push(')');
            out
        }
    }
}

/// Render `pattern` with its per-pair gap values as PROSITE-style notation,
/// e.g. `B-x(2|11)-A-x(2,4)-B` or `A-B` for adjacent anchors.
///
/// Pure function of its inputs.
pub fn format_pattern_with_values(pattern: &[u8], sets: &[GapValues]) -> String {
    if pattern.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(pattern.len() * 4);
    for (i, &ch) in pattern.iter().enumerate() {
        out.push(ch as char);
        if i + 1 < pattern.len() {
            match sets.get(i).filter(|gv| !gv.values.is_empty()) {
                Some(gv) => {
                    out.push('-');
                    out.push_str(&gap_token(&gv.values));
                    out.push('-');
                }
                None => out.push('-'),
            }
        }
    }
    out
}

/// Render a consensus pattern with its `[min, max]` gap ranges, e.g.
/// `A-x(2)-B-x(1,4)-C`.
pub fn format_aggregated(agg: &AggregatedPattern) -> String {
    let pattern = agg.pattern.as_bytes();
    if pattern.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(pattern.len() * 4);
    for (i, &ch) in pattern.iter().enumerate() {
        out.push(ch as char);
        if i + 1 < pattern.len() {
            let r = &agg.gap_ranges[i];
            out.push('-');
            if r.min == r.max {
                let _ = write!(out, "x({})", r.min);
            } else {
                let _ = write!(out, "x({},{})", r.min, r.max);
            }
            out.push('-');
        }
    }
    out
}
