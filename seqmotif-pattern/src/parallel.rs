//! Parallel variants of LCS table construction and enumeration.
//!
//! Both functions here are contract-identical to their sequential
//! counterparts in [`crate::lcs`] — same tables cell-for-cell, same
//! enumeration sets — and differ only in how the work is scheduled.
//!
//! # Table construction
//!
//! Cells are grouped by anti-diagonal (`i + j` constant). Every cell on one
//! diagonal depends only on cells of the previous two diagonals, so all cells
//! of a diagonal are mutually independent and are evaluated by the rayon pool
//! in one parallel pass. The pass is fully joined before the next diagonal's
//! cells are dispatched; that barrier is an ordering requirement, not an
//! optimization, since cross-diagonal dependencies would otherwise race.
//!
//! # Enumeration
//!
//! The per-cell completion-set memo is a dense vector of [`OnceLock`] slots:
//! each cell's set is computed at most once, and concurrent readers of an
//! in-flight cell block until that single execution finishes, then observe
//! the completed set. When a cell has two viable continuations (up/left tie)
//! the two subtrees are explored as concurrent tasks via [`rayon::join`] and
//! their sets merged once both complete; a cell with a single continuation
//! stays on the calling thread, which keeps task creation proportional to
//! the number of genuine branch points.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use rayon::prelude::*;

use crate::lcs::DpTable;

/// Build the LCS-length table for `a` and `b` with diagonal-parallel
/// scheduling.
///
/// Produces a table cell-for-cell identical to [`crate::lcs::lcs_table`].
pub fn lcs_table_parallel(a: &[u8], b: &[u8]) -> DpTable {
    let rows = a.len() + 1;
    let cols = b.len() + 1;
    let mut table = DpTable::zeroed(rows, cols);

    // Diagonal d holds the cells with i + j == d, 1 <= i <= |a|, 1 <= j <= |b|.
    for d in 2..=(a.len() + b.len()) {
        let i_min = if d > b.len() { d - b.len() } else { 1 };
        let i_max = a.len().min(d - 1);
        if i_min > i_max {
            continue;
        }

        // One task per cell; the collect is a join over the whole diagonal.
        let values: Vec<u32> = (i_min..=i_max)
            .into_par_iter()
            .map(|i| {
                let j = d - i;
                if a[i - 1] == b[j - 1] {
                    table.get(i - 1, j - 1) + 1
                } else {
                    table.get(i - 1, j).max(table.get(i, j - 1))
                }
            })
            .collect();

        for (offset, i) in (i_min..=i_max).enumerate() {
            table.set(i, d - i, values[offset]);
        }
    }
    table
}

/// Enumerate every distinct LCS of `a` and `b` concurrently.
///
/// Returns the same set as [`crate::lcs::all_lcs`] for any input.
pub fn all_lcs_parallel(a: &[u8], b: &[u8], table: &DpTable) -> BTreeSet<Vec<u8>> {
    let enumerator = ConcurrentEnumerator {
        a,
        b,
        table,
        memo: (0..table.rows() * table.cols())
            .map(|_| OnceLock::new())
            .collect(),
        empty: Arc::new(BTreeSet::from([Vec::new()])),
    };
    enumerator.solve(a.len(), b.len()).as_ref().clone()
}

struct ConcurrentEnumerator<'a> {
    a: &'a [u8],
    b: &'a [u8],
    table: &'a DpTable,
    memo: Vec<OnceLock<Arc<BTreeSet<Vec<u8>>>>>,
    empty: Arc<BTreeSet<Vec<u8>>>,
}

impl ConcurrentEnumerator<'_> {
    /// Completion set of cell `(i, j)`, computed at most once per cell.
    fn solve(&self, i: usize, j: usize) -> Arc<BTreeSet<Vec<u8>>> {
        if self.table.get(i, j) == 0 {
            return self.empty.clone();
        }
        let idx = i * self.table.cols() + j;
        self.memo[idx].get_or_init(|| self.compute(i, j)).clone()
    }

    fn compute(&self, i: usize, j: usize) -> Arc<BTreeSet<Vec<u8>>> {
        // Match: extend every completion of the diagonal cell.
        if i > 0
            && j > 0
            && self.a[i - 1] == self.b[j - 1]
            && self.table.get(i, j) == self.table.get(i - 1, j - 1) + 1
        {
            let child = self.solve(i - 1, j - 1);
            let extended: BTreeSet<Vec<u8>> = child
                .iter()
                .map(|s| {
                    let mut t = s.clone();
                    t.push(self.a[i - 1]);
                    t
                })
                .collect();
            return Arc::new(extended);
        }

        let up = i > 0 && self.table.get(i - 1, j) == self.table.get(i, j);
        let left = j > 0 && self.table.get(i, j - 1) == self.table.get(i, j);
        match (up, left) {
            (true, true) => {
                // Two viable branches: explore both subtrees concurrently.
                // Cell dependencies strictly decrease i + j, so the wait in a
                // contended `get_or_init` can never form a cycle.
                let (up_set, left_set) =
                    rayon::join(|| self.solve(i - 1, j), || self.solve(i, j - 1));
                let mut merged = up_set.as_ref().clone();
                merged.extend(left_set.iter().cloned());
                Arc::new(merged)
            }
            (true, false) => self.solve(i - 1, j),
            (false, true) => self.solve(i, j - 1),
            // Unreachable for a well-formed table with dp[i][j] > 0.
            (false, false) => Arc::new(BTreeSet::new()),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::lcs::{all_lcs, lcs_table};
    use proptest::prelude::*;

    fn anchor_seq(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            prop_oneof![Just(b'A'), Just(b'B'), Just(b'C'), Just(b'D')],
            0..=max_len,
        )
    }

    proptest! {
        #[test]
        fn tables_agree_cell_for_cell(a in anchor_seq(24), b in anchor_seq(24)) {
            let seq = lcs_table(&a, &b);
            let par = lcs_table_parallel(&a, &b);
            prop_assert_eq!(seq, par);
        }

        #[test]
        fn enumerations_agree(a in anchor_seq(14), b in anchor_seq(14)) {
            let table = lcs_table(&a, &b);
            let seq = all_lcs(&a, &b, &table);
            let par = all_lcs_parallel(&a, &b, &table);
            prop_assert_eq!(seq, par);
        }

        #[test]
        fn every_member_has_lcs_length(a in anchor_seq(14), b in anchor_seq(14)) {
            let table = lcs_table(&a, &b);
            for s in all_lcs_parallel(&a, &b, &table) {
                prop_assert_eq!(s.len() as u32, table.lcs_len());
            }
        }
    }
}
