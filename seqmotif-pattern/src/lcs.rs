//! Longest-common-subsequence table construction and exhaustive enumeration.
//!
//! The DP table follows the textbook recurrence: `dp[i][j]` is the LCS length
//! of the length-`i` prefix of `a` and the length-`j` prefix of `b`, with
//! `dp[i][j] = dp[i-1][j-1] + 1` on a symbol match and
//! `max(dp[i-1][j], dp[i][j-1])` otherwise.
//!
//! [`all_lcs`] then backtracks from `(|a|, |b|)` and enumerates **every**
//! distinct LCS, not just one: on a match it moves diagonally, otherwise it
//! follows whichever of up/left preserves the cell value — both when tied.
//! Completion sets are memoized per cell; the set of completions reachable
//! from a cell does not depend on how the cell was reached, so per-cell
//! memoization is both correct and sufficient to avoid redundant
//! recomputation.
//!
//! A diagonal-parallel construction and a concurrent enumerator with the
//! identical contracts live in [`crate::parallel`].

use std::collections::BTreeSet;
use std::rc::Rc;

/// LCS-length DP table for a pair of anchor sequences.
///
/// Row-major, dimensions `(|a|+1) x (|b|+1)`; built once, each cell written
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpTable {
    cells: Vec<u32>,
    rows: usize,
    cols: usize,
}

impl DpTable {
    pub(crate) fn zeroed(rows: usize, cols: usize) -> Self {
        DpTable {
            cells: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Number of rows (`|a| + 1`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`|b| + 1`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value of cell `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, v: u32) {
        self.cells[i * self.cols + j] = v;
    }

    /// The LCS length of the two full sequences (bottom-right cell).
    pub fn lcs_len(&self) -> u32 {
        self.get(self.rows - 1, self.cols - 1)
    }
}

/// Build the LCS-length table for `a` and `b` sequentially.
pub fn lcs_table(a: &[u8], b: &[u8]) -> DpTable {
    let rows = a.len() + 1;
    let cols = b.len() + 1;
    let mut table = DpTable::zeroed(rows, cols);

    for i in 1..rows {
        for j in 1..cols {
            let v = if a[i - 1] == b[j - 1] {
                table.get(i - 1, j - 1) + 1
            } else {
                table.get(i - 1, j).max(table.get(i, j - 1))
            };
            table.set(i, j, v);
        }
    }
    table
}

/// Enumerate every distinct LCS of `a` and `b`, given their DP table.
///
/// Returns the deduplicated set of all longest common subsequences. All
/// members have length [`DpTable::lcs_len`]; when that length is zero (empty
/// inputs or no common symbol) the set contains the single empty string.
pub fn all_lcs(a: &[u8], b: &[u8], table: &DpTable) -> BTreeSet<Vec<u8>> {
    let mut enumerator = Enumerator {
        a,
        b,
        table,
        memo: vec![None; table.rows() * table.cols()],
        empty: Rc::new(BTreeSet::from([Vec::new()])),
    };
    let set = enumerator.solve(a.len(), b.len());
    set.as_ref().clone()
}

struct Enumerator<'a> {
    a: &'a [u8],
    b: &'a [u8],
    table: &'a DpTable,
    memo: Vec<Option<Rc<BTreeSet<Vec<u8>>>>>,
    empty: Rc<BTreeSet<Vec<u8>>>,
}

impl Enumerator<'_> {
    fn solve(&mut self, i: usize, j: usize) -> Rc<BTreeSet<Vec<u8>>> {
        if self.table.get(i, j) == 0 {
            return self.empty.clone();
        }
        let idx = i * self.table.cols() + j;
        if let Some(cached) = &self.memo[idx] {
            return cached.clone();
        }

        // Match: extend every completion of the diagonal cell.
        let result = if i > 0
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
            Rc::new(extended)
        } else {
            // No match: follow whichever neighbors preserve the cell value.
            let up = i > 0 && self.table.get(i - 1, j) == self.table.get(i, j);
            let left = j > 0 && self.table.get(i, j - 1) == self.table.get(i, j);
            match (up, left) {
                (true, true) => {
                    let mut merged = self.solve(i - 1, j).as_ref().clone();
                    merged.extend(self.solve(i, j - 1).iter().cloned());
                    Rc::new(merged)
                }
                (true, false) => self.solve(i - 1, j),
                (false, true) => self.solve(i, j - 1),
                // Unreachable for a well-formed table with dp[i][j] > 0.
                (false, false) => Rc::new(BTreeSet::new()),
            }
        };

        self.memo[idx] = Some(result.clone());
        result
    }
}
