//! K-best common-subsequence enumeration with a bounded branch budget.
//!
//! [`lcs_k_best`] returns up to `k` *distinct* longest common subsequences.
//! Unlike the exhaustive enumerator in [`crate::lcs`], the backtracking here
//! is count-limited: it stops as soon as `k` results have been collected,
//! which keeps beam-search folds cheap on inputs with many tied optima.

use crate::consensus::{lcs_classic, suffix_table};

/// Up to `k` distinct LCS of `a` and `b`, longest first (all results share
/// the LCS length), ties in deterministic search order.
///
/// `k <= 1` degrades to the single [`lcs_classic`] result. Inputs with no
/// common symbol yield a single empty string.
pub fn lcs_k_best(a: &[u8], b: &[u8], k: usize) -> Vec<Vec<u8>> {
    if k <= 1 {
        return vec![lcs_classic(a, b)];
    }
    if a.is_empty() || b.is_empty() {
        return vec![Vec::new()];
    }

    let dp = suffix_table(a, b);
    let target = dp[0] as usize;
    if target == 0 {
        return vec![Vec::new()];
    }

    let mut collected: Vec<Vec<u8>> = Vec::new();
    let mut buf: Vec<u8> = Vec::with_capacity(target);
    search(a, b, &dp, 0, 0, target, k, &mut buf, &mut collected);

    // Tied branches can reach the same string twice; dedup keeps first-found
    // order.
    let mut out: Vec<Vec<u8>> = Vec::with_capacity(collected.len());
    for s in collected {
        if !out.contains(&s) {
            out.push(s);
        }
        if out.len() >= k {
            break;
        }
    }
    if out.is_empty() {
        return vec![lcs_classic(a, b)];
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn search(
    a: &[u8],
    b: &[u8],
    dp: &[u32],
    i: usize,
    j: usize,
    need: usize,
    k: usize,
    buf: &mut Vec<u8>,
    out: &mut Vec<Vec<u8>>,
) {
    if out.len() >= k {
        return;
    }
    if need == 0 {
        out.push(buf.clone());
        return;
    }
    if i >= a.len() || j >= b.len() {
        return;
    }
    let cols = b.len() + 1;
    // This subproblem cannot supply the remaining symbols.
    if (dp[i * cols + j] as usize) < need {
        return;
    }

    if a[i] == b[j] {
        buf.push(a[i]);
        search(a, b, dp, i + 1, j + 1, need - 1, k, buf, out);
        buf.pop();
    } else {
        let down = dp[(i + 1) * cols + j];
        let right = dp[i * cols + j + 1];
        if down > right {
            search(a, b, dp, i + 1, j, need, k, buf, out);
        } else if right > down {
            search(a, b, dp, i, j + 1, need, k, buf, out);
        } else {
            search(a, b, dp, i + 1, j, need, k, buf, out);
            if out.len() < k {
                search(a, b, dp, i, j + 1, need, k, buf, out);
            }
        }
    }
}
