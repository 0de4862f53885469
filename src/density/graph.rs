//! C5: whole-row density kernels — greedy peeling, and a top-K seeded
//! variant of [`crate::density::global_density`].

use super::global::global_density;

fn argmin(v: &[f64]) -> usize {
    let mut best = 0;
    for i in 1..v.len() {
        if v[i] < v[best] {
            best = i;
        }
    }
    best
}

/// Greedily peels the minimum-sum row or column at each step and returns
/// the maximum density seen, starting from the full `buckets × buckets`
/// row and peeling down to nothing (at most `2*buckets` steps).
///
/// The initial density uses `marked_rows * marked_rows` (both row counts,
/// not row-by-col) in its denominator — this looks inconsistent with
/// every later iteration's `marked_rows * marked_cols`, but it's
/// deliberate; see `DESIGN.md`.
pub fn peel_density(mat: &[f64], buckets: usize) -> f64 {
    let b = buckets;
    if b == 0 {
        return 0.0;
    }
    let mut row_flag = vec![true; b];
    let mut col_flag = vec![true; b];
    let mut row_sum: Vec<f64> = (0..b).map(|i| (0..b).map(|j| mat[i * b + j]).sum()).collect();
    let mut col_sum: Vec<f64> = (0..b).map(|j| (0..b).map(|i| mat[i * b + j]).sum()).collect();

    let mut marked_rows = b;
    let mut marked_cols = b;
    let mut total: f64 = row_sum.iter().sum();
    let mut output = total / ((marked_rows * marked_rows) as f64).sqrt();

    for _ in 0..(2 * b) {
        let i_star = argmin(&row_sum);
        let j_star = argmin(&col_sum);

        if row_sum[i_star] <= col_sum[j_star] {
            row_flag[i_star] = false;
            row_sum[i_star] = f64::INFINITY;
            for k in 0..b {
                col_sum[k] -= mat[i_star * b + k];
            }
            let removed: f64 = (0..b)
                .filter(|&k| col_flag[k])
                .map(|k| mat[i_star * b + k])
                .sum();
            total -= removed;
            marked_rows -= 1;
        } else {
            col_flag[j_star] = false;
            col_sum[j_star] = f64::INFINITY;
            for k in 0..b {
                row_sum[k] -= mat[k * b + j_star];
            }
            let removed: f64 = (0..b)
                .filter(|&k| row_flag[k])
                .map(|k| mat[k * b + j_star])
                .sum();
            total -= removed;
            marked_cols -= 1;
        }

        if marked_rows == 0 || marked_cols == 0 {
            break;
        }

        let density = total / ((marked_rows * marked_cols) as f64).sqrt();
        output = output.max(density);
    }

    output
}

/// Sorts all `buckets^2` cells by value descending (stable on ties),
/// seeds [`global_density`] from each of the first `k`, and returns the
/// max. Callers must ensure `1 <= k <= buckets^2`.
pub fn topk_density(mat: &[f64], buckets: usize, k: usize) -> f64 {
    let b = buckets;
    let mut cells: Vec<(usize, usize)> = Vec::with_capacity(b * b);
    for i in 0..b {
        for j in 0..b {
            cells.push((i, j));
        }
    }
    cells.sort_by(|&(i1, j1), &(i2, j2)| {
        mat[i2 * b + j2]
            .partial_cmp(&mat[i1 * b + j1])
            .expect("counts are never NaN")
    });

    let mut output = 0.0f64;
    for &(i, j) in cells.iter().take(k) {
        output = output.max(global_density(mat, b, i, j));
    }
    output
}
