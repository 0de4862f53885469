//! C4: greedy *grow* density estimator seeded at a single cell.

/// Scans `slice_sum` for the unmarked index with the largest value.
///
/// Ties use `>=`, so later indices win over earlier ones of equal value —
/// this is observable in [`global_density`]'s output and must match.
fn find_max(slice_sum: &[f64], flag: &[bool]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in slice_sum.iter().enumerate() {
        if !flag[i] && best.map_or(true, |(_, bv)| v >= bv) {
            best = Some((i, v));
        }
    }
    best
}

/// Greedily grows a subgraph from seed cell `(s, d)` of a `buckets ×
/// buckets` row `mat`, alternately annexing whichever unmarked row or
/// column currently contributes the most mass, and returns the maximum
/// density `total / sqrt(marked_rows * marked_cols)` seen along the way.
///
/// Runs for exactly `2*buckets - 2` rounds (every row and column gets
/// annexed exactly once, except the two the seed already occupies).
pub fn global_density(mat: &[f64], buckets: usize, s: usize, d: usize) -> f64 {
    let b = buckets;
    let mut row_flag = vec![false; b];
    let mut col_flag = vec![false; b];
    let mut row_slice_sum: Vec<f64> = (0..b).map(|i| mat[i * b + d]).collect();
    let mut col_slice_sum: Vec<f64> = (0..b).map(|j| mat[s * b + j]).collect();

    row_flag[s] = true;
    col_flag[d] = true;

    let mut marked_rows = 1usize;
    let mut marked_cols = 1usize;
    let mut current_sum = mat[s * b + d];
    let mut output = current_sum / ((marked_rows * marked_cols) as f64).sqrt();

    let mut max_row = find_max(&row_slice_sum, &row_flag);
    let mut max_col = find_max(&col_slice_sum, &col_flag);

    let mut remaining = 2 * b as i64 - 2;
    while remaining > 0 {
        let take_row = match (max_row, max_col) {
            (Some((_, rv)), Some((_, cv))) => rv >= cv,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        if take_row {
            let (ri, _) = max_row.expect("row side chosen");
            row_flag[ri] = true;
            marked_rows += 1;

            let mut new_max_col = None;
            for k in 0..b {
                if col_flag[k] {
                    current_sum += mat[ri * b + k];
                } else {
                    col_slice_sum[k] += mat[ri * b + k];
                    if new_max_col.map_or(true, |(_, bv)| col_slice_sum[k] >= bv) {
                        new_max_col = Some((k, col_slice_sum[k]));
                    }
                }
            }
            max_col = new_max_col;
            max_row = find_max(&row_slice_sum, &row_flag);
        } else {
            let (ci, _) = max_col.expect("col side chosen");
            col_flag[ci] = true;
            marked_cols += 1;

            let mut new_max_row = None;
            for k in 0..b {
                if row_flag[k] {
                    current_sum += mat[k * b + ci];
                } else {
                    row_slice_sum[k] += mat[k * b + ci];
                    if new_max_row.map_or(true, |(_, bv)| row_slice_sum[k] >= bv) {
                        new_max_row = Some((k, row_slice_sum[k]));
                    }
                }
            }
            max_row = new_max_row;
            max_col = find_max(&col_slice_sum, &col_flag);
        }

        output = output.max(current_sum / ((marked_rows * marked_cols) as f64).sqrt());
        remaining -= 1;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(b: usize, i: usize, j: usize) -> usize {
        i * b + j
    }

    #[test]
    fn single_cell_seed_density_is_the_cell_value() {
        let b = 4;
        let mut mat = vec![0.0; b * b];
        mat[idx(b, 1, 2)] = 1.0;
        assert_eq!(global_density(&mat, b, 1, 2), 1.0);
    }

    #[test]
    fn grows_into_a_dense_block() {
        // rows {1,2} x cols {2,3} all set to 3; everything else zero.
        let b = 4;
        let mut mat = vec![0.0; b * b];
        for &i in &[1usize, 2] {
            for &j in &[2usize, 3] {
                mat[idx(b, i, j)] = 3.0;
            }
        }
        // density of the full 2x2 block is 12/sqrt(4) = 6, strictly above
        // the seed density of 3, so growth should find it.
        assert_eq!(global_density(&mat, b, 1, 2), 6.0);
    }

    #[test]
    fn at_least_the_seed_density() {
        let b = 5;
        let mat: Vec<f64> = (0..b * b).map(|x| (x % 7) as f64).collect();
        for s in 0..b {
            for d in 0..b {
                let seed_density = mat[idx(b, s, d)];
                assert!(global_density(&mat, b, s, d) >= seed_density);
            }
        }
    }

    #[test]
    fn single_bucket_matrix_is_just_the_seed() {
        let mat = vec![7.0];
        assert_eq!(global_density(&mat, 1, 0, 0), 7.0);
    }
}
