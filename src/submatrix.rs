//! A growing/shrinking dense submatrix of one sketch row, with cached
//! row/column sums and density-preserving add/delete decisions.
//!
//! This is the hardest piece of the engine: every mutating method must
//! leave `rows_sum`/`cols_sum`/`total` consistent with the current
//! `(R, C, M)` before it returns (invariant I1 in the design notes). `R`
//! and `C` are tracked with a dense `bucket`-sized presence array (O(1)
//! membership) alongside a `Vec<usize>` of the same members in insertion
//! order (O(|R|)/O(|C|) iteration), rather than a hash map — appropriate
//! since `buckets` is fixed and small for this engine's use.

/// A submatrix `S = (R, C)` of a `buckets × buckets` sketch row `M`.
#[derive(Debug, Clone)]
pub struct Submatrix {
    buckets: usize,
    row_present: Vec<bool>,
    col_present: Vec<bool>,
    rows_sum: Vec<f64>,
    cols_sum: Vec<f64>,
    row_list: Vec<usize>,
    col_list: Vec<usize>,
    total: f64,
}

impl Submatrix {
    /// Seeds a submatrix at the single cell `(row_idx, col_idx)` with the
    /// given value.
    pub fn new(buckets: usize, row_idx: usize, col_idx: usize, value: f64) -> Self {
        let mut row_present = vec![false; buckets];
        let mut col_present = vec![false; buckets];
        let mut rows_sum = vec![0.0; buckets];
        let mut cols_sum = vec![0.0; buckets];
        row_present[row_idx] = true;
        col_present[col_idx] = true;
        rows_sum[row_idx] = value;
        cols_sum[col_idx] = value;
        Submatrix {
            buckets,
            row_present,
            col_present,
            rows_sum,
            cols_sum,
            row_list: vec![row_idx],
            col_list: vec![col_idx],
            total: value,
        }
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.buckets + j
    }

    pub fn rows(&self) -> &[usize] {
        &self.row_list
    }

    pub fn cols(&self) -> &[usize] {
        &self.col_list
    }

    pub fn rows_count(&self) -> usize {
        self.row_list.len()
    }

    pub fn cols_count(&self) -> usize {
        self.col_list.len()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn contains_row(&self, i: usize) -> bool {
        self.row_present[i]
    }

    pub fn contains_col(&self, j: usize) -> bool {
        self.col_present[j]
    }

    pub fn row_sum(&self, i: usize) -> f64 {
        if self.row_present[i] {
            self.rows_sum[i]
        } else {
            0.0
        }
    }

    pub fn col_sum(&self, j: usize) -> f64 {
        if self.col_present[j] {
            self.cols_sum[j]
        } else {
            0.0
        }
    }

    /// `total / sqrt(|R| * |C|)`.
    pub fn density(&self) -> f64 {
        self.total / ((self.rows_count() * self.cols_count()) as f64).sqrt()
    }

    /// Adds row `i` (not already in `R`) with cached sum `v`, and folds
    /// its contribution to every existing column's cached sum.
    pub fn add_row(&mut self, i: usize, v: f64, mat: &[f64]) {
        debug_assert!(!self.row_present[i]);
        self.row_present[i] = true;
        self.rows_sum[i] = v;
        self.row_list.push(i);
        for &j in &self.col_list {
            self.cols_sum[j] += mat[self.idx(i, j)];
        }
    }

    /// Adds column `j` (not already in `C`) with cached sum `v`, and folds
    /// its contribution to every existing row's cached sum.
    pub fn add_col(&mut self, j: usize, v: f64, mat: &[f64]) {
        debug_assert!(!self.col_present[j]);
        self.col_present[j] = true;
        self.cols_sum[j] = v;
        self.col_list.push(j);
        for &i in &self.row_list {
            self.rows_sum[i] += mat[self.idx(i, j)];
        }
    }

    /// Removes row `i` from `R`, un-folding its contribution from every
    /// remaining column's cached sum. Does not touch `total`.
    pub fn del_row(&mut self, i: usize, mat: &[f64]) {
        debug_assert!(self.row_present[i]);
        self.row_present[i] = false;
        self.row_list.retain(|&r| r != i);
        for &j in &self.col_list {
            self.cols_sum[j] -= mat[self.idx(i, j)];
        }
    }

    /// Removes column `j` from `C`, un-folding its contribution from every
    /// remaining row's cached sum. Does not touch `total`.
    pub fn del_col(&mut self, j: usize, mat: &[f64]) {
        debug_assert!(self.col_present[j]);
        self.col_present[j] = false;
        self.col_list.retain(|&c| c != j);
        for &i in &self.row_list {
            self.rows_sum[i] -= mat[self.idx(i, j)];
        }
    }

    /// Grows the submatrix by `(i, j)` if doing so strictly increases
    /// density, returning whether it grew.
    ///
    /// When both `i` and `j` are already members, the submatrix does not
    /// change structurally, but caches are bumped by 1 to track an edge
    /// the sketch's own `insert` is expected to add at the same `(i, j)`
    /// in lockstep — see [`crate::detector::LocalEdge`].
    pub fn check_and_add(&mut self, i: usize, j: usize, mat: &[f64]) -> bool {
        let row_present = self.row_present[i];
        let col_present = self.col_present[j];

        if row_present && col_present {
            self.total += 1.0;
            self.rows_sum[i] += 1.0;
            self.cols_sum[j] += 1.0;
            return false;
        }

        let cell = mat[self.idx(i, j)];
        let s_row = if row_present {
            0.0
        } else {
            self.col_list.iter().map(|&c| mat[self.idx(i, c)]).sum()
        };
        let s_col = if col_present {
            0.0
        } else {
            self.row_list.iter().map(|&r| mat[self.idx(r, j)]).sum()
        };

        let new_rows = self.rows_count() + if row_present { 0 } else { 1 };
        let new_cols = self.cols_count() + if col_present { 0 } else { 1 };

        let new_total = if !row_present && !col_present {
            self.total + s_row + s_col + cell
        } else {
            self.total + s_row + s_col
        };

        let new_density = new_total / ((new_rows * new_cols) as f64).sqrt();
        if self.density() < new_density {
            if !row_present && !col_present {
                // Both endpoints are new: fold the new row's contribution
                // into the old columns and the new column's contribution
                // into the old rows (including the fresh row), each
                // exactly once, then seed the two new cached sums
                // directly — NOT via add_row/add_col in sequence, which
                // would double-count the shared cell `(i, j)`.
                for &c in &self.col_list {
                    self.cols_sum[c] += mat[self.idx(i, c)];
                }
                for &r in &self.row_list {
                    self.rows_sum[r] += mat[self.idx(r, j)];
                }
                self.row_present[i] = true;
                self.col_present[j] = true;
                self.rows_sum[i] = s_row + cell;
                self.cols_sum[j] = s_col + cell;
                self.row_list.push(i);
                self.col_list.push(j);
            } else if !row_present {
                self.add_row(i, s_row, mat);
            } else {
                self.add_col(j, s_col, mat);
            }
            self.total = new_total;
            return true;
        }
        false
    }

    /// Shrinks the submatrix by removing the minimum-sum row or column if
    /// doing so strictly increases density, returning whether it shrank.
    ///
    /// Ties (either candidate matching or beating the current density, or
    /// matching each other) are refused: both comparisons are strict and
    /// cross-checked against each other, by design — see spec §4.3.
    pub fn check_and_del(&mut self, mat: &[f64]) -> bool {
        let min_row = if self.rows_count() > 1 {
            self.row_list
                .iter()
                .copied()
                .map(|r| (r, self.rows_sum[r]))
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        } else {
            None
        };
        let min_col = if self.cols_count() > 1 {
            self.col_list
                .iter()
                .copied()
                .map(|c| (c, self.cols_sum[c]))
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        } else {
            None
        };

        let row_del_density = match min_row {
            Some((_, sum)) => {
                (self.total - sum) / (((self.rows_count() - 1) * self.cols_count()) as f64).sqrt()
            }
            None => f64::INFINITY,
        };
        let col_del_density = match min_col {
            Some((_, sum)) => {
                (self.total - sum) / ((self.rows_count() * (self.cols_count() - 1)) as f64).sqrt()
            }
            None => f64::INFINITY,
        };

        let cur_density = self.density();

        if cur_density > row_del_density && col_del_density < row_del_density {
            let (i, sum) = min_row.unwrap();
            self.del_row(i, mat);
            self.total -= sum;
            true
        } else if cur_density > col_del_density && row_del_density < col_del_density {
            let (j, sum) = min_col.unwrap();
            self.del_col(j, mat);
            self.total -= sum;
            true
        } else {
            false
        }
    }

    /// Multiplies `total`, every `rows_sum`, and every `cols_sum` by
    /// `gamma`. Callers must decay the backing sketch row by the same
    /// factor in lockstep, or the caches drift from `M`.
    pub fn decay(&mut self, gamma: f64) {
        self.total *= gamma;
        for &i in &self.row_list {
            self.rows_sum[i] *= gamma;
        }
        for &j in &self.col_list {
            self.cols_sum[j] *= gamma;
        }
    }

    /// Mean of the neighborhood of `(i, j)` within the tracked submatrix:
    /// the sum of column `j` over `R` plus row `i` over `C`, averaged over
    /// `|R| + |C|` (minus one, and minus the doubly-counted cell, if
    /// `(i, j)` is itself already a member of both).
    pub fn likelihood(&self, i: usize, j: usize, mat: &[f64]) -> f64 {
        let mut score: f64 = self.row_list.iter().map(|&r| mat[self.idx(r, j)]).sum();
        score += self
            .col_list
            .iter()
            .map(|&c| mat[self.idx(i, c)])
            .sum::<f64>();

        let mut ctr = self.rows_count() + self.cols_count();
        if self.row_present[i] && self.col_present[j] {
            score -= mat[self.idx(i, j)];
            ctr -= 1;
        }

        if ctr == 0 {
            0.0
        } else {
            score / ctr as f64
        }
    }
}
