use crate::detector::{Detector, EdgeEvent};
use crate::error::AnomalyError;
use crate::sketch::Sketch;
use crate::submatrix::Submatrix;

/// Scores a single edge against `D` incrementally maintained densest
/// submatrices per sketch row, rather than recomputing a grow from
/// scratch on every call (as [`crate::detector::GlobalEdge`] does).
///
/// The submatrices are not touched by `learn_one` — they are only grown
/// or shrunk during `score_one`, in lockstep with the edge that
/// `learn_one` just inserted into the sketch. This coupling is what makes
/// `check_and_add`'s "both endpoints already present" branch (which bumps
/// caches by exactly 1 rather than restructuring) correct: by the time
/// `score_one` runs, the sketch row already reflects the new edge.
pub struct LocalEdge {
    sketch: Sketch,
    decay: f64,
    last_time: i64,
    num_submatrices: usize,
    densest: Vec<Vec<Submatrix>>,
}

impl LocalEdge {
    pub fn new(
        rows: usize,
        buckets: usize,
        decay: f64,
        num_submatrices: usize,
    ) -> Result<Self, AnomalyError> {
        Self::with_seed(rows, buckets, decay, num_submatrices, None)
    }

    /// Like [`LocalEdge::new`], but with deterministic hash coefficients.
    pub fn with_seed(
        rows: usize,
        buckets: usize,
        decay: f64,
        num_submatrices: usize,
        seed: Option<u64>,
    ) -> Result<Self, AnomalyError> {
        if rows == 0 {
            return Err(AnomalyError::InvalidRows(rows));
        }
        if buckets == 0 {
            return Err(AnomalyError::InvalidBuckets(buckets));
        }
        if !(decay > 0.0 && decay <= 1.0) {
            return Err(AnomalyError::InvalidDecay(decay));
        }
        if num_submatrices == 0 || num_submatrices > buckets {
            return Err(AnomalyError::InvalidSubmatrixCount(num_submatrices));
        }

        let densest = (0..rows)
            .map(|_| {
                (0..num_submatrices)
                    .map(|k| Submatrix::new(buckets, k, k, 0.0))
                    .collect()
            })
            .collect();

        Ok(LocalEdge {
            sketch: Sketch::new(rows, buckets, seed),
            decay,
            last_time: 0,
            num_submatrices,
            densest,
        })
    }

    pub fn rows(&self) -> usize {
        self.sketch.rows()
    }

    pub fn buckets(&self) -> usize {
        self.sketch.buckets()
    }
}

impl Detector for LocalEdge {
    type Event = EdgeEvent;

    fn learn_one(&mut self, event: &EdgeEvent) {
        if event.time > self.last_time {
            self.sketch.decay(self.decay);
            for row in self.densest.iter_mut() {
                for submatrix in row.iter_mut() {
                    submatrix.decay(self.decay);
                }
            }
        }
        self.last_time = event.time;
        self.sketch.insert(event.src, event.dst, 1.0);
    }

    fn score_one(&mut self, event: &EdgeEvent) -> f64 {
        let mut min_score = f64::INFINITY;
        for i in 0..self.sketch.rows() {
            let u = self.sketch.hash(event.src, i);
            let v = self.sketch.hash(event.dst, i);
            let mat = self.sketch.row(i);

            let mut row_score = 0.0;
            for k in 0..self.num_submatrices {
                let submatrix = &mut self.densest[i][k];
                if submatrix.check_and_add(u, v, mat) {
                    while submatrix.check_and_del(mat) {}
                }
                row_score += submatrix.likelihood(u, v, mat);
            }
            min_score = min_score.min(row_score);
        }
        min_score
    }
}
