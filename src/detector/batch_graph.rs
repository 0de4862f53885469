use crate::density::{peel_density, topk_density};
use crate::detector::{BatchEvent, BatchMethod};
use crate::error::AnomalyError;
use crate::sketch::Sketch;

/// Scores a whole edge list (one graph snapshot) rather than a single
/// edge, by loading it wholesale into a freshly-cleared sketch and
/// running a whole-row density kernel (C5) over every sketch row.
///
/// Unlike [`crate::detector::GlobalEdge`] and [`crate::detector::LocalEdge`],
/// `BatchGraph` carries no time-decay state: a batch call always replaces
/// whatever was previously in the sketch, so there is nothing to decay
/// between calls.
pub struct BatchGraph {
    sketch: Sketch,
}

impl BatchGraph {
    pub fn new(rows: usize, buckets: usize) -> Result<Self, AnomalyError> {
        Self::with_seed(rows, buckets, None)
    }

    /// Like [`BatchGraph::new`], but with deterministic hash coefficients.
    pub fn with_seed(rows: usize, buckets: usize, seed: Option<u64>) -> Result<Self, AnomalyError> {
        if rows == 0 {
            return Err(AnomalyError::InvalidRows(rows));
        }
        if buckets == 0 {
            return Err(AnomalyError::InvalidBuckets(buckets));
        }
        Ok(BatchGraph {
            sketch: Sketch::new(rows, buckets, seed),
        })
    }

    pub fn rows(&self) -> usize {
        self.sketch.rows()
    }

    pub fn buckets(&self) -> usize {
        self.sketch.buckets()
    }

    /// No-op: a batch detector has no running state to fold an event into
    /// between calls to `score_one`.
    pub fn learn_one(&mut self, _event: &BatchEvent) {}

    /// Clears the sketch, inserts every edge of `batch`, then scores the
    /// whole snapshot by `method`, aggregating across sketch rows by
    /// minimum.
    ///
    /// Fails with [`AnomalyError::InvalidK`] if `method` is
    /// `BatchMethod::TopK(k)` with `k` outside `[1, buckets^2]`.
    pub fn score_one(&mut self, batch: &BatchEvent, method: BatchMethod) -> Result<f64, AnomalyError> {
        if let BatchMethod::TopK(k) = method {
            let max_k = self.sketch.buckets() * self.sketch.buckets();
            if k == 0 || k > max_k {
                return Err(AnomalyError::InvalidK(k));
            }
        }

        self.sketch.clear();
        for p in 0..batch.src.len() {
            self.sketch.insert(batch.src[p], batch.dst[p], 1.0);
        }

        let buckets = self.sketch.buckets();
        let mut min_score = f64::INFINITY;
        for i in 0..self.sketch.rows() {
            let row = self.sketch.row(i);
            let density = match method {
                BatchMethod::Normal => peel_density(row, buckets),
                BatchMethod::TopK(k) => topk_density(row, buckets, k),
            };
            min_score = min_score.min(density);
        }
        Ok(min_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(edges: &[(u64, u64)]) -> BatchEvent {
        BatchEvent {
            src: edges.iter().map(|&(s, _)| s).collect(),
            dst: edges.iter().map(|&(_, d)| d).collect(),
        }
    }

    #[test]
    fn rejects_zero_rows_or_buckets() {
        assert_eq!(
            BatchGraph::new(0, 4).unwrap_err(),
            AnomalyError::InvalidRows(0)
        );
        assert_eq!(
            BatchGraph::new(2, 0).unwrap_err(),
            AnomalyError::InvalidBuckets(0)
        );
    }

    #[test]
    fn normal_scores_dense_block() {
        let mut d = BatchGraph::with_seed(2, 4096, Some(7)).unwrap();
        let b = batch(&[(1, 2), (1, 3), (4, 2), (4, 3)]);
        let score = d.score_one(&b, BatchMethod::Normal).unwrap();
        assert_eq!(score, 4.0 / 2.0);
    }

    #[test]
    fn topk_rejects_k_out_of_range() {
        let mut d = BatchGraph::with_seed(1, 4, Some(1)).unwrap();
        let b = batch(&[(1, 2)]);
        assert_eq!(
            d.score_one(&b, BatchMethod::TopK(0)).unwrap_err(),
            AnomalyError::InvalidK(0)
        );
        assert_eq!(
            d.score_one(&b, BatchMethod::TopK(17)).unwrap_err(),
            AnomalyError::InvalidK(17)
        );
    }

    #[test]
    fn topk_matches_normal_on_simple_dense_block() {
        let mut d = BatchGraph::with_seed(2, 4096, Some(9)).unwrap();
        let b = batch(&[(1, 2), (1, 3), (4, 2), (4, 3)]);
        let normal = d.score_one(&b, BatchMethod::Normal).unwrap();
        let topk = d.score_one(&b, BatchMethod::TopK(1)).unwrap();
        assert_eq!(normal, topk);
    }

    #[test]
    fn clearing_between_batches_drops_the_previous_snapshot() {
        let mut d = BatchGraph::with_seed(1, 4096, Some(2)).unwrap();
        let first = batch(&[(1, 2), (1, 3), (4, 2), (4, 3)]);
        d.score_one(&first, BatchMethod::Normal).unwrap();

        let second = batch(&[(9, 10)]);
        let score = d.score_one(&second, BatchMethod::Normal).unwrap();
        assert_eq!(score, 1.0);
    }
}
