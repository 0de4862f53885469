use crate::density::global_density;
use crate::detector::{Detector, EdgeEvent};
use crate::error::AnomalyError;
use crate::sketch::Sketch;

/// Scores a single edge by the density of the densest subgraph of recent
/// activity that contains it, aggregated across sketch rows by minimum.
///
/// Maintains no state beyond the sketch itself: each score is a fresh
/// greedy grow from the hashed `(src, dst)` cell over that row (C4).
pub struct GlobalEdge {
    sketch: Sketch,
    decay: f64,
    last_time: i64,
}

impl GlobalEdge {
    pub fn new(rows: usize, buckets: usize, decay: f64) -> Result<Self, AnomalyError> {
        Self::with_seed(rows, buckets, decay, None)
    }

    /// Like [`GlobalEdge::new`], but with deterministic hash coefficients.
    pub fn with_seed(
        rows: usize,
        buckets: usize,
        decay: f64,
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
        Ok(GlobalEdge {
            sketch: Sketch::new(rows, buckets, seed),
            decay,
            last_time: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.sketch.rows()
    }

    pub fn buckets(&self) -> usize {
        self.sketch.buckets()
    }
}

impl Detector for GlobalEdge {
    type Event = EdgeEvent;

    fn learn_one(&mut self, event: &EdgeEvent) {
        if event.time > self.last_time {
            self.sketch.decay(self.decay);
        }
        self.last_time = event.time;
        self.sketch.insert(event.src, event.dst, 1.0);
    }

    fn score_one(&mut self, event: &EdgeEvent) -> f64 {
        let mut min_score = f64::INFINITY;
        for i in 0..self.sketch.rows() {
            let u = self.sketch.hash(event.src, i);
            let v = self.sketch.hash(event.dst, i);
            let density = global_density(self.sketch.row(i), self.sketch.buckets(), u, v);
            min_score = min_score.min(density);
        }
        min_score
    }
}
