//! Façades wiring the hash family, sketch, submatrices, and density
//! kernels behind a uniform `learn_one`/`score_one` contract.

mod batch_graph;
mod global_edge;
mod local_edge;

pub use batch_graph::BatchGraph;
pub use global_edge::GlobalEdge;
pub use local_edge::LocalEdge;

/// A single time-stamped directed edge observation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EdgeEvent {
    pub src: u64,
    pub dst: u64,
    pub time: i64,
}

/// A whole edge list representing one graph snapshot.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BatchEvent {
    pub src: Vec<u64>,
    pub dst: Vec<u64>,
}

/// The scoring method for [`BatchGraph::score_one`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BatchMethod {
    /// Greedy peeling density over the whole row.
    Normal,
    /// Top-K seeded greedy grow, seeded from the `k` largest cells.
    TopK(usize),
}

/// The common scoring contract shared by the edge-level detectors.
///
/// `BatchGraph` does not implement this trait: its `score_one` takes an
/// extra `method` argument and can fail validation (see
/// [`BatchGraph::score_one`]), so it exposes an inherent method instead
/// rather than forcing a fallible, multi-argument shape onto every
/// detector.
pub trait Detector {
    type Event;

    /// Folds one observation into the detector's state. Never fails.
    fn learn_one(&mut self, event: &Self::Event);

    /// Scores one observation against the current state. Never fails.
    fn score_one(&mut self, event: &Self::Event) -> f64;
}
