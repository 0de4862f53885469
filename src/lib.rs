//! A streaming anomaly-scoring engine for dynamic graphs, built on a
//! count-min sketch of dense submatrices (CMSM).
//!
//! Edges observed over time are folded into a small set of hashed
//! `buckets x buckets` count matrices ([`sketch::Sketch`]); anomaly
//! scores are the density of the densest dense subgraph containing the
//! edge or batch under scrutiny, estimated over those matrices rather
//! than the (unbounded) true graph. Three detector façades cover the
//! supported workloads: [`detector::GlobalEdge`] and
//! [`detector::LocalEdge`] score one edge at a time against a decaying
//! stream, and [`detector::BatchGraph`] scores a whole snapshot's edge
//! list at once.

pub mod density;
pub mod detector;
pub mod error;
pub mod hash;
pub mod sketch;
pub mod submatrix;

pub use detector::{BatchEvent, BatchGraph, BatchMethod, Detector, EdgeEvent, GlobalEdge, LocalEdge};
pub use error::AnomalyError;
pub use hash::HashFamily;
pub use sketch::Sketch;
pub use submatrix::Submatrix;
