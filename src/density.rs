//! Dense-subgraph density estimators operating on one `B×B` sketch row.
//!
//! Both kernels here are pure functions of a flat row slice (as produced
//! by [`crate::sketch::Sketch::row`]) — they hold no state of their own,
//! matching the "submatrices take `M` as an explicit parameter" resource
//! policy in the design notes.

mod global;
mod graph;

pub use global::global_density;
pub use graph::{peel_density, topk_density};
